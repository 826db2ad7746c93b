// exegate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Exegate Interfaces
// Description: Backend-agnostic interfaces for connectors and persistence.
// Purpose: Define the contract surfaces used by external collaborators.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how Exegate integrates with storage backends and
//! downstream connectors without embedding backend-specific details.
//! Connectors are stateless with respect to policy: they trust that the
//! connector gate has already authorized the call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::ActorId;
use crate::core::identifiers::EnvelopeId;
use crate::core::identifiers::ScopeName;
use crate::core::identifiers::TenantId;
use crate::core::record::ExecutionRecord;

// ============================================================================
// SECTION: Connector Interface
// ============================================================================

/// Runtime context passed into connectors for one invocation.
///
/// # Invariants
/// - Built from the already-bound identity context via
///   [`crate::runtime::IdentityContext::connector_context`]; tenant and actor
///   values never come from untrusted payload fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorContext {
    /// Tenant the invocation is scoped to.
    pub tenant_id: TenantId,
    /// Acting identity when known.
    pub actor_id: Option<ActorId>,
    /// Capability scopes granted to the actor.
    pub scopes: Option<Vec<ScopeName>>,
}

/// Connector invocation errors.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Connector reported an error.
    #[error("connector error: {0}")]
    Connector(String),
}

/// Uniform adapter to an external data source.
///
/// Connectors do not own governance: allowlist, scope, and credential checks
/// run in the gate before any connector method is invoked.
pub trait Connector: core::fmt::Debug {
    /// Returns the stable connector name used for registration and policy.
    fn name(&self) -> &str;

    /// Reports connector health as structured data.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError`] when the health probe fails.
    fn healthcheck(&self, ctx: &ConnectorContext) -> Result<Value, ConnectorError>;

    /// Fetches structured data for a query.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError`] when the fetch fails.
    fn fetch(&self, ctx: &ConnectorContext, query: &Value) -> Result<Value, ConnectorError>;
}

// ============================================================================
// SECTION: Execution Store
// ============================================================================

/// Execution store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("execution store io error: {0}")]
    Io(String),
    /// Store data is invalid.
    #[error("execution store invalid data: {0}")]
    Invalid(String),
    /// Store reported an error.
    #[error("execution store error: {0}")]
    Store(String),
}

/// Outcome of an execution record insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new row was written.
    Inserted,
    /// A record with the same `(tenant_id, envelope_id)` already existed;
    /// the insert was a no-op, not an error.
    Duplicate,
}

/// Persistence seam for execution records.
///
/// Implementations must make `insert` idempotent on
/// `(tenant_id, envelope_id)`.
pub trait ExecutionStore {
    /// Inserts a record, treating duplicates as a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    fn insert(&self, record: &ExecutionRecord) -> Result<InsertOutcome, StoreError>;

    /// Loads a record by tenant and envelope identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the read fails.
    fn get(
        &self,
        tenant_id: &TenantId,
        envelope_id: &EnvelopeId,
    ) -> Result<Option<ExecutionRecord>, StoreError>;
}

// ============================================================================
// SECTION: Best-Effort Persistence
// ============================================================================

/// Best-effort persistence outcome reported alongside a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistReceipt {
    /// Whether the record is durably stored (inserted or already present).
    pub persisted: bool,
    /// Failure detail when persistence did not succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Persists a record without letting storage failures abort the operation.
///
/// Persistence failures are reported as a flag on the receipt, never as an
/// error: a completed operation stays completed.
#[must_use]
pub fn persist_best_effort(store: &dyn ExecutionStore, record: &ExecutionRecord) -> PersistReceipt {
    match store.insert(record) {
        Ok(InsertOutcome::Inserted | InsertOutcome::Duplicate) => PersistReceipt {
            persisted: true,
            detail: None,
        },
        Err(err) => PersistReceipt {
            persisted: false,
            detail: Some(err.to_string()),
        },
    }
}
