// exegate-core/src/core/envelope.rs
// ============================================================================
// Module: Exegate Ingress Envelope
// Description: Mutable-then-sealed container for one operation's input.
// Purpose: Carry raw input and the tenant binding across the seal transition.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The envelope is mutable at ingress only. Once the tenant identity is
//! attached and the envelope is sealed, every field is read-only: mutators
//! fail with [`SealError::AlreadySealed`] and only accessor methods remain.
//! The seal transition itself lives in [`crate::runtime::seal_envelope`]
//! because it must consult the identity context store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::TenantId;
use crate::core::identity::TenantIdentity;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Seal contract violations.
///
/// These indicate kernel misuse by the caller and are surfaced, never retried
/// and never captured into an execution record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SealError {
    /// The envelope was already sealed; mutation and re-seal are refused.
    #[error("envelope is already sealed")]
    AlreadySealed,
    /// Seal was attempted without an attached tenant identity.
    #[error("envelope has no tenant context; cannot seal")]
    TenantContextMissing,
    /// The envelope tenant conflicts with the tenant already bound for this flow.
    #[error("envelope tenant '{envelope}' does not match bound tenant '{bound}'")]
    TenantMismatch {
        /// Tenant attached to the envelope.
        envelope: TenantId,
        /// Tenant already bound in the identity context.
        bound: TenantId,
    },
    /// The envelope must be sealed before execution may proceed.
    #[error("envelope must be sealed before execution")]
    NotSealed,
}

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// Ingress envelope carrying one operation's raw input and identity binding.
///
/// # Invariants
/// - Exactly one transition from mutable to sealed is permitted.
/// - `sealed == true` implies the tenant context is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Raw external input (request, event, payload).
    input: Map<String, Value>,
    /// Immutable tenant identity attached at ingress.
    tenant_context: Option<TenantIdentity>,
    /// System metadata (envelope id, trace info).
    meta: BTreeMap<String, Value>,
    /// Whether the one-way seal transition has occurred.
    sealed: bool,
}

impl Envelope {
    /// Creates a mutable envelope around raw input.
    #[must_use]
    pub fn new(input: Map<String, Value>) -> Self {
        Self {
            input,
            tenant_context: None,
            meta: BTreeMap::new(),
            sealed: false,
        }
    }

    /// Attaches the tenant identity. Permitted at ingress only.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::AlreadySealed`] once the envelope is sealed.
    pub fn attach_tenant(&mut self, identity: TenantIdentity) -> Result<(), SealError> {
        if self.sealed {
            return Err(SealError::AlreadySealed);
        }
        self.tenant_context = Some(identity);
        Ok(())
    }

    /// Inserts a metadata entry. Permitted at ingress only.
    ///
    /// # Errors
    ///
    /// Returns [`SealError::AlreadySealed`] once the envelope is sealed.
    pub fn insert_meta(&mut self, key: impl Into<String>, value: Value) -> Result<(), SealError> {
        if self.sealed {
            return Err(SealError::AlreadySealed);
        }
        self.meta.insert(key.into(), value);
        Ok(())
    }

    /// Returns the raw input mapping.
    #[must_use]
    pub const fn input(&self) -> &Map<String, Value> {
        &self.input
    }

    /// Returns the attached tenant identity, if any.
    #[must_use]
    pub const fn tenant_context(&self) -> Option<&TenantIdentity> {
        self.tenant_context.as_ref()
    }

    /// Returns the system metadata mapping.
    #[must_use]
    pub const fn meta(&self) -> &BTreeMap<String, Value> {
        &self.meta
    }

    /// Returns true once the envelope has been sealed.
    #[must_use]
    pub const fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Marks the envelope sealed. Callers go through
    /// [`crate::runtime::seal_envelope`], which checks the preconditions.
    pub(crate) const fn mark_sealed(&mut self) {
        self.sealed = true;
    }
}

// ============================================================================
// SECTION: Guards
// ============================================================================

/// Enforces that an envelope was sealed before execution.
///
/// # Errors
///
/// Returns [`SealError::NotSealed`] when the envelope is still mutable.
pub fn require_sealed(envelope: &Envelope) -> Result<(), SealError> {
    if envelope.is_sealed() {
        Ok(())
    } else {
        Err(SealError::NotSealed)
    }
}
