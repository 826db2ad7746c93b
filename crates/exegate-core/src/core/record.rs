// exegate-core/src/core/record.rs
// ============================================================================
// Module: Exegate Execution Record
// Description: Immutable outcome snapshot for one completed operation.
// Purpose: Capture success or failure exactly once, for idempotent persistence.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! An execution record is produced once per completed operation, success or
//! caught failure, and is immutable after construction. Ownership passes to
//! the caller of the request runner, which may forward it to a store keyed on
//! `(tenant_id, envelope_id)`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::EnvelopeId;
use crate::core::identifiers::TenantId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Unit-of-Work Errors
// ============================================================================

/// Business failure reported by a unit of work.
///
/// The runner captures these into the execution record instead of propagating
/// them. `kind` is a stable caller-chosen label surfaced as the record's
/// `error_type`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct WorkError {
    /// Stable error classification label.
    pub kind: String,
    /// Human-readable failure description.
    pub message: String,
}

impl WorkError {
    /// Creates a unit-of-work error with a stable kind label.
    #[must_use]
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// SECTION: Execution Result
// ============================================================================

/// Outcome payload for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Whether the unit of work completed without error.
    pub ok: bool,
    /// Result data on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Stable error classification on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Failure description on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Builds a success result.
    #[must_use]
    pub const fn success(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error_type: None,
            error: None,
        }
    }

    /// Builds a failure result from a captured unit-of-work error.
    #[must_use]
    pub fn failure(error: &WorkError) -> Self {
        Self {
            ok: false,
            data: None,
            error_type: Some(error.kind.clone()),
            error: Some(error.message.clone()),
        }
    }
}

// ============================================================================
// SECTION: Execution Record
// ============================================================================

/// Immutable record of what occurred during one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Tenant the operation was bound to.
    pub tenant_id: TenantId,
    /// Envelope identifier, unique per tenant for idempotent inserts.
    pub envelope_id: EnvelopeId,
    /// Outcome payload.
    pub result: ExecutionResult,
    /// Record creation time.
    pub created_at: Timestamp,
}
