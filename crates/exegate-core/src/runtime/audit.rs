// exegate-core/src/runtime/audit.rs
// ============================================================================
// Module: Exegate Audit Logging
// Description: Structured audit events for completed operations.
// Purpose: Emit redacted audit records without hard logging dependencies.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! This module defines the audit event payload and sink seam for operation
//! logging. It is intentionally lightweight so deployments can route events
//! to their preferred logging pipeline without redesign. Events carry
//! identifiers and outcome labels only, never payload data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::EnvelopeId;
use crate::core::identifiers::TenantId;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Audit event emitted once per completed operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Tenant the operation was bound to.
    pub tenant_id: TenantId,
    /// Envelope identifier of the operation.
    pub envelope_id: EnvelopeId,
    /// Whether the unit of work succeeded.
    pub ok: bool,
    /// Captured error classification on failure.
    pub error_type: Option<String>,
}

impl OperationAuditEvent {
    /// Builds a completed-operation event stamped with the current time.
    #[must_use]
    pub fn completed(
        tenant_id: TenantId,
        envelope_id: EnvelopeId,
        ok: bool,
        error_type: Option<String>,
    ) -> Self {
        Self {
            event: "operation_completed",
            timestamp_ms: now_millis(),
            tenant_id,
            envelope_id,
            ok,
            error_type,
        }
    }
}

/// Returns milliseconds since the unix epoch.
fn now_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_millis())
}

// ============================================================================
// SECTION: Sink
// ============================================================================

/// Audit sink errors.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Event serialization failed.
    #[error("audit serialization error: {0}")]
    Serialize(String),
    /// Writing to the sink failed.
    #[error("audit io error: {0}")]
    Io(String),
    /// The sink mutex was poisoned.
    #[error("audit sink mutex poisoned")]
    Poisoned,
}

/// Destination for audit events.
pub trait AuditSink {
    /// Writes one audit event.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when the event cannot be serialized or written.
    fn write(&self, event: &OperationAuditEvent) -> Result<(), AuditError>;
}

/// JSON-lines audit sink over any writer.
pub struct JsonLineAuditSink {
    /// Writer protected for concurrent event emission.
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonLineAuditSink {
    /// Wraps a writer in a JSON-lines sink.
    #[must_use]
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Opens an append-mode file sink at the given path.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be opened or created.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl AuditSink for JsonLineAuditSink {
    fn write(&self, event: &OperationAuditEvent) -> Result<(), AuditError> {
        let line =
            serde_json::to_string(event).map_err(|err| AuditError::Serialize(err.to_string()))?;
        let mut guard = self.writer.lock().map_err(|_| AuditError::Poisoned)?;
        guard
            .write_all(line.as_bytes())
            .and_then(|()| guard.write_all(b"\n"))
            .map_err(|err| AuditError::Io(err.to_string()))
    }
}
