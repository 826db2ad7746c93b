// exegate-core/src/runtime/runner.rs
// ============================================================================
// Module: Exegate Request Runner
// Description: Canonical orchestration for one tenant-scoped operation.
// Purpose: Validate, seal, bind, execute, and tear down in one place.
// Dependencies: crate::core, crate::runtime, rand, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The runner is the canonical end-to-end path for executing tenant-scoped
//! work: raw input becomes a sealed [`Envelope`], the identity context is
//! bound exactly once, the unit of work runs inside that binding, and
//! teardown is guaranteed on every exit path. Payload and contract errors
//! are returned to the caller before any record exists; unit-of-work
//! failures are captured into the [`ExecutionRecord`] instead of propagating.
//! The runner never retries, and it is the only place permitted to bind or
//! unbind identity context for an operation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::envelope::Envelope;
use crate::core::envelope::SealError;
use crate::core::identifiers::EnvelopeId;
use crate::core::identifiers::TenantId;
use crate::core::identity::IdentityError;
use crate::core::identity::TenantIdentity;
use crate::core::identity::VerifiedClaims;
use crate::core::record::ExecutionRecord;
use crate::core::record::ExecutionResult;
use crate::core::record::WorkError;
use crate::core::time::Timestamp;
use crate::runtime::audit::AuditSink;
use crate::runtime::audit::OperationAuditEvent;
use crate::runtime::context::ContextError;
use crate::runtime::context::ContextGuard;
use crate::runtime::context::IdentityContext;
use crate::runtime::seal::seal_envelope;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Ingress rejection errors returned before any record is constructed.
#[derive(Debug, Error)]
pub enum IngressError {
    /// Raw input was not a structured mapping or carried malformed fields.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    /// No tenant identifier was resolvable from claims or payload.
    #[error("missing tenant_id at ingress")]
    MissingTenantId,
    /// Payload and resolved tenant identifiers disagree.
    #[error("tenant_id mismatch: payload '{payload}' vs resolved '{resolved}'")]
    TenantMismatch {
        /// Tenant identifier embedded in the payload.
        payload: TenantId,
        /// Trusted, externally-resolved tenant identifier.
        resolved: TenantId,
    },
    /// Identity construction failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// Envelope seal contract violation.
    #[error(transparent)]
    Seal(#[from] SealError),
    /// Identity context contract violation.
    #[error(transparent)]
    Context(#[from] ContextError),
}

// ============================================================================
// SECTION: Request
// ============================================================================

/// One ingress request handed to the runner by the transport collaborator.
#[derive(Debug, Clone)]
pub struct IngressRequest {
    /// Raw external input; must be a JSON object.
    pub raw_input: Value,
    /// Verified actor claims supplied out-of-band.
    pub claims: VerifiedClaims,
    /// Trusted tenant resolution overriding `claims.tenant_id` when present.
    pub resolved_tenant_id: Option<TenantId>,
    /// Human-readable tenant name when known.
    pub tenant_name: Option<String>,
    /// Caller-supplied envelope identifier for idempotent persistence.
    pub envelope_id: Option<EnvelopeId>,
}

impl IngressRequest {
    /// Builds a request from raw input and verified claims.
    #[must_use]
    pub const fn new(raw_input: Value, claims: VerifiedClaims) -> Self {
        Self {
            raw_input,
            claims,
            resolved_tenant_id: None,
            tenant_name: None,
            envelope_id: None,
        }
    }

    /// Sets a trusted tenant resolution.
    #[must_use]
    pub fn with_resolved_tenant(mut self, tenant_id: impl Into<TenantId>) -> Self {
        self.resolved_tenant_id = Some(tenant_id.into());
        self
    }

    /// Sets a caller-supplied envelope identifier.
    #[must_use]
    pub fn with_envelope_id(mut self, envelope_id: impl Into<EnvelopeId>) -> Self {
        self.envelope_id = Some(envelope_id.into());
        self
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Meta key carrying the envelope identifier.
const META_ENVELOPE_ID: &str = "envelope_id";
/// Payload key carrying the tenant identifier.
const KEY_TENANT_ID: &str = "tenant_id";
/// Payload key carrying the optional tenant name.
const KEY_TENANT_NAME: &str = "tenant_name";
/// Payload key carrying an optional envelope identifier.
const KEY_ENVELOPE_ID: &str = "envelope_id";

/// Request runner orchestrating one tenant-scoped operation.
#[derive(Default)]
pub struct IngressRunner {
    /// Optional audit sink receiving one event per completed operation.
    audit: Option<Arc<dyn AuditSink + Send + Sync>>,
}

impl IngressRunner {
    /// Creates a runner without an audit sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            audit: None,
        }
    }

    /// Attaches an audit sink.
    #[must_use]
    pub fn with_audit(mut self, sink: Arc<dyn AuditSink + Send + Sync>) -> Self {
        self.audit = Some(sink);
        self
    }

    /// Runs a unit of work inside a fresh, operation-local identity context.
    ///
    /// # Errors
    ///
    /// Returns [`IngressError`] for payload rejections and contract
    /// violations; unit-of-work failures are captured into the returned
    /// record instead.
    pub fn run<F>(&self, request: IngressRequest, work: F) -> Result<ExecutionRecord, IngressError>
    where
        F: FnOnce(&IdentityContext) -> Result<Value, WorkError>,
    {
        let mut context = IdentityContext::new();
        self.run_with_context(&mut context, request, work)
    }

    /// Runs a unit of work inside a caller-supplied identity context.
    ///
    /// The context must be unbound, or bound to the same tenant the request
    /// resolves to. After this returns, the context is unbound again on
    /// every path.
    ///
    /// # Errors
    ///
    /// Returns [`IngressError`] for payload rejections and contract
    /// violations; unit-of-work failures are captured into the returned
    /// record instead.
    pub fn run_with_context<F>(
        &self,
        context: &mut IdentityContext,
        request: IngressRequest,
        work: F,
    ) -> Result<ExecutionRecord, IngressError>
    where
        F: FnOnce(&IdentityContext) -> Result<Value, WorkError>,
    {
        let IngressRequest {
            raw_input,
            claims,
            resolved_tenant_id,
            tenant_name,
            envelope_id,
        } = request;

        let Value::Object(mut input) = raw_input else {
            return Err(IngressError::InvalidPayload(
                "raw input must be a JSON object".to_string(),
            ));
        };

        let tenant_id =
            resolve_tenant(&input, resolved_tenant_id.or_else(|| claims.tenant_id.clone()))?;
        // Downstream always sees tenant_id in the envelope input.
        if !input.contains_key(KEY_TENANT_ID) {
            input.insert(KEY_TENANT_ID.to_string(), Value::String(tenant_id.as_str().to_string()));
        }

        let envelope_id = envelope_id
            .or_else(|| payload_string(&input, KEY_ENVELOPE_ID).map(EnvelopeId::new))
            .unwrap_or_else(generate_envelope_id);

        let identity = TenantIdentity::new(
            tenant_id.clone(),
            tenant_name.or_else(|| payload_string(&input, KEY_TENANT_NAME)),
        )?;

        let mut envelope = Envelope::new(input);
        envelope.attach_tenant(identity.clone())?;
        envelope.insert_meta(META_ENVELOPE_ID, Value::String(envelope_id.as_str().to_string()))?;
        seal_envelope(&mut envelope, context)?;

        let mut actor = claims.actor_context(BTreeMap::new());
        actor.add_metadata(META_ENVELOPE_ID, envelope_id.as_str());

        // Teardown is LIFO: the guard unbinds even if the work unwinds.
        let outcome = {
            let guard = ContextGuard::bind(context, identity, actor)?;
            work(guard.scope())
        };

        let result = match outcome {
            Ok(data) => ExecutionResult::success(data),
            Err(err) => ExecutionResult::failure(&err),
        };
        let record = ExecutionRecord {
            tenant_id,
            envelope_id,
            result,
            created_at: Timestamp::now(),
        };
        self.emit_audit(&record);
        Ok(record)
    }

    /// Emits a best-effort audit event for a completed operation.
    fn emit_audit(&self, record: &ExecutionRecord) {
        if let Some(sink) = &self.audit {
            let event = OperationAuditEvent::completed(
                record.tenant_id.clone(),
                record.envelope_id.clone(),
                record.result.ok,
                record.result.error_type.clone(),
            );
            // Audit failures never affect the operation outcome.
            let _ = sink.write(&event);
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the operation tenant from trusted resolution and payload.
///
/// A trusted binding wins over the payload; when both are present they must
/// match. An empty payload value counts as absent.
fn resolve_tenant(
    input: &Map<String, Value>,
    resolved: Option<TenantId>,
) -> Result<TenantId, IngressError> {
    let payload_tenant = match input.get(KEY_TENANT_ID) {
        None => None,
        Some(Value::String(raw)) if raw.trim().is_empty() => None,
        Some(Value::String(raw)) => Some(raw.as_str()),
        Some(_) => {
            return Err(IngressError::InvalidPayload("tenant_id must be a string".to_string()));
        }
    };
    match (resolved, payload_tenant) {
        (Some(trusted), Some(payload)) if trusted.as_str() != payload => {
            Err(IngressError::TenantMismatch {
                payload: TenantId::new(payload),
                resolved: trusted,
            })
        }
        (Some(trusted), _) => Ok(trusted),
        (None, Some(payload)) => Ok(TenantId::new(payload)),
        (None, None) => Err(IngressError::MissingTenantId),
    }
}

/// Reads an optional non-empty string field from the payload.
fn payload_string(input: &Map<String, Value>, key: &str) -> Option<String> {
    match input.get(key) {
        Some(Value::String(raw)) if !raw.trim().is_empty() => Some(raw.clone()),
        _ => None,
    }
}

/// Generates a fresh opaque envelope identifier (128-bit hex token).
fn generate_envelope_id() -> EnvelopeId {
    let token: u128 = rand::random();
    EnvelopeId::new(format!("{token:032x}"))
}
