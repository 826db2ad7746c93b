// exegate-core/src/runtime/seal.rs
// ============================================================================
// Module: Exegate Envelope Seal
// Description: One-way transition from mutable ingress to sealed execution.
// Purpose: Gate execution on a present, consistent tenant binding.
// Dependencies: crate::core, crate::runtime::context
// ============================================================================

//! ## Overview
//! Sealing is the irreversible transition of an [`Envelope`] from mutable to
//! read-only. It requires a tenant identity on the envelope and, when the
//! identity context already carries a binding for this flow, that both agree
//! on the tenant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::envelope::Envelope;
use crate::core::envelope::SealError;
use crate::runtime::context::IdentityContext;

// ============================================================================
// SECTION: Seal
// ============================================================================

/// Seals the envelope for execution.
///
/// Preconditions: the envelope is still mutable and carries a tenant
/// identity; if `context` already has a tenant bound, the envelope tenant
/// must equal it. Postcondition: the envelope is sealed in place and every
/// field is read-only for all downstream readers.
///
/// # Errors
///
/// Returns [`SealError::AlreadySealed`] on a second seal attempt,
/// [`SealError::TenantContextMissing`] when no tenant is attached, and
/// [`SealError::TenantMismatch`] when the envelope tenant conflicts with the
/// bound tenant.
pub fn seal_envelope(envelope: &mut Envelope, context: &IdentityContext) -> Result<(), SealError> {
    if envelope.is_sealed() {
        return Err(SealError::AlreadySealed);
    }
    let Some(identity) = envelope.tenant_context() else {
        return Err(SealError::TenantContextMissing);
    };
    if let Ok(bound) = context.tenant()
        && bound.tenant_id != identity.tenant_id
    {
        return Err(SealError::TenantMismatch {
            envelope: identity.tenant_id.clone(),
            bound: bound.tenant_id.clone(),
        });
    }
    envelope.mark_sealed();
    Ok(())
}
