// exegate-core/src/runtime/context.rs
// ============================================================================
// Module: Exegate Identity Context Store
// Description: Operation-local tenant and actor binding with write-once semantics.
// Purpose: Isolate the identity binding of one operation from all others.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Each logical operation owns its own [`IdentityContext`] value: the binding
//! is explicitly threaded through the call chain rather than stored in any
//! process-wide slot, so two concurrent operations can never observe or
//! overwrite each other's tenant or actor. Binding is write-once per
//! operation; [`ContextGuard`] guarantees teardown on every exit path,
//! including panics unwinding out of a unit of work.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::ScopeName;
use crate::core::identifiers::TenantId;
use crate::core::identity::ActorContext;
use crate::core::identity::TenantIdentity;
use crate::interfaces::ConnectorContext;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Identity context contract violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// A read was attempted outside a bound operation.
    #[error("identity context is not bound")]
    NotBound,
    /// A re-bind targeted a different tenant than the one already bound.
    #[error("identity context already bound to tenant '{bound}'; refusing re-bind to '{requested}'")]
    TenantMismatch {
        /// Tenant currently bound.
        bound: TenantId,
        /// Tenant the re-bind attempted to install.
        requested: TenantId,
    },
}

// ============================================================================
// SECTION: Identity Context
// ============================================================================

/// Installed tenant and actor state for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    /// Tenant bound for the operation.
    tenant: TenantIdentity,
    /// Actor bound for the operation.
    actor: ActorContext,
}

/// Operation-local identity store holding the current tenant and actor.
///
/// # Invariants
/// - Binding is write-once per operation: a re-bind to a different tenant is
///   rejected, a re-bind to the same tenant is a no-op.
/// - The value is owned by exactly one operation; it is never shared across
///   concurrently executing operations.
#[derive(Debug, Default)]
pub struct IdentityContext {
    /// Current binding, when one exists.
    binding: Option<Binding>,
}

impl IdentityContext {
    /// Creates an unbound identity context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            binding: None,
        }
    }

    /// Installs the tenant and actor binding for the current operation.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::TenantMismatch`] when a different tenant is
    /// already bound. Re-binding the same tenant is a no-op.
    pub fn bind(
        &mut self,
        tenant: TenantIdentity,
        actor: ActorContext,
    ) -> Result<(), ContextError> {
        if let Some(existing) = &self.binding {
            if existing.tenant.tenant_id == tenant.tenant_id {
                return Ok(());
            }
            return Err(ContextError::TenantMismatch {
                bound: existing.tenant.tenant_id.clone(),
                requested: tenant.tenant_id,
            });
        }
        self.binding = Some(Binding {
            tenant,
            actor,
        });
        Ok(())
    }

    /// Returns the bound tenant identity.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::NotBound`] outside a bound operation.
    pub fn tenant(&self) -> Result<&TenantIdentity, ContextError> {
        self.binding.as_ref().map(|binding| &binding.tenant).ok_or(ContextError::NotBound)
    }

    /// Returns the bound actor context.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::NotBound`] outside a bound operation.
    pub fn actor(&self) -> Result<&ActorContext, ContextError> {
        self.binding.as_ref().map(|binding| &binding.actor).ok_or(ContextError::NotBound)
    }

    /// Returns true while a binding is installed.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Clears the binding unconditionally. Safe on unbound or partially
    /// bound state.
    pub fn unbind(&mut self) {
        self.binding = None;
    }

    /// Builds a connector invocation context from the bound identity.
    ///
    /// Scopes come from verified claims, never from the payload; tenant and
    /// actor always come from the binding itself.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::NotBound`] outside a bound operation.
    pub fn connector_context(
        &self,
        scopes: Option<Vec<ScopeName>>,
    ) -> Result<ConnectorContext, ContextError> {
        let binding = self.binding.as_ref().ok_or(ContextError::NotBound)?;
        Ok(ConnectorContext {
            tenant_id: binding.tenant.tenant_id.clone(),
            actor_id: Some(binding.actor.user_id.clone()),
            scopes,
        })
    }
}

// ============================================================================
// SECTION: Teardown Guard
// ============================================================================

/// RAII guard that unbinds the identity context when dropped.
///
/// The runner holds one of these around the unit of work so teardown runs on
/// success, business failure, and unwind alike, in LIFO order relative to
/// setup.
#[derive(Debug)]
pub struct ContextGuard<'a> {
    /// Context cleared on drop.
    context: &'a mut IdentityContext,
}

impl<'a> ContextGuard<'a> {
    /// Binds the context and arms the teardown guard.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::TenantMismatch`] when a conflicting binding
    /// already exists; the guard is not armed in that case.
    pub fn bind(
        context: &'a mut IdentityContext,
        tenant: TenantIdentity,
        actor: ActorContext,
    ) -> Result<Self, ContextError> {
        context.bind(tenant, actor)?;
        Ok(Self {
            context,
        })
    }

    /// Returns the bound context for reads within the operation.
    #[must_use]
    pub fn scope(&self) -> &IdentityContext {
        self.context
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        self.context.unbind();
    }
}
