// exegate-core/src/runtime/mod.rs
// ============================================================================
// Module: Exegate Runtime
// Description: Identity binding, sealing, authorization, and orchestration.
// Purpose: Enforce the kernel invariants around one logical operation.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime owns everything with real invariants: the operation-local
//! identity context store, the one-way envelope seal, the authorization
//! primitives, and the request runner that guarantees teardown on every exit
//! path.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod authz;
pub mod context;
pub mod runner;
pub mod seal;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditError;
pub use audit::AuditSink;
pub use audit::JsonLineAuditSink;
pub use audit::OperationAuditEvent;
pub use authz::AuthzError;
pub use authz::Permission;
pub use authz::ROLE_ADMIN;
pub use authz::ROLE_EDITOR;
pub use authz::ROLE_OPERATOR;
pub use authz::ROLE_SYSTEM;
pub use authz::ROLE_VIEWER;
pub use authz::require_permission;
pub use authz::require_role_in;
pub use authz::role_permissions;
pub use context::ContextError;
pub use context::ContextGuard;
pub use context::IdentityContext;
pub use runner::IngressError;
pub use runner::IngressRequest;
pub use runner::IngressRunner;
pub use seal::seal_envelope;
pub use store::InMemoryExecutionStore;
