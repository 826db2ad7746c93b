// exegate-core/src/lib.rs
// ============================================================================
// Module: Exegate Core Library
// Description: Public API surface for the Exegate tenant execution kernel.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Exegate core provides the tenant-scoped execution kernel: an isolated
//! identity binding per operation, a mutable-then-sealed ingress envelope,
//! role- and scope-based authorization, and an execution record produced once
//! per completed operation. Transports and persistence backends integrate
//! through explicit interfaces rather than being embedded here.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::Connector;
pub use interfaces::ConnectorContext;
pub use interfaces::ConnectorError;
pub use interfaces::ExecutionStore;
pub use interfaces::InsertOutcome;
pub use interfaces::PersistReceipt;
pub use interfaces::StoreError;
pub use interfaces::persist_best_effort;
pub use runtime::AuditError;
pub use runtime::AuditSink;
pub use runtime::AuthzError;
pub use runtime::ContextError;
pub use runtime::ContextGuard;
pub use runtime::IdentityContext;
pub use runtime::InMemoryExecutionStore;
pub use runtime::IngressError;
pub use runtime::IngressRequest;
pub use runtime::IngressRunner;
pub use runtime::JsonLineAuditSink;
pub use runtime::OperationAuditEvent;
pub use runtime::Permission;
pub use runtime::require_permission;
pub use runtime::require_role_in;
pub use runtime::seal_envelope;
