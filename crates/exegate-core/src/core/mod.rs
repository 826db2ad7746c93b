// exegate-core/src/core/mod.rs
// ============================================================================
// Module: Exegate Core Types
// Description: Data contracts for tenant-scoped execution.
// Purpose: Define identifiers, identity types, envelopes, and records.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types are pure data contracts. They carry no orchestration logic;
//! binding, sealing, and authorization live in [`crate::runtime`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod envelope;
pub mod identifiers;
pub mod identity;
pub mod record;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use envelope::Envelope;
pub use envelope::SealError;
pub use envelope::require_sealed;
pub use identifiers::ActorId;
pub use identifiers::ConnectorName;
pub use identifiers::EnvelopeId;
pub use identifiers::RoleName;
pub use identifiers::ScopeName;
pub use identifiers::TenantId;
pub use identity::ActorContext;
pub use identity::IdentityError;
pub use identity::TenantIdentity;
pub use identity::VerifiedClaims;
pub use record::ExecutionRecord;
pub use record::ExecutionResult;
pub use record::WorkError;
pub use time::Timestamp;
