// exegate-store-sqlite/src/lib.rs
// ============================================================================
// Module: Exegate SQLite Store Library
// Description: Durable execution record store backed by SQLite.
// Purpose: Persist execution records with idempotent keyed inserts.
// Dependencies: exegate-core, rusqlite
// ============================================================================

//! ## Overview
//! `exegate-store-sqlite` implements the core
//! [`exegate_core::ExecutionStore`] interface over `SQLite`, making the
//! insert idempotent on `(tenant_id, envelope_id)` at the storage layer.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::MAX_RESULT_BYTES;
pub use store::SqliteExecutionStore;
pub use store::SqliteJournalMode;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteSyncMode;
