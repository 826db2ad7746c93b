// exegate-config/src/lib.rs
// ============================================================================
// Module: Exegate Config Library
// Description: Canonical config model and connector policy evaluation.
// Purpose: Single source of truth for exegate.toml semantics.
// Dependencies: exegate-core, serde, toml
// ============================================================================

//! ## Overview
//! `exegate-config` defines the configuration model for the Exegate gateway
//! kernel: the TOML loader with strict fail-closed validation, and the
//! connector allowlist, scope, and credential policies resolved
//! tenant-then-wildcard.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod policy;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use policy::*;
