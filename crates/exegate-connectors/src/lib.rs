// exegate-connectors/src/lib.rs
// ============================================================================
// Module: Exegate Connectors Library
// Description: Built-in connectors, registry, and the connector gate.
// Purpose: Route connector invocations by name behind policy checks.
// Dependencies: exegate-config, exegate-core
// ============================================================================

//! ## Overview
//! `exegate-connectors` provides the connector registry, the built-in `null`
//! and `echo` connectors, and the [`ConnectorGate`] that composes allowlist,
//! scope, and credential checks before any connector method runs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod echo;
pub mod gate;
pub mod null;
pub mod registry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use echo::ECHO_CONNECTOR_NAME;
pub use echo::EchoConnector;
pub use gate::ConnectorGate;
pub use gate::GateError;
pub use null::NULL_CONNECTOR_NAME;
pub use null::NullConnector;
pub use registry::ConnectorRegistry;
pub use registry::RegistryError;
pub use registry::default_registry;
