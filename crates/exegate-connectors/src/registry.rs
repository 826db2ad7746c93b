// exegate-connectors/src/registry.rs
// ============================================================================
// Module: Connector Registry
// Description: Name-keyed registry for connector implementations.
// Purpose: Resolve connector invocations by stable connector name.
// Dependencies: exegate-core
// ============================================================================

//! ## Overview
//! The registry maps stable connector names to implementations. Registration
//! is explicit and duplicate-free; lookup of an unregistered name is an
//! error, not a silent fallback. The registry performs no policy checks: the
//! gate authorizes an invocation before resolving it here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use exegate_core::Connector;
use exegate_core::ConnectorName;
use thiserror::Error;

use crate::null::NullConnector;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Connector registration and lookup errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Connector name was empty or whitespace.
    #[error("connector name must be a non-empty string")]
    EmptyName,
    /// A connector is already registered under this name.
    #[error("connector '{0}' is already registered")]
    Duplicate(ConnectorName),
    /// No connector is registered under this name.
    #[error("unknown connector '{0}'")]
    Unknown(ConnectorName),
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Name-keyed connector registry.
#[derive(Default)]
pub struct ConnectorRegistry {
    /// Connector implementations keyed by connector name.
    connectors: BTreeMap<String, Box<dyn Connector + Send + Sync>>,
}

impl ConnectorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: BTreeMap::new(),
        }
    }

    /// Registers a connector under its own reported name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] for blank names and
    /// [`RegistryError::Duplicate`] when the name is already taken.
    pub fn register(
        &mut self,
        connector: impl Connector + Send + Sync + 'static,
    ) -> Result<(), RegistryError> {
        let name = connector.name().trim().to_string();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.connectors.contains_key(&name) {
            return Err(RegistryError::Duplicate(ConnectorName::new(name)));
        }
        self.connectors.insert(name, Box::new(connector));
        Ok(())
    }

    /// Resolves a connector by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unknown`] when no connector carries the name.
    pub fn get(&self, name: &ConnectorName) -> Result<&(dyn Connector + Send + Sync), RegistryError> {
        self.connectors
            .get(name.as_str())
            .map(Box::as_ref)
            .ok_or_else(|| RegistryError::Unknown(name.clone()))
    }

    /// Returns all registered connector names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<ConnectorName> {
        self.connectors.keys().map(ConnectorName::new).collect()
    }

    /// Returns true when a connector is registered under the name.
    #[must_use]
    pub fn contains(&self, name: &ConnectorName) -> bool {
        self.connectors.contains_key(name.as_str())
    }
}

// ============================================================================
// SECTION: Bootstrap
// ============================================================================

/// Builds the default registry with the built-in `null` connector.
///
/// # Errors
///
/// Returns [`RegistryError`] when built-in registration fails.
pub fn default_registry() -> Result<ConnectorRegistry, RegistryError> {
    let mut registry = ConnectorRegistry::new();
    registry.register(NullConnector::new())?;
    Ok(registry)
}
