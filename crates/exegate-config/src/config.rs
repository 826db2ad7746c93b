// exegate-config/src/config.rs
// ============================================================================
// Module: Exegate Configuration
// Description: Configuration loading and validation for the gateway kernel.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: exegate-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file once at process start, with
//! strict size and path limits. Malformed or oversized configuration fails
//! fast at load time, never per-request. Unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use exegate_core::ConnectorName;
use exegate_core::ScopeName;
use serde::Deserialize;
use thiserror::Error;

use crate::policy::ConnectorPolicy;
use crate::policy::CredentialRequirementPolicy;
use crate::policy::CredentialStore;
use crate::policy::WILDCARD_TENANT;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "exegate.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "EXEGATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of tenant entries per policy map.
pub(crate) const MAX_TENANT_ENTRIES: usize = 1024;
/// Maximum number of connectors per tenant entry.
pub(crate) const MAX_CONNECTORS_PER_ENTRY: usize = 128;
/// Maximum number of scopes per connector.
pub(crate) const MAX_SCOPES_PER_CONNECTOR: usize = 64;
/// Maximum length of a tenant, connector, or scope name.
pub(crate) const MAX_NAME_LENGTH: usize = 128;
/// Maximum length of a credential secret reference.
pub(crate) const MAX_SECRET_REF_LENGTH: usize = 512;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Exegate gateway configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Connector allowlist and scope policy.
    #[serde(default)]
    pub connectors: ConnectorsConfig,
    /// Credential requirement and reference configuration.
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl GatewayConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path argument wins, then the `EXEGATE_CONFIG` environment
    /// variable, then `exegate.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.connectors.validate()?;
        self.credentials.validate()?;
        Ok(())
    }

    /// Builds the connector allowlist and scope policy.
    #[must_use]
    pub fn connector_policy(&self) -> ConnectorPolicy {
        ConnectorPolicy::new(
            self.connectors.allowlist.clone(),
            self.connectors.required_scopes.clone(),
        )
    }

    /// Builds the credential requirement policy.
    #[must_use]
    pub fn credential_requirements(&self) -> CredentialRequirementPolicy {
        CredentialRequirementPolicy::new(self.credentials.required.clone())
    }

    /// Builds the credential reference store.
    #[must_use]
    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::new(self.credentials.references.clone())
    }
}

/// Connector policy configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectorsConfig {
    /// Per-tenant connector allowlist keyed by tenant id or `"*"`.
    #[serde(default)]
    pub allowlist: Option<BTreeMap<String, BTreeSet<ConnectorName>>>,
    /// Required scopes per connector.
    #[serde(default)]
    pub required_scopes: Option<BTreeMap<ConnectorName, Vec<ScopeName>>>,
}

impl ConnectorsConfig {
    /// Validates connector policy configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(allowlist) = &self.allowlist {
            validate_tenant_map_size("connectors.allowlist", allowlist.len())?;
            for (tenant, connectors) in allowlist {
                validate_tenant_key("connectors.allowlist", tenant)?;
                if connectors.len() > MAX_CONNECTORS_PER_ENTRY {
                    return Err(ConfigError::Invalid(format!(
                        "connectors.allowlist['{tenant}'] exceeds {MAX_CONNECTORS_PER_ENTRY} connectors"
                    )));
                }
                for connector in connectors {
                    validate_name("connectors.allowlist connector", connector.as_str())?;
                }
            }
        }
        if let Some(required_scopes) = &self.required_scopes {
            validate_tenant_map_size("connectors.required_scopes", required_scopes.len())?;
            for (connector, scopes) in required_scopes {
                validate_name("connectors.required_scopes connector", connector.as_str())?;
                if scopes.len() > MAX_SCOPES_PER_CONNECTOR {
                    return Err(ConfigError::Invalid(format!(
                        "connectors.required_scopes['{connector}'] exceeds {MAX_SCOPES_PER_CONNECTOR} scopes"
                    )));
                }
                for scope in scopes {
                    validate_name("connectors.required_scopes scope", scope.as_str())?;
                }
            }
        }
        Ok(())
    }
}

/// Credential policy configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsConfig {
    /// Connectors requiring credentials, keyed by tenant id or `"*"`.
    #[serde(default)]
    pub required: Option<BTreeMap<String, BTreeSet<ConnectorName>>>,
    /// Credential references per tenant and connector.
    #[serde(default)]
    pub references: Option<BTreeMap<String, BTreeMap<ConnectorName, String>>>,
}

impl CredentialsConfig {
    /// Validates credential configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(required) = &self.required {
            validate_tenant_map_size("credentials.required", required.len())?;
            for (tenant, connectors) in required {
                validate_tenant_key("credentials.required", tenant)?;
                if connectors.len() > MAX_CONNECTORS_PER_ENTRY {
                    return Err(ConfigError::Invalid(format!(
                        "credentials.required['{tenant}'] exceeds {MAX_CONNECTORS_PER_ENTRY} connectors"
                    )));
                }
                for connector in connectors {
                    validate_name("credentials.required connector", connector.as_str())?;
                }
            }
        }
        if let Some(references) = &self.references {
            validate_tenant_map_size("credentials.references", references.len())?;
            for (tenant, entries) in references {
                validate_tenant_key("credentials.references", tenant)?;
                if entries.len() > MAX_CONNECTORS_PER_ENTRY {
                    return Err(ConfigError::Invalid(format!(
                        "credentials.references['{tenant}'] exceeds {MAX_CONNECTORS_PER_ENTRY} connectors"
                    )));
                }
                for (connector, reference) in entries {
                    validate_name("credentials.references connector", connector.as_str())?;
                    if reference.len() > MAX_SECRET_REF_LENGTH {
                        return Err(ConfigError::Invalid(format!(
                            "credentials.references['{tenant}']['{connector}'] exceeds max length"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a tenant-keyed map against the entry-count limit.
fn validate_tenant_map_size(field: &str, entries: usize) -> Result<(), ConfigError> {
    if entries > MAX_TENANT_ENTRIES {
        return Err(ConfigError::Invalid(format!("{field} exceeds {MAX_TENANT_ENTRIES} entries")));
    }
    Ok(())
}

/// Validates a tenant map key: non-empty, bounded, or the wildcard.
fn validate_tenant_key(field: &str, key: &str) -> Result<(), ConfigError> {
    if key == WILDCARD_TENANT {
        return Ok(());
    }
    validate_name(field, key)
}

/// Validates a name value: non-empty and within the length limit.
fn validate_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds {MAX_NAME_LENGTH} characters")));
    }
    Ok(())
}
