// exegate-config/src/policy.rs
// ============================================================================
// Module: Connector Policy Evaluation
// Description: Allowlist, scope, and credential policies for connector access.
// Purpose: Provide deterministic, fail-closed connector authorization inputs.
// Dependencies: exegate-core, serde
// ============================================================================

//! ## Overview
//! Policy types evaluated before any connector is invoked. All per-tenant
//! maps resolve tenant-then-wildcard through [`for_tenant`]: an exact tenant
//! entry wins, otherwise the `"*"` entry applies, otherwise the axis has no
//! entry for that tenant. Once an allowlist exists, an unmatched tenant is
//! denied everything.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use exegate_core::ConnectorContext;
use exegate_core::ConnectorName;
use exegate_core::ScopeName;
use exegate_core::TenantId;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Wildcard Resolution
// ============================================================================

/// Map key matching any tenant without an exact entry.
pub const WILDCARD_TENANT: &str = "*";

/// Resolves a per-tenant map entry, falling back to the wildcard key.
///
/// This is the single implementation of the tenant-then-`"*"` lookup used by
/// every policy axis.
#[must_use]
pub fn for_tenant<'map, V>(map: &'map BTreeMap<String, V>, tenant_id: &TenantId) -> Option<&'map V> {
    map.get(tenant_id.as_str()).or_else(|| map.get(WILDCARD_TENANT))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Connector policy denial errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// The connector is not in the tenant's allowlist.
    #[error("connector '{connector}' is not enabled for tenant '{tenant_id}'")]
    NotEnabledForTenant {
        /// Connector that was requested.
        connector: ConnectorName,
        /// Tenant the request was scoped to.
        tenant_id: TenantId,
    },
    /// The caller lacks scopes the connector requires.
    #[error("connector '{connector}' requires missing scopes: [{}]",
        .missing.iter().map(ScopeName::as_str).collect::<Vec<_>>().join(", "))]
    MissingScopes {
        /// Connector that was requested.
        connector: ConnectorName,
        /// Required scopes absent from the granted set.
        missing: Vec<ScopeName>,
    },
}

// ============================================================================
// SECTION: Connector Policy
// ============================================================================

/// Allowlist and required-scope policy for connector access.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConnectorPolicy {
    /// Per-tenant connector allowlist; `None` means no restriction.
    #[serde(default)]
    pub allowlist: Option<BTreeMap<String, BTreeSet<ConnectorName>>>,
    /// Required scopes per connector; `None` means no scope requirements.
    #[serde(default)]
    pub required_scopes: Option<BTreeMap<ConnectorName, Vec<ScopeName>>>,
}

impl ConnectorPolicy {
    /// Builds a policy from explicit maps.
    #[must_use]
    pub const fn new(
        allowlist: Option<BTreeMap<String, BTreeSet<ConnectorName>>>,
        required_scopes: Option<BTreeMap<ConnectorName, Vec<ScopeName>>>,
    ) -> Self {
        Self {
            allowlist,
            required_scopes,
        }
    }

    /// Builds a policy with no restrictions on either axis.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self::new(None, None)
    }

    /// Returns the connectors the tenant may use, sorted by name.
    ///
    /// Without an allowlist every available connector is returned. With an
    /// allowlist, the tenant entry applies, else the wildcard entry, else
    /// nothing.
    #[must_use]
    pub fn allowed_connectors(
        &self,
        tenant_id: &TenantId,
        available: &[ConnectorName],
    ) -> Vec<ConnectorName> {
        let mut allowed: Vec<ConnectorName> = match &self.allowlist {
            None => available.to_vec(),
            Some(map) => for_tenant(map, tenant_id).map_or_else(Vec::new, |entry| {
                available.iter().filter(|name| entry.contains(*name)).cloned().collect()
            }),
        };
        allowed.sort();
        allowed
    }

    /// Returns the scopes required to use a connector.
    #[must_use]
    pub fn required_scopes(&self, connector: &ConnectorName) -> &[ScopeName] {
        self.required_scopes
            .as_ref()
            .and_then(|map| map.get(connector))
            .map_or(&[], Vec::as_slice)
    }

    /// Authorizes one connector invocation for a bound context.
    ///
    /// The enablement check runs first, then the scope check; the error
    /// lists every missing scope. A connector is enabled only when it is in
    /// [`Self::allowed_connectors`] for the tenant, so a connector absent
    /// from `available` is denied even without an allowlist.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when the connector is not enabled for the
    /// tenant or required scopes are missing.
    pub fn authorize(
        &self,
        connector: &ConnectorName,
        ctx: &ConnectorContext,
        available: &[ConnectorName],
    ) -> Result<(), PolicyError> {
        let enabled = available.contains(connector)
            && self.allowlist.as_ref().is_none_or(|map| {
                for_tenant(map, &ctx.tenant_id).is_some_and(|entry| entry.contains(connector))
            });
        if !enabled {
            return Err(PolicyError::NotEnabledForTenant {
                connector: connector.clone(),
                tenant_id: ctx.tenant_id.clone(),
            });
        }
        let granted: &[ScopeName] = ctx.scopes.as_deref().unwrap_or(&[]);
        let missing: Vec<ScopeName> = self
            .required_scopes(connector)
            .iter()
            .filter(|scope| !granted.contains(scope))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PolicyError::MissingScopes {
                connector: connector.clone(),
                missing,
            })
        }
    }
}

// ============================================================================
// SECTION: Credential Policies
// ============================================================================

/// Per-tenant credential requirement policy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CredentialRequirementPolicy {
    /// Connectors requiring credentials per tenant; `None` means none do.
    #[serde(default)]
    pub requirements: Option<BTreeMap<String, BTreeSet<ConnectorName>>>,
}

impl CredentialRequirementPolicy {
    /// Builds a requirement policy from an explicit map.
    #[must_use]
    pub const fn new(requirements: Option<BTreeMap<String, BTreeSet<ConnectorName>>>) -> Self {
        Self {
            requirements,
        }
    }

    /// Returns whether the connector requires configured credentials.
    #[must_use]
    pub fn requires_credentials(&self, tenant_id: &TenantId, connector: &ConnectorName) -> bool {
        self.requirements
            .as_ref()
            .and_then(|map| for_tenant(map, tenant_id))
            .is_some_and(|entry| entry.contains(connector))
    }
}

/// Resolved credential state for one tenant and connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialStatus {
    /// Whether a usable credential reference exists.
    pub configured: bool,
    /// Opaque secret reference when configured; never the secret itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<String>,
}

/// Per-tenant credential reference store.
///
/// # Invariants
/// - Holds opaque references (for example a vault path), never secret
///   material.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CredentialStore {
    /// Credential references per tenant and connector.
    #[serde(default)]
    pub references: Option<BTreeMap<String, BTreeMap<ConnectorName, String>>>,
}

impl CredentialStore {
    /// Builds a credential store from an explicit map.
    #[must_use]
    pub const fn new(references: Option<BTreeMap<String, BTreeMap<ConnectorName, String>>>) -> Self {
        Self {
            references,
        }
    }

    /// Resolves credential status tenant-then-wildcard.
    ///
    /// An absent or blank reference resolves to not configured.
    #[must_use]
    pub fn status(&self, tenant_id: &TenantId, connector: &ConnectorName) -> CredentialStatus {
        let secret_ref = self
            .references
            .as_ref()
            .and_then(|map| for_tenant(map, tenant_id))
            .and_then(|entry| entry.get(connector))
            .map(String::as_str)
            .filter(|reference| !reference.trim().is_empty())
            .map(str::to_string);
        CredentialStatus {
            configured: secret_ref.is_some(),
            secret_ref,
        }
    }
}
