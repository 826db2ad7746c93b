// exegate-connectors/src/gate.rs
// ============================================================================
// Module: Connector Gate
// Description: Policy-enforcing front door for connector invocations.
// Purpose: Compose allowlist, scope, and credential checks before dispatch.
// Dependencies: exegate-config, exegate-core
// ============================================================================

//! ## Overview
//! The gate is the only sanctioned path to a connector. Every invocation
//! runs the same sequence: allowlist, required scopes, then credential
//! requirement against configured references. The connector itself is
//! resolved and invoked only after all checks pass, so a denied call never
//! reaches connector code.

// ============================================================================
// SECTION: Imports
// ============================================================================

use exegate_config::ConnectorPolicy;
use exegate_config::CredentialRequirementPolicy;
use exegate_config::CredentialStore;
use exegate_config::GatewayConfig;
use exegate_config::PolicyError;
use exegate_core::ConnectorContext;
use exegate_core::ConnectorError;
use exegate_core::ConnectorName;
use exegate_core::TenantId;
use serde_json::Value;
use thiserror::Error;

use crate::registry::ConnectorRegistry;
use crate::registry::RegistryError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Gate refusal and invocation errors.
#[derive(Debug, Error)]
pub enum GateError {
    /// Policy denied the invocation.
    #[error(transparent)]
    Policy(#[from] PolicyError),
    /// Credentials are required but not configured for the tenant.
    #[error("connector '{connector}' requires credentials not configured for tenant '{tenant_id}'")]
    CredentialsNotConfigured {
        /// Connector that was requested.
        connector: ConnectorName,
        /// Tenant the request was scoped to.
        tenant_id: TenantId,
    },
    /// Connector resolution failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The connector itself reported an error.
    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Policy-enforcing dispatcher over a connector registry.
pub struct ConnectorGate {
    /// Connector implementations the gate dispatches to.
    registry: ConnectorRegistry,
    /// Allowlist and scope policy.
    policy: ConnectorPolicy,
    /// Credential requirement policy.
    requirements: CredentialRequirementPolicy,
    /// Credential reference store.
    credentials: CredentialStore,
}

impl ConnectorGate {
    /// Creates a gate from explicit policies.
    #[must_use]
    pub const fn new(
        registry: ConnectorRegistry,
        policy: ConnectorPolicy,
        requirements: CredentialRequirementPolicy,
        credentials: CredentialStore,
    ) -> Self {
        Self {
            registry,
            policy,
            requirements,
            credentials,
        }
    }

    /// Creates a gate with the policies a configuration defines.
    #[must_use]
    pub fn from_config(registry: ConnectorRegistry, config: &GatewayConfig) -> Self {
        Self::new(
            registry,
            config.connector_policy(),
            config.credential_requirements(),
            config.credential_store(),
        )
    }

    /// Returns the connectors the tenant may use, sorted by name.
    #[must_use]
    pub fn allowed_connectors(&self, tenant_id: &TenantId) -> Vec<ConnectorName> {
        self.policy.allowed_connectors(tenant_id, &self.registry.list())
    }

    /// Runs every policy check for one invocation without dispatching.
    ///
    /// A connector not registered with the gate is denied as
    /// [`PolicyError::NotEnabledForTenant`], the same refusal an allowlist
    /// miss produces.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] when the enablement, scope, or credential check
    /// denies the invocation.
    pub fn authorize(
        &self,
        connector: &ConnectorName,
        ctx: &ConnectorContext,
    ) -> Result<(), GateError> {
        self.policy.authorize(connector, ctx, &self.registry.list())?;
        if self.requirements.requires_credentials(&ctx.tenant_id, connector)
            && !self.credentials.status(&ctx.tenant_id, connector).configured
        {
            return Err(GateError::CredentialsNotConfigured {
                connector: connector.clone(),
                tenant_id: ctx.tenant_id.clone(),
            });
        }
        Ok(())
    }

    /// Authorizes and runs a connector health probe.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] on policy denial or connector failure;
    /// unregistered connectors are denied by the policy check.
    pub fn healthcheck(
        &self,
        connector: &ConnectorName,
        ctx: &ConnectorContext,
    ) -> Result<Value, GateError> {
        self.authorize(connector, ctx)?;
        Ok(self.registry.get(connector)?.healthcheck(ctx)?)
    }

    /// Authorizes and runs a connector fetch.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] on policy denial or connector failure;
    /// unregistered connectors are denied by the policy check.
    pub fn fetch(
        &self,
        connector: &ConnectorName,
        ctx: &ConnectorContext,
        query: &Value,
    ) -> Result<Value, GateError> {
        self.authorize(connector, ctx)?;
        Ok(self.registry.get(connector)?.fetch(ctx, query)?)
    }
}
