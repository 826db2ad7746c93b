// exegate-connectors/tests/gate.rs
// ============================================================================
// Module: Connector Gate Tests
// Description: Tests for the policy-enforcing connector dispatch path.
// Purpose: Validate check ordering and refusal before connector invocation.
// Dependencies: exegate-config, exegate-connectors, exegate-core, serde_json
// ============================================================================
//! ## Overview
//! Exercises the gate's check sequence: allowlist, scopes, then credentials,
//! with a counting connector proving that a denied call never reaches
//! connector code.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use exegate_config::ConnectorPolicy;
use exegate_config::CredentialRequirementPolicy;
use exegate_config::CredentialStore;
use exegate_config::GatewayConfig;
use exegate_config::PolicyError;
use exegate_connectors::ConnectorGate;
use exegate_connectors::ConnectorRegistry;
use exegate_connectors::EchoConnector;
use exegate_connectors::GateError;
use exegate_connectors::NullConnector;
use exegate_core::Connector;
use exegate_core::ConnectorContext;
use exegate_core::ConnectorError;
use exegate_core::ConnectorName;
use exegate_core::ScopeName;
use exegate_core::TenantId;
use serde_json::Value;
use serde_json::json;

/// Connector counting how often its methods run.
#[derive(Debug)]
struct CountingConnector {
    /// Shared invocation counter.
    calls: Arc<AtomicUsize>,
}

impl Connector for CountingConnector {
    fn name(&self) -> &str {
        "counting"
    }

    fn healthcheck(&self, _ctx: &ConnectorContext) -> Result<Value, ConnectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({"ok": true}))
    }

    fn fetch(&self, _ctx: &ConnectorContext, _query: &Value) -> Result<Value, ConnectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({"ok": true}))
    }
}

fn ctx(tenant: &str, scopes: Option<&[&str]>) -> ConnectorContext {
    ConnectorContext {
        tenant_id: TenantId::new(tenant),
        actor_id: None,
        scopes: scopes.map(|list| list.iter().map(|scope| ScopeName::new(*scope)).collect()),
    }
}

fn allowlist(entries: &[(&str, &[&str])]) -> BTreeMap<String, BTreeSet<ConnectorName>> {
    entries
        .iter()
        .map(|(tenant, connectors)| {
            ((*tenant).to_string(), connectors.iter().map(|name| ConnectorName::new(*name)).collect())
        })
        .collect()
}

/// Verifies an unrestricted gate dispatches to registered connectors.
#[test]
fn unrestricted_gate_dispatches() {
    let mut registry = ConnectorRegistry::new();
    registry.register(EchoConnector::new()).expect("register echo");
    let gate = ConnectorGate::new(
        registry,
        ConnectorPolicy::unrestricted(),
        CredentialRequirementPolicy::default(),
        CredentialStore::default(),
    );

    let response = gate
        .fetch(&ConnectorName::new("echo"), &ctx("tenant_a", None), &json!({"q": 1}))
        .expect("fetch succeeds");
    assert_eq!(response["echo"], json!({"q": 1}));

    let health = gate
        .healthcheck(&ConnectorName::new("echo"), &ctx("tenant_a", None))
        .expect("healthcheck succeeds");
    assert_eq!(health["ok"], true);
}

/// Verifies allowlist and scope denials never reach the connector.
#[test]
fn denied_calls_never_reach_connector() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ConnectorRegistry::new();
    registry
        .register(CountingConnector {
            calls: Arc::clone(&calls),
        })
        .expect("register counting");

    let mut required = BTreeMap::new();
    required.insert(ConnectorName::new("counting"), vec![ScopeName::new("counting.read")]);
    let gate = ConnectorGate::new(
        registry,
        ConnectorPolicy::new(Some(allowlist(&[("tenant_a", &["counting"])])), Some(required)),
        CredentialRequirementPolicy::default(),
        CredentialStore::default(),
    );

    // Tenant not allowlisted.
    let err = gate
        .fetch(&ConnectorName::new("counting"), &ctx("tenant_b", None), &Value::Null)
        .expect_err("not enabled");
    assert!(matches!(err, GateError::Policy(PolicyError::NotEnabledForTenant { .. })));

    // Allowlisted but missing the required scope.
    let err = gate
        .healthcheck(&ConnectorName::new("counting"), &ctx("tenant_a", None))
        .expect_err("missing scope");
    assert!(matches!(err, GateError::Policy(PolicyError::MissingScopes { .. })));

    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // Fully authorized: the connector finally runs.
    gate.fetch(
        &ConnectorName::new("counting"),
        &ctx("tenant_a", Some(&["counting.read"])),
        &Value::Null,
    )
    .expect("fetch succeeds");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Verifies the credential requirement refuses unconfigured tenants.
#[test]
fn credentials_checked_before_invocation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = ConnectorRegistry::new();
    registry
        .register(CountingConnector {
            calls: Arc::clone(&calls),
        })
        .expect("register counting");

    let mut requirement = BTreeMap::new();
    requirement.insert(
        "*".to_string(),
        std::iter::once(ConnectorName::new("counting")).collect::<BTreeSet<_>>(),
    );
    let mut references = BTreeMap::new();
    let mut configured = BTreeMap::new();
    configured.insert(ConnectorName::new("counting"), "vault://tenant-a/counting".to_string());
    references.insert("tenant_a".to_string(), configured);

    let gate = ConnectorGate::new(
        registry,
        ConnectorPolicy::unrestricted(),
        CredentialRequirementPolicy::new(Some(requirement)),
        CredentialStore::new(Some(references)),
    );

    // tenant_b requires credentials but has none configured.
    let err = gate
        .fetch(&ConnectorName::new("counting"), &ctx("tenant_b", None), &Value::Null)
        .expect_err("credentials missing");
    let GateError::CredentialsNotConfigured {
        connector,
        tenant_id,
    } = err
    else {
        panic!("expected credential refusal");
    };
    assert_eq!(connector.as_str(), "counting");
    assert_eq!(tenant_id.as_str(), "tenant_b");
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // tenant_a has a configured reference and passes.
    gate.fetch(&ConnectorName::new("counting"), &ctx("tenant_a", None), &Value::Null)
        .expect("fetch succeeds");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

/// Verifies an unregistered connector is refused as a denial, not a lookup
/// failure, even when no allowlist is configured.
#[test]
fn unregistered_connector_denied_as_not_enabled() {
    let gate = ConnectorGate::new(
        ConnectorRegistry::new(),
        ConnectorPolicy::unrestricted(),
        CredentialRequirementPolicy::default(),
        CredentialStore::default(),
    );

    // The standalone pre-check denies just like the dispatch paths do.
    let err = gate
        .authorize(&ConnectorName::new("ghost"), &ctx("tenant_a", None))
        .expect_err("unregistered connector");
    assert!(matches!(err, GateError::Policy(PolicyError::NotEnabledForTenant { .. })));

    let err = gate
        .fetch(&ConnectorName::new("ghost"), &ctx("tenant_a", None), &Value::Null)
        .expect_err("unregistered connector");
    assert!(matches!(err, GateError::Policy(PolicyError::NotEnabledForTenant { .. })));

    let err = gate
        .healthcheck(&ConnectorName::new("ghost"), &ctx("tenant_a", None))
        .expect_err("unregistered connector");
    assert!(matches!(err, GateError::Policy(PolicyError::NotEnabledForTenant { .. })));
}

/// Verifies gate construction from a parsed configuration.
#[test]
fn gate_from_config() {
    let config: GatewayConfig = toml::from_str(
        r#"
[connectors.allowlist]
"*" = ["null"]
tenant_a = ["echo", "null"]
"#,
    )
    .expect("config parses");
    config.validate().expect("config valid");

    let mut registry = ConnectorRegistry::new();
    registry.register(NullConnector::new()).expect("register null");
    registry.register(EchoConnector::new()).expect("register echo");
    let gate = ConnectorGate::from_config(registry, &config);

    assert_eq!(
        gate.allowed_connectors(&TenantId::new("tenant_a")),
        vec![ConnectorName::new("echo"), ConnectorName::new("null")]
    );
    assert_eq!(
        gate.allowed_connectors(&TenantId::new("tenant_b")),
        vec![ConnectorName::new("null")]
    );

    let err = gate
        .fetch(&ConnectorName::new("echo"), &ctx("tenant_b", None), &Value::Null)
        .expect_err("not enabled");
    assert!(matches!(err, GateError::Policy(PolicyError::NotEnabledForTenant { .. })));
}
