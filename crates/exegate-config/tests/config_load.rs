// exegate-config/tests/config_load.rs
// ============================================================================
// Module: Configuration Loading Tests
// Description: Tests for fail-closed TOML configuration loading.
// Purpose: Validate parsing, limits, and policy construction from config.
// Dependencies: exegate-config, exegate-core, tempfile
// ============================================================================
//! ## Overview
//! Exercises the config loader: a well-formed file produces working policies,
//! while unknown keys, empty tenant keys, and oversized files are rejected at
//! load time.

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

use std::fs;
use std::path::PathBuf;

use exegate_config::ConfigError;
use exegate_config::GatewayConfig;
use exegate_core::ConnectorName;
use exegate_core::TenantId;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("exegate.toml");
    fs::write(&path, content).expect("write config");
    path
}

/// Verifies a well-formed file loads and yields working policies.
#[test]
fn load_well_formed_config() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &dir,
        r#"
[connectors.allowlist]
"*" = ["null"]
tenant_a = ["echo"]

[connectors.required_scopes]
echo = ["echo.readonly"]

[credentials.required]
"*" = ["echo"]

[credentials.references.tenant_a]
echo = "vault://tenant-a/echo"
"#,
    );

    let config = GatewayConfig::load(Some(&path)).expect("config loads");
    let policy = config.connector_policy();
    let available = vec![ConnectorName::new("echo"), ConnectorName::new("null")];
    assert_eq!(
        policy.allowed_connectors(&TenantId::new("tenant_a"), &available),
        vec![ConnectorName::new("echo")]
    );
    assert_eq!(
        policy.allowed_connectors(&TenantId::new("tenant_b"), &available),
        vec![ConnectorName::new("null")]
    );

    let requirements = config.credential_requirements();
    assert!(
        requirements.requires_credentials(&TenantId::new("tenant_b"), &ConnectorName::new("echo"))
    );

    let store = config.credential_store();
    let status = store.status(&TenantId::new("tenant_a"), &ConnectorName::new("echo"));
    assert!(status.configured);
}

/// Verifies an empty file yields the unrestricted default configuration.
#[test]
fn empty_config_is_unrestricted() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "");

    let config = GatewayConfig::load(Some(&path)).expect("config loads");
    let available = vec![ConnectorName::new("echo"), ConnectorName::new("null")];
    assert_eq!(
        config.connector_policy().allowed_connectors(&TenantId::new("anyone"), &available),
        available
    );
    assert!(
        !config
            .credential_requirements()
            .requires_credentials(&TenantId::new("anyone"), &ConnectorName::new("echo"))
    );
}

/// Verifies unknown keys are rejected.
#[test]
fn unknown_keys_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "[surprise]\nkey = 1\n");

    let err = GatewayConfig::load(Some(&path)).expect_err("unknown table rejected");
    assert!(matches!(err, ConfigError::Parse(_)));
}

/// Verifies empty tenant keys fail validation.
#[test]
fn empty_tenant_key_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_config(&dir, "[connectors.allowlist]\n\"\" = [\"null\"]\n");

    let err = GatewayConfig::load(Some(&path)).expect_err("empty key rejected");
    assert!(matches!(err, ConfigError::Invalid(_)));
}

/// Verifies oversized files are rejected before parsing.
#[test]
fn oversized_file_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let padding = format!("# {}\n", "x".repeat(1024 * 1024 + 16));
    let path = write_config(&dir, &padding);

    let err = GatewayConfig::load(Some(&path)).expect_err("oversized file rejected");
    assert!(matches!(err, ConfigError::Invalid(_)));
}

/// Verifies a missing file surfaces an I/O error.
#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let err = GatewayConfig::load(Some(&path)).expect_err("missing file rejected");
    assert!(matches!(err, ConfigError::Io(_)));
}
