// exegate-core/tests/authz.rs
// ============================================================================
// Module: Authorization Engine Tests
// Description: Tests for role-permission and role-allowlist checks.
// Purpose: Validate the fixed role table against the bound actor context.
// Dependencies: exegate-core
// ============================================================================
//! ## Overview
//! Ensures permission checks derive the role from the bound identity only and
//! fail closed on unknown roles and unbound contexts.

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

use exegate_core::ActorContext;
use exegate_core::AuthzError;
use exegate_core::ContextError;
use exegate_core::IdentityContext;
use exegate_core::Permission;
use exegate_core::TenantIdentity;
use exegate_core::require_permission;
use exegate_core::require_role_in;

fn bound_context(role: &str) -> IdentityContext {
    let mut context = IdentityContext::new();
    context
        .bind(
            TenantIdentity::new("tenant_a", None).expect("tenant id"),
            ActorContext::new("user-1", role, BTreeMap::new()).expect("actor"),
        )
        .expect("bind succeeds");
    context
}

/// Verifies admin holds the write permission.
#[test]
fn admin_may_write() {
    let context = bound_context("admin");
    require_permission(&context, Permission::TenantWrite).expect("admin writes");
    require_permission(&context, Permission::SystemConfigure).expect("admin configures");
}

/// Verifies viewer is denied the write permission.
#[test]
fn viewer_may_not_write() {
    let context = bound_context("viewer");
    require_permission(&context, Permission::TenantRead).expect("viewer reads");
    let err = require_permission(&context, Permission::TenantWrite).expect_err("denied");
    assert!(matches!(err, AuthzError::Unauthorized { .. }));
}

/// Verifies operator and editor carry read and write but not configure.
#[test]
fn operator_and_editor_read_write() {
    for role in ["operator", "editor"] {
        let context = bound_context(role);
        require_permission(&context, Permission::TenantRead).expect("reads");
        require_permission(&context, Permission::TenantWrite).expect("writes");
        let err = require_permission(&context, Permission::SystemConfigure).expect_err("denied");
        assert!(matches!(err, AuthzError::Unauthorized { .. }));
    }
}

/// Verifies a role absent from the table fails with `UnknownRole`.
#[test]
fn unknown_role_rejected() {
    let context = bound_context("auditor");
    let err = require_permission(&context, Permission::TenantRead).expect_err("unknown role");
    assert!(matches!(err, AuthzError::UnknownRole { .. }));
}

/// Verifies the role allowlist check.
#[test]
fn role_allowlist() {
    let context = bound_context("system");
    require_role_in(&context, &["admin", "system"]).expect("system allowed");
    let err = require_role_in(&context, &["admin"]).expect_err("system not listed");
    assert!(matches!(err, AuthzError::RoleNotAllowed { .. }));
}

/// Verifies checks outside a bound operation surface the context error.
#[test]
fn checks_require_binding() {
    let context = IdentityContext::new();
    let err = require_permission(&context, Permission::TenantRead).expect_err("unbound");
    assert!(matches!(err, AuthzError::Context(ContextError::NotBound)));
    let err = require_role_in(&context, &["admin"]).expect_err("unbound");
    assert!(matches!(err, AuthzError::Context(ContextError::NotBound)));
}
