// exegate-core/tests/context.rs
// ============================================================================
// Module: Identity Context Tests
// Description: Tests for the operation-local identity context store.
// Purpose: Validate write-once binding, reads, and guaranteed teardown.
// Dependencies: exegate-core
// ============================================================================
//! ## Overview
//! Ensures the identity context binds write-once per operation, fails closed
//! on unbound reads, and is always torn down by the guard, including during
//! unwind.

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
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;

use exegate_core::ActorContext;
use exegate_core::ContextError;
use exegate_core::ContextGuard;
use exegate_core::IdentityContext;
use exegate_core::ScopeName;
use exegate_core::TenantIdentity;

fn tenant(id: &str) -> TenantIdentity {
    TenantIdentity::new(id, Some(format!("{id} inc"))).expect("non-empty tenant id")
}

fn actor(user: &str, role: &str) -> ActorContext {
    ActorContext::new(user, role, BTreeMap::new()).expect("valid actor")
}

/// Verifies bind installs both tenant and actor for reads.
#[test]
fn bind_and_read() {
    let mut context = IdentityContext::new();
    context.bind(tenant("tenant_a"), actor("user-1", "viewer")).expect("bind succeeds");

    assert!(context.is_bound());
    assert_eq!(context.tenant().expect("tenant bound").tenant_id.as_str(), "tenant_a");
    assert_eq!(context.actor().expect("actor bound").user_id.as_str(), "user-1");
}

/// Verifies reads outside an operation fail with `NotBound`.
#[test]
fn unbound_reads_fail() {
    let context = IdentityContext::new();
    assert_eq!(context.tenant().expect_err("no tenant"), ContextError::NotBound);
    assert_eq!(context.actor().expect_err("no actor"), ContextError::NotBound);
}

/// Verifies re-binding a different tenant is rejected.
#[test]
fn rebind_different_tenant_rejected() {
    let mut context = IdentityContext::new();
    context.bind(tenant("tenant_a"), actor("user-1", "viewer")).expect("bind succeeds");

    let err = context
        .bind(tenant("tenant_b"), actor("user-2", "admin"))
        .expect_err("conflicting re-bind fails");
    assert!(matches!(err, ContextError::TenantMismatch { .. }));
    // The original binding is untouched.
    assert_eq!(context.tenant().expect("tenant bound").tenant_id.as_str(), "tenant_a");
    assert_eq!(context.actor().expect("actor bound").user_id.as_str(), "user-1");
}

/// Verifies re-binding the same tenant is a no-op.
#[test]
fn rebind_same_tenant_is_noop() {
    let mut context = IdentityContext::new();
    context.bind(tenant("tenant_a"), actor("user-1", "viewer")).expect("bind succeeds");
    context.bind(tenant("tenant_a"), actor("user-2", "admin")).expect("same tenant accepted");

    assert_eq!(context.actor().expect("actor bound").user_id.as_str(), "user-1");
}

/// Verifies unbind clears state and is safe to repeat.
#[test]
fn unbind_is_unconditional() {
    let mut context = IdentityContext::new();
    context.unbind();
    context.bind(tenant("tenant_a"), actor("user-1", "viewer")).expect("bind succeeds");
    context.unbind();
    context.unbind();
    assert!(!context.is_bound());
}

/// Verifies the guard unbinds on drop.
#[test]
fn guard_unbinds_on_drop() {
    let mut context = IdentityContext::new();
    {
        let guard = ContextGuard::bind(&mut context, tenant("tenant_a"), actor("user-1", "viewer"))
            .expect("bind succeeds");
        assert!(guard.scope().is_bound());
    }
    assert!(!context.is_bound());
}

/// Verifies the guard unbinds while a panic unwinds through it.
#[test]
fn guard_unbinds_during_unwind() {
    let mut context = IdentityContext::new();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let guard = ContextGuard::bind(&mut context, tenant("tenant_a"), actor("user-1", "viewer"))
            .expect("bind succeeds");
        let _scope = guard.scope();
        panic!("unit of work exploded");
    }));
    assert!(outcome.is_err());
    assert!(!context.is_bound());
}

/// Verifies connector contexts derive tenant and actor from the binding.
#[test]
fn connector_context_from_binding() {
    let mut context = IdentityContext::new();
    context.bind(tenant("tenant_a"), actor("user-1", "viewer")).expect("bind succeeds");

    let ctx = context
        .connector_context(Some(vec![ScopeName::new("echo.readonly")]))
        .expect("bound context");
    assert_eq!(ctx.tenant_id.as_str(), "tenant_a");
    assert_eq!(ctx.actor_id.as_ref().map(exegate_core::ActorId::as_str), Some("user-1"));
    assert_eq!(ctx.scopes.as_deref().map(<[ScopeName]>::len), Some(1));

    let unbound = IdentityContext::new();
    assert_eq!(unbound.connector_context(None).expect_err("unbound"), ContextError::NotBound);
}

/// Verifies two concurrent operations never observe each other's binding.
#[test]
fn concurrent_contexts_are_isolated() {
    let handle_a = std::thread::spawn(|| {
        let mut context = IdentityContext::new();
        context.bind(tenant("tenant_a"), actor("user-a", "viewer")).expect("bind succeeds");
        for _ in 0..1_000 {
            assert_eq!(context.tenant().expect("tenant bound").tenant_id.as_str(), "tenant_a");
        }
    });
    let handle_b = std::thread::spawn(|| {
        let mut context = IdentityContext::new();
        context.bind(tenant("tenant_b"), actor("user-b", "admin")).expect("bind succeeds");
        for _ in 0..1_000 {
            assert_eq!(context.tenant().expect("tenant bound").tenant_id.as_str(), "tenant_b");
        }
    });
    handle_a.join().expect("thread a");
    handle_b.join().expect("thread b");
}
