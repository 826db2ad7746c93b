// exegate-core/src/runtime/authz.rs
// ============================================================================
// Module: Exegate Authorization Engine
// Description: Fixed role-to-permission table and allowlist checks.
// Purpose: Enforce role-based authorization against the bound actor context.
// Dependencies: crate::core, crate::runtime::context, thiserror
// ============================================================================

//! ## Overview
//! A fixed table maps roles to permission sets. Both primitives read the
//! currently bound actor context and never accept a role argument from the
//! caller: the role is derived from the already-verified identity, not a
//! parameter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::RoleName;
use crate::runtime::context::ContextError;
use crate::runtime::context::IdentityContext;

// ============================================================================
// SECTION: Roles
// ============================================================================

/// Full-control role within a tenant boundary.
pub const ROLE_ADMIN: &str = "admin";
/// Typical operator inside a tenant.
pub const ROLE_OPERATOR: &str = "operator";
/// Read and write access without configuration rights.
pub const ROLE_EDITOR: &str = "editor";
/// Read-only access.
pub const ROLE_VIEWER: &str = "viewer";
/// Internal service actor used by system automations.
pub const ROLE_SYSTEM: &str = "system";

// ============================================================================
// SECTION: Permissions
// ============================================================================

/// Permission granted through the fixed role table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Read tenant-scoped data.
    TenantRead,
    /// Write tenant-scoped data.
    TenantWrite,
    /// Configure system-level settings for the tenant.
    SystemConfigure,
}

impl Permission {
    /// Returns the stable permission label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TenantRead => "tenant:read",
            Self::TenantWrite => "tenant:write",
            Self::SystemConfigure => "system:configure",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the permission set for a role, or `None` for unknown roles.
#[must_use]
pub fn role_permissions(role: &RoleName) -> Option<&'static [Permission]> {
    match role.as_str() {
        ROLE_ADMIN | ROLE_SYSTEM => {
            Some(&[Permission::TenantRead, Permission::TenantWrite, Permission::SystemConfigure])
        }
        ROLE_OPERATOR | ROLE_EDITOR => Some(&[Permission::TenantRead, Permission::TenantWrite]),
        ROLE_VIEWER => Some(&[Permission::TenantRead]),
        _ => None,
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Authorization errors, reported distinctly from payload errors so the
/// transport layer can map them to a denial response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthzError {
    /// The bound role lacks the required permission.
    #[error("role '{role}' lacks permission '{permission}'")]
    Unauthorized {
        /// Role of the bound actor.
        role: RoleName,
        /// Permission that was required.
        permission: Permission,
    },
    /// The bound role is not in the allowed role set.
    #[error("role '{role}' is not permitted for this action")]
    RoleNotAllowed {
        /// Role of the bound actor.
        role: RoleName,
    },
    /// The bound role has no entry in the permission table.
    #[error("unknown role '{role}'")]
    UnknownRole {
        /// Role of the bound actor.
        role: RoleName,
    },
    /// No actor is bound for the current operation.
    #[error(transparent)]
    Context(#[from] ContextError),
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Requires that the bound actor's role grants the permission.
///
/// # Errors
///
/// Returns [`AuthzError::UnknownRole`] when the role has no table entry,
/// [`AuthzError::Unauthorized`] when the permission is absent from the
/// role's set, and [`AuthzError::Context`] outside a bound operation.
pub fn require_permission(
    context: &IdentityContext,
    permission: Permission,
) -> Result<(), AuthzError> {
    let role = context.actor()?.role.clone();
    let Some(granted) = role_permissions(&role) else {
        return Err(AuthzError::UnknownRole {
            role,
        });
    };
    if granted.contains(&permission) {
        Ok(())
    } else {
        Err(AuthzError::Unauthorized {
            role,
            permission,
        })
    }
}

/// Requires that the bound actor's role is one of the allowed roles.
///
/// # Errors
///
/// Returns [`AuthzError::RoleNotAllowed`] when the role is not listed and
/// [`AuthzError::Context`] outside a bound operation.
pub fn require_role_in(context: &IdentityContext, allowed: &[&str]) -> Result<(), AuthzError> {
    let role = context.actor()?.role.clone();
    if allowed.contains(&role.as_str()) {
        Ok(())
    } else {
        Err(AuthzError::RoleNotAllowed {
            role,
        })
    }
}
