// exegate-core/src/core/identity.rs
// ============================================================================
// Module: Exegate Identity Types
// Description: Tenant identity, actor context, and verified claims.
// Purpose: Carry the immutable identity binding for one operation.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Identity types are constructed once per operation from trusted inputs and
//! treated as immutable afterwards. [`VerifiedClaims`] is the inbound contract
//! from the transport collaborator: claims have already been verified
//! cryptographically elsewhere; this kernel only enforces policy on top of
//! them and never reads identity from the request payload.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::ActorId;
use crate::core::identifiers::RoleName;
use crate::core::identifiers::ScopeName;
use crate::core::identifiers::TenantId;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Identity construction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// Tenant identifier was empty or whitespace.
    #[error("tenant_id must be a non-empty string")]
    EmptyTenantId,
    /// Actor identifier was empty or whitespace.
    #[error("user_id must be a non-empty string")]
    EmptyUserId,
    /// Role name was empty or whitespace.
    #[error("role must be a non-empty string")]
    EmptyRole,
}

// ============================================================================
// SECTION: Tenant Identity
// ============================================================================

/// Immutable tenant identity bound to one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantIdentity {
    /// Tenant identifier (non-empty).
    pub tenant_id: TenantId,
    /// Optional human-readable tenant name.
    pub tenant_name: Option<String>,
}

impl TenantIdentity {
    /// Creates a tenant identity, rejecting empty tenant identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::EmptyTenantId`] when the identifier is empty
    /// or whitespace.
    pub fn new(
        tenant_id: impl Into<TenantId>,
        tenant_name: Option<String>,
    ) -> Result<Self, IdentityError> {
        let tenant_id = tenant_id.into();
        if tenant_id.as_str().trim().is_empty() {
            return Err(IdentityError::EmptyTenantId);
        }
        Ok(Self {
            tenant_id,
            tenant_name,
        })
    }
}

// ============================================================================
// SECTION: Actor Context
// ============================================================================

/// Acting identity for one operation, distinct from the tenant it acts within.
///
/// # Invariants
/// - `user_id` and `role` are non-empty when constructed via [`ActorContext::new`].
/// - Never persisted as identity beyond the operation's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    /// Actor identifier (non-empty).
    pub user_id: ActorId,
    /// Role name (non-empty, resolved against the fixed role table).
    pub role: RoleName,
    /// Free-form metadata attached to the actor for this operation.
    pub metadata: BTreeMap<String, String>,
}

impl ActorContext {
    /// Creates an actor context, rejecting empty user ids or roles.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when `user_id` or `role` is empty or
    /// whitespace.
    pub fn new(
        user_id: impl Into<ActorId>,
        role: impl Into<RoleName>,
        metadata: BTreeMap<String, String>,
    ) -> Result<Self, IdentityError> {
        let user_id = user_id.into();
        if user_id.as_str().trim().is_empty() {
            return Err(IdentityError::EmptyUserId);
        }
        let role = role.into();
        if role.as_str().trim().is_empty() {
            return Err(IdentityError::EmptyRole);
        }
        Ok(Self {
            user_id,
            role,
            metadata,
        })
    }

    /// Adds a metadata entry, replacing any existing value for the key.
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }
}

// ============================================================================
// SECTION: Verified Claims
// ============================================================================

/// Verified actor claims supplied out-of-band by the transport collaborator.
///
/// # Invariants
/// - Claims are never taken from the request body.
/// - `tenant_id`, when present, is a trusted tenant binding that takes
///   precedence over any payload-embedded tenant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedClaims {
    /// Actor identifier (non-empty).
    pub user_id: ActorId,
    /// Role name (non-empty).
    pub role: RoleName,
    /// Trusted, externally-resolved tenant binding when available.
    pub tenant_id: Option<TenantId>,
    /// Capability scopes granted to the actor.
    pub scopes: Option<Vec<ScopeName>>,
}

impl VerifiedClaims {
    /// Creates verified claims, rejecting empty user ids or roles.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError`] when `user_id` or `role` is empty or
    /// whitespace.
    pub fn new(
        user_id: impl Into<ActorId>,
        role: impl Into<RoleName>,
        tenant_id: Option<TenantId>,
        scopes: Option<Vec<ScopeName>>,
    ) -> Result<Self, IdentityError> {
        let user_id = user_id.into();
        if user_id.as_str().trim().is_empty() {
            return Err(IdentityError::EmptyUserId);
        }
        let role = role.into();
        if role.as_str().trim().is_empty() {
            return Err(IdentityError::EmptyRole);
        }
        Ok(Self {
            user_id,
            role,
            tenant_id,
            scopes,
        })
    }

    /// Derives the actor context installed for the operation.
    #[must_use]
    pub fn actor_context(&self, metadata: BTreeMap<String, String>) -> ActorContext {
        ActorContext {
            user_id: self.user_id.clone(),
            role: self.role.clone(),
            metadata,
        }
    }
}
