//! Authorization decision functions
//!
//! Stateless checks over a permission set the caller resolved once per request.

use std::collections::HashSet;

use super::types::AuthorizationDecision;

/// Roles that bypass ownership checks unless configured otherwise
pub const DEFAULT_PRIVILEGED_ROLES: [&str; 2] = ["admin", "super_admin"];

/// Pure authorization checks
pub struct AuthorizationEngine;

impl AuthorizationEngine {
    /// Single permission membership
    pub fn has_permission(granted: &HashSet<String>, required: &str) -> bool {
        granted.contains(required)
    }

    /// Conjunctive check: every required permission must be granted.
    ///
    /// An empty requirement is vacuously satisfied.
    pub fn has_all_permissions<S: AsRef<str>>(granted: &HashSet<String>, required: &[S]) -> bool {
        required.iter().all(|p| granted.contains(p.as_ref()))
    }

    /// An empty allow-list means no restriction
    pub fn has_role<S: AsRef<str>>(actor_role: &str, allowed: &[S]) -> bool {
        allowed.is_empty() || allowed.iter().any(|r| r.as_ref() == actor_role)
    }

    pub fn is_owner(actor_id: &str, resource_owner_id: &str) -> bool {
        actor_id == resource_owner_id
    }

    /// "Self or privileged" access: a privileged role, or the owner
    pub fn is_owner_or_privileged<S: AsRef<str>>(
        actor_role: &str,
        resource_owner_id: &str,
        actor_id: &str,
        privileged: &[S],
    ) -> bool {
        privileged.iter().any(|r| r.as_ref() == actor_role)
            || Self::is_owner(actor_id, resource_owner_id)
    }

    pub fn authorize_permissions<S: AsRef<str>>(
        granted: &HashSet<String>,
        required: &[S],
    ) -> AuthorizationDecision {
        if Self::has_all_permissions(granted, required) {
            AuthorizationDecision::allow()
        } else {
            AuthorizationDecision::deny(format!(
                "Insufficient permissions. Required: {}",
                join(required)
            ))
        }
    }

    pub fn authorize_role<S: AsRef<str>>(actor_role: &str, allowed: &[S]) -> AuthorizationDecision {
        if Self::has_role(actor_role, allowed) {
            AuthorizationDecision::allow()
        } else {
            AuthorizationDecision::deny(format!(
                "Insufficient role privileges. Required: {}, Current: {}",
                join(allowed),
                actor_role
            ))
        }
    }

    pub fn authorize_ownership(actor_id: &str, resource_owner_id: &str) -> AuthorizationDecision {
        if Self::is_owner(actor_id, resource_owner_id) {
            AuthorizationDecision::allow()
        } else {
            AuthorizationDecision::deny("Access denied: not resource owner")
        }
    }

    pub fn authorize_ownership_or_role<S: AsRef<str>>(
        actor_role: &str,
        resource_owner_id: &str,
        actor_id: &str,
        privileged: &[S],
    ) -> AuthorizationDecision {
        if Self::is_owner_or_privileged(actor_role, resource_owner_id, actor_id, privileged) {
            AuthorizationDecision::allow()
        } else {
            AuthorizationDecision::deny("Access denied: not resource owner and insufficient role")
        }
    }

    /// Deletion of an account by itself is never allowed
    pub fn authorize_self_delete(actor_id: &str, target_id: &str) -> AuthorizationDecision {
        if Self::is_owner(actor_id, target_id) {
            AuthorizationDecision::deny("You can not delete yourself")
        } else {
            AuthorizationDecision::allow()
        }
    }
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}
