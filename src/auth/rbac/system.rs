//! RBAC system core functionality

use crate::config::RbacConfig;
use crate::storage::{
    ActorDirectory, InMemoryPermissionRepository, InMemoryRoleRepository, PermissionRepository,
    RoleRepository,
};
use crate::utils::error::{RbacError, Result};
use crate::utils::logging::{AuthzEvent, SecurityLogger};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::catalog::PermissionCatalog;
use super::engine::AuthorizationEngine;
use super::hierarchy::{HierarchyChange, HierarchyGuard, ProposedRole};
use super::roles::RoleStore;
use super::types::{Actor, AuthorizationDecision};

/// RBAC system wiring the catalog, role store, actor directory and guard
#[derive(Clone)]
pub struct RbacSystem {
    /// RBAC configuration
    config: Arc<RbacConfig>,
    /// Permission definitions
    catalog: PermissionCatalog,
    /// Role definitions
    roles: Arc<RoleStore>,
    /// Actors of the surrounding service
    actors: Arc<dyn ActorDirectory>,
    guard: HierarchyGuard,
}

impl RbacSystem {
    /// Create a new RBAC system over the given stores
    pub async fn new(
        config: &RbacConfig,
        permissions: Arc<dyn PermissionRepository>,
        roles: Arc<dyn RoleRepository>,
        actors: Arc<dyn ActorDirectory>,
    ) -> Result<Self> {
        info!("Initializing RBAC system");

        let catalog = PermissionCatalog::new(permissions);
        let role_store = RoleStore::new(roles, catalog.clone(), Arc::clone(&actors));

        if config.seed_defaults {
            catalog.seed_defaults().await?;
            role_store.seed_defaults().await?;
        }

        info!(
            "RBAC system initialized (peer policy: {})",
            config.peer_policy
        );
        Ok(Self {
            config: Arc::new(config.clone()),
            catalog,
            roles: Arc::new(role_store),
            actors,
            guard: HierarchyGuard::new(config.peer_policy),
        })
    }

    /// Create a system backed by in-memory permission and role stores
    pub async fn in_memory(config: &RbacConfig, actors: Arc<dyn ActorDirectory>) -> Result<Self> {
        Self::new(
            config,
            Arc::new(InMemoryPermissionRepository::new()),
            Arc::new(InMemoryRoleRepository::new()),
            actors,
        )
        .await
    }

    pub fn config(&self) -> &RbacConfig {
        &self.config
    }

    /// Permission catalog
    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// Role store
    pub fn roles(&self) -> &RoleStore {
        &self.roles
    }

    pub fn check_permission<S: AsRef<str>>(&self, granted: &HashSet<String>, required: &[S]) -> bool {
        AuthorizationEngine::has_all_permissions(granted, required)
    }

    pub fn check_role<S: AsRef<str>>(&self, actor_role: &str, allowed: &[S]) -> bool {
        AuthorizationEngine::has_role(actor_role, allowed)
    }

    pub fn check_ownership(&self, actor_id: &str, resource_owner_id: &str) -> bool {
        AuthorizationEngine::is_owner(actor_id, resource_owner_id)
    }

    pub fn check_ownership_or_role<S: AsRef<str>>(
        &self,
        actor_role: &str,
        privileged: &[S],
        actor_id: &str,
        resource_owner_id: &str,
    ) -> bool {
        AuthorizationEngine::is_owner_or_privileged(
            actor_role,
            resource_owner_id,
            actor_id,
            privileged,
        )
    }

    /// Whether the role bypasses ownership checks
    pub fn is_privileged(&self, role: &str) -> bool {
        self.config.privileged_roles.iter().any(|r| r == role)
    }

    /// Permissions held by an actor.
    ///
    /// An absent or inactive actor holds nothing.
    pub async fn actor_permissions(&self, actor: Option<&Actor>) -> Result<HashSet<String>> {
        match actor.filter(|a| a.is_active) {
            Some(actor) => self.roles.resolve_permission_names(&actor.role).await,
            None => Ok(HashSet::new()),
        }
    }

    /// Permission-based authorization for a request
    pub async fn authorize<S: AsRef<str> + Sync>(
        &self,
        actor: Option<&Actor>,
        required: &[S],
    ) -> Result<AuthorizationDecision> {
        let subject = required
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");

        let decision = match active(actor) {
            None => AuthorizationDecision::deny("Authentication required"),
            Some(actor) => {
                let granted = self.actor_permissions(Some(actor)).await?;
                AuthorizationEngine::authorize_permissions(&granted, required)
            }
        };

        audit(actor, "permission", &subject, &decision);
        Ok(decision)
    }

    /// Role-based authorization for a request
    pub fn require_role<S: AsRef<str>>(
        &self,
        actor: Option<&Actor>,
        allowed: &[S],
    ) -> AuthorizationDecision {
        let subject = allowed
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");

        let decision = match active(actor) {
            None => AuthorizationDecision::deny("Authentication required"),
            Some(actor) => AuthorizationEngine::authorize_role(&actor.role, allowed),
        };

        audit(actor, "role", &subject, &decision);
        decision
    }

    /// "Self or privileged" authorization using the configured privileged roles
    pub fn require_ownership_or_role(
        &self,
        actor: Option<&Actor>,
        resource_owner_id: &str,
    ) -> AuthorizationDecision {
        let decision = match active(actor) {
            None => AuthorizationDecision::deny("Authentication required"),
            Some(actor) => AuthorizationEngine::authorize_ownership_or_role(
                &actor.role,
                resource_owner_id,
                &actor.id,
                &self.config.privileged_roles,
            ),
        };

        audit(actor, "ownership", resource_owner_id, &decision);
        decision
    }

    /// Refuse an actor deleting its own account
    pub fn require_not_self(&self, actor: Option<&Actor>, target_id: &str) -> AuthorizationDecision {
        let decision = match active(actor) {
            None => AuthorizationDecision::deny("Authentication required"),
            Some(actor) => AuthorizationEngine::authorize_self_delete(&actor.id, target_id),
        };

        audit(actor, "self_delete", target_id, &decision);
        decision
    }

    /// Guard an operation in which `caller` modifies the actor `target_id`,
    /// optionally assigning it `proposed_role`.
    ///
    /// The caller is re-read from the directory; its stored role and
    /// active flag are what the gates see.
    pub async fn guard_hierarchy_change(
        &self,
        caller: &Actor,
        target_id: &str,
        proposed_role: Option<&str>,
    ) -> Result<()> {
        debug!(
            "Checking hierarchy change by {} on {} (proposed role: {:?})",
            caller.id, target_id, proposed_role
        );

        let current = match active(Some(caller)) {
            Some(caller) => self.actors.find_actor(&caller.id).await?,
            None => None,
        };
        let Some(actor) = current.as_ref().filter(|a| a.is_active) else {
            warn!("Hierarchy change by unknown or inactive actor {}", caller.id);
            let decision = AuthorizationDecision::deny("Authentication required");
            audit(Some(caller), "hierarchy", target_id, &decision);
            return Err(RbacError::unauthorized("Authentication required"));
        };

        let target = self.actors.find_actor(target_id).await?;
        let actor_role = self.roles.find_by_name(&actor.role).await?;
        let target_role = match &target {
            Some(t) => self.roles.find_by_name(&t.role).await?,
            None => None,
        };
        let proposed_record = match proposed_role {
            Some(name) => self.roles.find_by_name(name).await?,
            None => None,
        };

        let change = HierarchyChange {
            actor,
            actor_role: actor_role.as_ref(),
            target: target.as_ref(),
            target_role: target_role.as_ref(),
            proposed: proposed_role.map(|name| ProposedRole {
                name,
                role: proposed_record.as_ref(),
            }),
        };

        match self.guard.evaluate(&change) {
            Ok(stage) => {
                audit(
                    Some(actor),
                    "hierarchy",
                    target_id,
                    &AuthorizationDecision::allow(),
                );
                debug!("Hierarchy change by {} reached {}", actor.id, stage);
                Ok(())
            }
            Err(denial) => {
                warn!(
                    "Hierarchy change by {} on {} denied after {}",
                    actor.id, target_id, denial.stage
                );
                audit(
                    Some(actor),
                    "hierarchy",
                    target_id,
                    &AuthorizationDecision::deny(denial.error.to_string()),
                );
                Err(denial.into())
            }
        }
    }
}

fn active(actor: Option<&Actor>) -> Option<&Actor> {
    actor.filter(|a| a.is_active)
}

fn audit(actor: Option<&Actor>, check: &str, subject: &str, decision: &AuthorizationDecision) {
    SecurityLogger::log_authz_event(AuthzEvent {
        actor_id: actor.map(|a| a.id.as_str()),
        role: actor.map(|a| a.role.as_str()),
        check,
        subject,
        granted: decision.allowed,
        reason: decision.reason.as_deref(),
    });
}
