//! Role management

use crate::storage::{ActorDirectory, RoleRepository};
use crate::utils::error::{RbacError, Result};
use chrono::Utc;
use dashmap::DashMap;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::catalog::PermissionCatalog;
use super::types::{NewRole, Permission, Role, RoleUpdate};

/// Role store with per-name serialized mutations.
///
/// Every read-modify-write for a role runs under that role's lock, so two
/// concurrent edits of the same role cannot overwrite each other. Reads go
/// straight to the repository.
pub struct RoleStore {
    repository: Arc<dyn RoleRepository>,
    catalog: PermissionCatalog,
    actors: Arc<dyn ActorDirectory>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl RoleStore {
    pub fn new(
        repository: Arc<dyn RoleRepository>,
        catalog: PermissionCatalog,
        actors: Arc<dyn ActorDirectory>,
    ) -> Self {
        Self {
            repository,
            catalog,
            actors,
            locks: DashMap::new(),
        }
    }

    fn lock_for(&self, name: &str) -> Arc<Mutex<()>> {
        self.locks.entry(name.to_string()).or_default().clone()
    }

    /// Create a new active, unprotected role
    pub async fn create(&self, new_role: NewRole) -> Result<Role> {
        if new_role.name.trim().is_empty() {
            return Err(RbacError::validation("Role name cannot be empty"));
        }
        if new_role.name.trim() != new_role.name {
            return Err(RbacError::validation(
                "Role name cannot have leading or trailing whitespace",
            ));
        }
        if new_role.priority == 0 {
            return Err(RbacError::validation("Role priority must be at least 1"));
        }

        let lock = self.lock_for(&new_role.name);
        let _guard = lock.lock().await;

        if self.repository.find_by_name(&new_role.name).await?.is_some() {
            return Err(RbacError::conflict("Role with this name already exists"));
        }

        let permissions = self.catalog.validate_names(&new_role.permissions).await?;

        let now = Utc::now();
        let role = Role {
            name: new_role.name,
            description: new_role.description,
            permissions,
            priority: new_role.priority,
            is_active: true,
            protected: false,
            metadata: new_role.metadata,
            created_at: now,
            updated_at: now,
        };

        let role = self.repository.insert(role).await?;
        info!("Created role {} (priority {})", role.name, role.priority);
        Ok(role)
    }

    /// Apply a partial update; a supplied permission list replaces the set
    pub async fn update(&self, name: &str, update: RoleUpdate) -> Result<Role> {
        if update.clear_permissions && update.permissions.as_ref().is_some_and(|p| !p.is_empty()) {
            return Err(RbacError::validation(
                "clear_permissions cannot be combined with a non-empty permission list",
            ));
        }
        if update.permissions.as_ref().is_some_and(Vec::is_empty) && !update.clear_permissions {
            return Err(RbacError::validation(
                "Empty permission list; set clear_permissions to remove all permissions",
            ));
        }
        if update.priority == Some(0) {
            return Err(RbacError::validation("Role priority must be at least 1"));
        }

        let lock = self.lock_for(name);
        let _guard = lock.lock().await;

        let mut role = self.require(name).await?;

        if let Some(permissions) = &update.permissions {
            if !permissions.is_empty() {
                role.permissions = self.catalog.validate_names(permissions).await?;
            }
        }
        if update.clear_permissions {
            warn!("Clearing all permissions of role {}", name);
            role.permissions.clear();
        }
        if let Some(description) = update.description {
            role.description = description;
        }
        if let Some(priority) = update.priority {
            role.priority = priority;
        }
        if let Some(is_active) = update.is_active {
            role.is_active = is_active;
        }
        if let Some(metadata) = update.metadata {
            role.metadata = metadata;
        }
        role.updated_at = Utc::now();

        self.repository.replace(role.clone()).await?;
        info!("Updated role {}", name);
        Ok(role)
    }

    /// Append a permission to a role
    pub async fn add_permission(&self, role_name: &str, permission_name: &str) -> Result<Role> {
        let lock = self.lock_for(role_name);
        let _guard = lock.lock().await;

        let mut role = self.require(role_name).await?;

        let permission = self
            .catalog
            .lookup(permission_name)
            .await?
            .ok_or_else(|| RbacError::not_found("Permission not found"))?;

        if role.has_permission(permission_name) {
            return Err(RbacError::conflict("Permission already assigned to role"));
        }

        role.permissions.push(permission);
        role.updated_at = Utc::now();
        self.repository.replace(role.clone()).await?;

        debug!("Added permission {} to role {}", permission_name, role_name);
        Ok(role)
    }

    /// Remove a permission from a role
    pub async fn remove_permission(&self, role_name: &str, permission_name: &str) -> Result<Role> {
        let lock = self.lock_for(role_name);
        let _guard = lock.lock().await;

        let mut role = self.require(role_name).await?;

        if !role.has_permission(permission_name) {
            return Err(RbacError::conflict("Permission not assigned to role"));
        }

        role.permissions.retain(|p| p.as_str() != permission_name);
        role.updated_at = Utc::now();
        self.repository.replace(role.clone()).await?;

        debug!("Removed permission {} from role {}", permission_name, role_name);
        Ok(role)
    }

    /// Hard delete an unprotected role that no active actor holds
    pub async fn delete(&self, name: &str) -> Result<()> {
        let lock = self.lock_for(name);
        let _guard = lock.lock().await;

        let role = self.require(name).await?;

        if role.protected {
            return Err(RbacError::forbidden("Cannot delete default system roles"));
        }

        if self.actors.has_active_actor_with_role(name).await? {
            return Err(RbacError::conflict(
                "Cannot delete role that is assigned to active users",
            ));
        }

        if !self.repository.remove(name).await? {
            return Err(RbacError::not_found("Role not found"));
        }

        info!("Deleted role {}", name);
        Ok(())
    }

    /// Soft delete: the role stays but resolves to no permissions
    pub async fn deactivate(&self, name: &str) -> Result<Role> {
        self.update(
            name,
            RoleUpdate {
                is_active: Some(false),
                ..RoleUpdate::default()
            },
        )
        .await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Role>> {
        self.repository.find_by_name(name).await
    }

    pub async fn find_active_by_name(&self, name: &str) -> Result<Option<Role>> {
        Ok(self.find_by_name(name).await?.filter(|r| r.is_active))
    }

    /// Roles ordered by ascending priority, ties broken by name
    pub async fn list_all(&self, include_inactive: bool) -> Result<Vec<Role>> {
        let mut roles = self.repository.find_all().await?;
        if !include_inactive {
            roles.retain(|r| r.is_active);
        }
        roles.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(&b.name)));
        Ok(roles)
    }

    /// Permission records of an active role, in assignment order.
    ///
    /// Missing and inactive roles resolve to an empty list.
    pub async fn resolve_permissions(&self, role_name: &str) -> Result<Vec<Permission>> {
        let Some(role) = self.find_active_by_name(role_name).await? else {
            debug!("Role {} missing or inactive, no permissions", role_name);
            return Ok(Vec::new());
        };

        let mut permissions = Vec::with_capacity(role.permissions.len());
        for name in &role.permissions {
            if let Some(permission) = self.catalog.find_by_name(name.as_str()).await? {
                permissions.push(permission);
            }
        }
        Ok(permissions)
    }

    /// Permission names granted by a role, for the authorization engine
    pub async fn resolve_permission_names(&self, role_name: &str) -> Result<HashSet<String>> {
        Ok(self
            .resolve_permissions(role_name)
            .await?
            .into_iter()
            .map(|p| p.name.as_str().to_string())
            .collect())
    }

    /// Insert the protected system roles that are not present yet.
    ///
    /// Requires the default permission catalog. Returns the number inserted.
    pub async fn seed_defaults(&self) -> Result<usize> {
        debug!("Seeding default roles");

        let mut inserted = 0;
        for (name, description, priority, permissions, metadata_key) in default_roles() {
            let lock = self.lock_for(name);
            let _guard = lock.lock().await;

            if self.repository.find_by_name(name).await?.is_some() {
                continue;
            }

            let now = Utc::now();
            let role = Role {
                name: name.to_string(),
                description: description.to_string(),
                permissions: self.catalog.validate_names(permissions).await?,
                priority,
                is_active: true,
                protected: true,
                metadata: HashMap::from([(metadata_key.to_string(), json!(true))]),
                created_at: now,
                updated_at: now,
            };
            self.repository.insert(role).await?;
            inserted += 1;
        }

        info!("Seeded {} default roles", inserted);
        Ok(inserted)
    }

    async fn require(&self, name: &str) -> Result<Role> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| RbacError::not_found("Role not found"))
    }
}

type RoleSeed = (&'static str, &'static str, u32, &'static [&'static str], &'static str);

fn default_roles() -> [RoleSeed; 4] {
    [
        (
            "client",
            "Basic client with access to own data only",
            1,
            &["user:read:own", "user:update:own"],
            "isDefault",
        ),
        (
            "moderator",
            "Content moderator with limited user management",
            2,
            &[
                "user:read:own",
                "user:update:own",
                "content:read:all",
                "content:moderate:all",
                "user:read:all",
            ],
            "canModerateContent",
        ),
        (
            "admin",
            "Administrator with full user and role management",
            3,
            &[
                "user:read:own",
                "user:update:own",
                "user:delete:own",
                "user:read:all",
                "user:create:all",
                "user:update:all",
                "user:delete:all",
                "content:read:all",
                "content:moderate:all",
                "role:read:all",
                "role:create:all",
                "role:update:all",
                "role:delete:all",
            ],
            "isAdmin",
        ),
        (
            "super_admin",
            "Super administrator with system-wide privileges",
            4,
            &[
                "user:read:own",
                "user:update:own",
                "user:delete:own",
                "user:read:all",
                "user:create:all",
                "user:update:all",
                "user:delete:all",
                "content:read:all",
                "content:moderate:all",
                "role:read:all",
                "role:create:all",
                "role:update:all",
                "role:delete:all",
                "system:admin:all",
            ],
            "isSuperAdmin",
        ),
    ]
}
