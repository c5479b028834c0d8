//! Permission catalog

use crate::storage::PermissionRepository;
use crate::utils::error::{RbacError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::types::{Permission, PermissionName};

/// Default catalog: (name, description, category)
const DEFAULT_PERMISSIONS: &[(&str, &str, &str)] = &[
    // Own user data
    ("user:read:own", "Read own user data", "self"),
    ("user:update:own", "Update own user data", "self"),
    ("user:delete:own", "Delete own user data", "self"),
    // User management
    ("user:read:all", "Read all users data", "all"),
    ("user:create:all", "Create new users", "all"),
    ("user:update:all", "Update any user data", "all"),
    ("user:delete:all", "Delete any user", "all"),
    // Role management
    ("role:read:all", "Read all roles", "all"),
    ("role:create:all", "Create new roles", "all"),
    ("role:update:all", "Update roles", "all"),
    ("role:delete:all", "Delete roles", "all"),
    // Content
    ("content:read:all", "Read all content", "all"),
    ("content:moderate:all", "Moderate content", "all"),
    // System
    ("system:admin:all", "Full system administration", "all"),
];

/// Universe of known permissions
#[derive(Clone)]
pub struct PermissionCatalog {
    repository: Arc<dyn PermissionRepository>,
}

impl PermissionCatalog {
    pub fn new(repository: Arc<dyn PermissionRepository>) -> Self {
        Self { repository }
    }

    /// Insert the default permissions that are not present yet.
    ///
    /// Existing entries are never overwritten. Returns the number inserted.
    pub async fn seed_defaults(&self) -> Result<usize> {
        debug!("Seeding default permissions");

        let mut inserted = 0;
        for (name, description, category) in DEFAULT_PERMISSIONS {
            let permission = Permission::define(name, description, category)?;
            if self.repository.insert_if_absent(permission).await? {
                inserted += 1;
            }
        }

        info!("Seeded {} default permissions", inserted);
        Ok(inserted)
    }

    /// All permissions ordered by category, resource, then action
    pub async fn find_all(&self) -> Result<Vec<Permission>> {
        let mut permissions = self.repository.find_all().await?;
        permissions.sort_by(|a, b| {
            (&a.category, &a.resource, &a.action, &a.name)
                .cmp(&(&b.category, &b.resource, &b.action, &b.name))
        });
        Ok(permissions)
    }

    pub async fn find_by_category(&self, category: &str) -> Result<Vec<Permission>> {
        let mut permissions = self.find_all().await?;
        permissions.retain(|p| p.category == category);
        Ok(permissions)
    }

    pub async fn find_by_resource(&self, resource: &str) -> Result<Vec<Permission>> {
        let mut permissions = self.find_all().await?;
        permissions.retain(|p| p.resource == resource);
        Ok(permissions)
    }

    /// Absence is a normal outcome, not an error
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Permission>> {
        self.repository.find_by_name(name).await
    }

    /// Resolve a name to its validated identifier, if the catalog knows it
    pub async fn lookup(&self, name: &str) -> Result<Option<PermissionName>> {
        Ok(self.find_by_name(name).await?.map(|p| p.name))
    }

    /// Validate a list of names against the catalog.
    ///
    /// Duplicates collapse onto their first occurrence. Fails with
    /// `Validation` naming the first unknown or malformed permission.
    pub async fn validate_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<PermissionName>> {
        let mut seen = HashSet::new();
        let mut validated = Vec::with_capacity(names.len());

        for name in names {
            let name = name.as_ref();
            PermissionName::parse(name)?;

            let permission = self.lookup(name).await?.ok_or_else(|| {
                RbacError::validation(format!("Permission '{}' does not exist", name))
            })?;

            if seen.insert(permission.clone()) {
                validated.push(permission);
            }
        }

        Ok(validated)
    }
}
