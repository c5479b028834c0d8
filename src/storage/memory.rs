//! In-memory storage backends

use super::{ActorDirectory, PermissionRepository, RoleRepository};
use crate::auth::rbac::{Actor, Permission, Role};
use crate::utils::error::{RbacError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Permission repository backed by a concurrent map
#[derive(Debug, Default)]
pub struct InMemoryPermissionRepository {
    permissions: DashMap<String, Permission>,
}

impl InMemoryPermissionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermissionRepository for InMemoryPermissionRepository {
    async fn insert_if_absent(&self, permission: Permission) -> Result<bool> {
        match self.permissions.entry(permission.name.as_str().to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(permission);
                Ok(true)
            }
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Permission>> {
        Ok(self.permissions.get(name).map(|p| p.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<Permission>> {
        Ok(self.permissions.iter().map(|p| p.value().clone()).collect())
    }
}

/// Role repository backed by a concurrent map
#[derive(Debug, Default)]
pub struct InMemoryRoleRepository {
    roles: DashMap<String, Role>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn insert(&self, role: Role) -> Result<Role> {
        match self.roles.entry(role.name.clone()) {
            Entry::Occupied(_) => Err(RbacError::conflict(format!(
                "Role '{}' already exists",
                role.name
            ))),
            Entry::Vacant(slot) => {
                slot.insert(role.clone());
                Ok(role)
            }
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>> {
        Ok(self.roles.get(name).map(|r| r.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<Role>> {
        Ok(self.roles.iter().map(|r| r.value().clone()).collect())
    }

    async fn replace(&self, role: Role) -> Result<()> {
        match self.roles.get_mut(&role.name) {
            Some(mut existing) => {
                *existing = role;
                Ok(())
            }
            None => Err(RbacError::not_found(format!("Role '{}' not found", role.name))),
        }
    }

    async fn remove(&self, name: &str) -> Result<bool> {
        Ok(self.roles.remove(name).is_some())
    }
}

/// Actor directory held in memory, for tests and the CLI
#[derive(Debug, Default)]
pub struct InMemoryActorDirectory {
    actors: RwLock<HashMap<String, Actor>>,
}

impl InMemoryActorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from a fixed set of actors
    pub fn with_actors<I: IntoIterator<Item = Actor>>(actors: I) -> Self {
        let directory = Self::new();
        for actor in actors {
            directory.upsert(actor);
        }
        directory
    }

    /// Insert or replace an actor
    pub fn upsert(&self, actor: Actor) {
        debug!("Upserting actor {}", actor.id);
        self.actors.write().insert(actor.id.clone(), actor);
    }

    /// Move an actor to another role; returns whether the actor exists
    pub fn assign_role(&self, id: &str, role: &str) -> bool {
        match self.actors.write().get_mut(id) {
            Some(actor) => {
                actor.role = role.to_string();
                true
            }
            None => false,
        }
    }

    /// Mark an actor inactive; returns whether the actor exists
    pub fn deactivate(&self, id: &str) -> bool {
        match self.actors.write().get_mut(id) {
            Some(actor) => {
                actor.is_active = false;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.actors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.read().is_empty()
    }
}

#[async_trait]
impl ActorDirectory for InMemoryActorDirectory {
    async fn find_actor(&self, id: &str) -> Result<Option<Actor>> {
        Ok(self.actors.read().get(id).cloned())
    }

    async fn has_active_actor_with_role(&self, role: &str) -> Result<bool> {
        Ok(self
            .actors
            .read()
            .values()
            .any(|a| a.is_active && a.role == role))
    }
}
