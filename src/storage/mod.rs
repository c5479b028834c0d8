//! Storage layer
//!
//! Repository traits for permission and role records, the actor directory
//! consulted for referential integrity and hierarchy checks, and concurrent
//! in-memory implementations of all three.

pub mod memory;

pub use memory::{InMemoryActorDirectory, InMemoryPermissionRepository, InMemoryRoleRepository};

use crate::auth::rbac::{Actor, Permission, Role};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable storage for permission records
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Insert unless a permission with the same name exists; returns whether it was inserted
    async fn insert_if_absent(&self, permission: Permission) -> Result<bool>;

    /// Find a permission by name
    async fn find_by_name(&self, name: &str) -> Result<Option<Permission>>;

    /// All permissions, unordered
    async fn find_all(&self) -> Result<Vec<Permission>>;
}

/// Durable storage for role records with a uniqueness constraint on `name`
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Insert a new role; fails with `Conflict` when the name is taken
    async fn insert(&self, role: Role) -> Result<Role>;

    /// Find a role by name
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>>;

    /// All roles, unordered
    async fn find_all(&self) -> Result<Vec<Role>>;

    /// Replace an existing role record; fails with `NotFound` when absent
    async fn replace(&self, role: Role) -> Result<()>;

    /// Remove a role; returns whether it existed
    async fn remove(&self, name: &str) -> Result<bool>;
}

/// Read access to the actors managed by the surrounding service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActorDirectory: Send + Sync {
    /// Find an actor by id
    async fn find_actor(&self, id: &str) -> Result<Option<Actor>>;

    /// Whether any active actor currently holds the role
    async fn has_active_actor_with_role(&self, role: &str) -> Result<bool>;
}
