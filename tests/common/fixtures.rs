//! Test fixtures and data factories
//!
//! All factories create real objects over the in-memory stores, not mocks.

use rbac_core::{Actor, InMemoryActorDirectory, NewRole, PeerPolicy, RbacConfig, RbacSystem};
use std::sync::Arc;
use uuid::Uuid;

/// Factory for creating test actors with unique ids
pub struct ActorFactory;

impl ActorFactory {
    /// Create an active actor holding `role`
    pub fn with_role(role: &str) -> Actor {
        Actor::new(format!("{}-{}", role, &Uuid::new_v4().to_string()[..8]), role)
    }

    pub fn client() -> Actor {
        Self::with_role("client")
    }

    pub fn moderator() -> Actor {
        Self::with_role("moderator")
    }

    pub fn admin() -> Actor {
        Self::with_role("admin")
    }

    pub fn super_admin() -> Actor {
        Self::with_role("super_admin")
    }
}

/// Factory for creating role definitions
pub struct RoleFactory;

impl RoleFactory {
    /// A custom role with a unique name
    pub fn custom(priority: u32) -> NewRole {
        let name = format!("role_{}", &Uuid::new_v4().simple().to_string()[..8]);
        NewRole::new(name, "Custom test role").with_priority(priority)
    }

    /// A content editor with read access
    pub fn editor() -> NewRole {
        NewRole::new("editor", "Content editor")
            .with_permissions(["content:read:all", "user:read:own", "user:update:own"])
            .with_priority(2)
    }
}

/// A seeded in-memory system plus a handle to its actor directory
pub struct TestSystem {
    pub rbac: RbacSystem,
    pub actors: Arc<InMemoryActorDirectory>,
}

impl TestSystem {
    /// Default configuration with the system roles seeded
    pub async fn seeded() -> Self {
        Self::with_config(RbacConfig::default()).await
    }

    /// Seeded system where equal priority actors cannot modify each other
    pub async fn strict_peers() -> Self {
        Self::with_config(RbacConfig {
            peer_policy: PeerPolicy::Deny,
            ..RbacConfig::default()
        })
        .await
    }

    pub async fn with_config(config: RbacConfig) -> Self {
        let actors = Arc::new(InMemoryActorDirectory::new());
        let rbac = RbacSystem::in_memory(&config, actors.clone())
            .await
            .expect("in-memory system should initialize");
        Self { rbac, actors }
    }

    /// Register an actor in the directory and hand it back
    pub fn add_actor(&self, actor: Actor) -> Actor {
        self.actors.upsert(actor.clone());
        actor
    }
}
