//! # rbac-core
//!
//! Role-based access control for multi-user services.
//!
//! ## Features
//!
//! - **Permission Catalog**: `resource:action:scope` permissions, seeded with a default set
//! - **Role Store**: Named roles with priorities, permission sets and serialized mutations
//! - **Authorization Checks**: Permission, role and ownership decisions
//! - **Hierarchy Guard**: Stops actors from modifying peers above them or handing out
//!   roles that outrank their own
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rbac_core::{Actor, Config, InMemoryActorDirectory, RbacSystem};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> rbac_core::Result<()> {
//!     let config = Config::from_env()?;
//!     let actors = Arc::new(InMemoryActorDirectory::with_actors([
//!         Actor::new("u-1", "admin"),
//!         Actor::new("u-2", "client"),
//!     ]));
//!     let rbac = RbacSystem::in_memory(&config.rbac, actors).await?;
//!
//!     let admin = Actor::new("u-1", "admin");
//!     let decision = rbac.authorize(Some(&admin), &["user:read:all"]).await?;
//!     assert!(decision.allowed);
//!
//!     rbac.guard_hierarchy_change(&admin, "u-2", Some("moderator")).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::rbac::{
    AuthorizationEngine, GuardStage, HierarchyGuard, NewRole, Permission, PermissionCatalog,
    PermissionName, Role, RoleStore, RoleUpdate,
};
pub use auth::{Actor, AuthorizationDecision, RbacSystem};
pub use config::{Config, LoggingConfig, PeerPolicy, RbacConfig};
pub use storage::{
    ActorDirectory, InMemoryActorDirectory, InMemoryPermissionRepository, InMemoryRoleRepository,
    PermissionRepository, RoleRepository,
};
pub use utils::error::{RbacError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
