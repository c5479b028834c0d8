//! Role-Based Access Control (RBAC) system
//!
//! This module provides the permission catalog, the role store, the pure
//! authorization checks and the hierarchy guard, wired together by
//! [`RbacSystem`].

mod catalog;
mod engine;
mod hierarchy;
mod roles;
mod system;
mod types;

// Re-export public types and structs
pub use catalog::PermissionCatalog;
pub use engine::{AuthorizationEngine, DEFAULT_PRIVILEGED_ROLES};
pub use hierarchy::{GuardDenial, GuardStage, HierarchyChange, HierarchyGuard, ProposedRole};
pub use roles::RoleStore;
pub use system::RbacSystem;
pub use types::{
    Actor, AuthorizationDecision, NewRole, Permission, PermissionName, Role, RoleUpdate,
};
