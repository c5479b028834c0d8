//! Authorization system
//!
//! Authentication happens upstream; this module receives an already resolved
//! actor (id, role name, active flag) and decides what it may do.

pub mod rbac;

pub use rbac::{Actor, AuthorizationDecision, RbacSystem};
