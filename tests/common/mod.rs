//! Common test utilities for rbac-core
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{TestSystem, fixtures::ActorFactory};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let system = TestSystem::seeded().await;
//!     let admin = system.add_actor(ActorFactory::admin());
//!     // ...
//! }
//! ```

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use fixtures::{ActorFactory, RoleFactory, TestSystem};
