//! Integration tests for rbac-core
//!
//! These tests verify the interaction between the catalog, role store,
//! actor directory and guard through the public API.

pub mod authorization_tests;
pub mod config_tests;
pub mod error_handling_tests;
pub mod hierarchy_tests;
