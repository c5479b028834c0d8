//! Configuration data models

pub mod logging;
pub mod rbac;

pub use logging::*;
pub use rbac::*;

pub(crate) fn default_true() -> bool {
    true
}
