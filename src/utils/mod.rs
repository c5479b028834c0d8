//! Utility modules for the RBAC core
//!
//! - **error**: Error types, HTTP status mapping and the error envelope
//! - **logging**: Subscriber setup and security audit logging

pub mod error;
pub mod logging;

pub use error::{RbacError, Result};
pub use logging::{SecurityLogger, init_logging};
