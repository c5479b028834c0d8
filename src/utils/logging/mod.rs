//! Logging utilities
//!
//! Subscriber setup and the security audit logger used by the RBAC facade.

mod security_logger;
mod subscriber;

pub use security_logger::{AuthzEvent, SecurityLogger};
pub use subscriber::init_logging;
