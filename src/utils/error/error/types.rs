//! Error types for the RBAC core

use thiserror::Error;

/// Result type alias for the RBAC core
pub type Result<T> = std::result::Result<T, RbacError>;

/// Main error type for the RBAC core
#[derive(Error, Debug)]
pub enum RbacError {
    /// Referenced role, permission or actor does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation, duplicate assignment or role still in use
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unknown or malformed input, e.g. an unknown permission name
    #[error("Validation error: {0}")]
    Validation(String),

    /// Priority, escalation, self-modification or missing permission/role
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Absent or inactive actor identity
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Generic request failure, e.g. role information could not be resolved
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backing store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
