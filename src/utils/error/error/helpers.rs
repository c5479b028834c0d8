//! Helper functions for creating specific error types

use super::types::RbacError;

/// Helper functions for creating specific errors
impl RbacError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

impl RbacError {
    /// HTTP-equivalent status code for this error kind
    pub fn status_code_u16(&self) -> u16 {
        match self {
            RbacError::NotFound(_) => 404,
            RbacError::Conflict(_) => 409,
            RbacError::Validation(_) | RbacError::BadRequest(_) => 400,
            RbacError::Forbidden(_) => 403,
            RbacError::Unauthorized(_) => 401,
            _ => 500,
        }
    }

    /// Machine readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            RbacError::NotFound(_) => "NOT_FOUND",
            RbacError::Conflict(_) => "CONFLICT",
            RbacError::Validation(_) => "VALIDATION_ERROR",
            RbacError::Forbidden(_) => "FORBIDDEN",
            RbacError::Unauthorized(_) => "UNAUTHORIZED",
            RbacError::BadRequest(_) => "BAD_REQUEST",
            RbacError::Config(_) => "CONFIG_ERROR",
            RbacError::Storage(_) => "STORAGE_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Whether the error is caused by the caller rather than the core
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code_u16())
    }
}
