//! HTTP response handling for errors

use super::types::RbacError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

impl ResponseError for RbacError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::from(self))
    }
}

/// Failure envelope returned by any binding of the core
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}

impl From<&RbacError> for ErrorResponse {
    fn from(err: &RbacError) -> Self {
        // Internal details stay in the logs.
        let message = if err.is_client_error() {
            err.to_string()
        } else {
            "An internal error occurred".to_string()
        };

        Self {
            success: false,
            error: ErrorDetail {
                code: err.error_code().to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        }
    }
}
