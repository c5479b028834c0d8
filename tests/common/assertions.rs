//! Custom test assertions
//!
//! Provides domain-specific assertions for RBAC decisions and errors.

use rbac_core::{AuthorizationDecision, RbacError, Result};

/// Assertions for authorization decisions
pub trait DecisionAssertions {
    /// Assert the decision grants access
    fn assert_allowed(&self);

    /// Assert the decision denies access with the given reason
    fn assert_denied_with(&self, reason: &str);
}

impl DecisionAssertions for AuthorizationDecision {
    fn assert_allowed(&self) {
        assert!(
            self.allowed,
            "Expected access to be granted, got denial: {:?}",
            self.reason
        );
    }

    fn assert_denied_with(&self, reason: &str) {
        assert!(!self.allowed, "Expected access to be denied");
        assert_eq!(self.reason.as_deref(), Some(reason));
    }
}

/// Assert a result failed with the given HTTP-equivalent status code
pub fn assert_status<T: std::fmt::Debug>(result: Result<T>, status: u16) -> RbacError {
    match result {
        Ok(value) => panic!("Expected error with status {}, got Ok({:?})", status, value),
        Err(err) => {
            assert_eq!(err.status_code_u16(), status, "unexpected error: {}", err);
            err
        }
    }
}

/// Assert a result failed with `Forbidden`
pub fn assert_forbidden<T: std::fmt::Debug>(result: Result<T>) -> RbacError {
    assert_status(result, 403)
}
