//! Error handling integration tests
//!
//! Verifies that store and guard failures surface with the right kind and
//! HTTP-equivalent status.

#[cfg(test)]
mod tests {
    use crate::common::{ActorFactory, TestSystem};
    use actix_web::ResponseError;
    use rbac_core::RbacError;
    use rbac_core::utils::error::ErrorResponse;

    #[tokio::test]
    async fn test_guard_denial_response() {
        let system = TestSystem::seeded().await;
        let client = system.add_actor(ActorFactory::client());
        let admin = system.add_actor(ActorFactory::admin());

        let err = system
            .rbac
            .guard_hierarchy_change(&client, &admin.id, None)
            .await
            .unwrap_err();

        assert!(matches!(err, RbacError::Forbidden(_)));
        assert_eq!(err.error_response().status().as_u16(), 403);

        let envelope = ErrorResponse::from(&err);
        assert!(!envelope.success);
        assert_eq!(envelope.error.code, "FORBIDDEN");
        assert!(envelope.error.message.contains("admin"));
    }

    #[tokio::test]
    async fn test_store_error_statuses() {
        let system = TestSystem::seeded().await;
        let roles = system.rbac.roles();

        let cases = [
            (roles.add_permission("ghost", "user:read:own").await, 404),
            (roles.add_permission("client", "user:read:own").await, 409),
            (roles.remove_permission("client", "system:admin:all").await, 409),
            (roles.add_permission("client", "user:fly:all").await, 404),
        ];
        for (result, status) in cases {
            let err = result.unwrap_err();
            assert_eq!(err.status_code_u16(), status, "{}", err);
            assert!(err.is_client_error());
        }
    }

    #[test]
    fn test_internal_details_hidden() {
        let err = RbacError::storage("connection refused on 10.0.0.3");
        let envelope = ErrorResponse::from(&err);

        assert_eq!(envelope.error.code, "STORAGE_ERROR");
        assert_eq!(envelope.error.message, "An internal error occurred");
        assert_eq!(err.error_response().status().as_u16(), 500);
    }
}
