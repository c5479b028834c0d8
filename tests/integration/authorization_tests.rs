//! Authorization decision tests
//!
//! Permission, role and ownership checks through the facade.

#[cfg(test)]
mod tests {
    use crate::common::assertions::DecisionAssertions;
    use crate::common::{ActorFactory, TestSystem};
    use rbac_core::{Actor, AuthorizationEngine};
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_admin_permissions() {
        let system = TestSystem::seeded().await;
        let admin = system.add_actor(ActorFactory::admin());

        system
            .rbac
            .authorize(Some(&admin), &["user:read:all", "user:delete:all", "role:read:all"])
            .await
            .unwrap()
            .assert_allowed();

        system
            .rbac
            .authorize(Some(&admin), &["system:admin:all"])
            .await
            .unwrap()
            .assert_denied_with("Insufficient permissions. Required: system:admin:all");
    }

    #[tokio::test]
    async fn test_super_admin_holds_full_catalog() {
        let system = TestSystem::seeded().await;
        let root = system.add_actor(ActorFactory::super_admin());

        let catalog: Vec<String> = system
            .rbac
            .catalog()
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name.to_string())
            .collect();

        system
            .rbac
            .authorize(Some(&root), catalog.as_slice())
            .await
            .unwrap()
            .assert_allowed();
    }

    #[tokio::test]
    async fn test_empty_requirement_is_satisfied() {
        let system = TestSystem::seeded().await;
        let client = system.add_actor(ActorFactory::client());

        let none: [&str; 0] = [];
        system
            .rbac
            .authorize(Some(&client), &none)
            .await
            .unwrap()
            .assert_allowed();
    }

    #[tokio::test]
    async fn test_unauthenticated_is_denied() {
        let system = TestSystem::seeded().await;

        system
            .rbac
            .authorize(None, &["user:read:own"])
            .await
            .unwrap()
            .assert_denied_with("Authentication required");
        system
            .rbac
            .require_role(None, &["client"])
            .assert_denied_with("Authentication required");
    }

    #[tokio::test]
    async fn test_role_requirement() {
        let system = TestSystem::seeded().await;
        let moderator = system.add_actor(ActorFactory::moderator());

        system
            .rbac
            .require_role(Some(&moderator), &["admin", "super_admin"])
            .assert_denied_with(
                "Insufficient role privileges. Required: admin, super_admin, Current: moderator",
            );
        system
            .rbac
            .require_role(Some(&moderator), &["moderator", "admin"])
            .assert_allowed();
    }

    #[tokio::test]
    async fn test_self_or_privileged() {
        let system = TestSystem::seeded().await;
        let client = system.add_actor(ActorFactory::client());
        let other = system.add_actor(ActorFactory::client());
        let admin = system.add_actor(ActorFactory::admin());

        system
            .rbac
            .require_ownership_or_role(Some(&client), &client.id)
            .assert_allowed();
        system
            .rbac
            .require_ownership_or_role(Some(&client), &other.id)
            .assert_denied_with("Access denied: not resource owner and insufficient role");
        system
            .rbac
            .require_ownership_or_role(Some(&admin), &other.id)
            .assert_allowed();
    }

    #[tokio::test]
    async fn test_inactive_actor_loses_access() {
        let system = TestSystem::seeded().await;
        let admin = system.add_actor(Actor::new("admin-x", "admin").inactive());

        system
            .rbac
            .require_ownership_or_role(Some(&admin), "someone")
            .assert_denied_with("Authentication required");
    }

    #[test]
    fn test_engine_subset_semantics() {
        let granted: HashSet<String> = ["a:b:c", "d:e:f"].into_iter().map(String::from).collect();

        assert!(AuthorizationEngine::has_all_permissions(&granted, &["a:b:c"]));
        assert!(!AuthorizationEngine::has_all_permissions(&granted, &["a:b:c", "x:y:z"]));
        assert!(AuthorizationEngine::has_role("client", &[] as &[&str]));
        assert!(AuthorizationEngine::authorize_ownership("u", "u").allowed);
        AuthorizationEngine::authorize_ownership("u", "v")
            .assert_denied_with("Access denied: not resource owner");
    }
}
