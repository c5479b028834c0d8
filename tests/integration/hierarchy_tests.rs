//! Hierarchy guard integration tests

#[cfg(test)]
mod tests {
    use crate::common::assertions::{assert_forbidden, assert_status};
    use crate::common::{ActorFactory, TestSystem};
    use rbac_core::NewRole;

    #[tokio::test]
    async fn test_admin_cannot_touch_super_admin() {
        let system = TestSystem::seeded().await;
        let admin = system.add_actor(ActorFactory::admin());
        let root = system.add_actor(ActorFactory::super_admin());

        let err = assert_forbidden(
            system
                .rbac
                .guard_hierarchy_change(&admin, &root.id, None)
                .await,
        );
        assert!(err.to_string().contains("super_admin"));
    }

    #[tokio::test]
    async fn test_admin_cannot_escalate_client() {
        let system = TestSystem::seeded().await;
        let admin = system.add_actor(ActorFactory::admin());
        let client = system.add_actor(ActorFactory::client());

        assert_forbidden(
            system
                .rbac
                .guard_hierarchy_change(&admin, &client.id, Some("super_admin"))
                .await,
        );
        system
            .rbac
            .guard_hierarchy_change(&admin, &client.id, Some("moderator"))
            .await
            .unwrap();
        system
            .rbac
            .guard_hierarchy_change(&admin, &client.id, Some("admin"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_moderator_on_moderator() {
        let system = TestSystem::seeded().await;
        let moderator = system.add_actor(ActorFactory::moderator());
        let peer = system.add_actor(ActorFactory::moderator());

        system
            .rbac
            .guard_hierarchy_change(&moderator, &peer.id, None)
            .await
            .unwrap();

        let strict = TestSystem::strict_peers().await;
        let moderator = strict.add_actor(moderator);
        let peer = strict.add_actor(peer);
        assert_forbidden(
            strict
                .rbac
                .guard_hierarchy_change(&moderator, &peer.id, None)
                .await,
        );
    }

    #[tokio::test]
    async fn test_self_modification() {
        let system = TestSystem::seeded().await;
        let root = system.add_actor(ActorFactory::super_admin());

        assert_forbidden(
            system
                .rbac
                .guard_hierarchy_change(&root, &root.id, Some("client"))
                .await,
        );
    }

    #[tokio::test]
    async fn test_missing_target_and_roles() {
        let system = TestSystem::seeded().await;
        let admin = system.add_actor(ActorFactory::admin());
        let orphan = system.add_actor(ActorFactory::with_role("retired"));

        assert_status(
            system
                .rbac
                .guard_hierarchy_change(&admin, "no-such-actor", None)
                .await,
            404,
        );
        assert_status(
            system
                .rbac
                .guard_hierarchy_change(&admin, &orphan.id, None)
                .await,
            400,
        );
        let client = system.add_actor(ActorFactory::client());
        assert_status(
            system
                .rbac
                .guard_hierarchy_change(&admin, &client.id, Some("retired"))
                .await,
            400,
        );
    }

    #[tokio::test]
    async fn test_custom_role_priorities() {
        let system = TestSystem::seeded().await;
        system
            .rbac
            .roles()
            .create(NewRole::new("owner", "Tenant owner").with_priority(10))
            .await
            .unwrap();
        let owner = system.add_actor(ActorFactory::with_role("owner"));
        let root = system.add_actor(ActorFactory::super_admin());

        system
            .rbac
            .guard_hierarchy_change(&owner, &root.id, Some("super_admin"))
            .await
            .unwrap();
        assert_forbidden(
            system
                .rbac
                .guard_hierarchy_change(&root, &owner.id, None)
                .await,
        );
    }

    #[tokio::test]
    async fn test_directory_state_wins_over_caller() {
        let system = TestSystem::seeded().await;
        let admin = system.add_actor(ActorFactory::admin());
        let client = system.add_actor(ActorFactory::client());

        system.actors.assign_role(&admin.id, "client");
        assert_forbidden(
            system
                .rbac
                .guard_hierarchy_change(&admin, &client.id, Some("admin"))
                .await,
        );

        system.actors.deactivate(&admin.id);
        assert_status(
            system
                .rbac
                .guard_hierarchy_change(&admin, &client.id, None)
                .await,
            401,
        );
    }
}
