//! Configuration loading tests

#[cfg(test)]
mod tests {
    use crate::common::TestSystem;
    use rbac_core::{Config, PeerPolicy, RbacError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
rbac:
  seed_defaults: false
  privileged_roles: [super_admin]
  peer_policy: deny
logging:
  level: debug
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert!(!config.rbac.seed_defaults);
        assert_eq!(config.rbac.privileged_roles, vec!["super_admin"]);
        assert_eq!(config.rbac.peer_policy, PeerPolicy::Deny);
        assert_eq!(config.logging.level, "debug");

        let system = TestSystem::with_config(config.rbac).await;
        assert!(system.rbac.roles().list_all(true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "rbac:\n  privileged_roles: []").unwrap();

        let result = Config::from_file(file.path()).await;
        assert!(matches!(result, Err(RbacError::Config(_))));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = Config::from_file("/nonexistent/rbac.yaml").await;
        assert!(matches!(result, Err(RbacError::Config(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let config = Config::from_lookup(|key| match key {
            "RBAC_PEER_POLICY" => Some("deny".to_string()),
            "RBAC_PRIVILEGED_ROLES" => Some("admin, owner".to_string()),
            "RBAC_LOG_JSON" => Some("true".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.rbac.peer_policy, PeerPolicy::Deny);
        assert_eq!(config.rbac.privileged_roles, vec!["admin", "owner"]);
        assert!(config.logging.json);
        assert!(config.rbac.seed_defaults);
    }

    #[test]
    fn test_file_and_environment_merge() {
        let file = Config::from_yaml("rbac:\n  privileged_roles: [owner]\n").unwrap();
        let env = Config::from_lookup(|key| {
            (key == "RBAC_PEER_POLICY").then(|| "deny".to_string())
        })
        .unwrap();

        let merged = file.merge(env);
        assert_eq!(merged.rbac.privileged_roles, vec!["owner"]);
        assert_eq!(merged.rbac.peer_policy, PeerPolicy::Deny);
    }
}
