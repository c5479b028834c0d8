//! RBAC configuration

use super::default_true;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the hierarchy guard treats an actor modifying a peer of equal priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerPolicy {
    /// Equal priority passes the dominance gate
    #[default]
    Allow,
    /// Equal priority is rejected at the dominance gate
    Deny,
}

impl FromStr for PeerPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "deny" => Ok(Self::Deny),
            other => Err(format!("Unknown peer policy '{}', expected 'allow' or 'deny'", other)),
        }
    }
}

impl fmt::Display for PeerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => f.write_str("allow"),
            Self::Deny => f.write_str("deny"),
        }
    }
}

/// RBAC configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Seed the default permission catalog and system roles on startup
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
    /// Roles that bypass ownership checks
    #[serde(default = "default_privileged_roles")]
    pub privileged_roles: Vec<String>,
    /// Equal priority handling in the hierarchy guard
    #[serde(default)]
    pub peer_policy: PeerPolicy,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            seed_defaults: true,
            privileged_roles: default_privileged_roles(),
            peer_policy: PeerPolicy::default(),
        }
    }
}

impl RbacConfig {
    /// Merge RBAC configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.seed_defaults {
            self.seed_defaults = other.seed_defaults;
        }
        if other.privileged_roles != default_privileged_roles() {
            self.privileged_roles = other.privileged_roles;
        }
        if other.peer_policy != PeerPolicy::default() {
            self.peer_policy = other.peer_policy;
        }
        self
    }

    /// Validate RBAC configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.privileged_roles.is_empty() {
            return Err("At least one privileged role must be configured".to_string());
        }

        if self.privileged_roles.iter().any(|r| r.trim().is_empty()) {
            return Err("Privileged role names cannot be empty".to_string());
        }

        Ok(())
    }
}

fn default_privileged_roles() -> Vec<String> {
    vec!["admin".to_string(), "super_admin".to_string()]
}
