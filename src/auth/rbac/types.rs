//! RBAC type definitions

use crate::utils::error::{RbacError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

/// Validated permission identifier in `resource:action:category` form.
///
/// Callers outside the crate obtain one from the permission catalog, so a name
/// that is not known to the catalog never ends up inside a [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionName(String);

impl PermissionName {
    /// Check the `resource:action:category` shape
    pub(crate) fn parse(name: &str) -> Result<Self> {
        let segments: Vec<&str> = name.split(':').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.trim().is_empty()) {
            return Err(RbacError::validation(format!(
                "Permission '{}' must have the form resource:action:category",
                name
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resource segment, e.g. `user` in `user:read:own`
    pub fn resource(&self) -> &str {
        self.0.split(':').next().unwrap_or_default()
    }

    /// Action segment, e.g. `read` in `user:read:own`
    pub fn action(&self) -> &str {
        self.0.split(':').nth(1).unwrap_or_default()
    }
}

impl fmt::Display for PermissionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PermissionName {
    type Error = RbacError;

    fn try_from(name: String) -> Result<Self> {
        Self::parse(&name)
    }
}

impl From<PermissionName> for String {
    fn from(name: PermissionName) -> Self {
        name.0
    }
}

impl AsRef<str> for PermissionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PermissionName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Permission definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    /// Permission name
    pub name: PermissionName,
    /// Permission description
    pub description: String,
    /// Resource this permission applies to
    pub resource: String,
    /// Action this permission allows
    pub action: String,
    /// Scope category (`self` or `all` for the default catalog)
    pub category: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Permission {
    /// Build a permission record, deriving resource and action from the name
    pub(crate) fn define(name: &str, description: &str, category: &str) -> Result<Self> {
        let name = PermissionName::parse(name)?;
        Ok(Self {
            resource: name.resource().to_string(),
            action: name.action().to_string(),
            name,
            description: description.to_string(),
            category: category.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// Role definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Role name
    pub name: String,
    /// Role description
    pub description: String,
    /// Permissions granted by this role, in assignment order
    pub permissions: Vec<PermissionName>,
    /// Strength of the role; higher dominates lower
    pub priority: u32,
    /// Inactive roles resolve to no permissions
    pub is_active: bool,
    /// System roles cannot be deleted
    pub protected: bool,
    /// Free-form metadata
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Whether the permission is assigned to this role
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p.as_str() == permission)
    }

    /// Permission names as plain strings
    pub fn permission_names(&self) -> impl Iterator<Item = &str> {
        self.permissions.iter().map(PermissionName::as_str)
    }
}

/// Input for creating a role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRole {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default = "default_priority")]
    pub priority: u32,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl NewRole {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            permissions: Vec::new(),
            priority: default_priority(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

fn default_priority() -> u32 {
    1
}

/// Partial update for a role.
///
/// `permissions` replaces the whole set. An empty replacement is rejected;
/// emptying a role requires `clear_permissions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleUpdate {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    #[serde(default)]
    pub clear_permissions: bool,
    #[serde(default)]
    pub priority: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// Authenticated identity, owned by the surrounding service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identity
    pub id: String,
    /// Assigned role name
    pub role: String,
    /// Whether the identity is active
    pub is_active: bool,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            is_active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Outcome of an authorization check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationDecision {
    /// Whether access is granted
    pub allowed: bool,
    /// Reason for denial (if not allowed)
    pub reason: Option<String>,
}

impl AuthorizationDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Convert a denial into a `Forbidden` error
    pub fn into_result(self) -> Result<()> {
        if self.allowed {
            Ok(())
        } else {
            Err(RbacError::Forbidden(
                self.reason.unwrap_or_else(|| "Forbidden".to_string()),
            ))
        }
    }
}
