//! Hierarchy guard for actor-modifies-actor operations
//!
//! The guard walks a fixed sequence of gates and stops at the first failure:
//!
//! ```text
//! Start -> TargetChecked -> RolesResolved -> SelfCheckPassed -> PriorityPassed -> Allowed
//! ```
//!
//! It holds no state besides the peer policy; the facade looks up actors and
//! roles and hands them over as a [`HierarchyChange`].

use crate::config::PeerPolicy;
use crate::utils::error::RbacError;
use std::fmt;

use super::types::{Actor, Role};

/// Last gate the request got through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardStage {
    Start,
    TargetChecked,
    RolesResolved,
    SelfCheckPassed,
    PriorityPassed,
    Allowed,
}

impl fmt::Display for GuardStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::TargetChecked => "target_checked",
            Self::RolesResolved => "roles_resolved",
            Self::SelfCheckPassed => "self_check_passed",
            Self::PriorityPassed => "priority_passed",
            Self::Allowed => "allowed",
        };
        f.write_str(name)
    }
}

/// Role proposed for the target
#[derive(Debug, Clone, Copy)]
pub struct ProposedRole<'a> {
    /// Requested role name
    pub name: &'a str,
    /// The role record, if the name resolves
    pub role: Option<&'a Role>,
}

/// Everything the guard needs to judge one modification
#[derive(Debug, Clone, Copy)]
pub struct HierarchyChange<'a> {
    pub actor: &'a Actor,
    pub actor_role: Option<&'a Role>,
    pub target: Option<&'a Actor>,
    pub target_role: Option<&'a Role>,
    pub proposed: Option<ProposedRole<'a>>,
}

/// A rejected change, with the last gate passed before the rejection
#[derive(Debug)]
pub struct GuardDenial {
    pub stage: GuardStage,
    pub error: RbacError,
}

impl From<GuardDenial> for RbacError {
    fn from(denial: GuardDenial) -> Self {
        denial.error
    }
}

/// Priority-based protection against privilege escalation
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyGuard {
    peer_policy: PeerPolicy,
}

impl HierarchyGuard {
    pub fn new(peer_policy: PeerPolicy) -> Self {
        Self { peer_policy }
    }

    pub fn peer_policy(&self) -> PeerPolicy {
        self.peer_policy
    }

    /// Run every gate in order; reaching the end yields [`GuardStage::Allowed`]
    pub fn evaluate(&self, change: &HierarchyChange<'_>) -> Result<GuardStage, GuardDenial> {
        let deny = |stage, error| Err(GuardDenial { stage, error });

        // Target existence
        let Some(target) = change.target else {
            return deny(GuardStage::Start, RbacError::not_found("Target user does not exist"));
        };

        // Role resolution
        let (Some(actor_role), Some(target_role)) = (change.actor_role, change.target_role) else {
            return deny(
                GuardStage::TargetChecked,
                RbacError::bad_request("Role information not found"),
            );
        };

        // Self-modification
        if change.actor.id == target.id {
            return deny(
                GuardStage::RolesResolved,
                RbacError::forbidden("Cannot modify your own account through this operation"),
            );
        }

        // Priority dominance
        let dominated = match self.peer_policy {
            PeerPolicy::Allow => actor_role.priority < target_role.priority,
            PeerPolicy::Deny => actor_role.priority <= target_role.priority,
        };
        if dominated {
            return deny(
                GuardStage::SelfCheckPassed,
                RbacError::forbidden(format!(
                    "Insufficient priority to modify a user with role '{}'",
                    target.role
                )),
            );
        }

        // Escalation
        if let Some(proposed) = change.proposed.filter(|p| p.name != target.role) {
            let Some(new_role) = proposed.role else {
                return deny(
                    GuardStage::PriorityPassed,
                    RbacError::bad_request(format!("Role '{}' does not exist", proposed.name)),
                );
            };

            if new_role.priority > actor_role.priority {
                return deny(
                    GuardStage::PriorityPassed,
                    RbacError::forbidden(format!(
                        "Cannot assign role '{}' which outranks your own role",
                        proposed.name
                    )),
                );
            }
        }

        Ok(GuardStage::Allowed)
    }

    /// Same as [`evaluate`](Self::evaluate), surfacing the typed error only
    pub fn check(&self, change: &HierarchyChange<'_>) -> crate::utils::error::Result<()> {
        self.evaluate(change).map(|_| ()).map_err(RbacError::from)
    }
}
