//! Security-aware logging utilities

use tracing::{info, warn};

/// Authorization event recorded by the audit log
#[derive(Debug, Clone, Copy)]
pub struct AuthzEvent<'a> {
    /// Acting actor id, if one was resolved
    pub actor_id: Option<&'a str>,
    /// Acting actor role
    pub role: Option<&'a str>,
    /// Check that produced the decision
    pub check: &'a str,
    /// Subject of the check (permission list, role list, target id)
    pub subject: &'a str,
    /// Whether access was granted
    pub granted: bool,
    /// Denial reason
    pub reason: Option<&'a str>,
}

/// Security-aware logging utilities
pub struct SecurityLogger;

impl SecurityLogger {
    /// Log authorization events
    pub fn log_authz_event(event: AuthzEvent<'_>) {
        let actor_id = event.actor_id.map(sanitize);
        let role = event.role.map(sanitize);
        let subject = sanitize(event.subject);

        if event.granted {
            info!(
                target: "security",
                actor_id = actor_id.as_deref(),
                role = role.as_deref(),
                check = event.check,
                subject = %subject,
                granted = true,
                "Authorization granted"
            );
        } else {
            warn!(
                target: "security",
                actor_id = actor_id.as_deref(),
                role = role.as_deref(),
                check = event.check,
                subject = %subject,
                granted = false,
                reason = event.reason,
                "Authorization denied"
            );
        }
    }
}

/// Truncate and strip control characters to prevent log injection
fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_control())
        .take(200)
        .collect()
}
