use chrono::{DateTime, Utc};
use serde::Serialize;

use super::value_objects::AgentStatus;

/// One applied status change in an agent's history
///
/// Entries are only ever appended after a transition passed validation, so
/// the history never records a rejected change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    /// Status the agent moved into
    pub status: AgentStatus,
    /// Free-text note supplied with the change
    pub reason: Option<String>,
    /// When the change was applied
    pub timestamp: DateTime<Utc>,
}

impl StatusChange {
    pub fn new(status: AgentStatus, reason: Option<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            status,
            reason,
            timestamp,
        }
    }
}
