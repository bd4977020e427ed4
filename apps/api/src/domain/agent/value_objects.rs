use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::AgentError;

/// Workflow status of an agent
///
/// The set is closed: a status string that does not parse into one of these
/// variants is rejected everywhere.
///
/// # Status Transitions
/// ```text
/// available  -> busy | offline | away
/// busy       -> available | on_break | in_meeting | offline
/// away       -> available | offline
/// offline    -> available
/// on_break   -> available | offline
/// in_meeting -> available | busy
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Ready to take work
    #[default]
    Available,
    /// Currently handling work
    Busy,
    /// Temporarily away from the desk
    Away,
    /// Signed off
    Offline,
    /// On a scheduled break
    OnBreak,
    /// In a meeting
    InMeeting,
}

impl AgentStatus {
    /// Every status, in registry order
    pub const ALL: [AgentStatus; 6] = [
        AgentStatus::Available,
        AgentStatus::Busy,
        AgentStatus::Away,
        AgentStatus::Offline,
        AgentStatus::OnBreak,
        AgentStatus::InMeeting,
    ];

    /// Returns the statuses reachable from this one in a single step
    ///
    /// The match is exhaustive, so every status has an entry. An empty slice
    /// would mark a terminal status.
    ///
    /// # Example
    /// ```
    /// use agent_status_api::domain::agent::value_objects::AgentStatus;
    ///
    /// assert_eq!(
    ///     AgentStatus::Offline.allowed_transitions(),
    ///     &[AgentStatus::Available]
    /// );
    /// ```
    pub fn allowed_transitions(self) -> &'static [AgentStatus] {
        use AgentStatus::*;
        match self {
            Available => &[Busy, Offline, Away],
            Busy => &[Available, OnBreak, InMeeting, Offline],
            Away => &[Available, Offline],
            Offline => &[Available],
            OnBreak => &[Available, Offline],
            InMeeting => &[Available, Busy],
        }
    }

    /// Checks if a transition from current status to next status is valid
    pub fn can_transition_to(self, next: AgentStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    /// Returns the wire name of the status
    pub fn as_str(self) -> &'static str {
        match self {
            AgentStatus::Available => "available",
            AgentStatus::Busy => "busy",
            AgentStatus::Away => "away",
            AgentStatus::Offline => "offline",
            AgentStatus::OnBreak => "on_break",
            AgentStatus::InMeeting => "in_meeting",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentStatus {
    type Err = AgentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        AgentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| AgentError::InvalidStatus(value.to_string()))
    }
}

/// Joins statuses into a comma separated list for messages
pub fn join_statuses(statuses: &[AgentStatus]) -> String {
    statuses
        .iter()
        .map(|status| status.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Email value object representing a plausible email address
///
/// # Invariants
/// - Must contain '@' character
/// - Must be at least 3 characters long
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// # Example
    /// ```
    /// use agent_status_api::domain::agent::value_objects::Email;
    ///
    /// let email = Email::new("jane@example.com").expect("valid email");
    /// assert_eq!(email.as_str(), "jane@example.com");
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, AgentError> {
        let email = email.into().trim().to_string();
        if email.contains('@') && email.len() >= 3 {
            Ok(Email(email))
        } else {
            Err(AgentError::Validation(format!("Invalid email: {}", email)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
