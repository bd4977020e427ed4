use super::errors::{AgentError, AgentResult};
use super::history::StatusChange;
use super::value_objects::{AgentStatus, Email};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Input for creating an agent
#[derive(Debug, Clone, Default)]
pub struct NewAgent {
    pub agent_code: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub skills: BTreeSet<String>,
    /// Initial status; `AgentStatus::default()` when absent
    pub status: Option<AgentStatus>,
}

/// Partial profile update
///
/// `None` and empty strings leave the current value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub skills: Option<BTreeSet<String>>,
}

/// Agent aggregate root
///
/// Represents one tracked worker with a profile and a workflow status.
///
/// # Invariants
/// - `agent_code` and `name` are never blank
/// - `agent_code` never changes after creation
/// - `status_history` only grows, oldest first
/// - `updated_at` never moves backwards
///
/// # Example
/// ```
/// use agent_status_api::domain::agent::{Agent, AgentStatus, NewAgent};
///
/// let agent = Agent::new(NewAgent {
///     agent_code: "AG-001".to_string(),
///     name: "Jane Doe".to_string(),
///     email: "jane@example.com".to_string(),
///     department: "Support".to_string(),
///     ..Default::default()
/// })
/// .expect("valid agent");
///
/// assert_eq!(agent.status(), AgentStatus::Available);
/// assert!(agent.status_history().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Agent {
    id: Uuid,
    agent_code: String,
    name: String,
    email: Email,
    department: String,
    skills: BTreeSet<String>,
    status: AgentStatus,
    status_reason: Option<String>,
    status_history: Vec<StatusChange>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Agent {
    /// Creates a new Agent
    ///
    /// # Business Rules Enforced
    /// - Agent code must not be blank
    /// - Name must not be blank
    /// - Email must be plausible
    /// - History starts empty
    pub fn new(input: NewAgent) -> AgentResult<Self> {
        let agent_code = input.agent_code.trim().to_string();
        if agent_code.is_empty() {
            return Err(AgentError::Validation(
                "Agent code cannot be empty".to_string(),
            ));
        }

        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AgentError::Validation("Name cannot be empty".to_string()));
        }

        let email = Email::new(input.email)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            agent_code,
            name,
            email,
            department: input.department.trim().to_string(),
            skills: normalize_skills(input.skills),
            status: input.status.unwrap_or_default(),
            status_reason: None,
            status_history: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the provided, non-empty profile fields
    ///
    /// Status and history are never touched. The email is validated before
    /// any field changes, so a rejected update leaves the agent as it was.
    pub fn apply_profile_update(&mut self, update: ProfileUpdate) -> AgentResult<()> {
        let email = match non_blank(update.email) {
            Some(email) => Some(Email::new(email)?),
            None => None,
        };

        if let Some(name) = non_blank(update.name) {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(department) = non_blank(update.department) {
            self.department = department;
        }
        if let Some(skills) = update.skills {
            self.skills = normalize_skills(skills);
        }

        self.touch();
        Ok(())
    }

    /// Moves the agent into `status` and records the change
    ///
    /// Performs no legality check; callers go through
    /// [`attempt_transition`](super::transitions::attempt_transition).
    pub fn apply_status_transition(&mut self, status: AgentStatus, reason: Option<String>) {
        let timestamp = self.touch();
        let reason = non_blank(reason);

        self.status = status;
        self.status_reason = reason.clone();
        self.status_history
            .push(StatusChange::new(status, reason, timestamp));
    }

    fn touch(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
        self.updated_at
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn agent_code(&self) -> &str {
        &self.agent_code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    pub fn status_reason(&self) -> Option<&str> {
        self.status_reason.as_deref()
    }

    pub fn status_history(&self) -> &[StatusChange] {
        &self.status_history
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_skills(skills: BTreeSet<String>) -> BTreeSet<String> {
    skills
        .into_iter()
        .map(|skill| skill.trim().to_string())
        .filter(|skill| !skill.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_agent(code: &str) -> NewAgent {
        NewAgent {
            agent_code: code.to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            department: "Support".to_string(),
            skills: ["billing", "english"].iter().map(|s| s.to_string()).collect(),
            status: None,
        }
    }

    #[test]
    fn create_agent_with_defaults() {
        let agent = Agent::new(new_agent("AG-001")).unwrap();

        assert_eq!(agent.agent_code(), "AG-001");
        assert_eq!(agent.name(), "Jane Doe");
        assert_eq!(agent.email().as_str(), "jane@example.com");
        assert_eq!(agent.department(), "Support");
        assert_eq!(agent.skills().len(), 2);
        assert_eq!(agent.status(), AgentStatus::Available);
        assert!(agent.status_reason().is_none());
        assert!(agent.status_history().is_empty());
        assert_eq!(agent.created_at(), agent.updated_at());
    }

    #[test]
    fn create_agent_with_explicit_status() {
        let mut input = new_agent("AG-002");
        input.status = Some(AgentStatus::Offline);

        let agent = Agent::new(input).unwrap();

        assert_eq!(agent.status(), AgentStatus::Offline);
    }

    #[test]
    fn create_agent_with_blank_code_fails() {
        let result = Agent::new(new_agent("   "));

        assert_eq!(
            result.unwrap_err(),
            AgentError::Validation("Agent code cannot be empty".to_string())
        );
    }

    #[test]
    fn create_agent_with_blank_name_fails() {
        let mut input = new_agent("AG-003");
        input.name = String::new();

        assert!(Agent::new(input).is_err());
    }

    #[test]
    fn create_agent_with_invalid_email_fails() {
        let mut input = new_agent("AG-004");
        input.email = "not-an-email".to_string();

        assert!(matches!(Agent::new(input), Err(AgentError::Validation(_))));
    }

    #[test]
    fn department_only_update_leaves_other_fields() {
        let mut agent = Agent::new(new_agent("AG-005")).unwrap();
        let before = agent.clone();

        agent
            .apply_profile_update(ProfileUpdate {
                department: Some("Sales".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(agent.department(), "Sales");
        assert_eq!(agent.name(), before.name());
        assert_eq!(agent.email(), before.email());
        assert_eq!(agent.skills(), before.skills());
        assert_eq!(agent.status(), before.status());
        assert_eq!(agent.agent_code(), before.agent_code());
        assert!(agent.updated_at() >= before.updated_at());
    }

    #[test]
    fn empty_strings_in_update_are_ignored() {
        let mut agent = Agent::new(new_agent("AG-006")).unwrap();

        agent
            .apply_profile_update(ProfileUpdate {
                name: Some(String::new()),
                email: Some("  ".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(agent.name(), "Jane Doe");
        assert_eq!(agent.email().as_str(), "jane@example.com");
    }

    #[test]
    fn invalid_email_update_changes_nothing() {
        let mut agent = Agent::new(new_agent("AG-007")).unwrap();
        let before = agent.clone();

        let result = agent.apply_profile_update(ProfileUpdate {
            name: Some("John Roe".to_string()),
            email: Some("broken".to_string()),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(agent.name(), before.name());
        assert_eq!(agent.updated_at(), before.updated_at());
    }

    #[test]
    fn skills_update_replaces_the_set() {
        let mut agent = Agent::new(new_agent("AG-008")).unwrap();

        agent
            .apply_profile_update(ProfileUpdate {
                skills: Some(["spanish".to_string()].into_iter().collect()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(agent.skills().len(), 1);
        assert!(agent.skills().contains("spanish"));
    }

    #[test]
    fn status_transition_appends_history() {
        let mut agent = Agent::new(new_agent("AG-009")).unwrap();

        agent.apply_status_transition(AgentStatus::Busy, Some("Inbound call".to_string()));

        assert_eq!(agent.status(), AgentStatus::Busy);
        assert_eq!(agent.status_reason(), Some("Inbound call"));
        assert_eq!(agent.status_history().len(), 1);
        let entry = &agent.status_history()[0];
        assert_eq!(entry.status, AgentStatus::Busy);
        assert_eq!(entry.reason.as_deref(), Some("Inbound call"));
        assert_eq!(entry.timestamp, agent.updated_at());
    }

    #[test]
    fn history_is_ordered_oldest_first() {
        let mut agent = Agent::new(new_agent("AG-010")).unwrap();

        agent.apply_status_transition(AgentStatus::Busy, None);
        agent.apply_status_transition(AgentStatus::OnBreak, None);
        agent.apply_status_transition(AgentStatus::Available, None);

        let statuses: Vec<_> = agent.status_history().iter().map(|c| c.status).collect();
        assert_eq!(
            statuses,
            vec![AgentStatus::Busy, AgentStatus::OnBreak, AgentStatus::Available]
        );
        assert!(agent
            .status_history()
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp));
    }
}
