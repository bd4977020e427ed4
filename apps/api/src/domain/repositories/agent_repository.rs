use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::agent::{
    Agent, AgentResult, AgentStatus, ProfileUpdate, StatusSummary,
};

/// Exact-match narrowing for agent listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentFilter {
    pub status: Option<AgentStatus>,
    pub department: Option<String>,
}

impl AgentFilter {
    /// Returns true when `agent` satisfies every set criterion
    pub fn matches(&self, agent: &Agent) -> bool {
        self.status.map_or(true, |status| agent.status() == status)
            && self
                .department
                .as_deref()
                .map_or(true, |department| agent.department() == department)
    }
}

/// Repository trait for the Agent aggregate
///
/// The repository exclusively owns the records; every method hands back
/// cloned snapshots. Mutating methods are atomic with respect to each other.
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Stores a new agent, rejecting a duplicate agent code
    async fn insert(&self, agent: Agent) -> AgentResult<Agent>;

    /// Find an agent by its ID
    async fn find_by_id(&self, id: Uuid) -> AgentResult<Option<Agent>>;

    /// Find an agent by its business code
    async fn find_by_code(&self, agent_code: &str) -> AgentResult<Option<Agent>>;

    /// List agents in insertion order
    async fn list(&self, filter: &AgentFilter) -> AgentResult<Vec<Agent>>;

    /// Apply a partial profile update
    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> AgentResult<Agent>;

    /// Run the transition enforcer against the stored agent
    async fn transition_status(
        &self,
        id: Uuid,
        requested: &str,
        reason: Option<String>,
    ) -> AgentResult<Agent>;

    /// Delete an agent by ID
    async fn delete(&self, id: Uuid) -> AgentResult<()>;

    /// Number of stored agents
    async fn count(&self) -> AgentResult<usize>;

    /// Status breakdown across every stored agent
    async fn status_summary(&self) -> AgentResult<StatusSummary> {
        let agents = self.list(&AgentFilter::default()).await?;
        Ok(StatusSummary::from_agents(&agents))
    }
}
