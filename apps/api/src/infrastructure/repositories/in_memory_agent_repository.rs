use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::agent::{attempt_transition, Agent, AgentError, AgentResult, ProfileUpdate};
use crate::domain::repositories::{AgentFilter, AgentRepository};

/// In-process implementation of AgentRepository
///
/// A single lock guards the whole table. Writers hold it across their
/// check-then-act sequence; readers clone snapshots under the read lock.
/// No `.await` happens while the lock is held.
#[derive(Default)]
pub struct InMemoryAgentRepository {
    table: RwLock<AgentTable>,
}

#[derive(Default)]
struct AgentTable {
    agents: HashMap<Uuid, Agent>,
    /// Insertion order of live ids
    order: Vec<Uuid>,
    /// agent_code -> id
    codes: HashMap<String, Uuid>,
}

impl AgentTable {
    fn get_mut(&mut self, id: Uuid) -> AgentResult<&mut Agent> {
        self.agents
            .get_mut(&id)
            .ok_or_else(|| AgentError::NotFound(id.to_string()))
    }
}

impl InMemoryAgentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn insert(&self, agent: Agent) -> AgentResult<Agent> {
        let mut table = self.table.write();

        if table.codes.contains_key(agent.agent_code()) {
            return Err(AgentError::DuplicateCode(agent.agent_code().to_string()));
        }
        if table.agents.contains_key(&agent.id()) {
            return Err(AgentError::Unexpected(format!(
                "agent id {} already stored",
                agent.id()
            )));
        }

        table
            .codes
            .insert(agent.agent_code().to_string(), agent.id());
        table.order.push(agent.id());
        table.agents.insert(agent.id(), agent.clone());

        Ok(agent)
    }

    async fn find_by_id(&self, id: Uuid) -> AgentResult<Option<Agent>> {
        Ok(self.table.read().agents.get(&id).cloned())
    }

    async fn find_by_code(&self, agent_code: &str) -> AgentResult<Option<Agent>> {
        let table = self.table.read();

        Ok(table
            .codes
            .get(agent_code)
            .and_then(|id| table.agents.get(id))
            .cloned())
    }

    async fn list(&self, filter: &AgentFilter) -> AgentResult<Vec<Agent>> {
        let table = self.table.read();

        Ok(table
            .order
            .iter()
            .filter_map(|id| table.agents.get(id))
            .filter(|agent| filter.matches(agent))
            .cloned()
            .collect())
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> AgentResult<Agent> {
        let mut table = self.table.write();
        let agent = table.get_mut(id)?;

        agent.apply_profile_update(update)?;

        Ok(agent.clone())
    }

    async fn transition_status(
        &self,
        id: Uuid,
        requested: &str,
        reason: Option<String>,
    ) -> AgentResult<Agent> {
        let mut table = self.table.write();
        let agent = table.get_mut(id)?;

        attempt_transition(agent, requested, reason)?;

        Ok(agent.clone())
    }

    async fn delete(&self, id: Uuid) -> AgentResult<()> {
        let mut table = self.table.write();

        let agent = table
            .agents
            .remove(&id)
            .ok_or_else(|| AgentError::NotFound(id.to_string()))?;
        table.codes.remove(agent.agent_code());
        table.order.retain(|stored| *stored != id);

        Ok(())
    }

    async fn count(&self) -> AgentResult<usize> {
        Ok(self.table.read().agents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent::NewAgent;

    fn agent(code: &str) -> Agent {
        Agent::new(NewAgent {
            agent_code: code.to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn deleted_code_can_be_reused() {
        let repo = InMemoryAgentRepository::new();
        let first = repo.insert(agent("AG-1")).await.unwrap();

        repo.delete(first.id()).await.unwrap();

        assert!(repo.insert(agent("AG-1")).await.is_ok());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn returned_snapshot_does_not_alias_stored_record() {
        let repo = InMemoryAgentRepository::new();
        let mut snapshot = repo.insert(agent("AG-2")).await.unwrap();

        snapshot.apply_status_transition(crate::domain::agent::AgentStatus::Busy, None);

        let stored = repo.find_by_id(snapshot.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), crate::domain::agent::AgentStatus::Available);
        assert!(stored.status_history().is_empty());
    }
}
