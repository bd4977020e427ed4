use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::agent::Agent;
use super::value_objects::AgentStatus;

/// Per-status head count across all agents
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub total_agents: usize,
    pub status_counts: BTreeMap<AgentStatus, usize>,
    /// Integer-rounded share of agents per status; 0 for an empty roster
    pub status_percentages: BTreeMap<AgentStatus, u32>,
    pub last_updated: DateTime<Utc>,
}

impl StatusSummary {
    /// Tallies `agents`, reporting every registered status even when unused
    pub fn from_agents(agents: &[Agent]) -> Self {
        let total_agents = agents.len();

        let mut status_counts: BTreeMap<AgentStatus, usize> =
            AgentStatus::ALL.iter().map(|status| (*status, 0)).collect();
        for agent in agents {
            *status_counts.entry(agent.status()).or_default() += 1;
        }

        let status_percentages = status_counts
            .iter()
            .map(|(status, count)| (*status, percentage(*count, total_agents)))
            .collect();

        Self {
            total_agents,
            status_counts,
            status_percentages,
            last_updated: Utc::now(),
        }
    }
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 * 100.0 / total as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent::NewAgent;

    fn agents_with(statuses: &[AgentStatus]) -> Vec<Agent> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                Agent::new(NewAgent {
                    agent_code: format!("AG-{:03}", i),
                    name: format!("Agent {}", i),
                    email: format!("agent{}@example.com", i),
                    status: Some(*status),
                    ..Default::default()
                })
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn empty_roster_reports_zero_everywhere() {
        let summary = StatusSummary::from_agents(&[]);

        assert_eq!(summary.total_agents, 0);
        for status in AgentStatus::ALL {
            assert_eq!(summary.status_counts[&status], 0);
            assert_eq!(summary.status_percentages[&status], 0);
        }
    }

    #[test]
    fn counts_and_percentages_for_four_agents() {
        use AgentStatus::*;
        let agents = agents_with(&[Available, Available, Busy, Offline]);

        let summary = StatusSummary::from_agents(&agents);

        assert_eq!(summary.total_agents, 4);
        assert_eq!(summary.status_counts[&Available], 2);
        assert_eq!(summary.status_counts[&Busy], 1);
        assert_eq!(summary.status_counts[&Offline], 1);
        assert_eq!(summary.status_counts[&Away], 0);
        assert_eq!(summary.status_percentages[&Available], 50);
        assert_eq!(summary.status_percentages[&Busy], 25);
        assert_eq!(summary.status_percentages[&Offline], 25);
        assert_eq!(summary.status_percentages[&OnBreak], 0);
        assert_eq!(summary.status_percentages[&InMeeting], 0);
    }

    #[test]
    fn percentages_round_to_nearest() {
        use AgentStatus::*;
        let agents = agents_with(&[Available, Busy, Busy]);

        let summary = StatusSummary::from_agents(&agents);

        assert_eq!(summary.status_percentages[&Available], 33);
        assert_eq!(summary.status_percentages[&Busy], 67);
    }

    #[test]
    fn summary_serializes_status_keys() {
        let summary = StatusSummary::from_agents(&agents_with(&[AgentStatus::OnBreak]));

        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["totalAgents"], 1);
        assert_eq!(value["statusCounts"]["on_break"], 1);
        assert_eq!(value["statusPercentages"]["on_break"], 100);
        assert!(value["lastUpdated"].is_string());
    }
}
