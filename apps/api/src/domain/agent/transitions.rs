//! Status transition enforcement
//!
//! The only path through which an agent's status changes. Validation happens
//! fully before the agent is touched, so a rejected request has no effect.

use super::agent::Agent;
use super::errors::{AgentError, AgentResult};
use super::value_objects::AgentStatus;

/// Validates `requested` against the transition table and applies it
///
/// An unknown status string is reported as [`AgentError::InvalidStatus`]
/// before legality is considered.
pub fn attempt_transition(
    agent: &mut Agent,
    requested: &str,
    reason: Option<String>,
) -> AgentResult<()> {
    let next: AgentStatus = requested.parse()?;
    let current = agent.status();

    if !current.can_transition_to(next) {
        return Err(AgentError::IllegalTransition {
            from: current,
            to: next,
            allowed: current.allowed_transitions().to_vec(),
        });
    }

    agent.apply_status_transition(next, reason);
    Ok(())
}
