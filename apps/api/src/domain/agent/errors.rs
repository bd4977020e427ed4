use thiserror::Error;

use super::value_objects::{join_statuses, AgentStatus};

/// Errors produced by agent operations
///
/// Every variant is a caller-visible outcome; none of them leaves an agent
/// partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("Agent not found: {0}")]
    NotFound(String),

    #[error("Agent code {0} already exists")]
    DuplicateCode(String),

    #[error("Invalid status '{0}'. Valid: {}", join_statuses(&AgentStatus::ALL))]
    InvalidStatus(String),

    #[error("Cannot change from {from} to {to}. Valid: {}", join_statuses(.allowed))]
    IllegalTransition {
        from: AgentStatus,
        to: AgentStatus,
        allowed: Vec<AgentStatus>,
    },

    #[error("{0}")]
    Validation(String),

    #[error("Unexpected fault: {0}")]
    Unexpected(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
