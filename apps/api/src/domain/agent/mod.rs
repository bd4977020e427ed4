// Agent domain module
// Contains the agent aggregate root, status value objects and transition rules

#![allow(clippy::module_inception)]

pub mod agent;
pub mod errors;
pub mod history;
pub mod summary;
pub mod transitions;
pub mod value_objects;

// Re-export main types for convenience
pub use agent::{Agent, NewAgent, ProfileUpdate};
pub use errors::{AgentError, AgentResult};
pub use history::StatusChange;
pub use summary::StatusSummary;
pub use transitions::attempt_transition;
pub use value_objects::{AgentStatus, Email};
