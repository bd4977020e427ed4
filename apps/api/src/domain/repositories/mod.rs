// Repository interfaces (ports)
// Implemented by adapters in the infrastructure layer

pub mod agent_repository;

pub use agent_repository::{AgentFilter, AgentRepository};
