//! Agent Status API Library
//!
//! This library provides the agent status workflow: domain logic, the
//! in-memory repository and the HTTP adapter that exposes them.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
