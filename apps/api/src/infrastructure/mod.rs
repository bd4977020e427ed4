// Infrastructure layer module
// Contains storage adapters for the domain ports
// Follows Hexagonal Architecture

pub mod repositories;
