//! # eventhub-database
//!
//! PostgreSQL persistence for EventHub: connection pool management,
//! migrations, and the repository implementations of the entity store
//! traits.

pub mod connection;
pub mod migration;
pub mod repositories;
