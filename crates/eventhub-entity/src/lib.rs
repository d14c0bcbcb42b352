//! # eventhub-entity
//!
//! Domain entity models and enums for EventHub, the validated input
//! structs that operations accept, and the [`store`] traits that the
//! service layer consumes.

pub mod event;
pub mod store;
pub mod user;

pub use event::{Category, Event, EventDetail, EventFilter, EventInput, EventSummary, JoinOutcome};
pub use store::{EventStore, UserStore};
pub use user::{ProfileUpdate, Registration, User, UserSummary};
