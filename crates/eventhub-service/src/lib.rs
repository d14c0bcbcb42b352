//! # eventhub-service
//!
//! Business logic service layer for EventHub. The services enforce every
//! domain invariant — field validation, ownership authorization, and the
//! capacity/membership rules — before any store mutation; the stores
//! themselves have no behavior beyond persistence.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references. Every mutating operation
//! takes an explicit actor identity; there is no ambient session state.

pub mod event;
pub mod user;

pub use event::{EventQueryService, EventService};
pub use user::UserService;

#[cfg(test)]
pub(crate) mod testing;
