//! Event domain and query services.

pub mod query;
pub mod service;

pub use query::EventQueryService;
pub use service::EventService;
