//! Event domain entities.

pub mod category;
pub mod filter;
pub mod model;

pub use category::Category;
pub use filter::EventFilter;
pub use model::{Event, EventDetail, EventInput, EventSummary, JoinOutcome, NewEvent};
