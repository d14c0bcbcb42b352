//! The event query service — read-only, filtered views over the event
//! catalogue. Never mutates state.

use std::sync::Arc;

use chrono::Utc;

use eventhub_core::AppResult;
use eventhub_core::types::{EventId, UserId};
use eventhub_entity::event::{EventDetail, EventFilter, EventSummary};
use eventhub_entity::store::{EventStore, UserStore};

/// Builds filtered and per-user event listings.
#[derive(Clone)]
pub struct EventQueryService {
    /// Event store.
    events: Arc<dyn EventStore>,
    /// User store, for resolving organizer display fields.
    users: Arc<dyn UserStore>,
}

impl EventQueryService {
    /// Creates a new query service.
    pub fn new(events: Arc<dyn EventStore>, users: Arc<dyn UserStore>) -> Self {
        Self { events, users }
    }

    /// Upcoming events (`date >= now`) matching the filter, soonest
    /// first, enriched with organizer display fields.
    pub async fn list_upcoming(&self, filter: &EventFilter) -> AppResult<Vec<EventSummary>> {
        self.events.list_upcoming(filter, Utc::now()).await
    }

    /// All events organized by the user, past included, most recent
    /// date first.
    pub async fn list_organized(&self, user_id: UserId) -> AppResult<Vec<EventSummary>> {
        self.events.list_by_organizer(user_id).await
    }

    /// Upcoming events the user attends, soonest first.
    pub async fn list_attending(&self, user_id: UserId) -> AppResult<Vec<EventSummary>> {
        self.events.list_attending(user_id, Utc::now()).await
    }

    /// A single event with organizer and attendees resolved to display
    /// fields; `None` when the event does not exist.
    pub async fn event_detail(&self, event_id: EventId) -> AppResult<Option<EventDetail>> {
        let Some(event) = self.events.find_by_id(event_id).await? else {
            return Ok(None);
        };

        let organizer = self
            .users
            .find_by_id(event.organizer)
            .await?
            .map(|u| u.summary())
            .ok_or_else(|| {
                eventhub_core::AppError::database(format!(
                    "Event {event_id} references missing organizer {}",
                    event.organizer
                ))
            })?;

        let attendees = self.events.attendees_of(event_id).await?;

        Ok(Some(EventDetail {
            event,
            organizer,
            attendees,
        }))
    }
}
