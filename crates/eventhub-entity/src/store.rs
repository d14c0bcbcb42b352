//! Store contracts consumed by the service layer.
//!
//! The stores hold no business logic; every invariant is enforced by the
//! services before mutation, with one deliberate exception: the capacity
//! check in [`EventStore::add_attendee`] happens inside the store as a
//! single atomic read-modify-write, because splitting it across calls
//! would let concurrent joins race past `max_attendees`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use eventhub_core::AppResult;
use eventhub_core::types::{EventId, UserId};

use crate::event::{Event, EventFilter, EventInput, EventSummary, JoinOutcome, NewEvent};
use crate::user::{NewUser, User, UserSummary};

/// Persistence contract for user records.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new user and return it.
    async fn create(&self, data: &NewUser) -> AppResult<User>;

    /// Find a user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by exact username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Update a user's profile fields. Returns `false` if the user does
    /// not exist.
    async fn update_profile(&self, id: UserId, username: &str, bio: &str) -> AppResult<bool>;
}

/// Persistence contract for event records and attendee relationships.
#[async_trait]
pub trait EventStore: Send + Sync + 'static {
    /// Persist a new event with an empty attendee set and return it.
    async fn create(&self, data: &NewEvent) -> AppResult<Event>;

    /// Find an event by primary key.
    async fn find_by_id(&self, id: EventId) -> AppResult<Option<Event>>;

    /// Replace an event's editable fields. The attendee set and the
    /// organizer are untouched. Returns the updated event, or `None` if
    /// it does not exist.
    async fn update(&self, id: EventId, input: &EventInput) -> AppResult<Option<Event>>;

    /// Delete an event together with its attendee relationships, as one
    /// atomic unit. User records are untouched. Returns `false` if the
    /// event does not exist.
    async fn delete(&self, id: EventId) -> AppResult<bool>;

    /// Add an attendee, checking capacity and the insert as one
    /// indivisible step. Concurrent calls on the same event must
    /// serialize; at most `max_attendees` insertions can ever succeed.
    async fn add_attendee(&self, id: EventId, user: UserId) -> AppResult<JoinOutcome>;

    /// Remove an attendee. Returns `false` if the user was not in the
    /// attendee set.
    async fn remove_attendee(&self, id: EventId, user: UserId) -> AppResult<bool>;

    /// Whether the user is in the event's attendee set.
    async fn is_attendee(&self, id: EventId, user: UserId) -> AppResult<bool>;

    /// The event's attendees resolved to display fields, in join order.
    async fn attendees_of(&self, id: EventId) -> AppResult<Vec<UserSummary>>;

    /// Number of current attendees.
    async fn attendee_count(&self, id: EventId) -> AppResult<i64>;

    /// Events with `date >= now` matching the filter, ascending by date,
    /// enriched with organizer display fields and attendee counts.
    async fn list_upcoming(
        &self,
        filter: &EventFilter,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<EventSummary>>;

    /// All events organized by the user, past included, descending by
    /// date.
    async fn list_by_organizer(&self, organizer: UserId) -> AppResult<Vec<EventSummary>>;

    /// Upcoming events the user attends, ascending by date.
    async fn list_attending(&self, user: UserId, now: DateTime<Utc>)
    -> AppResult<Vec<EventSummary>>;
}
