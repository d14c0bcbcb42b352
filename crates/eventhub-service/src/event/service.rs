//! The event domain service — every state-changing operation on events
//! flows through here and nowhere else.
//!
//! Checks run in a fixed order: existence, then authorization, then field
//! validation, then the mutation. No operation partially applies; each
//! either fully succeeds or leaves stored state unchanged.

use std::sync::Arc;

use tracing::info;

use eventhub_core::types::{EventId, UserId};
use eventhub_core::{AppError, AppResult};
use eventhub_entity::event::{Event, EventInput, JoinOutcome, NewEvent};
use eventhub_entity::store::{EventStore, UserStore};

/// Enforces creation, update, deletion, and join/leave rules on events.
#[derive(Clone)]
pub struct EventService {
    /// Event store.
    events: Arc<dyn EventStore>,
    /// User store, for actor existence checks.
    users: Arc<dyn UserStore>,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(events: Arc<dyn EventStore>, users: Arc<dyn UserStore>) -> Self {
        Self { events, users }
    }

    /// Creates an event. The actor becomes the organizer and the
    /// attendee set starts empty.
    pub async fn create_event(&self, actor: UserId, input: EventInput) -> AppResult<Event> {
        input.validate()?;
        self.require_user(actor).await?;

        let event = self
            .events
            .create(&NewEvent {
                input,
                organizer: actor,
            })
            .await?;

        info!(event_id = %event.id, organizer = %actor, "Event created");

        Ok(event)
    }

    /// Updates an event's fields. Only the organizer may update; the
    /// attendee set and the organizer are never touched.
    pub async fn update_event(
        &self,
        actor: UserId,
        event_id: EventId,
        input: EventInput,
    ) -> AppResult<Event> {
        let event = self.require_event(event_id).await?;
        self.require_organizer(&event, actor)?;
        input.validate()?;

        let updated = self
            .events
            .update(event_id, &input)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        info!(event_id = %event_id, "Event updated");

        Ok(updated)
    }

    /// Deletes an event and, with it, all its attendee relationships.
    /// Only the organizer may delete. User records are untouched.
    pub async fn delete_event(&self, actor: UserId, event_id: EventId) -> AppResult<()> {
        let event = self.require_event(event_id).await?;
        self.require_organizer(&event, actor)?;

        if !self.events.delete(event_id).await? {
            return Err(AppError::not_found("Event not found"));
        }

        info!(event_id = %event_id, "Event deleted");

        Ok(())
    }

    /// Registers the actor as an attendee.
    ///
    /// The capacity check and the insertion are evaluated as one
    /// indivisible step by the store, so concurrent joins can never
    /// exceed `max_attendees`. Organizers are not rejected here; keeping
    /// them out of their own attendee list is a presentation-layer
    /// policy.
    pub async fn join_event(&self, actor: UserId, event_id: EventId) -> AppResult<()> {
        self.require_event(event_id).await?;
        self.require_user(actor).await?;

        match self.events.add_attendee(event_id, actor).await? {
            JoinOutcome::Joined => {
                info!(event_id = %event_id, user_id = %actor, "User joined event");
                Ok(())
            }
            JoinOutcome::AlreadyJoined => Err(AppError::already_joined(
                "You are already registered for this event",
            )),
            JoinOutcome::Full => Err(AppError::event_full("Event is full")),
        }
    }

    /// Removes the actor from the attendee set.
    pub async fn leave_event(&self, actor: UserId, event_id: EventId) -> AppResult<()> {
        self.require_event(event_id).await?;

        if !self.events.remove_attendee(event_id, actor).await? {
            return Err(AppError::not_joined(
                "You are not registered for this event",
            ));
        }

        info!(event_id = %event_id, user_id = %actor, "User left event");

        Ok(())
    }

    async fn require_user(&self, id: UserId) -> AppResult<()> {
        if self.users.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found("User not found"));
        }
        Ok(())
    }

    async fn require_event(&self, id: EventId) -> AppResult<Event> {
        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))
    }

    fn require_organizer(&self, event: &Event, actor: UserId) -> AppResult<()> {
        if event.organizer != actor {
            return Err(AppError::authorization(
                "Only the organizer may modify this event",
            ));
        }
        Ok(())
    }
}
