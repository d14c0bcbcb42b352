//! Event entity model, validated inputs, and read models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use eventhub_core::types::{EventId, UserId};
use eventhub_core::{AppError, AppResult};

use super::category::Category;
use crate::user::UserSummary;

/// Minimum length of an event description, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// A published event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Scheduled occurrence. An event is "upcoming" iff `date >= now`.
    pub date: DateTime<Utc>,
    /// Where the event takes place.
    pub location: String,
    /// Event category.
    pub category: Category,
    /// Attendee capacity. `None` means unlimited.
    pub max_attendees: Option<i32>,
    /// The user who created the event. Immutable; sole authority to
    /// update or delete it.
    pub organizer: UserId,
    /// When the event was published. Immutable.
    pub created_at: DateTime<Utc>,
}

/// Validated fields for creating or updating an event.
///
/// The attendee set and the organizer are never part of this input;
/// updates cannot touch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventInput {
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Scheduled occurrence.
    pub date: DateTime<Utc>,
    /// Where the event takes place.
    pub location: String,
    /// Event category. Defaults to [`Category::Other`] when unspecified.
    #[serde(default)]
    pub category: Category,
    /// Attendee capacity; must be positive when given.
    #[serde(default)]
    pub max_attendees: Option<i32>,
}

impl EventInput {
    /// Validate the shape of the event fields.
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        if self.description.chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(AppError::validation(format!(
                "Description must be at least {MIN_DESCRIPTION_CHARS} characters"
            )));
        }
        if self.location.trim().is_empty() {
            return Err(AppError::validation("Location is required"));
        }
        if let Some(max) = self.max_attendees {
            if max < 1 {
                return Err(AppError::validation(
                    "Maximum attendees must be a positive number",
                ));
            }
        }
        Ok(())
    }
}

/// Data required to persist a new event. The input is already validated.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Validated event fields.
    pub input: EventInput,
    /// The creating user, recorded as the organizer.
    pub organizer: UserId,
}

/// An event enriched with organizer display fields and the current
/// attendee count, as returned by listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventSummary {
    /// The event itself.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    /// Organizer's username.
    pub organizer_username: String,
    /// Organizer's email.
    pub organizer_email: String,
    /// Number of current attendees.
    pub attendee_count: i64,
}

/// A single event with organizer and attendee identities resolved to
/// display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetail {
    /// The event itself.
    #[serde(flatten)]
    pub event: Event,
    /// The organizer's display fields.
    pub organizer: UserSummary,
    /// Attendee display fields, in join order.
    pub attendees: Vec<UserSummary>,
}

/// Result of an attempted attendee insertion.
///
/// The capacity check and the insert are evaluated by the store as one
/// indivisible step, so this outcome is authoritative even under
/// concurrent joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The actor was added to the attendee set.
    Joined,
    /// The actor was already in the attendee set.
    AlreadyJoined,
    /// The event is at capacity.
    Full,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EventInput {
        EventInput {
            title: "Jazz Night".to_string(),
            description: "A night of live music".to_string(),
            date: Utc::now(),
            location: "Blue Note".to_string(),
            category: Category::Music,
            max_attendees: Some(30),
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_rejects_blank_title() {
        let mut i = input();
        i.title = "   ".to_string();
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_rejects_short_description() {
        let mut i = input();
        i.description = "too short".to_string();
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_location() {
        let mut i = input();
        i.location = String::new();
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_rejects_nonpositive_capacity() {
        let mut i = input();
        i.max_attendees = Some(0);
        assert!(i.validate().is_err());
        i.max_attendees = Some(-5);
        assert!(i.validate().is_err());
        i.max_attendees = None;
        assert!(i.validate().is_ok());
    }

    #[test]
    fn test_category_defaults_to_other_in_json() {
        let json = r#"{
            "title": "Picnic",
            "description": "Bring your own basket",
            "date": "2031-06-01T12:00:00Z",
            "location": "Riverside park"
        }"#;
        let parsed: EventInput = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.category, Category::Other);
    }
}
