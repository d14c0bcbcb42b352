//! Event repository implementation.
//!
//! Listing queries join `users` so every summary carries the organizer's
//! display fields and the current attendee count. Attendee insertion is
//! the one read-modify-write in the system: it runs inside a transaction
//! holding a `FOR UPDATE` lock on the event row, so concurrent joins on
//! the same event serialize and can never overshoot capacity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use eventhub_core::error::{AppError, ErrorKind};
use eventhub_core::result::AppResult;
use eventhub_core::types::{EventId, UserId};
use eventhub_entity::event::{Event, EventFilter, EventInput, EventSummary, JoinOutcome, NewEvent};
use eventhub_entity::store::EventStore;
use eventhub_entity::user::UserSummary;

/// Shared SELECT head for summary listings.
const SUMMARY_SELECT: &str = "SELECT e.*, \
     u.username AS organizer_username, u.email AS organizer_email, \
     (SELECT COUNT(*) FROM event_attendees a WHERE a.event_id = e.id) AS attendee_count \
     FROM events e JOIN users u ON u.id = e.organizer";

/// Repository for event CRUD, attendee mutation, and listing queries.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn create(&self, data: &NewEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (title, description, date, location, category, max_attendees, organizer) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.input.title)
        .bind(&data.input.description)
        .bind(data.input.date)
        .bind(&data.input.location)
        .bind(data.input.category)
        .bind(data.input.max_attendees)
        .bind(data.organizer)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create event", e))
    }

    async fn find_by_id(&self, id: EventId) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find event", e))
    }

    async fn update(&self, id: EventId, input: &EventInput) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title = $2, description = $3, date = $4, location = $5, \
             category = $6, max_attendees = $7 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.date)
        .bind(&input.location)
        .bind(input.category)
        .bind(input.max_attendees)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update event", e))
    }

    async fn delete(&self, id: EventId) -> AppResult<bool> {
        // The event owns its attendee rows; drop them explicitly in the
        // same transaction rather than relying on FK cascade.
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM event_attendees WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete attendees", e)
            })?;

        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete event", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_attendee(&self, id: EventId, user: UserId) -> AppResult<JoinOutcome> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Lock the event row so the capacity check and the insert are one
        // indivisible step relative to other joins on the same event.
        let max_attendees: Option<Option<i32>> = sqlx::query_scalar(
            "SELECT max_attendees FROM events WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock event", e))?;

        let Some(max_attendees) = max_attendees else {
            return Err(AppError::not_found("Event not found"));
        };

        let already: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM event_attendees WHERE event_id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check attendee", e))?;

        if already {
            return Ok(JoinOutcome::AlreadyJoined);
        }

        if let Some(max) = max_attendees {
            let count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM event_attendees WHERE event_id = $1")
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to count attendees", e)
                    })?;

            if count >= max as i64 {
                return Ok(JoinOutcome::Full);
            }
        }

        sqlx::query("INSERT INTO event_attendees (event_id, user_id) VALUES ($1, $2)")
            .bind(id)
            .bind(user)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert attendee", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(JoinOutcome::Joined)
    }

    async fn remove_attendee(&self, id: EventId, user: UserId) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM event_attendees WHERE event_id = $1 AND user_id = $2")
                .bind(id)
                .bind(user)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to remove attendee", e)
                })?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_attendee(&self, id: EventId, user: UserId) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM event_attendees WHERE event_id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check attendee", e))
    }

    async fn attendees_of(&self, id: EventId) -> AppResult<Vec<UserSummary>> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT u.id, u.username, u.email FROM event_attendees a \
             JOIN users u ON u.id = a.user_id \
             WHERE a.event_id = $1 ORDER BY a.joined_at ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list attendees", e))
    }

    async fn attendee_count(&self, id: EventId) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM event_attendees WHERE event_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count attendees", e)
            })
    }

    async fn list_upcoming(
        &self,
        filter: &EventFilter,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<EventSummary>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(SUMMARY_SELECT);
        query.push(" WHERE e.date >= ").push_bind(now);

        if let Some(category) = filter.category {
            query.push(" AND e.category = ").push_bind(category);
        }

        if let Some(term) = filter.search_term() {
            let pattern = format!("%{}%", escape_like(term));
            query
                .push(" AND (e.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR e.description ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR e.location ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        query.push(" ORDER BY e.date ASC");

        query
            .build_query_as::<EventSummary>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list upcoming events", e)
            })
    }

    async fn list_by_organizer(&self, organizer: UserId) -> AppResult<Vec<EventSummary>> {
        sqlx::query_as::<_, EventSummary>(&format!(
            "{SUMMARY_SELECT} WHERE e.organizer = $1 ORDER BY e.date DESC"
        ))
        .bind(organizer)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list organized events", e)
        })
    }

    async fn list_attending(
        &self,
        user: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<EventSummary>> {
        sqlx::query_as::<_, EventSummary>(&format!(
            "{SUMMARY_SELECT} \
             WHERE e.date >= $2 AND EXISTS(\
                 SELECT 1 FROM event_attendees a \
                 WHERE a.event_id = e.id AND a.user_id = $1) \
             ORDER BY e.date ASC"
        ))
        .bind(user)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list attending events", e)
        })
    }
}

/// Escape LIKE metacharacters so a search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
