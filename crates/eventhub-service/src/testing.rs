//! In-memory store implementations and fixtures for service tests.
//!
//! `MemoryEventStore` keeps all event state behind a single mutex, so the
//! capacity check and attendee insertion in `add_attendee` are one
//! critical section — the same serialization guarantee the Postgres
//! repository gets from its row lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use eventhub_core::AppResult;
use eventhub_core::types::{EventId, UserId};
use eventhub_entity::event::{
    Category, Event, EventFilter, EventInput, EventSummary, JoinOutcome, NewEvent,
};
use eventhub_entity::store::{EventStore, UserStore};
use eventhub_entity::user::{NewUser, User, UserSummary};

use crate::event::{EventQueryService, EventService};

/// In-memory user store.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<UserId, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, data: &NewUser) -> AppResult<User> {
        let user = User {
            id: UserId::new(),
            email: data.email.clone(),
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            bio: String::new(),
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = email.to_lowercase();
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn update_profile(&self, id: UserId, username: &str, bio: &str) -> AppResult<bool> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(&id) {
            Some(user) => {
                user.username = username.to_string();
                user.bio = bio.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
struct EventState {
    events: HashMap<EventId, Event>,
    // Join order preserved for display.
    attendees: HashMap<EventId, Vec<UserId>>,
}

/// In-memory event store; mutations serialize on one mutex.
pub struct MemoryEventStore {
    state: Mutex<EventState>,
    users: Arc<MemoryUserStore>,
}

impl MemoryEventStore {
    pub fn new(users: Arc<MemoryUserStore>) -> Self {
        Self {
            state: Mutex::new(EventState::default()),
            users,
        }
    }

    /// Total attendee relationship rows across all events.
    pub fn attendee_rows(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .attendees
            .values()
            .map(Vec::len)
            .sum()
    }

    fn summarize(&self, state: &EventState, event: &Event) -> EventSummary {
        let organizer = self
            .users
            .users
            .lock()
            .unwrap()
            .get(&event.organizer)
            .cloned()
            .expect("organizer must exist");
        EventSummary {
            event: event.clone(),
            organizer_username: organizer.username,
            organizer_email: organizer.email,
            attendee_count: state
                .attendees
                .get(&event.id)
                .map(Vec::len)
                .unwrap_or(0) as i64,
        }
    }
}

fn matches(event: &Event, filter: &EventFilter) -> bool {
    if let Some(category) = filter.category {
        if event.category != category {
            return false;
        }
    }
    if let Some(term) = filter.search_term() {
        let term = term.to_lowercase();
        let hit = event.title.to_lowercase().contains(&term)
            || event.description.to_lowercase().contains(&term)
            || event.location.to_lowercase().contains(&term);
        if !hit {
            return false;
        }
    }
    true
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn create(&self, data: &NewEvent) -> AppResult<Event> {
        let event = Event {
            id: EventId::new(),
            title: data.input.title.clone(),
            description: data.input.description.clone(),
            date: data.input.date,
            location: data.input.location.clone(),
            category: data.input.category,
            max_attendees: data.input.max_attendees,
            organizer: data.organizer,
            created_at: Utc::now(),
        };
        let mut state = self.state.lock().unwrap();
        state.events.insert(event.id, event.clone());
        state.attendees.insert(event.id, Vec::new());
        Ok(event)
    }

    async fn find_by_id(&self, id: EventId) -> AppResult<Option<Event>> {
        Ok(self.state.lock().unwrap().events.get(&id).cloned())
    }

    async fn update(&self, id: EventId, input: &EventInput) -> AppResult<Option<Event>> {
        let mut state = self.state.lock().unwrap();
        match state.events.get_mut(&id) {
            Some(event) => {
                event.title = input.title.clone();
                event.description = input.description.clone();
                event.date = input.date;
                event.location = input.location.clone();
                event.category = input.category;
                event.max_attendees = input.max_attendees;
                Ok(Some(event.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: EventId) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        state.attendees.remove(&id);
        Ok(state.events.remove(&id).is_some())
    }

    async fn add_attendee(&self, id: EventId, user: UserId) -> AppResult<JoinOutcome> {
        // One critical section: existence, membership, capacity, insert.
        let mut state = self.state.lock().unwrap();
        let Some(event) = state.events.get(&id) else {
            return Err(eventhub_core::AppError::not_found("Event not found"));
        };
        let max_attendees = event.max_attendees;
        let list = state.attendees.entry(id).or_default();

        if list.contains(&user) {
            return Ok(JoinOutcome::AlreadyJoined);
        }
        if let Some(max) = max_attendees {
            if list.len() >= max as usize {
                return Ok(JoinOutcome::Full);
            }
        }
        list.push(user);
        Ok(JoinOutcome::Joined)
    }

    async fn remove_attendee(&self, id: EventId, user: UserId) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(list) = state.attendees.get_mut(&id) else {
            return Ok(false);
        };
        match list.iter().position(|u| *u == user) {
            Some(pos) => {
                list.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn is_attendee(&self, id: EventId, user: UserId) -> AppResult<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .attendees
            .get(&id)
            .is_some_and(|list| list.contains(&user)))
    }

    async fn attendees_of(&self, id: EventId) -> AppResult<Vec<UserSummary>> {
        let ids = self
            .state
            .lock()
            .unwrap()
            .attendees
            .get(&id)
            .cloned()
            .unwrap_or_default();
        let users = self.users.users.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|uid| users.get(uid))
            .map(User::summary)
            .collect())
    }

    async fn attendee_count(&self, id: EventId) -> AppResult<i64> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .attendees
            .get(&id)
            .map(Vec::len)
            .unwrap_or(0) as i64)
    }

    async fn list_upcoming(
        &self,
        filter: &EventFilter,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<EventSummary>> {
        let state = self.state.lock().unwrap();
        let mut summaries: Vec<EventSummary> = state
            .events
            .values()
            .filter(|e| e.date >= now && matches(e, filter))
            .map(|e| self.summarize(&state, e))
            .collect();
        summaries.sort_by_key(|s| s.event.date);
        Ok(summaries)
    }

    async fn list_by_organizer(&self, organizer: UserId) -> AppResult<Vec<EventSummary>> {
        let state = self.state.lock().unwrap();
        let mut summaries: Vec<EventSummary> = state
            .events
            .values()
            .filter(|e| e.organizer == organizer)
            .map(|e| self.summarize(&state, e))
            .collect();
        summaries.sort_by_key(|s| std::cmp::Reverse(s.event.date));
        Ok(summaries)
    }

    async fn list_attending(
        &self,
        user: UserId,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<EventSummary>> {
        let state = self.state.lock().unwrap();
        let mut summaries: Vec<EventSummary> = state
            .events
            .values()
            .filter(|e| {
                e.date >= now
                    && state
                        .attendees
                        .get(&e.id)
                        .is_some_and(|list| list.contains(&user))
            })
            .map(|e| self.summarize(&state, e))
            .collect();
        summaries.sort_by_key(|s| s.event.date);
        Ok(summaries)
    }
}

/// A wired-up pair of in-memory stores plus convenience fixtures.
pub struct TestWorld {
    pub users: Arc<MemoryUserStore>,
    pub events: Arc<MemoryEventStore>,
}

impl TestWorld {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let events = Arc::new(MemoryEventStore::new(Arc::clone(&users)));
        Self { users, events }
    }

    pub fn event_service(&self) -> EventService {
        EventService::new(
            Arc::clone(&self.events) as Arc<dyn EventStore>,
            Arc::clone(&self.users) as Arc<dyn UserStore>,
        )
    }

    pub fn query_service(&self) -> EventQueryService {
        EventQueryService::new(
            Arc::clone(&self.events) as Arc<dyn EventStore>,
            Arc::clone(&self.users) as Arc<dyn UserStore>,
        )
    }

    pub async fn add_user(&self, email: &str, username: &str) -> UserId {
        let user = self
            .users
            .create(&NewUser {
                email: email.to_lowercase(),
                username: username.to_string(),
                password_hash: "$argon2id$test".to_string(),
            })
            .await
            .unwrap();
        user.id
    }

    pub async fn add_event(&self, organizer: UserId, input: EventInput) -> Event {
        self.events
            .create(&NewEvent { input, organizer })
            .await
            .unwrap()
    }

    pub fn attendee_rows(&self) -> usize {
        self.events.attendee_rows()
    }
}

/// A valid event input a week out, with no capacity limit.
pub fn event_input(title: &str) -> EventInput {
    EventInput {
        title: title.to_string(),
        description: "An evening of talks and socializing".to_string(),
        date: Utc::now() + Duration::days(7),
        location: "Community hall".to_string(),
        category: Category::Other,
        max_attendees: None,
    }
}
