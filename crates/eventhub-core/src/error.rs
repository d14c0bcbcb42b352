//! Unified application error types for EventHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
///
/// The first group are expected, recoverable domain outcomes that callers
/// handle explicitly. The remainder are infrastructure faults that the
/// domain layer never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Input validation failed.
    Validation,
    /// The requested resource (user or event) was not found.
    NotFound,
    /// The actor does not have permission to perform the action.
    Authorization,
    /// Email/password authentication failed.
    InvalidCredentials,
    /// The email address is already registered.
    DuplicateEmail,
    /// The username is already taken.
    DuplicateUsername,
    /// The actor is already registered for the event.
    AlreadyJoined,
    /// The actor is not registered for the event.
    NotJoined,
    /// The event has reached its attendee capacity.
    EventFull,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind is an expected domain outcome rather than an
    /// infrastructure fault.
    pub fn is_domain(&self) -> bool {
        !matches!(
            self,
            Self::Database | Self::Configuration | Self::Serialization | Self::Internal
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "VALIDATION"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::DuplicateEmail => write!(f, "DUPLICATE_EMAIL"),
            Self::DuplicateUsername => write!(f, "DUPLICATE_USERNAME"),
            Self::AlreadyJoined => write!(f, "ALREADY_JOINED"),
            Self::NotJoined => write!(f, "NOT_JOINED"),
            Self::EventFull => write!(f, "EVENT_FULL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout EventHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    /// Create a duplicate-email error.
    pub fn duplicate_email(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateEmail, message)
    }

    /// Create a duplicate-username error.
    pub fn duplicate_username(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateUsername, message)
    }

    /// Create an already-joined error.
    pub fn already_joined(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyJoined, message)
    }

    /// Create a not-joined error.
    pub fn not_joined(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotJoined, message)
    }

    /// Create an event-full error.
    pub fn event_full(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EventFull, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display_codes() {
        assert_eq!(ErrorKind::EventFull.to_string(), "EVENT_FULL");
        assert_eq!(ErrorKind::AlreadyJoined.to_string(), "ALREADY_JOINED");
        assert_eq!(ErrorKind::Database.to_string(), "DATABASE");
    }

    #[test]
    fn test_domain_vs_infrastructure() {
        assert!(ErrorKind::NotJoined.is_domain());
        assert!(ErrorKind::Validation.is_domain());
        assert!(!ErrorKind::Database.is_domain());
        assert!(!ErrorKind::Internal.is_domain());
    }

    #[test]
    fn test_error_display() {
        let err = AppError::event_full("Event is full");
        assert_eq!(err.to_string(), "EVENT_FULL: Event is full");
    }
}
