//! User entity model and validated inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use eventhub_core::types::UserId;
use eventhub_core::{AppError, AppResult};

/// Maximum length of a profile bio, in characters.
pub const MAX_BIO_CHARS: usize = 500;

/// Minimum length of a username, in characters.
pub const MIN_USERNAME_CHARS: usize = 3;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Email address, stored lowercased, unique case-insensitively.
    pub email: String,
    /// Unique display username.
    pub username: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Free-form profile text.
    pub bio: String,
    /// When the user registered. Immutable.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Project this user onto its public display fields.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public display fields of a user, safe to embed in event listings.
///
/// Never carries the password hash or bio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Display username.
    pub username: String,
    /// Email address.
    pub email: String,
}

/// Data required to persist a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Lowercased email address.
    pub email: String,
    /// Desired username.
    pub username: String,
    /// Argon2id hash of the registration password.
    pub password_hash: String,
}

/// Validated registration input.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed before storage, never persisted.
    pub password: String,
    /// Desired username.
    pub username: String,
}

impl Registration {
    /// Validate the shape of the registration fields.
    ///
    /// Password strength is enforced separately by the password policy.
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        validate_username(&self.username)
    }

    /// The email in its canonical (lowercased, trimmed) form.
    pub fn canonical_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// Validated profile update input.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    /// New username.
    pub username: String,
    /// New bio; `None` clears it.
    pub bio: Option<String>,
}

impl ProfileUpdate {
    /// Validate the profile fields.
    pub fn validate(&self) -> AppResult<()> {
        validate_username(&self.username)?;
        if let Some(bio) = &self.bio {
            if bio.chars().count() > MAX_BIO_CHARS {
                return Err(AppError::validation(format!(
                    "Bio must be at most {MAX_BIO_CHARS} characters"
                )));
            }
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> AppResult<()> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') || !email.contains('.') {
        return Err(AppError::validation("Invalid email address"));
    }
    Ok(())
}

fn validate_username(username: &str) -> AppResult<()> {
    if username.trim().chars().count() < MIN_USERNAME_CHARS {
        return Err(AppError::validation(format!(
            "Username must be at least {MIN_USERNAME_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str, username: &str) -> Registration {
        Registration {
            email: email.to_string(),
            password: "secret1".to_string(),
            username: username.to_string(),
        }
    }

    #[test]
    fn test_registration_valid() {
        assert!(registration("a@x.com", "alice").validate().is_ok());
    }

    #[test]
    fn test_registration_rejects_bad_email() {
        assert!(registration("not-an-email", "alice").validate().is_err());
        assert!(registration("", "alice").validate().is_err());
    }

    #[test]
    fn test_registration_rejects_short_username() {
        assert!(registration("a@x.com", "ab").validate().is_err());
    }

    #[test]
    fn test_canonical_email_lowercases() {
        assert_eq!(
            registration(" Alice@X.COM ", "alice").canonical_email(),
            "alice@x.com"
        );
    }

    #[test]
    fn test_profile_update_bio_cap() {
        let ok = ProfileUpdate {
            username: "alice".to_string(),
            bio: Some("x".repeat(MAX_BIO_CHARS)),
        };
        assert!(ok.validate().is_ok());

        let too_long = ProfileUpdate {
            username: "alice".to_string(),
            bio: Some("x".repeat(MAX_BIO_CHARS + 1)),
        };
        assert!(too_long.validate().is_err());
    }
}
