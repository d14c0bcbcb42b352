//! Identity and profile operations — registration, authentication, and
//! profile updates.

use std::sync::Arc;

use tracing::info;

use eventhub_auth::password::{PasswordHasher, PasswordPolicy};
use eventhub_core::types::UserId;
use eventhub_core::{AppError, AppResult};
use eventhub_entity::store::UserStore;
use eventhub_entity::user::{NewUser, ProfileUpdate, Registration, User};

/// Handles registration, authentication, and profile updates.
#[derive(Clone)]
pub struct UserService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    policy: PasswordPolicy,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>, hasher: Arc<PasswordHasher>, policy: PasswordPolicy) -> Self {
        Self {
            users,
            hasher,
            policy,
        }
    }

    /// Registers a new user.
    ///
    /// The email is stored lowercased and must be unique
    /// case-insensitively; the username must be unique exactly. The
    /// password is hashed before storage and never persisted.
    pub async fn register(&self, registration: Registration) -> AppResult<User> {
        registration.validate()?;
        self.policy.validate(&registration.password)?;

        let email = registration.canonical_email();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::duplicate_email("Email already exists"));
        }

        if self
            .users
            .find_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(AppError::duplicate_username("Username already exists"));
        }

        let password_hash = self.hasher.hash_password(&registration.password)?;

        let user = self
            .users
            .create(&NewUser {
                email,
                username: registration.username,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// Authenticates a user by email and password.
    ///
    /// An unknown email and a wrong password fail identically, so the
    /// caller cannot probe which accounts exist.
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let invalid = || AppError::invalid_credentials("Invalid email or password");

        let user = self
            .users
            .find_by_email(email.trim().to_lowercase().as_str())
            .await?
            .ok_or_else(invalid)?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(invalid());
        }

        Ok(user)
    }

    /// Fetches a user's full profile.
    pub async fn get_profile(&self, user_id: UserId) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the user's own profile (username and bio).
    ///
    /// Rejects a username held by a different user. Email and the
    /// creation timestamp are immutable.
    pub async fn update_profile(&self, user_id: UserId, update: ProfileUpdate) -> AppResult<User> {
        update.validate()?;

        if let Some(existing) = self.users.find_by_username(&update.username).await? {
            if existing.id != user_id {
                return Err(AppError::duplicate_username("Username already taken"));
            }
        }

        let bio = update.bio.unwrap_or_default();
        let updated = self
            .users
            .update_profile(user_id, &update.username, &bio)
            .await?;

        if !updated {
            return Err(AppError::not_found("User not found"));
        }

        info!(user_id = %user_id, "Profile updated");

        self.get_profile(user_id).await
    }
}
