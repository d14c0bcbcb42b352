//! JWT claim payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use eventhub_core::types::UserId;

/// Claims carried in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's ID.
    pub sub: UserId,
    /// The username at issue time (convenience field).
    pub username: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
    /// Unique token ID.
    pub jti: Uuid,
}

impl Claims {
    /// The authenticated user's ID.
    pub fn user_id(&self) -> UserId {
        self.sub
    }
}
