//! # eventhub-auth
//!
//! Credential primitives for EventHub: Argon2id password hashing and
//! verification, password policy enforcement, and signed JWT session
//! tokens for the HTTP layer.
//!
//! Authentication decisions (who the actor is) stay in this crate and
//! the API layer; the domain services only ever receive a resolved,
//! explicit actor identity.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenCodec};
pub use password::{PasswordHasher, PasswordPolicy};
