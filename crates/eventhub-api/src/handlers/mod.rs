//! HTTP request handlers, organized by domain.

pub mod auth;
pub mod event;
pub mod health;
pub mod user;
