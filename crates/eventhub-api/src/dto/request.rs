//! Request DTOs.

use serde::{Deserialize, Serialize};

use eventhub_core::{AppError, AppResult};
use eventhub_entity::event::{Category, EventFilter};
use eventhub_entity::user::{ProfileUpdate, Registration};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Email address.
    pub email: String,
    /// Password (plaintext, hashed before storage).
    pub password: String,
    /// Username.
    pub username: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            username: req.username,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Profile update request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New username.
    pub username: String,
    /// New bio; `null` clears it.
    #[serde(default)]
    pub bio: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            username: req.username,
            bio: req.bio,
        }
    }
}

/// Query parameters accepted by the public event listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventListQuery {
    /// Exact category name.
    pub category: Option<String>,
    /// Free-text search term.
    pub search: Option<String>,
}

impl EventListQuery {
    /// Converts the raw query into a validated filter. The literal
    /// `"all"` means no category restriction; any other unknown name is
    /// a validation error rather than an empty result.
    pub fn into_filter(self) -> AppResult<EventFilter> {
        let mut filter = EventFilter::all();
        if let Some(name) = self.category.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if name != "all" {
                let category = name
                    .parse::<Category>()
                    .map_err(|_| AppError::validation(format!("Unknown category '{name}'")))?;
                filter = filter.with_category(category);
            }
        }
        if let Some(search) = self.search {
            filter = filter.with_search(search);
        }
        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_parses_known_category() {
        let query = EventListQuery {
            category: Some("Music".to_string()),
            search: None,
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.category, Some(Category::Music));
    }

    #[test]
    fn test_category_all_means_no_filter() {
        let query = EventListQuery {
            category: Some("all".to_string()),
            search: None,
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.category, None);
    }

    #[test]
    fn test_query_rejects_unknown_category() {
        let query = EventListQuery {
            category: Some("music".to_string()),
            search: None,
        };
        assert!(query.into_filter().is_err());
    }

    #[test]
    fn test_blank_category_is_no_filter() {
        let query = EventListQuery {
            category: Some("  ".to_string()),
            search: Some("jazz".to_string()),
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.category, None);
        assert_eq!(filter.search_term(), Some("jazz"));
    }
}
