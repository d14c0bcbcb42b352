//! Listing filter for the public event catalogue.

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Filter applied to the upcoming-events listing.
///
/// Both narrowing criteria are optional and combine with AND. The search
/// term matches case-insensitively as a substring of the title,
/// description, or location (any one match qualifies).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    /// Restrict to a single category (exact match). `None` means all.
    pub category: Option<Category>,
    /// Free-text search term.
    pub search: Option<String>,
}

impl EventFilter {
    /// A filter that matches every upcoming event.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restrict by a search term.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// The search term, if it is non-blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
