//! Event category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of event categories.
///
/// Category matching in listings is an exact, case-sensitive comparison
/// against these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_category")]
pub enum Category {
    /// Technology meetups, talks, hack nights.
    Technology,
    /// Business and networking events.
    Business,
    /// Arts, exhibitions, theatre.
    Arts,
    /// Sports and outdoor activities.
    Sports,
    /// Concerts and music sessions.
    Music,
    /// Courses, workshops, lectures.
    Education,
    /// Everything else.
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 7] = [
        Self::Technology,
        Self::Business,
        Self::Arts,
        Self::Sports,
        Self::Music,
        Self::Education,
        Self::Other,
    ];

    /// Return the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Business => "Business",
            Self::Arts => "Arts",
            Self::Sports => "Sports",
            Self::Music => "Music",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = eventhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Technology" => Ok(Self::Technology),
            "Business" => Ok(Self::Business),
            "Arts" => Ok(Self::Arts),
            "Sports" => Ok(Self::Sports),
            "Music" => Ok(Self::Music),
            "Education" => Ok(Self::Education),
            "Other" => Ok(Self::Other),
            _ => Err(eventhub_core::AppError::validation(format!(
                "Invalid category: '{s}'. Expected one of: Technology, Business, Arts, \
                 Sports, Music, Education, Other"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_exact() {
        assert_eq!("Music".parse::<Category>().unwrap(), Category::Music);
        assert_eq!(
            "Technology".parse::<Category>().unwrap(),
            Category::Technology
        );
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert!("music".parse::<Category>().is_err());
        assert!("TECHNOLOGY".parse::<Category>().is_err());
        assert!("Cooking".parse::<Category>().is_err());
    }

    #[test]
    fn test_default_is_other() {
        assert_eq!(Category::default(), Category::Other);
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&Category::Arts).unwrap();
        assert_eq!(json, "\"Arts\"");
    }
}
