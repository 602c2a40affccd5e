//! Error types for the meal plan Lambda.

use thiserror::Error;

use crate::models::MealType;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a meal plan.
#[derive(Error, Debug)]
pub enum Error {
    /// Object storage fetch failed, or the object was not valid JSON
    #[error("Storage error: {0}")]
    Storage(String),

    /// Valid JSON with the wrong shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// A meal type has no recipes to choose from
    #[error("No recipes available for {0}")]
    EmptyList(MealType),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Pipeline stage without an implementation
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) | Error::Decode(_) => 400,
            Error::NotImplemented(_) => 501,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::Validation("bad".into()).status_code(), 400);
        assert_eq!(Error::Decode("not an array".into()).status_code(), 400);
        assert_eq!(Error::NotImplemented("v2".into()).status_code(), 501);
        assert_eq!(Error::Storage("missing".into()).status_code(), 500);
        assert_eq!(Error::EmptyList(MealType::Snack).status_code(), 500);
    }

    #[test]
    fn test_empty_list_message_names_meal() {
        let err = Error::EmptyList(MealType::Dinner);
        assert_eq!(err.to_string(), "No recipes available for dinner");
    }
}
