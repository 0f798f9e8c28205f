//! Error taxonomy shared by the service and API layers.
//!
//! Services return [`AppError`] and let storage failures bubble up through `?`.
//! The HTTP layer is the only place that turns these into status codes, see
//! `api::error`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single field-level validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Kinds of entities a lookup can miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Task,
    Category,
    Tag,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Task => "Task",
            Entity::Category => "Category",
            Entity::Tag => "Tag",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {}", join_details(.0))]
    Validation(Vec<FieldError>),

    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: i64 },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl AppError {
    /// Shorthand for a validation failure on a single field.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }

    pub fn not_found(entity: Entity, id: i64) -> Self {
        AppError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}

fn join_details(details: &[FieldError]) -> String {
    details.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_fields() {
        let error = AppError::Validation(vec![
            FieldError::new("title", "Title is required"),
            FieldError::new("status", "Unknown status"),
        ]);
        assert_eq!(error.to_string(), "Validation failed: title: Title is required; status: Unknown status");
    }

    #[test]
    fn not_found_names_entity() {
        let error = AppError::not_found(Entity::Category, 7);
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Category not found: 7");
    }
}
