//! Business rules on top of the repositories.
//!
//! Each service owns a clone of the shared [`Db`](crate::db::db::Db) handle and
//! holds its lock for one whole operation. Validation failures, missing rows
//! and storage errors all come back as [`AppError`](crate::libs::error::AppError).

pub mod categories;
pub mod tags;
pub mod tasks;

use crate::libs::error::FieldError;

/// Input for creating a category or a tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelInput {
    pub name: String,
    pub color: Option<String>,
}

impl LabelInput {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            color: None,
        }
    }
}

/// Partial update of a category or a tag. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

pub(crate) fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
}
