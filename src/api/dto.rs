//! Request bodies and the extractors that reject with JSON errors.
//!
//! Bodies arrive loosely typed (status, priority and due date as strings) so a
//! bad value turns into a field error instead of an opaque deserializer message.

use super::error::ApiErrorResponse;
use crate::libs::error::FieldError;
use crate::libs::task::{parse_due_date, NewTask, Priority, TaskPatch, TaskStatus};
use crate::services::{LabelInput, LabelPatch};
use axum::extract::{FromRequest, FromRequestParts};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// JSON body extractor with [`ApiErrorResponse`] rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiErrorResponse))]
pub struct ApiJson<T>(pub T);

/// Path extractor with [`ApiErrorResponse`] rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiErrorResponse))]
pub struct ApiPath<T>(pub T);

/// Query string extractor with [`ApiErrorResponse`] rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiErrorResponse))]
pub struct ApiQuery<T>(pub T);

// Present-but-null becomes `Some(None)`, absent stays `None` via `#[serde(default)]`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub category_id: Option<i64>,
    pub tag_ids: Option<Vec<i64>>,
    pub completed: Option<bool>,
}

impl CreateTaskRequest {
    pub fn into_new_task(self) -> Result<NewTask, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = match self.title {
            Some(title) => title,
            None => {
                errors.push(FieldError::new("title", "Title is required"));
                String::new()
            }
        };
        let status = parse_field::<TaskStatus>("status", self.status.as_deref(), &mut errors);
        let priority = parse_field::<Priority>("priority", self.priority.as_deref(), &mut errors);
        let due_date = self.due_date.as_deref().and_then(|raw| due_date_field(raw, &mut errors));

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewTask {
            title,
            description: self.description,
            status,
            priority,
            due_date,
            category_id: self.category_id,
            tag_ids: self.tag_ids.unwrap_or_default(),
            completed: self.completed,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub category_id: Option<Option<i64>>,
    pub tag_ids: Option<Vec<i64>>,
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    pub fn into_patch(self) -> Result<TaskPatch, Vec<FieldError>> {
        let mut errors = Vec::new();

        let status = parse_field::<TaskStatus>("status", self.status.as_deref(), &mut errors);
        let priority = parse_field::<Priority>("priority", self.priority.as_deref(), &mut errors);
        let due_date = self
            .due_date
            .map(|raw| raw.as_deref().and_then(|raw| due_date_field(raw, &mut errors)));

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(TaskPatch {
            title: self.title,
            description: self.description,
            status,
            priority,
            due_date,
            category_id: self.category_id,
            tag_ids: self.tag_ids,
            completed: self.completed,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLabelRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl CreateLabelRequest {
    pub fn into_input(self) -> Result<LabelInput, Vec<FieldError>> {
        match self.name {
            Some(name) => Ok(LabelInput { name, color: self.color }),
            None => Err(vec![FieldError::new("name", "Name is required")]),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLabelRequest {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl From<UpdateLabelRequest> for LabelPatch {
    fn from(request: UpdateLabelRequest) -> Self {
        LabelPatch {
            name: request.name,
            color: request.color,
        }
    }
}

fn parse_field<T: FromStr<Err = String>>(name: &str, raw: Option<&str>, errors: &mut Vec<FieldError>) -> Option<T> {
    match raw?.parse() {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(FieldError::new(name, message));
            None
        }
    }
}

fn due_date_field(raw: &str, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
    parse_due_date(raw).unwrap_or_else(|message| {
        errors.push(FieldError::new("dueDate", message));
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_requires_title_and_valid_literals() {
        let request: CreateTaskRequest = serde_json::from_value(json!({ "status": "DOING", "dueDate": "soon" })).unwrap();
        let errors = request.into_new_task().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "status", "dueDate"]);
    }

    #[test]
    fn create_normalizes_empty_due_date() {
        let request: CreateTaskRequest =
            serde_json::from_value(json!({ "title": "Write docs", "dueDate": "", "priority": "HIGH" })).unwrap();
        let task = request.into_new_task().unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.priority, Some(Priority::High));
        assert!(task.tag_ids.is_empty());
    }

    #[test]
    fn update_distinguishes_null_from_absent() {
        let request: UpdateTaskRequest =
            serde_json::from_value(json!({ "description": null, "dueDate": "2024-05-01" })).unwrap();
        let patch = request.into_patch().unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.due_date, Some(NaiveDate::from_ymd_opt(2024, 5, 1)));
        assert_eq!(patch.category_id, None);
        assert_eq!(patch.tag_ids, None);
    }

    #[test]
    fn update_with_empty_due_date_clears_it() {
        let request: UpdateTaskRequest = serde_json::from_value(json!({ "dueDate": "", "tagIds": [] })).unwrap();
        let patch = request.into_patch().unwrap();
        assert_eq!(patch.due_date, Some(None));
        assert_eq!(patch.tag_ids, Some(vec![]));
    }
}
