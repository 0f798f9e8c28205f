//! Create/edit form state for tasks.
//!
//! A [`TaskForm`] is seeded either from an existing task or from blank
//! defaults. It renders the field values a browser form would capture
//! ([`FormData`]) and keeps the selected tags as its own toggle set. On submit
//! the toggle set replaces whatever was captured under `tagIds`, and every
//! field is converted into a typed [`TaskPayload`].

use super::task::{parse_due_date, Priority, TaskStatus, TaskWithRelations};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FIELD_ID: &str = "id";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_PRIORITY: &str = "priority";
pub const FIELD_DUE_DATE: &str = "dueDate";
pub const FIELD_CATEGORY: &str = "categoryId";
pub const FIELD_TAGS: &str = "tagIds";
pub const FIELD_COMPLETED: &str = "completed";

const NO_CATEGORY: &str = "none";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

/// Ordered multi-map of captured form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.entries.push((name.to_string(), value.into()));
    }

    /// Replaces every value under `name` with a single one.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.delete(name);
        self.append(name, value);
    }

    pub fn delete(&mut self, name: &str) {
        self.entries.retain(|(key, _)| key != name);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries.iter().filter(|(key, _)| key == name).map(|(_, value)| value.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Request body for `POST /tasks` and `PUT /tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    pub completed: bool,
}

impl TaskPayload {
    /// Converts captured form fields one by one.
    pub fn from_form(form: &FormData) -> Result<Self, FormError> {
        let title = form.get(FIELD_TITLE).map(str::trim).unwrap_or_default();
        if title.is_empty() {
            return Err(FormError::Missing(FIELD_TITLE));
        }

        let description = form
            .get(FIELD_DESCRIPTION)
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map(str::to_string);

        let status: TaskStatus = match form.get(FIELD_STATUS) {
            Some(value) if !value.is_empty() => value.parse().map_err(|message: String| invalid(FIELD_STATUS, message))?,
            _ => TaskStatus::default(),
        };
        let priority: Priority = match form.get(FIELD_PRIORITY) {
            Some(value) if !value.is_empty() => value.parse().map_err(|message: String| invalid(FIELD_PRIORITY, message))?,
            _ => Priority::default(),
        };

        let due_date = match form.get(FIELD_DUE_DATE) {
            Some(value) => parse_due_date(value).map_err(|message| invalid(FIELD_DUE_DATE, message))?,
            None => None,
        };

        let category_id = match form.get(FIELD_CATEGORY).map(str::trim) {
            None | Some("") | Some(NO_CATEGORY) => None,
            Some(value) => Some(parse_id(FIELD_CATEGORY, value)?),
        };

        let tag_ids = form.get_all(FIELD_TAGS).into_iter().map(|value| parse_id(FIELD_TAGS, value.trim())).collect::<Result<Vec<_>, _>>()?;

        let completed = match form.get(FIELD_COMPLETED) {
            None | Some("") | Some("false") => false,
            Some("true") => true,
            Some(other) => return Err(invalid(FIELD_COMPLETED, format!("expected true or false, got '{}'", other))),
        };

        Ok(Self {
            title: title.to_string(),
            description,
            status,
            priority,
            due_date,
            category_id,
            tag_ids,
            completed,
        })
    }
}

fn invalid(field: &'static str, message: impl Into<String>) -> FormError {
    FormError::Invalid {
        field,
        message: message.into(),
    }
}

fn parse_id(field: &'static str, value: &str) -> Result<i64, FormError> {
    value.parse::<i64>().map_err(|_| invalid(field, format!("'{}' is not an id", value)))
}

/// What a submitted form resolves to: the target task (when editing) and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSubmission {
    pub id: Option<i64>,
    pub payload: TaskPayload,
}

#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    editing: Option<TaskWithRelations>,
    selected_tags: Vec<i64>,
}

impl TaskForm {
    /// Blank form for a new task.
    pub fn create() -> Self {
        Self::default()
    }

    /// Form seeded from an existing task, with its tags preselected.
    pub fn edit(task: &TaskWithRelations) -> Self {
        Self {
            editing: Some(task.clone()),
            selected_tags: task.tag_ids(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit Task"
        } else {
            "Create New Task"
        }
    }

    /// The field values the form starts out with.
    pub fn defaults(&self) -> FormData {
        let mut form = FormData::new();
        match &self.editing {
            Some(existing) => {
                let task = &existing.task;
                form.append(FIELD_ID, task.id.to_string());
                form.append(FIELD_TITLE, task.title.clone());
                form.append(FIELD_DESCRIPTION, task.description.clone().unwrap_or_default());
                form.append(FIELD_STATUS, task.status.as_str());
                form.append(FIELD_PRIORITY, task.priority.as_str());
                form.append(FIELD_DUE_DATE, task.due_date.map(|date| date.format("%Y-%m-%d").to_string()).unwrap_or_default());
                form.append(FIELD_CATEGORY, task.category_id.map(|id| id.to_string()).unwrap_or_else(|| NO_CATEGORY.to_string()));
                form.append(FIELD_COMPLETED, task.completed.to_string());
            }
            None => {
                form.append(FIELD_TITLE, "");
                form.append(FIELD_DESCRIPTION, "");
                form.append(FIELD_STATUS, TaskStatus::default().as_str());
                form.append(FIELD_PRIORITY, Priority::default().as_str());
                form.append(FIELD_DUE_DATE, "");
                form.append(FIELD_CATEGORY, NO_CATEGORY);
                form.append(FIELD_COMPLETED, "false");
            }
        }
        form
    }

    /// Adds the tag when absent, removes it when present.
    pub fn toggle_tag(&mut self, tag_id: i64) {
        match self.selected_tags.iter().position(|id| *id == tag_id) {
            Some(index) => {
                self.selected_tags.remove(index);
            }
            None => self.selected_tags.push(tag_id),
        }
    }

    pub fn is_selected(&self, tag_id: i64) -> bool {
        self.selected_tags.contains(&tag_id)
    }

    pub fn selected_tags(&self) -> &[i64] {
        &self.selected_tags
    }

    /// Overwrites captured `tagIds` with the toggle set and builds the payload.
    pub fn submit(&self, mut captured: FormData) -> Result<TaskSubmission, FormError> {
        captured.delete(FIELD_TAGS);
        for tag_id in &self.selected_tags {
            captured.append(FIELD_TAGS, tag_id.to_string());
        }

        let id = match (&self.editing, captured.get(FIELD_ID)) {
            (Some(existing), _) => Some(existing.task.id),
            (None, Some(value)) if !value.is_empty() => Some(parse_id(FIELD_ID, value)?),
            (None, _) => None,
        };

        Ok(TaskSubmission {
            id,
            payload: TaskPayload::from_form(&captured)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::{LabelRef, Task};
    use chrono::{TimeZone, Utc};

    fn existing_task() -> TaskWithRelations {
        let created = Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap();
        TaskWithRelations {
            task: Task {
                id: 5,
                title: "Plan sprint".to_string(),
                description: Some("Pick stories".to_string()),
                status: TaskStatus::InProgress,
                priority: Priority::High,
                due_date: NaiveDate::from_ymd_opt(2024, 2, 14),
                completed: false,
                category_id: Some(3),
                created_at: created,
                updated_at: created,
            },
            category: Some(LabelRef {
                id: 3,
                name: "Work".to_string(),
                color: "#112233".to_string(),
            }),
            tags: vec![
                LabelRef {
                    id: 1,
                    name: "team".to_string(),
                    color: "#445566".to_string(),
                },
                LabelRef {
                    id: 2,
                    name: "planning".to_string(),
                    color: "#778899".to_string(),
                },
            ],
        }
    }

    #[test]
    fn blank_form_submits_defaults() {
        let form = TaskForm::create();
        let mut captured = form.defaults();
        captured.set(FIELD_TITLE, "Buy milk");

        let submission = form.submit(captured).unwrap();
        assert_eq!(submission.id, None);
        assert_eq!(
            submission.payload,
            TaskPayload {
                title: "Buy milk".to_string(),
                description: None,
                status: TaskStatus::Todo,
                priority: Priority::Medium,
                due_date: None,
                category_id: None,
                tag_ids: vec![],
                completed: false,
            }
        );
    }

    #[test]
    fn form_data_keeps_repeated_fields() {
        let mut data = FormData::new();
        assert!(data.is_empty());

        data.append(FIELD_TAGS, "1");
        data.append(FIELD_TAGS, "2");
        data.set(FIELD_TITLE, "x");
        assert_eq!(data.len(), 3);
        assert_eq!(data.get_all(FIELD_TAGS), vec!["1", "2"]);

        data.delete(FIELD_TAGS);
        assert_eq!(data.len(), 1);

        // Create captures every field except the hidden id, edit adds it.
        assert_eq!(TaskForm::create().defaults().len(), 7);
        assert_eq!(TaskForm::edit(&existing_task()).defaults().len(), 8);
    }

    #[test]
    fn edit_form_is_seeded_from_task() {
        let form = TaskForm::edit(&existing_task());
        let defaults = form.defaults();

        assert_eq!(form.heading(), "Edit Task");
        assert_eq!(defaults.get(FIELD_ID), Some("5"));
        assert_eq!(defaults.get(FIELD_DUE_DATE), Some("2024-02-14"));
        assert_eq!(defaults.get(FIELD_CATEGORY), Some("3"));
        assert_eq!(defaults.get(FIELD_COMPLETED), Some("false"));
        assert_eq!(form.selected_tags(), &[1, 2]);
    }

    #[test]
    fn toggling_adds_and_removes() {
        let mut form = TaskForm::create();
        form.toggle_tag(4);
        form.toggle_tag(9);
        form.toggle_tag(4);
        assert!(!form.is_selected(4));
        assert!(form.is_selected(9));
        assert_eq!(form.selected_tags(), &[9]);
    }

    #[test]
    fn toggle_set_overrides_stale_captured_tags() {
        let mut form = TaskForm::edit(&existing_task());
        form.toggle_tag(1);
        form.toggle_tag(7);

        let mut captured = form.defaults();
        captured.append(FIELD_TAGS, "1");
        captured.append(FIELD_TAGS, "2");
        captured.append(FIELD_TAGS, "99");

        let submission = form.submit(captured).unwrap();
        assert_eq!(submission.id, Some(5));
        assert_eq!(submission.payload.tag_ids, vec![2, 7]);
    }

    #[test]
    fn empty_toggle_set_submits_empty_tag_list() {
        let mut form = TaskForm::edit(&existing_task());
        form.toggle_tag(1);
        form.toggle_tag(2);

        let submission = form.submit(form.defaults()).unwrap();
        assert!(submission.payload.tag_ids.is_empty());
    }

    #[test]
    fn sentinels_convert_to_typed_values() {
        let form = TaskForm::edit(&existing_task());
        let mut captured = form.defaults();
        captured.set(FIELD_DUE_DATE, "");
        captured.set(FIELD_CATEGORY, "none");
        captured.set(FIELD_COMPLETED, "true");

        let payload = form.submit(captured).unwrap().payload;
        assert_eq!(payload.due_date, None);
        assert_eq!(payload.category_id, None);
        assert!(payload.completed);
        assert_eq!(payload.status, TaskStatus::InProgress);
    }

    #[test]
    fn bad_fields_are_named() {
        let form = TaskForm::create();
        assert_eq!(form.submit(form.defaults()), Err(FormError::Missing(FIELD_TITLE)));

        let mut captured = form.defaults();
        captured.set(FIELD_TITLE, "x");
        captured.set(FIELD_COMPLETED, "yes");
        assert!(matches!(form.submit(captured), Err(FormError::Invalid { field: FIELD_COMPLETED, .. })));

        let mut captured = form.defaults();
        captured.set(FIELD_TITLE, "x");
        captured.set(FIELD_DUE_DATE, "soon");
        assert!(matches!(form.submit(captured), Err(FormError::Invalid { field: FIELD_DUE_DATE, .. })));
    }

    #[test]
    fn payload_serializes_with_camel_case_keys() {
        let form = TaskForm::edit(&existing_task());
        let payload = form.submit(form.defaults()).unwrap().payload;
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["dueDate"], "2024-02-14");
        assert_eq!(json["categoryId"], 3);
        assert_eq!(json["tagIds"], serde_json::json!([1, 2]));
        assert_eq!(json["priority"], "HIGH");
    }
}
