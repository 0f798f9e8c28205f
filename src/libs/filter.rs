//! Filtering and sorting of a task collection.
//!
//! The display list is derived from the full collection on every call: five
//! independent filters combined with AND, then exactly one sort key. Nothing
//! is cached or indexed, so the same inputs always produce the same output.
//!
//! Filter values parse from the strings the task board's select boxes use
//! (`all`, `none`, a literal status, `completed`, `active`, an id), which lets
//! the CLI flags and the `GET /tasks` query string share this module.

use super::task::{Priority, TaskStatus, TaskWithRelations};
use chrono::NaiveDate;
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const ALL: &str = "all";
const NONE: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Uncategorized,
    Id(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Is(TaskStatus),
    Completed,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Untagged,
    Id(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Is(Priority),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DueDate,
    Priority,
    Title,
    CreatedAt,
}

fn parse_id(kind: &str, value: &str) -> Result<i64, String> {
    value.parse::<i64>().map_err(|_| format!("Invalid {} filter '{}'", kind, value))
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            ALL => Ok(CategoryFilter::All),
            NONE => Ok(CategoryFilter::Uncategorized),
            id => parse_id("category", id).map(CategoryFilter::Id),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            ALL => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "active" => Ok(StatusFilter::Active),
            status => status.parse().map(StatusFilter::Is),
        }
    }
}

impl FromStr for TagFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            ALL => Ok(TagFilter::All),
            NONE => Ok(TagFilter::Untagged),
            id => parse_id("tag", id).map(TagFilter::Id),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            ALL => Ok(PriorityFilter::All),
            priority => priority.parse().map(PriorityFilter::Is),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dueDate" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "title" => Ok(SortKey::Title),
            "createdAt" => Ok(SortKey::CreatedAt),
            other => Err(format!("Unknown sort key '{}'", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            SortKey::DueDate => "dueDate",
            SortKey::Priority => "priority",
            SortKey::Title => "title",
            SortKey::CreatedAt => "createdAt",
        };
        f.write_str(key)
    }
}

/// The complete set of list criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub tag: TagFilter,
    pub priority: PriorityFilter,
    pub sort: SortKey,
}

impl TaskQuery {
    pub fn matches(&self, task: &TaskWithRelations) -> bool {
        self.matches_search(task)
            && self.matches_category(task)
            && self.matches_status(task)
            && self.matches_tag(task)
            && self.matches_priority(task)
    }

    fn matches_search(&self, task: &TaskWithRelations) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        task.task.title.to_lowercase().contains(&needle)
            || task.task.description.as_deref().is_some_and(|description| description.to_lowercase().contains(&needle))
    }

    fn matches_category(&self, task: &TaskWithRelations) -> bool {
        match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Uncategorized => task.task.category_id.is_none(),
            CategoryFilter::Id(id) => task.task.category_id == Some(id),
        }
    }

    fn matches_status(&self, task: &TaskWithRelations) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Is(status) => task.task.status == status,
            StatusFilter::Completed => task.task.completed,
            StatusFilter::Active => !task.task.completed,
        }
    }

    fn matches_tag(&self, task: &TaskWithRelations) -> bool {
        match self.tag {
            TagFilter::All => true,
            TagFilter::Untagged => task.tags.is_empty(),
            TagFilter::Id(id) => task.has_tag(id),
        }
    }

    fn matches_priority(&self, task: &TaskWithRelations) -> bool {
        match self.priority {
            PriorityFilter::All => true,
            PriorityFilter::Is(priority) => task.task.priority == priority,
        }
    }

    /// Filters then sorts, borrowing from the input collection.
    pub fn apply<'a>(&self, tasks: &'a [TaskWithRelations]) -> Vec<&'a TaskWithRelations> {
        let mut visible: Vec<&TaskWithRelations> = tasks.iter().filter(|task| self.matches(task)).collect();
        visible.sort_by(|a, b| compare(self.sort, a, b));
        visible
    }

    /// Owned variant of [`TaskQuery::apply`].
    pub fn apply_owned(&self, tasks: Vec<TaskWithRelations>) -> Vec<TaskWithRelations> {
        let mut visible: Vec<TaskWithRelations> = tasks.into_iter().filter(|task| self.matches(task)).collect();
        visible.sort_by(|a, b| compare(self.sort, a, b));
        visible
    }
}

pub fn compare(key: SortKey, a: &TaskWithRelations, b: &TaskWithRelations) -> Ordering {
    let (a, b) = (&a.task, &b.task);
    match key {
        SortKey::DueDate => due_date_order(a.due_date, b.due_date).then(a.id.cmp(&b.id)),
        SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()).then(a.id.cmp(&b.id)),
        SortKey::Title => a
            .title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.title.cmp(&b.title))
            .then(a.id.cmp(&b.id)),
        SortKey::CreatedAt => b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)),
    }
}

// Missing due dates sort after every dated task.
fn due_date_order(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Raw string form of [`TaskQuery`], as received in a query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskQueryParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub tag: Option<String>,
    pub priority: Option<String>,
    pub sort: Option<String>,
}

impl TaskQueryParams {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.tag.is_none()
            && self.priority.is_none()
            && self.sort.is_none()
    }

    /// Parses every supplied parameter, collecting one error per bad field.
    pub fn parse(&self) -> Result<TaskQuery, Vec<(&'static str, String)>> {
        fn field<T: FromStr<Err = String> + Default>(
            name: &'static str,
            raw: &Option<String>,
            errors: &mut Vec<(&'static str, String)>,
        ) -> T {
            match raw.as_deref() {
                None => T::default(),
                Some(value) => value.parse().unwrap_or_else(|e| {
                    errors.push((name, e));
                    T::default()
                }),
            }
        }

        let mut errors = Vec::new();
        let query = TaskQuery {
            search: self.search.clone().unwrap_or_default(),
            category: field("category", &self.category, &mut errors),
            status: field("status", &self.status, &mut errors),
            tag: field("tag", &self.tag, &mut errors),
            priority: field("priority", &self.priority, &mut errors),
            sort: field("sort", &self.sort, &mut errors),
        };

        if errors.is_empty() {
            Ok(query)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::{LabelRef, Task};
    use chrono::{Duration, TimeZone, Utc};

    fn task(id: i64, title: &str) -> TaskWithRelations {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(id);
        TaskWithRelations {
            task: Task {
                id,
                title: title.to_string(),
                description: None,
                status: TaskStatus::Todo,
                priority: Priority::Medium,
                due_date: None,
                completed: false,
                category_id: None,
                created_at: created,
                updated_at: created,
            },
            category: None,
            tags: Vec::new(),
        }
    }

    fn tag(id: i64) -> LabelRef {
        LabelRef {
            id,
            name: format!("tag-{}", id),
            color: "#000000".to_string(),
        }
    }

    fn fixture() -> Vec<TaskWithRelations> {
        let mut write_docs = task(1, "Write docs");
        write_docs.task.description = Some("Cover the HTTP API".to_string());
        write_docs.task.category_id = Some(10);
        write_docs.task.priority = Priority::Low;
        write_docs.tags = vec![tag(100)];

        let mut fix_bug = task(2, "fix login bug");
        fix_bug.task.priority = Priority::High;
        fix_bug.task.status = TaskStatus::InProgress;
        fix_bug.task.due_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        fix_bug.tags = vec![tag(100), tag(200)];

        let mut release = task(3, "Release");
        release.task.completed = true;
        release.task.status = TaskStatus::Done;
        release.task.category_id = Some(20);
        release.task.due_date = NaiveDate::from_ymd_opt(2024, 1, 1);

        vec![write_docs, fix_bug, release]
    }

    fn ids(tasks: &[&TaskWithRelations]) -> Vec<i64> {
        tasks.iter().map(|t| t.task.id).collect()
    }

    #[test]
    fn default_query_keeps_everything_sorted_by_due_date() {
        let tasks = fixture();
        assert_eq!(ids(&TaskQuery::default().apply(&tasks)), vec![3, 2, 1]);
    }

    #[test]
    fn due_date_sort_puts_missing_dates_last() {
        let mut tasks = vec![task(1, "a"), task(2, "b"), task(3, "c")];
        tasks[0].task.due_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        tasks[2].task.due_date = NaiveDate::from_ymd_opt(2024, 1, 1);

        let sorted = TaskQuery::default().apply(&tasks);
        let dates: Vec<_> = sorted.iter().map(|t| t.task.due_date).collect();
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2024, 1, 1), NaiveDate::from_ymd_opt(2024, 3, 1), None]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let tasks = fixture();
        let query = TaskQuery {
            search: "LOGIN".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&tasks)), vec![2]);

        let query = TaskQuery {
            search: "http api".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&tasks)), vec![1]);
    }

    #[test]
    fn category_and_tag_sentinels() {
        let tasks = fixture();
        let uncategorized = TaskQuery {
            category: CategoryFilter::Uncategorized,
            ..Default::default()
        };
        assert_eq!(ids(&uncategorized.apply(&tasks)), vec![2]);

        let untagged = TaskQuery {
            tag: TagFilter::Untagged,
            ..Default::default()
        };
        assert_eq!(ids(&untagged.apply(&tasks)), vec![3]);

        let tagged = TaskQuery {
            tag: TagFilter::Id(100),
            sort: SortKey::Title,
            ..Default::default()
        };
        assert_eq!(ids(&tagged.apply(&tasks)), vec![2, 1]);
    }

    #[test]
    fn status_filter_distinguishes_literal_and_completion_flag() {
        let tasks = fixture();
        let by = |status: StatusFilter| {
            ids(&TaskQuery {
                status,
                sort: SortKey::CreatedAt,
                ..Default::default()
            }
            .apply(&tasks))
        };
        assert_eq!(by(StatusFilter::Completed), vec![3]);
        assert_eq!(by(StatusFilter::Active), vec![2, 1]);
        assert_eq!(by(StatusFilter::Is(TaskStatus::InProgress)), vec![2]);
    }

    #[test]
    fn priority_sort_uses_fixed_rank_with_id_tie_break() {
        let mut tasks = fixture();
        tasks.push(task(4, "another medium"));
        tasks.push(task(0, "first medium"));
        let query = TaskQuery {
            sort: SortKey::Priority,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&tasks)), vec![2, 0, 3, 4, 1]);
    }

    #[test]
    fn every_result_satisfies_all_predicates_and_rerun_is_identical() {
        let tasks = fixture();
        let query = TaskQuery {
            search: "i".to_string(),
            status: StatusFilter::Active,
            tag: TagFilter::Id(100),
            priority: PriorityFilter::Is(Priority::High),
            ..Default::default()
        };
        let first = query.apply(&tasks);
        assert!(first.iter().all(|task| query.matches(task)));
        assert_eq!(ids(&first), ids(&query.apply(&tasks)));
        assert_eq!(ids(&first), vec![2]);
    }

    #[test]
    fn params_parse_ui_sentinels_and_report_bad_fields() {
        let params = TaskQueryParams {
            category: Some("none".to_string()),
            status: Some("completed".to_string()),
            tag: Some("42".to_string()),
            priority: Some("HIGH".to_string()),
            sort: Some("title".to_string()),
            ..Default::default()
        };
        let query = params.parse().unwrap();
        assert_eq!(query.category, CategoryFilter::Uncategorized);
        assert_eq!(query.status, StatusFilter::Completed);
        assert_eq!(query.tag, TagFilter::Id(42));
        assert_eq!(query.priority, PriorityFilter::Is(Priority::High));
        assert_eq!(query.sort, SortKey::Title);

        let bad = TaskQueryParams {
            status: Some("later".to_string()),
            sort: Some("random".to_string()),
            ..Default::default()
        };
        let errors = bad.parse().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|(field, _)| *field).collect();
        assert_eq!(fields, vec!["status", "sort"]);
    }
}
