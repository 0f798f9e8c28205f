use crate::db::categories::Categories;
use crate::db::db::Db;
use crate::db::tags::Tags;
use crate::db::tasks::Tasks;
use crate::libs::error::{AppError, AppResult, Entity, FieldError};
use crate::libs::task::{NewTask, Task, TaskPatch, TaskStatus, TaskWithRelations};
use chrono::Utc;
use rusqlite::Connection;
use tracing::{debug, info};

#[derive(Clone)]
pub struct TaskService {
    db: Db,
}

impl TaskService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Every task with its category and tags, newest first.
    pub fn list(&self) -> AppResult<Vec<TaskWithRelations>> {
        let conn = self.db.lock();
        Ok(Tasks::new(&conn).list_with_relations()?)
    }

    pub fn get_by_id(&self, id: i64) -> AppResult<TaskWithRelations> {
        let conn = self.db.lock();
        Tasks::new(&conn)
            .get_with_relations(id)?
            .ok_or(AppError::not_found(Entity::Task, id))
    }

    /// Creates the task and its tag associations in one transaction.
    pub fn create(&self, input: NewTask) -> AppResult<Task> {
        let mut errors = Vec::new();
        let title = input.title.trim().to_string();
        if title.is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }

        let mut conn = self.db.lock();
        let tx = conn.transaction()?;

        check_references(&tx, input.category_id, &input.tag_ids, &mut errors)?;
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let now = Utc::now();
        let mut task = Task {
            id: 0,
            title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            due_date: input.due_date,
            completed: input.completed.unwrap_or(false),
            category_id: input.category_id,
            created_at: now,
            updated_at: now,
        };

        task.id = Tasks::new(&tx).insert(&task)?;
        Tags::new(&tx).set_task_tags(task.id, &input.tag_ids)?;
        tx.commit()?;

        info!(task_id = task.id, tags = input.tag_ids.len(), "task created");
        Ok(task)
    }

    /// Applies the supplied fields only. A present `tag_ids` replaces the
    /// whole association set, an absent one leaves it alone.
    pub fn update(&self, id: i64, patch: TaskPatch) -> AppResult<Task> {
        let mut conn = self.db.lock();
        let tx = conn.transaction()?;

        let mut task = Tasks::new(&tx).get_by_id(id)?.ok_or(AppError::not_found(Entity::Task, id))?;

        let mut errors = Vec::new();
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                errors.push(FieldError::new("title", "Title is required"));
            }
        }
        let category_id = patch.category_id.flatten();
        let tag_ids = patch.tag_ids.as_deref().unwrap_or(&[]);
        check_references(&tx, category_id, tag_ids, &mut errors)?;
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        if let Some(title) = patch.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(category_id) = patch.category_id {
            task.category_id = category_id;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        task.updated_at = Utc::now();

        Tasks::new(&tx).update(&task)?;
        if let Some(tag_ids) = &patch.tag_ids {
            Tags::new(&tx).set_task_tags(id, tag_ids)?;
            debug!(task_id = id, tags = tag_ids.len(), "task tags replaced");
        }
        tx.commit()?;

        info!(task_id = id, "task updated");
        Ok(task)
    }

    /// Removes the task together with its tag associations.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let mut conn = self.db.lock();
        let tx = conn.transaction()?;

        if !Tasks::new(&tx).exists(id)? {
            return Err(AppError::not_found(Entity::Task, id));
        }
        Tags::new(&tx).clear_task_tags(id)?;
        Tasks::new(&tx).delete(id)?;
        tx.commit()?;

        info!(task_id = id, "task deleted");
        Ok(())
    }

    /// Flips `completed` and moves the status to `DONE` or back to `TODO`.
    pub fn toggle_completed(&self, id: i64) -> AppResult<Task> {
        let conn = self.db.lock();
        let tasks = Tasks::new(&conn);

        let mut task = tasks.get_by_id(id)?.ok_or(AppError::not_found(Entity::Task, id))?;
        task.completed = !task.completed;
        task.status = if task.completed { TaskStatus::Done } else { TaskStatus::Todo };
        task.updated_at = Utc::now();
        tasks.set_completion(id, task.completed, task.status, task.updated_at)?;

        info!(task_id = id, completed = task.completed, "task toggled");
        Ok(task)
    }
}

fn check_references(
    conn: &Connection,
    category_id: Option<i64>,
    tag_ids: &[i64],
    errors: &mut Vec<FieldError>,
) -> AppResult<()> {
    if let Some(category_id) = category_id {
        if !Categories::new(conn).exists(category_id)? {
            errors.push(FieldError::new("categoryId", format!("Category {} does not exist", category_id)));
        }
    }

    let missing = Tags::new(conn).missing_ids(tag_ids)?;
    if !missing.is_empty() {
        let ids = missing.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        errors.push(FieldError::new("tagIds", format!("Unknown tag ids: {}", ids)));
    }
    Ok(())
}
