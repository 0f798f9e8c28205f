use crate::libs::task::{LabelRef, Task, TaskStatus, TaskWithRelations};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};
use std::collections::HashMap;

const TASK_COLUMNS: &str = "t.id, t.title, t.description, t.status, t.priority, t.due_date, t.completed, t.category_id, t.created_at, t.updated_at";
const INSERT_TASK: &str = "INSERT INTO tasks (title, description, status, priority, due_date, completed, category_id, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?2, description = ?3, status = ?4, priority = ?5, due_date = ?6,
    completed = ?7, category_id = ?8, updated_at = ?9 WHERE id = ?1";
const UPDATE_COMPLETION: &str = "UPDATE tasks SET completed = ?2, status = ?3, updated_at = ?4 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const ORDER_NEWEST_FIRST: &str = "ORDER BY t.created_at DESC, t.id DESC";
const SELECT_TASK_TAGS: &str = "SELECT tt.task_id, g.id, g.name, g.color FROM task_tags tt
    JOIN tags g ON g.id = tt.tag_id";

/// Task rows and their denormalized views.
pub struct Tasks<'c> {
    conn: &'c Connection,
}

impl<'c> Tasks<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Inserts the task (its `id` is ignored) and returns the new row id.
    pub fn insert(&self, task: &Task) -> Result<i64> {
        self.conn.execute(
            INSERT_TASK,
            params![
                task.title,
                task.description,
                task.status,
                task.priority,
                task.due_date,
                task.completed,
                task.category_id,
                task.created_at,
                task.updated_at
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        self.conn
            .query_row(&format!("SELECT {} FROM tasks t WHERE t.id = ?1", TASK_COLUMNS), params![id], task_from_row)
            .optional()
    }

    pub fn exists(&self, id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM tasks WHERE id = ?1", params![id], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Writes every column of an existing task. Returns the affected row count.
    pub fn update(&self, task: &Task) -> Result<usize> {
        self.conn.execute(
            UPDATE_TASK,
            params![
                task.id,
                task.title,
                task.description,
                task.status,
                task.priority,
                task.due_date,
                task.completed,
                task.category_id,
                task.updated_at
            ],
        )
    }

    pub fn set_completion(&self, id: i64, completed: bool, status: TaskStatus, now: DateTime<Utc>) -> Result<usize> {
        self.conn.execute(UPDATE_COMPLETION, params![id, completed, status, now])
    }

    pub fn delete(&self, id: i64) -> Result<usize> {
        self.conn.execute(DELETE_TASK, params![id])
    }

    /// All tasks, newest first, with category and tags joined in.
    pub fn list_with_relations(&self) -> Result<Vec<TaskWithRelations>> {
        let sql = format!(
            "SELECT {}, c.id, c.name, c.color FROM tasks t LEFT JOIN categories c ON c.id = t.category_id {}",
            TASK_COLUMNS, ORDER_NEWEST_FIRST
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], task_with_category_from_row)?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }

        let mut tags_by_task = self.tags_by_task(None)?;
        for task in &mut tasks {
            task.tags = tags_by_task.remove(&task.task.id).unwrap_or_default();
        }
        Ok(tasks)
    }

    pub fn get_with_relations(&self, id: i64) -> Result<Option<TaskWithRelations>> {
        let sql = format!(
            "SELECT {}, c.id, c.name, c.color FROM tasks t LEFT JOIN categories c ON c.id = t.category_id WHERE t.id = ?1",
            TASK_COLUMNS
        );
        let task = self.conn.query_row(&sql, params![id], task_with_category_from_row).optional()?;

        match task {
            Some(mut task) => {
                task.tags = self.tags_by_task(Some(id))?.remove(&id).unwrap_or_default();
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    // Tags per task, ordered by tag name then id.
    fn tags_by_task(&self, task_id: Option<i64>) -> Result<HashMap<i64, Vec<LabelRef>>> {
        let mut grouped: HashMap<i64, Vec<LabelRef>> = HashMap::new();

        match task_id {
            Some(task_id) => {
                let mut stmt = self.conn.prepare(&format!("{} WHERE tt.task_id = ?1 ORDER BY g.name, g.id", SELECT_TASK_TAGS))?;
                let mut rows = stmt.query(params![task_id])?;
                while let Some(row) = rows.next()? {
                    push_tag(&mut grouped, row)?;
                }
            }
            None => {
                let mut stmt = self.conn.prepare(&format!("{} ORDER BY g.name, g.id", SELECT_TASK_TAGS))?;
                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    push_tag(&mut grouped, row)?;
                }
            }
        }

        Ok(grouped)
    }
}

fn push_tag(grouped: &mut HashMap<i64, Vec<LabelRef>>, row: &Row) -> Result<()> {
    let task_id: i64 = row.get(0)?;
    grouped.entry(task_id).or_default().push(LabelRef {
        id: row.get(1)?,
        name: row.get(2)?,
        color: row.get(3)?,
    });
    Ok(())
}

fn task_from_row(row: &Row) -> Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: row.get(3)?,
        priority: row.get(4)?,
        due_date: row.get(5)?,
        completed: row.get(6)?,
        category_id: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn task_with_category_from_row(row: &Row) -> Result<TaskWithRelations> {
    let category_id: Option<i64> = row.get(10)?;
    let category = match category_id {
        Some(id) => Some(LabelRef {
            id,
            name: row.get(11)?,
            color: row.get(12)?,
        }),
        None => None,
    };

    Ok(TaskWithRelations {
        task: task_from_row(row)?,
        category,
        tags: Vec::new(),
    })
}
