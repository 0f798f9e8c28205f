use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};
use serde::{Deserialize, Serialize};

const INSERT_TAG: &str = "INSERT INTO tags (name, color, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_TAG: &str = "UPDATE tags SET name = ?2, color = ?3, updated_at = ?4 WHERE id = ?1";
const DELETE_TAG: &str = "DELETE FROM tags WHERE id = ?1";
const SELECT_TAG_BY_ID: &str = "SELECT id, name, color, created_at, updated_at FROM tags WHERE id = ?1";
const SELECT_TAGS_WITH_COUNT: &str = "
    SELECT g.id, g.name, g.color, g.created_at, g.updated_at, COUNT(tt.task_id)
    FROM tags g
    LEFT JOIN task_tags tt ON tt.tag_id = g.id
    GROUP BY g.id
    ORDER BY g.name, g.id
";
const SELECT_TAGS_BY_TASK: &str = "
    SELECT g.id, g.name, g.color, g.created_at, g.updated_at FROM tags g
    JOIN task_tags tt ON g.id = tt.tag_id
    WHERE tt.task_id = ?1
    ORDER BY g.name, g.id
";
const SELECT_TASKS_BY_TAG: &str = "SELECT task_id FROM task_tags WHERE tag_id = ?1 ORDER BY task_id";
const INSERT_TASK_TAG: &str = "INSERT OR IGNORE INTO task_tags (task_id, tag_id) VALUES (?1, ?2)";
const DELETE_ALL_TASK_TAGS: &str = "DELETE FROM task_tags WHERE task_id = ?1";
const COUNT_TAG: &str = "SELECT COUNT(*) FROM tags WHERE id = ?1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagWithCount {
    #[serde(flatten)]
    pub tag: Tag,
    pub task_count: i64,
}

/// Tag rows and the task/tag join table.
pub struct Tags<'c> {
    conn: &'c Connection,
}

impl<'c> Tags<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Create a new tag, returning its id
    pub fn create(&self, tag: &Tag) -> Result<i64> {
        self.conn.execute(INSERT_TAG, params![tag.name, tag.color, tag.created_at, tag.updated_at])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update an existing tag, returning the affected row count
    pub fn update(&self, tag: &Tag) -> Result<usize> {
        self.conn.execute(UPDATE_TAG, params![tag.id, tag.name, tag.color, tag.updated_at])
    }

    /// Delete a tag; its task associations go with it
    pub fn delete(&self, id: i64) -> Result<usize> {
        self.conn.execute(DELETE_TAG, params![id])
    }

    /// All tags with the number of tasks carrying each, ordered by name
    pub fn list(&self) -> Result<Vec<TagWithCount>> {
        let mut stmt = self.conn.prepare(SELECT_TAGS_WITH_COUNT)?;
        let tag_iter = stmt.query_map([], |row| {
            Ok(TagWithCount {
                tag: tag_from_row(row)?,
                task_count: row.get(5)?,
            })
        })?;

        let mut tags = Vec::new();
        for tag in tag_iter {
            tags.push(tag?);
        }
        Ok(tags)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Tag>> {
        self.conn.query_row(SELECT_TAG_BY_ID, params![id], tag_from_row).optional()
    }

    /// Ids from `ids` that have no tag row
    pub fn missing_ids(&self, ids: &[i64]) -> Result<Vec<i64>> {
        let mut missing = Vec::new();
        for id in ids {
            let count: i64 = self.conn.query_row(COUNT_TAG, params![id], |row| row.get(0))?;
            if count == 0 && !missing.contains(id) {
                missing.push(*id);
            }
        }
        Ok(missing)
    }

    /// Get tags for a specific task
    pub fn get_task_tags(&self, task_id: i64) -> Result<Vec<Tag>> {
        let mut stmt = self.conn.prepare(SELECT_TAGS_BY_TASK)?;
        let tag_iter = stmt.query_map(params![task_id], tag_from_row)?;

        let mut tags = Vec::new();
        for tag in tag_iter {
            tags.push(tag?);
        }
        Ok(tags)
    }

    /// Get task IDs that have a specific tag
    pub fn get_tasks_with_tag(&self, tag_id: i64) -> Result<Vec<i64>> {
        let mut stmt = self.conn.prepare(SELECT_TASKS_BY_TAG)?;
        let task_iter = stmt.query_map(params![tag_id], |row| row.get(0))?;

        let mut task_ids = Vec::new();
        for task_id in task_iter {
            task_ids.push(task_id?);
        }
        Ok(task_ids)
    }

    pub fn add_tag_to_task(&self, task_id: i64, tag_id: i64) -> Result<()> {
        self.conn.execute(INSERT_TASK_TAG, params![task_id, tag_id])?;
        Ok(())
    }

    pub fn clear_task_tags(&self, task_id: i64) -> Result<()> {
        self.conn.execute(DELETE_ALL_TASK_TAGS, params![task_id])?;
        Ok(())
    }

    /// Set tags for a task (replaces existing tags)
    pub fn set_task_tags(&self, task_id: i64, tag_ids: &[i64]) -> Result<()> {
        self.clear_task_tags(task_id)?;

        for tag_id in tag_ids {
            self.add_tag_to_task(task_id, *tag_id)?;
        }
        Ok(())
    }
}

fn tag_from_row(row: &Row) -> Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}
