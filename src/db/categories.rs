use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};
use serde::{Deserialize, Serialize};

const INSERT_CATEGORY: &str = "INSERT INTO categories (name, color, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)";
const UPDATE_CATEGORY: &str = "UPDATE categories SET name = ?2, color = ?3, updated_at = ?4 WHERE id = ?1";
const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";
const SELECT_CATEGORY_BY_ID: &str = "SELECT id, name, color, created_at, updated_at FROM categories WHERE id = ?1";
const SELECT_CATEGORIES_WITH_COUNT: &str = "
    SELECT c.id, c.name, c.color, c.created_at, c.updated_at, COUNT(t.id)
    FROM categories c
    LEFT JOIN tasks t ON t.category_id = c.id
    GROUP BY c.id
    ORDER BY c.name, c.id
";
const COUNT_CATEGORY: &str = "SELECT COUNT(*) FROM categories WHERE id = ?1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub task_count: i64,
}

pub struct Categories<'c> {
    conn: &'c Connection,
}

impl<'c> Categories<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, category: &Category) -> Result<i64> {
        self.conn.execute(
            INSERT_CATEGORY,
            params![category.name, category.color, category.created_at, category.updated_at],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn update(&self, category: &Category) -> Result<usize> {
        self.conn.execute(UPDATE_CATEGORY, params![category.id, category.name, category.color, category.updated_at])
    }

    /// Tasks in the category keep existing with a null `category_id`.
    pub fn delete(&self, id: i64) -> Result<usize> {
        self.conn.execute(DELETE_CATEGORY, params![id])
    }

    pub fn list(&self) -> Result<Vec<CategoryWithCount>> {
        let mut stmt = self.conn.prepare(SELECT_CATEGORIES_WITH_COUNT)?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryWithCount {
                category: category_from_row(row)?,
                task_count: row.get(5)?,
            })
        })?;

        let mut categories = Vec::new();
        for category in rows {
            categories.push(category?);
        }
        Ok(categories)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        self.conn.query_row(SELECT_CATEGORY_BY_ID, params![id], category_from_row).optional()
    }

    pub fn exists(&self, id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(COUNT_CATEGORY, params![id], |row| row.get(0))?;
        Ok(count > 0)
    }
}

fn category_from_row(row: &Row) -> Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        color: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}
