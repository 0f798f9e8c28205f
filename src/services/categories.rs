use super::{check_name, LabelInput, LabelPatch};
use crate::db::categories::{Categories, Category, CategoryWithCount};
use crate::db::db::Db;
use crate::libs::color::color_or_random;
use crate::libs::error::{AppError, AppResult, Entity};
use chrono::Utc;
use tracing::info;

#[derive(Clone)]
pub struct CategoryService {
    db: Db,
}

impl CategoryService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// All categories ordered by name, each with its task count.
    pub fn list(&self) -> AppResult<Vec<CategoryWithCount>> {
        let conn = self.db.lock();
        Ok(Categories::new(&conn).list()?)
    }

    pub fn get_by_id(&self, id: i64) -> AppResult<Category> {
        let conn = self.db.lock();
        Categories::new(&conn)
            .get_by_id(id)?
            .ok_or(AppError::not_found(Entity::Category, id))
    }

    /// A missing or blank color gets a random one.
    pub fn create(&self, input: LabelInput) -> AppResult<Category> {
        let mut errors = Vec::new();
        check_name(&input.name, &mut errors);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let now = Utc::now();
        let mut category = Category {
            id: 0,
            name: input.name.trim().to_string(),
            color: color_or_random(input.color.as_deref()),
            created_at: now,
            updated_at: now,
        };

        let conn = self.db.lock();
        category.id = Categories::new(&conn).create(&category)?;

        info!(category_id = category.id, "category created");
        Ok(category)
    }

    pub fn update(&self, id: i64, patch: LabelPatch) -> AppResult<Category> {
        let conn = self.db.lock();
        let categories = Categories::new(&conn);
        let mut category = categories.get_by_id(id)?.ok_or(AppError::not_found(Entity::Category, id))?;

        if let Some(name) = patch.name {
            let mut errors = Vec::new();
            check_name(&name, &mut errors);
            if !errors.is_empty() {
                return Err(AppError::Validation(errors));
            }
            category.name = name.trim().to_string();
        }
        if let Some(color) = patch.color.filter(|color| !color.trim().is_empty()) {
            category.color = color;
        }
        category.updated_at = Utc::now();
        categories.update(&category)?;

        info!(category_id = id, "category updated");
        Ok(category)
    }

    /// Tasks of the deleted category become uncategorized.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.db.lock();
        if Categories::new(&conn).delete(id)? == 0 {
            return Err(AppError::not_found(Entity::Category, id));
        }

        info!(category_id = id, "category deleted");
        Ok(())
    }
}
