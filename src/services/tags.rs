use super::{check_name, LabelInput, LabelPatch};
use crate::db::db::Db;
use crate::db::tags::{Tag, TagWithCount, Tags};
use crate::libs::color::color_or_random;
use crate::libs::error::{AppError, AppResult, Entity};
use chrono::Utc;
use tracing::info;

#[derive(Clone)]
pub struct TagService {
    db: Db,
}

impl TagService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn list(&self) -> AppResult<Vec<TagWithCount>> {
        let conn = self.db.lock();
        Ok(Tags::new(&conn).list()?)
    }

    pub fn get_by_id(&self, id: i64) -> AppResult<Tag> {
        let conn = self.db.lock();
        Tags::new(&conn).get_by_id(id)?.ok_or(AppError::not_found(Entity::Tag, id))
    }

    pub fn create(&self, input: LabelInput) -> AppResult<Tag> {
        let mut errors = Vec::new();
        check_name(&input.name, &mut errors);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let now = Utc::now();
        let mut tag = Tag {
            id: 0,
            name: input.name.trim().to_string(),
            color: color_or_random(input.color.as_deref()),
            created_at: now,
            updated_at: now,
        };

        let conn = self.db.lock();
        tag.id = Tags::new(&conn).create(&tag)?;

        info!(tag_id = tag.id, "tag created");
        Ok(tag)
    }

    pub fn update(&self, id: i64, patch: LabelPatch) -> AppResult<Tag> {
        let conn = self.db.lock();
        let tags = Tags::new(&conn);
        let mut tag = tags.get_by_id(id)?.ok_or(AppError::not_found(Entity::Tag, id))?;

        if let Some(name) = patch.name {
            let mut errors = Vec::new();
            check_name(&name, &mut errors);
            if !errors.is_empty() {
                return Err(AppError::Validation(errors));
            }
            tag.name = name.trim().to_string();
        }
        if let Some(color) = patch.color.filter(|color| !color.trim().is_empty()) {
            tag.color = color;
        }
        tag.updated_at = Utc::now();
        tags.update(&tag)?;

        info!(tag_id = id, "tag updated");
        Ok(tag)
    }

    /// Deleting a tag drops it from every task that carried it.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.db.lock();
        let tags = Tags::new(&conn);
        let carriers = tags.get_tasks_with_tag(id)?.len();
        if tags.delete(id)? == 0 {
            return Err(AppError::not_found(Entity::Tag, id));
        }

        info!(tag_id = id, tasks = carriers, "tag deleted");
        Ok(())
    }
}
