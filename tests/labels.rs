#[cfg(test)]
mod tests {
    use tasklane::db::db::Db;
    use tasklane::db::tags::Tags;
    use tasklane::libs::color::is_hex_color;
    use tasklane::libs::task::NewTask;
    use tasklane::services::categories::CategoryService;
    use tasklane::services::tags::TagService;
    use tasklane::services::tasks::TaskService;
    use tasklane::services::{LabelInput, LabelPatch};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct LabelTestContext {
        _temp_dir: TempDir,
        db: Db,
        tasks: TaskService,
        categories: CategoryService,
        tags: TagService,
    }

    impl TestContext for LabelTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tasklane.db")).unwrap();
            LabelTestContext {
                _temp_dir: temp_dir,
                tasks: TaskService::new(db.clone()),
                categories: CategoryService::new(db.clone()),
                tags: TagService::new(db.clone()),
                db,
            }
        }
    }

    #[test_context(LabelTestContext)]
    #[test]
    fn test_category_crud(ctx: &mut LabelTestContext) {
        let created = ctx
            .categories
            .create(LabelInput {
                name: "Work".to_string(),
                color: Some("#336699".to_string()),
            })
            .unwrap();
        assert_eq!(created.color, "#336699");

        let updated = ctx
            .categories
            .update(
                created.id,
                LabelPatch {
                    name: Some("Office".to_string()),
                    color: None,
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Office");
        assert_eq!(updated.color, "#336699");
        assert_eq!(ctx.categories.get_by_id(created.id).unwrap().name, "Office");

        ctx.categories.delete(created.id).unwrap();
        assert!(ctx.categories.get_by_id(created.id).unwrap_err().is_not_found());
        assert!(ctx.categories.delete(created.id).unwrap_err().is_not_found());
    }

    #[test_context(LabelTestContext)]
    #[test]
    fn test_missing_color_is_generated(ctx: &mut LabelTestContext) {
        let category = ctx.categories.create(LabelInput::new("Errands")).unwrap();
        let tag = ctx
            .tags
            .create(LabelInput {
                name: "later".to_string(),
                color: Some("".to_string()),
            })
            .unwrap();

        assert!(is_hex_color(&category.color), "{}", category.color);
        assert!(is_hex_color(&tag.color), "{}", tag.color);
    }

    #[test_context(LabelTestContext)]
    #[test]
    fn test_names_are_required(ctx: &mut LabelTestContext) {
        assert!(ctx.categories.create(LabelInput::new(" ")).is_err());
        assert!(ctx.tags.create(LabelInput::new("")).is_err());

        let tag = ctx.tags.create(LabelInput::new("keep")).unwrap();
        let patch = LabelPatch {
            name: Some("".to_string()),
            color: None,
        };
        assert!(ctx.tags.update(tag.id, patch).is_err());
        assert_eq!(ctx.tags.get_by_id(tag.id).unwrap().name, "keep");
    }

    #[test_context(LabelTestContext)]
    #[test]
    fn test_lists_are_ordered_by_name_with_counts(ctx: &mut LabelTestContext) {
        let zeta = ctx.tags.create(LabelInput::new("zeta")).unwrap();
        let alpha = ctx.tags.create(LabelInput::new("alpha")).unwrap();
        ctx.tasks
            .create(NewTask {
                tag_ids: vec![zeta.id, alpha.id],
                ..NewTask::new("One")
            })
            .unwrap();
        ctx.tasks
            .create(NewTask {
                tag_ids: vec![zeta.id],
                ..NewTask::new("Two")
            })
            .unwrap();

        let tags = ctx.tags.list().unwrap();
        let summary: Vec<(&str, i64)> = tags.iter().map(|t| (t.tag.name.as_str(), t.task_count)).collect();
        assert_eq!(summary, vec![("alpha", 1), ("zeta", 2)]);
    }

    #[test_context(LabelTestContext)]
    #[test]
    fn test_deleting_category_uncategorizes_tasks(ctx: &mut LabelTestContext) {
        let category = ctx.categories.create(LabelInput::new("Garden")).unwrap();
        let task = ctx
            .tasks
            .create(NewTask {
                category_id: Some(category.id),
                ..NewTask::new("Mow lawn")
            })
            .unwrap();
        assert_eq!(ctx.categories.list().unwrap()[0].task_count, 1);

        ctx.categories.delete(category.id).unwrap();

        let stored = ctx.tasks.get_by_id(task.id).unwrap();
        assert_eq!(stored.task.category_id, None);
        assert!(stored.category.is_none());
    }

    #[test_context(LabelTestContext)]
    #[test]
    fn test_deleting_tag_keeps_tasks(ctx: &mut LabelTestContext) {
        let tag = ctx.tags.create(LabelInput::new("someday")).unwrap();
        let task = ctx
            .tasks
            .create(NewTask {
                tag_ids: vec![tag.id],
                ..NewTask::new("Learn piano")
            })
            .unwrap();

        ctx.tags.delete(tag.id).unwrap();

        let stored = ctx.tasks.get_by_id(task.id).unwrap();
        assert!(stored.tags.is_empty());
        let conn = ctx.db.lock();
        assert!(Tags::new(&conn).get_task_tags(task.id).unwrap().is_empty());
    }

    #[test_context(LabelTestContext)]
    #[test]
    fn test_task_tag_repository(ctx: &mut LabelTestContext) {
        let a = ctx.tags.create(LabelInput::new("a")).unwrap();
        let b = ctx.tags.create(LabelInput::new("b")).unwrap();
        let task = ctx.tasks.create(NewTask::new("Repository level")).unwrap();

        let conn = ctx.db.lock();
        let tags = Tags::new(&conn);
        tags.set_task_tags(task.id, &[b.id, a.id]).unwrap();
        let names: Vec<String> = tags.get_task_tags(task.id).unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(tags.get_tasks_with_tag(a.id).unwrap(), vec![task.id]);
        assert_eq!(tags.missing_ids(&[a.id, 500, 500]).unwrap(), vec![500]);

        tags.clear_task_tags(task.id).unwrap();
        assert!(tags.get_task_tags(task.id).unwrap().is_empty());
    }
}
