#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tasklane::db::db::Db;
    use tasklane::libs::error::AppError;
    use tasklane::libs::task::{NewTask, Priority, TaskPatch, TaskStatus};
    use tasklane::services::categories::CategoryService;
    use tasklane::services::tags::TagService;
    use tasklane::services::tasks::TaskService;
    use tasklane::services::LabelInput;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        _temp_dir: TempDir,
        tasks: TaskService,
        categories: CategoryService,
        tags: TagService,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("tasklane.db")).unwrap();
            TaskTestContext {
                _temp_dir: temp_dir,
                tasks: TaskService::new(db.clone()),
                categories: CategoryService::new(db.clone()),
                tags: TagService::new(db),
            }
        }
    }

    fn field_names(error: &AppError) -> Vec<String> {
        match error {
            AppError::Validation(details) => details.iter().map(|d| d.field.clone()).collect(),
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_applies_defaults(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(NewTask::new("  Buy milk  ")).unwrap();

        assert!(task.id > 0);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.completed);
        assert_eq!(task.due_date, None);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_rejects_blank_title(ctx: &mut TaskTestContext) {
        let error = ctx.tasks.create(NewTask::new("   ")).unwrap_err();
        assert_eq!(field_names(&error), vec!["title"]);
        assert!(ctx.tasks.list().unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_with_unknown_references_writes_nothing(ctx: &mut TaskTestContext) {
        let tag = ctx.tags.create(LabelInput::new("home")).unwrap();
        let input = NewTask {
            category_id: Some(404),
            tag_ids: vec![tag.id, 999],
            ..NewTask::new("Clean garage")
        };

        let error = ctx.tasks.create(input).unwrap_err();
        assert_eq!(field_names(&error), vec!["categoryId", "tagIds"]);
        assert!(ctx.tasks.list().unwrap().is_empty());
        assert_eq!(ctx.tags.list().unwrap()[0].task_count, 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_get_returns_relations(ctx: &mut TaskTestContext) {
        let work = ctx.categories.create(LabelInput::new("Work")).unwrap();
        let urgent = ctx.tags.create(LabelInput::new("urgent")).unwrap();
        let backend = ctx.tags.create(LabelInput::new("backend")).unwrap();

        let created = ctx
            .tasks
            .create(NewTask {
                description: Some("Rotate the keys".to_string()),
                priority: Some(Priority::High),
                due_date: NaiveDate::from_ymd_opt(2024, 6, 1),
                category_id: Some(work.id),
                tag_ids: vec![urgent.id, backend.id],
                ..NewTask::new("Rotate credentials")
            })
            .unwrap();

        let task = ctx.tasks.get_by_id(created.id).unwrap();
        assert_eq!(task.task.title, "Rotate credentials");
        assert_eq!(task.category.as_ref().unwrap().name, "Work");
        // Tags come back ordered by name.
        let names: Vec<&str> = task.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["backend", "urgent"]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_list_is_newest_first(ctx: &mut TaskTestContext) {
        let first = ctx.tasks.create(NewTask::new("First")).unwrap();
        let second = ctx.tasks.create(NewTask::new("Second")).unwrap();

        let ids: Vec<i64> = ctx.tasks.list().unwrap().iter().map(|t| t.task.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_only_touches_supplied_fields(ctx: &mut TaskTestContext) {
        let tag = ctx.tags.create(LabelInput::new("errand")).unwrap();
        let created = ctx
            .tasks
            .create(NewTask {
                description: Some("Two bags".to_string()),
                due_date: NaiveDate::from_ymd_opt(2024, 1, 10),
                tag_ids: vec![tag.id],
                ..NewTask::new("Groceries")
            })
            .unwrap();

        let updated = ctx
            .tasks
            .update(
                created.id,
                TaskPatch {
                    priority: Some(Priority::Low),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.priority, Priority::Low);
        assert_eq!(updated.title, "Groceries");
        assert_eq!(updated.description.as_deref(), Some("Two bags"));
        assert_eq!(updated.due_date, NaiveDate::from_ymd_opt(2024, 1, 10));
        assert!(updated.updated_at >= created.updated_at);
        // No tagIds in the patch: associations stay.
        assert_eq!(ctx.tasks.get_by_id(created.id).unwrap().tag_ids(), vec![tag.id]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_clears_nullable_fields(ctx: &mut TaskTestContext) {
        let category = ctx.categories.create(LabelInput::new("Home")).unwrap();
        let created = ctx
            .tasks
            .create(NewTask {
                description: Some("Leaky tap".to_string()),
                due_date: NaiveDate::from_ymd_opt(2024, 2, 2),
                category_id: Some(category.id),
                ..NewTask::new("Plumber")
            })
            .unwrap();

        let updated = ctx
            .tasks
            .update(
                created.id,
                TaskPatch {
                    description: Some(None),
                    due_date: Some(None),
                    category_id: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.description, None);
        assert_eq!(updated.due_date, None);
        assert_eq!(updated.category_id, None);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_replaces_or_empties_tags(ctx: &mut TaskTestContext) {
        let a = ctx.tags.create(LabelInput::new("a")).unwrap();
        let b = ctx.tags.create(LabelInput::new("b")).unwrap();
        let created = ctx
            .tasks
            .create(NewTask {
                tag_ids: vec![a.id],
                ..NewTask::new("Tagged")
            })
            .unwrap();

        ctx.tasks
            .update(
                created.id,
                TaskPatch {
                    tag_ids: Some(vec![b.id]),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(ctx.tasks.get_by_id(created.id).unwrap().tag_ids(), vec![b.id]);

        ctx.tasks
            .update(
                created.id,
                TaskPatch {
                    tag_ids: Some(vec![]),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(ctx.tasks.get_by_id(created.id).unwrap().tags.is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_missing_task_is_not_found(ctx: &mut TaskTestContext) {
        let error = ctx.tasks.update(77, TaskPatch::default()).unwrap_err();
        assert!(error.is_not_found());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_rejects_blank_title(ctx: &mut TaskTestContext) {
        let created = ctx.tasks.create(NewTask::new("Keep me")).unwrap();
        let error = ctx
            .tasks
            .update(
                created.id,
                TaskPatch {
                    title: Some("".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();

        assert_eq!(field_names(&error), vec!["title"]);
        assert_eq!(ctx.tasks.get_by_id(created.id).unwrap().task.title, "Keep me");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_toggle_twice_restores_state(ctx: &mut TaskTestContext) {
        let created = ctx
            .tasks
            .create(NewTask {
                status: Some(TaskStatus::Todo),
                ..NewTask::new("Water plants")
            })
            .unwrap();

        let done = ctx.tasks.toggle_completed(created.id).unwrap();
        assert!(done.completed);
        assert_eq!(done.status, TaskStatus::Done);

        let reopened = ctx.tasks.toggle_completed(created.id).unwrap();
        assert!(!reopened.completed);
        assert_eq!(reopened.status, TaskStatus::Todo);

        let stored = ctx.tasks.get_by_id(created.id).unwrap();
        assert_eq!((stored.task.completed, stored.task.status), (created.completed, created.status));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_toggle_twice_reopens_in_progress_task_as_todo(ctx: &mut TaskTestContext) {
        let created = ctx
            .tasks
            .create(NewTask {
                status: Some(TaskStatus::InProgress),
                ..NewTask::new("Draft chapter")
            })
            .unwrap();

        ctx.tasks.toggle_completed(created.id).unwrap();
        ctx.tasks.toggle_completed(created.id).unwrap();

        let stored = ctx.tasks.get_by_id(created.id).unwrap();
        assert_eq!((stored.task.completed, stored.task.status), (false, TaskStatus::Todo));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_toggle_twice_moves_completed_todo_to_done(ctx: &mut TaskTestContext) {
        let created = ctx
            .tasks
            .create(NewTask {
                status: Some(TaskStatus::Todo),
                completed: Some(true),
                ..NewTask::new("Imported as done")
            })
            .unwrap();

        let reopened = ctx.tasks.toggle_completed(created.id).unwrap();
        assert_eq!((reopened.completed, reopened.status), (false, TaskStatus::Todo));
        ctx.tasks.toggle_completed(created.id).unwrap();

        let stored = ctx.tasks.get_by_id(created.id).unwrap();
        assert_eq!((stored.task.completed, stored.task.status), (true, TaskStatus::Done));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_toggle_missing_task_is_not_found(ctx: &mut TaskTestContext) {
        assert!(ctx.tasks.toggle_completed(12345).unwrap_err().is_not_found());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_removes_task_and_associations(ctx: &mut TaskTestContext) {
        let tag = ctx.tags.create(LabelInput::new("temp")).unwrap();
        let created = ctx
            .tasks
            .create(NewTask {
                tag_ids: vec![tag.id],
                ..NewTask::new("Short lived")
            })
            .unwrap();

        ctx.tasks.delete(created.id).unwrap();

        assert!(ctx.tasks.get_by_id(created.id).unwrap_err().is_not_found());
        assert_eq!(ctx.tags.list().unwrap()[0].task_count, 0);
        assert!(ctx.tasks.delete(created.id).unwrap_err().is_not_found());
    }
}
