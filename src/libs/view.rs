use super::messages::Message;
use super::task::{LabelRef, TaskWithRelations};
use crate::db::categories::CategoryWithCount;
use crate::db::tags::TagWithCount;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[&TaskWithRelations]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "STATUS", "PRIORITY", "DUE", "DONE", "CATEGORY", "TAGS"]);
        for task in tasks {
            table.add_row(row![
                task.task.id,
                task.task.title,
                task.task.status,
                task.task.priority,
                task.task.due_date.map(|date| date.to_string()).unwrap_or_default(),
                if task.task.completed { "✔" } else { "" },
                task.category.as_ref().map(|category| category.name.as_str()).unwrap_or(""),
                Self::label_names(&task.tags)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn task(task: &TaskWithRelations) -> Result<()> {
        let mut table = Table::new();
        let category = match &task.category {
            Some(category) => format!("{} ({})", category.name, category.color),
            None => Message::NoCategory.to_string(),
        };
        let tags = if task.tags.is_empty() {
            Message::NoTags.to_string()
        } else {
            Self::label_names(&task.tags)
        };

        table.add_row(row!["ID", task.task.id]);
        table.add_row(row!["TITLE", task.task.title]);
        table.add_row(row!["DESCRIPTION", task.task.description.clone().unwrap_or_default()]);
        table.add_row(row!["STATUS", task.task.status]);
        table.add_row(row!["PRIORITY", task.task.priority]);
        table.add_row(row!["DUE", task.task.due_date.map(|date| date.to_string()).unwrap_or_default()]);
        table.add_row(row!["COMPLETED", task.task.completed]);
        table.add_row(row!["CATEGORY", category]);
        table.add_row(row!["TAGS", tags]);
        table.add_row(row!["CREATED", task.task.created_at.format("%Y-%m-%d %H:%M")]);
        table.add_row(row!["UPDATED", task.task.updated_at.format("%Y-%m-%d %H:%M")]);
        table.printstd();

        Ok(())
    }

    pub fn categories(categories: &[CategoryWithCount]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "COLOR", "TASKS"]);
        for item in categories {
            table.add_row(row![item.category.id, item.category.name, item.category.color, item.task_count]);
        }
        table.printstd();

        Ok(())
    }

    pub fn tags(tags: &[TagWithCount]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "COLOR", "TASKS"]);
        for item in tags {
            table.add_row(row![item.tag.id, item.tag.name, item.tag.color, item.task_count]);
        }
        table.printstd();

        Ok(())
    }

    fn label_names(labels: &[LabelRef]) -> String {
        labels.iter().map(|label| label.name.as_str()).collect::<Vec<_>>().join(", ")
    }
}
