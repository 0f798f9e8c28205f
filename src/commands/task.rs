use crate::{
    libs::{
        config::Config,
        filter::TaskQueryParams,
        form::{FormData, TaskForm, FIELD_CATEGORY, FIELD_COMPLETED, FIELD_DESCRIPTION, FIELD_DUE_DATE, FIELD_PRIORITY, FIELD_STATUS, FIELD_TITLE},
        http::ApiClient,
        messages::Message,
        task::{Priority, TaskStatus, TaskWithRelations},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// List tasks, filtered and sorted
    List(ListArgs),
    /// Show a single task
    Show {
        /// Task ID
        id: i64,
    },
    /// Create a task. Prompts for every field when no title is given
    Add(FieldArgs),
    /// Edit a task. Prompts for every field when no option is given
    Edit {
        /// Task ID
        id: i64,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Flip a task between done and not done
    Toggle {
        /// Task ID
        id: i64,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Case-insensitive text to find in title or description
    #[arg(short, long)]
    search: Option<String>,
    /// `all`, `none` or a category ID
    #[arg(short, long)]
    category: Option<String>,
    /// `all`, `TODO`, `IN_PROGRESS`, `DONE`, `completed` or `active`
    #[arg(long)]
    status: Option<String>,
    /// `all`, `none` or a tag ID
    #[arg(short, long)]
    tag: Option<String>,
    /// `all`, `LOW`, `MEDIUM` or `HIGH`
    #[arg(short, long)]
    priority: Option<String>,
    /// `dueDate`, `priority`, `title` or `createdAt`
    #[arg(long)]
    sort: Option<String>,
}

#[derive(Debug, Args)]
struct FieldArgs {
    /// Task title
    #[arg(long)]
    title: Option<String>,
    /// Task description, empty to clear
    #[arg(short, long)]
    description: Option<String>,
    /// `TODO`, `IN_PROGRESS` or `DONE`
    #[arg(long)]
    status: Option<String>,
    /// `LOW`, `MEDIUM` or `HIGH`
    #[arg(short, long)]
    priority: Option<String>,
    /// Due date as YYYY-MM-DD, empty to clear
    #[arg(long)]
    due: Option<String>,
    /// Category ID, or `none`
    #[arg(short, long)]
    category: Option<String>,
    /// Toggle a tag by ID. Repeat for several tags
    #[arg(short, long = "tag")]
    tags: Vec<i64>,
    /// Mark as completed (`true` or `false`)
    #[arg(long)]
    completed: Option<bool>,
}

impl FieldArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due.is_none()
            && self.category.is_none()
            && self.tags.is_empty()
            && self.completed.is_none()
    }

    /// Writes the supplied options over the captured form values.
    fn apply(&self, form: &mut TaskForm, captured: &mut FormData) {
        let fields = [
            (FIELD_TITLE, &self.title),
            (FIELD_DESCRIPTION, &self.description),
            (FIELD_STATUS, &self.status),
            (FIELD_PRIORITY, &self.priority),
            (FIELD_DUE_DATE, &self.due),
            (FIELD_CATEGORY, &self.category),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                captured.set(name, value.clone());
            }
        }
        if let Some(completed) = self.completed {
            captured.set(FIELD_COMPLETED, completed.to_string());
        }
        for tag_id in &self.tags {
            form.toggle_tag(*tag_id);
        }
    }
}

pub async fn cmd(args: TaskArgs) -> Result<()> {
    let api = ApiClient::new(&Config::load()?.api_url());

    match args.command {
        TaskCommand::List(list) => handle_list(&api, list).await,
        TaskCommand::Show { id } => {
            let task = api.get_task(id).await?;
            msg_print!(Message::TaskDetailsHeader(id), true);
            View::task(&task)
        }
        TaskCommand::Add(fields) => handle_save(&api, TaskForm::create(), fields).await,
        TaskCommand::Edit { id, fields } => {
            let task = api.get_task(id).await?;
            handle_save(&api, TaskForm::edit(&task), fields).await
        }
        TaskCommand::Toggle { id } => {
            let task = api.toggle_task(id).await?;
            if task.completed {
                msg_success!(Message::TaskCompleted(task.title));
            } else {
                msg_success!(Message::TaskReopened(task.title));
            }
            Ok(())
        }
        TaskCommand::Delete { id, yes } => handle_delete(&api, id, yes).await,
    }
}

async fn handle_list(api: &ApiClient, args: ListArgs) -> Result<()> {
    let params = TaskQueryParams {
        search: args.search,
        category: args.category,
        status: args.status,
        tag: args.tag,
        priority: args.priority,
        sort: args.sort,
    };
    let query = match params.parse() {
        Ok(query) => query,
        Err(errors) => {
            let details = errors
                .iter()
                .map(|(field, message)| format!("{}: {}", field, message))
                .collect::<Vec<_>>()
                .join("; ");
            msg_bail_anyhow!(Message::InvalidFilter(details));
        }
    };

    let tasks = api.list_tasks().await?;
    let visible = query.apply(&tasks);
    if visible.is_empty() {
        msg_info!(Message::TasksNotFound);
        return Ok(());
    }

    msg_print!(Message::TasksHeader, true);
    View::tasks(&visible)?;
    msg_info!(Message::TasksShown(visible.len(), tasks.len()));
    Ok(())
}

async fn handle_save(api: &ApiClient, mut form: TaskForm, fields: FieldArgs) -> Result<()> {
    let mut captured = form.defaults();

    if fields.is_empty() {
        msg_print!(form.heading(), true);
        prompt_fields(api, &mut form, &mut captured).await?;
    } else {
        fields.apply(&mut form, &mut captured);
    }

    let submission = match form.submit(captured) {
        Ok(submission) => submission,
        Err(error) => msg_bail_anyhow!(Message::TaskFormInvalid(error.to_string())),
    };

    match submission.id {
        Some(id) => {
            let task = api.update_task(id, &submission.payload).await?;
            msg_success!(Message::TaskUpdated(task.title));
        }
        None => {
            let task = api.create_task(&submission.payload).await?;
            msg_success!(Message::TaskCreated(task.title));
        }
    }
    Ok(())
}

/// Asks for every field, starting from the form's current values.
async fn prompt_fields(api: &ApiClient, form: &mut TaskForm, captured: &mut FormData) -> Result<()> {
    let theme = ColorfulTheme::default();
    let current = |name: &str| captured.get(name).unwrap_or_default().to_string();

    let title: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskTitle.to_string())
        .with_initial_text(current(FIELD_TITLE))
        .interact_text()?;
    let description: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDescription.to_string())
        .with_initial_text(current(FIELD_DESCRIPTION))
        .allow_empty(true)
        .interact_text()?;

    let statuses: Vec<&str> = TaskStatus::ALL.iter().map(|status| status.as_str()).collect();
    let status = Select::with_theme(&theme)
        .with_prompt(Message::PromptTaskStatus.to_string())
        .items(&statuses)
        .default(statuses.iter().position(|s| *s == current(FIELD_STATUS)).unwrap_or(0))
        .interact()?;

    let priorities: Vec<&str> = Priority::ALL.iter().map(|priority| priority.as_str()).collect();
    let priority = Select::with_theme(&theme)
        .with_prompt(Message::PromptTaskPriority.to_string())
        .items(&priorities)
        .default(priorities.iter().position(|p| *p == current(FIELD_PRIORITY)).unwrap_or(1))
        .interact()?;

    let due: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDueDate.to_string())
        .with_initial_text(current(FIELD_DUE_DATE))
        .allow_empty(true)
        .interact_text()?;

    let categories = api.list_categories().await?;
    let mut category_items = vec![Message::NoCategory.to_string()];
    category_items.extend(categories.iter().map(|item| item.category.name.clone()));
    let current_category = current(FIELD_CATEGORY);
    let category_default = categories
        .iter()
        .position(|item| item.category.id.to_string() == current_category)
        .map(|index| index + 1)
        .unwrap_or(0);
    let category = Select::with_theme(&theme)
        .with_prompt(Message::PromptTaskCategory.to_string())
        .items(&category_items)
        .default(category_default)
        .interact()?;

    let tags = api.list_tags().await?;
    if !tags.is_empty() {
        let names: Vec<&str> = tags.iter().map(|item| item.tag.name.as_str()).collect();
        let checked: Vec<bool> = tags.iter().map(|item| form.is_selected(item.tag.id)).collect();
        let chosen = MultiSelect::with_theme(&theme)
            .with_prompt(Message::PromptTaskTags.to_string())
            .items(&names)
            .defaults(&checked)
            .interact()?;
        for (index, item) in tags.iter().enumerate() {
            if chosen.contains(&index) != form.is_selected(item.tag.id) {
                form.toggle_tag(item.tag.id);
            }
        }
    }

    let completed = Confirm::with_theme(&theme)
        .with_prompt(Message::PromptTaskCompleted.to_string())
        .default(current(FIELD_COMPLETED) == "true")
        .interact()?;

    captured.set(FIELD_TITLE, title);
    captured.set(FIELD_DESCRIPTION, description);
    captured.set(FIELD_STATUS, statuses[status]);
    captured.set(FIELD_PRIORITY, priorities[priority]);
    captured.set(FIELD_DUE_DATE, due);
    captured.set(
        FIELD_CATEGORY,
        match category {
            0 => "none".to_string(),
            index => categories[index - 1].category.id.to_string(),
        },
    );
    captured.set(FIELD_COMPLETED, completed.to_string());
    Ok(())
}

async fn handle_delete(api: &ApiClient, id: i64, yes: bool) -> Result<()> {
    let task: TaskWithRelations = api.get_task(id).await?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.task.title.clone()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    api.delete_task(id).await?;
    msg_success!(Message::TaskDeleted(id));
    Ok(())
}
