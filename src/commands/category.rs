use crate::{
    libs::{
        config::Config,
        http::{ApiClient, LabelBody},
        messages::Message,
        view::View,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Debug, Subcommand)]
enum CategoryCommand {
    /// List categories with their task counts
    List,
    /// Create a category
    Add {
        /// Category name
        name: String,
        /// Color as #rrggbb, random when omitted
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Edit a category. Prompts when no option is given
    Edit {
        /// Category ID
        id: i64,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New color
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a category. Its tasks become uncategorized
    Delete {
        /// Category ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: CategoryArgs) -> Result<()> {
    let api = ApiClient::new(&Config::load()?.api_url());

    match args.command {
        CategoryCommand::List => handle_list(&api).await,
        CategoryCommand::Add { name, color } => {
            let category = api.create_category(&LabelBody { name: Some(name), color }).await?;
            msg_success!(Message::CategoryCreated(category.name));
            Ok(())
        }
        CategoryCommand::Edit { id, name, color } => handle_edit(&api, id, name, color).await,
        CategoryCommand::Delete { id, yes } => handle_delete(&api, id, yes).await,
    }
}

async fn handle_list(api: &ApiClient) -> Result<()> {
    let categories = api.list_categories().await?;

    if categories.is_empty() {
        msg_info!(Message::CategoriesNotFound);
        return Ok(());
    }

    msg_print!(Message::CategoriesHeader, true);
    View::categories(&categories)
}

async fn handle_edit(api: &ApiClient, id: i64, name: Option<String>, color: Option<String>) -> Result<()> {
    let body = if name.is_none() && color.is_none() {
        let category = api.get_category(id).await?;
        let name = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptCategoryName.to_string())
            .default(category.name)
            .interact_text()?;
        let color = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptCategoryColor.to_string())
            .default(category.color)
            .allow_empty(true)
            .interact_text()?;
        LabelBody {
            name: Some(name),
            color: Some(color),
        }
    } else {
        LabelBody { name, color }
    };

    let category = api.update_category(id, &body).await?;
    msg_success!(Message::CategoryUpdated(category.name));
    Ok(())
}

async fn handle_delete(api: &ApiClient, id: i64, yes: bool) -> Result<()> {
    if !yes {
        let category = api.get_category(id).await?;
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteCategory(category.name).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    api.delete_category(id).await?;
    msg_success!(Message::CategoryDeleted(id));
    Ok(())
}
