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
pub struct TagArgs {
    #[command(subcommand)]
    command: TagCommand,
}

#[derive(Debug, Subcommand)]
enum TagCommand {
    /// List tags with their task counts
    List,
    /// Create a tag
    Add {
        /// Tag name
        name: String,
        /// Tag color as #rrggbb, random when omitted
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Edit a tag. Prompts when no option is given
    Edit {
        /// Tag ID
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Delete a tag and remove it from every task
    Delete {
        /// Tag ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn cmd(args: TagArgs) -> Result<()> {
    let api = ApiClient::new(&Config::load()?.api_url());

    match args.command {
        TagCommand::List => handle_list(&api).await,
        TagCommand::Add { name, color } => {
            let tag = api.create_tag(&LabelBody { name: Some(name), color }).await?;
            msg_success!(Message::TagCreated(tag.name));
            Ok(())
        }
        TagCommand::Edit { id, name, color } => handle_edit(&api, id, name, color).await,
        TagCommand::Delete { id, yes } => handle_delete(&api, id, yes).await,
    }
}

async fn handle_list(api: &ApiClient) -> Result<()> {
    let tags = api.list_tags().await?;

    if tags.is_empty() {
        msg_info!(Message::TagsNotFound);
        return Ok(());
    }

    msg_print!(Message::TagsHeader, true);
    View::tags(&tags)
}

async fn handle_edit(api: &ApiClient, id: i64, name: Option<String>, color: Option<String>) -> Result<()> {
    let body = match (name, color) {
        (None, None) => {
            let tag = api.get_tag(id).await?;
            let name = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTagName.to_string())
                .default(tag.name)
                .interact_text()?;
            let color = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTagColor.to_string())
                .default(tag.color)
                .allow_empty(true)
                .interact_text()?;
            LabelBody {
                name: Some(name),
                color: Some(color),
            }
        }
        (name, color) => LabelBody { name, color },
    };

    let tag = api.update_tag(id, &body).await?;
    msg_success!(Message::TagUpdated(tag.name));
    Ok(())
}

async fn handle_delete(api: &ApiClient, id: i64, yes: bool) -> Result<()> {
    if !yes {
        let tag = api.get_tag(id).await?;
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTag(tag.name).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    api.delete_tag(id).await?;
    msg_success!(Message::TagDeleted(id));
    Ok(())
}
