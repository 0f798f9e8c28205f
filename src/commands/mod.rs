pub mod category;
pub mod init;
pub mod migrations;
pub mod serve;
pub mod tag;
pub mod task;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Run the HTTP server")]
    Serve(serve::ServeArgs),
    #[command(about = "List, create, edit, toggle and delete tasks")]
    Task(task::TaskArgs),
    #[command(about = "Manage categories")]
    Category(category::CategoryArgs),
    #[command(about = "Manage tags")]
    Tag(tag::TagArgs),
    #[command(about = "Inspect the database schema version")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Serve(args) => serve::cmd(args).await,
            Commands::Task(args) => task::cmd(args).await,
            Commands::Category(args) => category::cmd(args).await,
            Commands::Tag(args) => tag::cmd(args).await,
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}
