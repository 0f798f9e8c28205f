use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, needs_migration, MigrationManager},
    },
    libs::{config::Config, messages::Message},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Show current database version
    Status,
    /// Show migration history
    History,
}

/// Inspects the schema without applying pending migrations.
pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let conn = Db::new_without_migrations(Config::load()?.db_path()?)?;

    match args.command {
        MigrationsCommand::Status => {
            msg_print!(Message::DbVersion(get_db_version(&conn)?));
            msg_print!(Message::DbLatestVersion(MigrationManager::new().latest_version()));
            if needs_migration(&conn)? {
                msg_info!(Message::DbNeedsMigration);
            } else {
                msg_info!(Message::DbIsUpToDate);
            }
        }
        MigrationsCommand::History => {
            if get_db_version(&conn)? == 0 {
                msg_info!(Message::NoMigrationsApplied);
                return Ok(());
            }

            let history = MigrationManager::new().get_migration_history(&conn)?;
            msg_print!(Message::MigrationsHistoryHeader, true);
            for (version, name, applied_at) in history {
                println!("  v{}: {} (applied: {})", version, name, applied_at);
            }
        }
    }

    Ok(())
}
