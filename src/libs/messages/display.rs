//! Display implementation for tasklane messages.
//!
//! Every user-facing string of the command-line client lives here, so the
//! wording stays consistent between commands and can be changed in one place.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted(id) => format!("Task #{} deleted", id),
            Message::TaskCompleted(title) => format!("Task '{}' marked as done", title),
            Message::TaskReopened(title) => format!("Task '{}' reopened", title),
            Message::TasksNotFound => "No tasks found".to_string(),
            Message::TasksHeader => "Tasks".to_string(),
            Message::TasksShown(visible, total) => format!("Showing {} of {} tasks", visible, total),
            Message::TaskDetailsHeader(id) => format!("Task #{}", id),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::TaskFormInvalid(error) => format!("Task form is invalid: {}", error),
            Message::PromptTaskTitle => "Title".to_string(),
            Message::PromptTaskDescription => "Description (optional)".to_string(),
            Message::PromptTaskStatus => "Status".to_string(),
            Message::PromptTaskPriority => "Priority".to_string(),
            Message::PromptTaskDueDate => "Due date, YYYY-MM-DD (optional)".to_string(),
            Message::PromptTaskCategory => "Category".to_string(),
            Message::PromptTaskTags => "Tags (space to toggle)".to_string(),
            Message::PromptTaskCompleted => "Completed".to_string(),
            Message::NoCategory => "No category".to_string(),
            Message::NoTags => "No tags".to_string(),

            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name) => format!("Category '{}' created", name),
            Message::CategoryUpdated(name) => format!("Category '{}' updated", name),
            Message::CategoryDeleted(id) => format!("Category #{} deleted, its tasks are now uncategorized", id),
            Message::CategoriesNotFound => "No categories found".to_string(),
            Message::CategoriesHeader => "Categories".to_string(),
            Message::ConfirmDeleteCategory(name) => format!("Delete category '{}'?", name),
            Message::PromptCategoryName => "Category name".to_string(),
            Message::PromptCategoryColor => "Color, #rrggbb (empty for random)".to_string(),

            // === TAG MESSAGES ===
            Message::TagCreated(name) => format!("Tag '{}' created", name),
            Message::TagUpdated(name) => format!("Tag '{}' updated", name),
            Message::TagDeleted(id) => format!("Tag #{} deleted", id),
            Message::TagsNotFound => "No tags found".to_string(),
            Message::TagsHeader => "Tags".to_string(),
            Message::ConfirmDeleteTag(name) => format!("Delete tag '{}'? It will be removed from all tasks", name),
            Message::PromptTagName => "Tag name".to_string(),
            Message::PromptTagColor => "Color, #rrggbb (empty for random)".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration deleted".to_string(),
            Message::ConfigFileNotFound => "Configuration file not found, nothing to delete".to_string(),
            Message::ConfigModuleServer => "Server settings".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::ConfigModuleClient => "Client settings".to_string(),
            Message::PromptSelectModules => "Select sections to configure".to_string(),
            Message::PromptServerHost => "Listen host".to_string(),
            Message::PromptServerPort => "Listen port".to_string(),
            Message::PromptDatabasePath => "Database file path".to_string(),
            Message::PromptClientApiUrl => "API base URL".to_string(),
            Message::InvalidEnvValue(name, value) => format!("Ignoring invalid value '{}' for {}", value, name),

            // === SERVER MESSAGES ===
            Message::ServerStarting(address) => format!("Server listening on http://{}", address),
            Message::ServerStopped => "Server stopped".to_string(),
            Message::ShutdownSignalFailed(error) => format!("Failed to install shutdown handler: {}", error),

            // === API CLIENT MESSAGES ===
            Message::ApiRequestFailed(status, message) => format!("Request failed ({}): {}", status, message),
            Message::ApiUnreachable(url) => format!("Cannot reach the server at {}. Is `tasklane serve` running?", url),

            // === DATABASE MESSAGES ===
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::MigrationsFound(count) => format!("Found {} pending migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DbVersion(version) => format!("Current database version: {}", version),
            Message::DbLatestVersion(version) => format!("Latest available version: {}", version),
            Message::DbNeedsMigration => "Database needs migration, it will be applied on next start".to_string(),
            Message::DbIsUpToDate => "Database is up to date".to_string(),
            Message::MigrationsHistoryHeader => "Migration history".to_string(),
            Message::NoMigrationsApplied => "No migrations have been applied yet".to_string(),

            // === GENERAL ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::InvalidFilter(error) => format!("Invalid filter: {}", error),
        };
        write!(f, "{}", s)
    }
}
