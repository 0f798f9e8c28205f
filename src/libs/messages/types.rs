#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(i64),
    TaskCompleted(String),
    TaskReopened(String),
    TasksNotFound,
    TasksHeader,
    TasksShown(usize, usize), // visible, total
    TaskDetailsHeader(i64),
    ConfirmDeleteTask(String),
    TaskFormInvalid(String),
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskStatus,
    PromptTaskPriority,
    PromptTaskDueDate,
    PromptTaskCategory,
    PromptTaskTags,
    PromptTaskCompleted,
    NoCategory,
    NoTags,

    // === CATEGORY MESSAGES ===
    CategoryCreated(String),
    CategoryUpdated(String),
    CategoryDeleted(i64),
    CategoriesNotFound,
    CategoriesHeader,
    ConfirmDeleteCategory(String),
    PromptCategoryName,
    PromptCategoryColor,

    // === TAG MESSAGES ===
    TagCreated(String),
    TagUpdated(String),
    TagDeleted(i64),
    TagsNotFound,
    TagsHeader,
    ConfirmDeleteTag(String),
    PromptTagName,
    PromptTagColor,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigFileNotFound,
    ConfigModuleServer,
    ConfigModuleDatabase,
    ConfigModuleClient,
    PromptSelectModules,
    PromptServerHost,
    PromptServerPort,
    PromptDatabasePath,
    PromptClientApiUrl,
    InvalidEnvValue(String, String), // variable, value

    // === SERVER MESSAGES ===
    ServerStarting(String),
    ServerStopped,
    ShutdownSignalFailed(String),

    // === API CLIENT MESSAGES ===
    ApiRequestFailed(u16, String), // status, server message
    ApiUnreachable(String),

    // === DATABASE MESSAGES ===
    DatabaseUpToDate,
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DbVersion(u32),
    DbLatestVersion(u32),
    DbNeedsMigration,
    DbIsUpToDate,
    MigrationsHistoryHeader,
    NoMigrationsApplied,

    // === GENERAL ===
    OperationCancelled,
    InvalidFilter(String),
}
