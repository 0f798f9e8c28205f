//! # Tasklane - task board service
//!
//! A small task-management server with a command-line client.
//!
//! ## Features
//!
//! - **Tasks**: title, description, status, priority, due date and completion
//! - **Categories**: one optional category per task, with task counts
//! - **Tags**: any number of tags per task, with task counts
//! - **Filtering**: text search, category, status, tag and priority filters
//!   combined with one of four sort orders
//! - **REST API**: JSON over HTTP, served by `tasklane serve`
//! - **CLI client**: `tasklane task|category|tag ...` against a running server
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasklane::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
pub mod services;
