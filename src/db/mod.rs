//! Database layer for tasklane.
//!
//! SQLite persistence for tasks, categories, tags and the task/tag join table,
//! with a migration system for schema evolution. Repositories borrow a
//! connection (or a transaction) from the shared [`db::Db`] handle, so the
//! service layer decides the unit of work.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tasklane::db::{db::Db, tags::Tags, tasks::Tasks};
//!
//! let db = Db::in_memory()?;
//! let conn = db.lock();
//! let tasks = Tasks::new(&conn).list_with_relations()?;
//! let tags = Tags::new(&conn).list()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Shared connection handle: opening, configuration and migrations on startup.
pub mod db;

/// Versioned schema changes and their history.
pub mod migrations;

/// Category rows with task counts.
pub mod categories;

/// Tag rows and the many-to-many task/tag associations.
pub mod tags;

/// Task rows, plus the joined views with category and tags.
pub mod tasks;
