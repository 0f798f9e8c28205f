//! Core library modules for tasklane.
//!
//! - **Domain**: task types, the filter/sort engine and the task form state
//! - **Infrastructure**: configuration, data storage paths, error taxonomy
//! - **Client side**: HTTP client for the REST API, table rendering, messages
//!
//! ```rust
//! use tasklane::libs::filter::{SortKey, TaskQuery};
//!
//! let query = TaskQuery {
//!     search: "release".to_string(),
//!     sort: SortKey::Priority,
//!     ..Default::default()
//! };
//! let visible = query.apply(&[]);
//! assert!(visible.is_empty());
//! ```

pub mod color;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod filter;
pub mod form;
pub mod http;
pub mod messages;
pub mod task;
pub mod view;
