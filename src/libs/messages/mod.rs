//! User-facing messages of the command-line client.
//!
//! [`Message`] enumerates every string the CLI prints; `display` renders them
//! and `macros` routes them either to the terminal or to `tracing`.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
