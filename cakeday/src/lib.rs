//! Personal birthday tracker.
//!
//! Records live in SQLite and are managed through an interactive menu or
//! one-shot subcommands. The heart of the crate is
//! [`backend::domain::upcoming`], which works out when each birthday next
//! falls relative to a caller-supplied date.

pub mod backend;
pub mod cli;
pub mod logging;

pub use backend::{initialize_backend, AppState};
