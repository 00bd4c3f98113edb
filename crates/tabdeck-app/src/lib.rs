//! TabDeck Application
//!
//! Command-line shell over the dashboard: lists, adds, edits and removes
//! widgets in the persisted dashboard.

mod app;
mod commands;

pub use app::{App, AppConfig, AppError};
pub use commands::{Command, CommandHelp, CommandRegistry};
