//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, logging, signal handling,
//! the daemon runner and the IPC client/server.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod daemon_app;
pub mod history_cmd;
pub mod ipc;
pub mod logging;
pub mod pid_file;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{DaemonOptions, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, HistoryAction};
pub use daemon_app::run_daemon;
pub use history_cmd::handle_history_command;
pub use presenter::Presenter;
