//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand, ValueEnum};

/// vibeclip - clipboard history daemon
#[derive(Parser, Debug)]
#[command(name = "vibeclip")]
#[command(version)]
#[command(about = "Clipboard history: watch, dedupe, restore and paste")]
#[command(long_about = None)]
pub struct Cli {
    /// Clipboard poll interval (e.g., 500ms, 1s)
    #[arg(short = 'i', long, value_name = "TIME")]
    pub interval: Option<String>,

    /// Number of history entries to keep
    #[arg(short = 'm', long, value_name = "N")]
    pub max_items: Option<usize>,

    /// Delay before the paste shortcut after restore-and-paste
    #[arg(long, value_name = "TIME")]
    pub paste_delay: Option<String>,

    /// Clipboard backend
    #[arg(short = 'b', long, value_name = "BACKEND")]
    pub backend: Option<BackendArg>,

    /// Paste injector (Linux: enigo, none, auto, ydotool, xdotool, wtype)
    #[arg(long, value_name = "TOOL")]
    pub keystroke_tool: Option<String>,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Query or drive the running daemon's history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

/// 1-based history position, most recent first
#[derive(Args, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Entry number as shown by `history list`
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub index: u32,
}

/// History actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    /// List history entries, most recent first
    List,
    /// Show daemon status
    Status,
    /// Copy an entry back to the clipboard
    Restore {
        #[command(flatten)]
        position: Position,
        /// Restore as plain text regardless of kind
        #[arg(long)]
        plain: bool,
    },
    /// Copy an entry back to the clipboard and paste it
    Paste {
        #[command(flatten)]
        position: Position,
    },
    /// Remove an entry
    Delete {
        #[command(flatten)]
        position: Position,
    },
    /// Remove every entry
    Clear,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Clipboard backend argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Arboard,
    Wayland,
}

impl BackendArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendArg::Arboard => "arboard",
            BackendArg::Wayland => "wayland",
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "poll_interval",
    "max_items",
    "paste_delay",
    "restore_mode",
    "backend",
    "linux.keystroke_tool",
];

/// Valid backend values
pub const VALID_BACKENDS: &[&str] = &["arboard", "wayland"];

/// Valid restore mode values
pub const VALID_RESTORE_MODES: &[&str] = &["exact", "plain"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
