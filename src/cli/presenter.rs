//! CLI presenter for output formatting

use chrono::{DateTime, Local, Utc};
use colored::*;

use crate::domain::clipboard::ItemKind;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print daemon status
    pub fn daemon_status(&self, state: &str) {
        eprintln!("{} Daemon: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print one history entry to stdout
    pub fn history_entry(
        &self,
        index: usize,
        kind: ItemKind,
        timestamp: DateTime<Utc>,
        preview: &str,
    ) {
        println!("{}", Self::format_entry(index, kind, timestamp, preview));
    }

    /// Announce a freshly captured item (daemon foreground output)
    pub fn captured(&self, kind: ItemKind, preview: &str) {
        eprintln!("{} {} {}", "+".green(), format!("[{}]", kind.label()).dimmed(), preview);
    }

    /// `  3  12:04:55  [Link]  https://…`
    pub fn format_entry(
        index: usize,
        kind: ItemKind,
        timestamp: DateTime<Utc>,
        preview: &str,
    ) -> String {
        let local = timestamp.with_timezone(&Local).format("%H:%M:%S");
        format!(
            "{:>3}  {}  {}  {}",
            index.to_string().bold(),
            local.to_string().dimmed(),
            format!("[{}]", kind.label()).cyan(),
            Self::single_line(preview)
        )
    }

    /// Collapse line breaks so each entry stays on one row
    fn single_line(preview: &str) -> String {
        preview
            .chars()
            .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
            .collect()
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
