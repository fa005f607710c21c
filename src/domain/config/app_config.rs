//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::clipboard::{RestoreMode, DEFAULT_MAX_ITEMS};
use crate::domain::timing::Interval;

/// Default clipboard backend name
pub const DEFAULT_BACKEND: &str = "arboard";

/// Default keystroke tool name
pub const DEFAULT_KEYSTROKE_TOOL: &str = "enigo";

/// Linux-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinuxConfig {
    pub keystroke_tool: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub poll_interval: Option<String>,
    pub max_items: Option<usize>,
    pub paste_delay: Option<String>,
    pub restore_mode: Option<String>,
    pub backend: Option<String>,
    pub linux: Option<LinuxConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            poll_interval: Some(Interval::default_poll_interval().to_string()),
            max_items: Some(DEFAULT_MAX_ITEMS),
            paste_delay: Some(Interval::default_paste_delay().to_string()),
            restore_mode: Some(RestoreMode::default().to_string()),
            backend: Some(DEFAULT_BACKEND.to_string()),
            linux: Some(LinuxConfig {
                keystroke_tool: Some(DEFAULT_KEYSTROKE_TOOL.to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            poll_interval: other.poll_interval.or(self.poll_interval),
            max_items: other.max_items.or(self.max_items),
            paste_delay: other.paste_delay.or(self.paste_delay),
            restore_mode: other.restore_mode.or(self.restore_mode),
            backend: other.backend.or(self.backend),
            linux: match (self.linux, other.linux) {
                (None, None) => None,
                (Some(b), None) => Some(b),
                (None, Some(o)) => Some(o),
                (Some(b), Some(o)) => Some(LinuxConfig {
                    keystroke_tool: o.keystroke_tool.or(b.keystroke_tool),
                }),
            },
        }
    }

    /// Get poll interval, or default if not set/invalid
    pub fn poll_interval_or_default(&self) -> Interval {
        self.poll_interval
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Interval::default_poll_interval)
    }

    /// Get paste delay, or default if not set/invalid
    pub fn paste_delay_or_default(&self) -> Interval {
        self.paste_delay
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Interval::default_paste_delay)
    }

    /// Get history capacity, or default if not set/zero
    pub fn max_items_or_default(&self) -> usize {
        self.max_items
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_ITEMS)
    }

    /// Get restore mode, or exact if not set/invalid
    pub fn restore_mode_or_default(&self) -> RestoreMode {
        self.restore_mode
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get clipboard backend name, or "arboard" if not set
    pub fn backend_or_default(&self) -> &str {
        self.backend.as_deref().unwrap_or(DEFAULT_BACKEND)
    }

    /// Get keystroke tool preference, or "enigo" if not set
    pub fn keystroke_tool_or_default(&self) -> &str {
        self.linux
            .as_ref()
            .and_then(|l| l.keystroke_tool.as_deref())
            .unwrap_or(DEFAULT_KEYSTROKE_TOOL)
    }
}
