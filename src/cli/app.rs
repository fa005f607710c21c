//! Configuration resolution shared by the daemon and subcommands

use std::env;

use crate::application::ports::ConfigStore;
use crate::application::MonitorConfig;
use crate::domain::config::{AppConfig, LinuxConfig};
use crate::domain::timing::Interval;
use crate::domain::RestoreMode;
use crate::infrastructure::{ClipboardBackend, KeystrokeToolPreference, XdgConfigStore};

use super::args::Cli;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment override for the clipboard backend
pub const ENV_BACKEND: &str = "VIBECLIP_BACKEND";

/// Environment override for the paste injector
pub const ENV_KEYSTROKE_TOOL: &str = "VIBECLIP_KEYSTROKE_TOOL";

/// Fully resolved daemon settings
#[derive(Debug, Clone, Copy)]
pub struct DaemonOptions {
    pub monitor: MonitorConfig,
    pub restore_mode: RestoreMode,
    pub backend: ClipboardBackend,
    pub keystroke_tool: KeystrokeToolPreference,
}

/// Config layer built from command-line flags
pub fn cli_config(cli: &Cli) -> AppConfig {
    AppConfig {
        poll_interval: cli.interval.clone(),
        max_items: cli.max_items,
        paste_delay: cli.paste_delay.clone(),
        restore_mode: None,
        backend: cli.backend.map(|b| b.as_str().to_string()),
        linux: cli.keystroke_tool.clone().map(|tool| LinuxConfig {
            keystroke_tool: Some(tool),
        }),
    }
}

/// Config layer built from environment variables
fn env_config() -> AppConfig {
    let var = |name: &str| env::var(name).ok().filter(|s| !s.is_empty());

    AppConfig {
        backend: var(ENV_BACKEND),
        linux: var(ENV_KEYSTROKE_TOOL).map(|tool| LinuxConfig {
            keystroke_tool: Some(tool),
        }),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %store.path().display(), error = %e, "ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

/// Validate a merged config into daemon settings.
///
/// Unlike the `*_or_default` accessors, malformed values are errors here:
/// the user asked for something we cannot honour.
pub fn resolve_daemon_options(config: &AppConfig) -> Result<DaemonOptions, String> {
    let poll_interval = match config.poll_interval.as_deref() {
        Some(s) => s
            .parse::<Interval>()
            .map_err(|e| format!("Invalid poll interval: {}", e))?,
        None => Interval::default_poll_interval(),
    };

    let paste_delay = match config.paste_delay.as_deref() {
        Some(s) => s
            .parse::<Interval>()
            .map_err(|e| format!("Invalid paste delay: {}", e))?,
        None => Interval::default_paste_delay(),
    };

    let max_items = match config.max_items {
        Some(0) => return Err("Invalid max items: must be at least 1".to_string()),
        _ => config.max_items_or_default(),
    };

    let restore_mode = match config.restore_mode.as_deref() {
        Some(s) => s
            .parse::<RestoreMode>()
            .map_err(|e| format!("Invalid restore mode: {}", e))?,
        None => RestoreMode::default(),
    };

    let backend = config
        .backend_or_default()
        .parse::<ClipboardBackend>()
        .map_err(|e| e.to_string())?;

    let keystroke_tool = config
        .keystroke_tool_or_default()
        .parse::<KeystrokeToolPreference>()
        .map_err(|e| e.to_string())?;

    Ok(DaemonOptions {
        monitor: MonitorConfig {
            poll_interval,
            max_items,
            paste_delay,
        },
        restore_mode,
        backend,
        keystroke_tool,
    })
}
