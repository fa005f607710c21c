//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, LinuxConfig};
use crate::domain::error::ConfigError;
use crate::domain::timing::Interval;
use crate::domain::RestoreMode;
use crate::infrastructure::{ClipboardBackend, KeystrokeToolPreference};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let config = store
        .update(|config| apply_value(config, key, value))
        .await?;
    let stored = read_value(&config, key).unwrap_or_else(|| value.to_string());
    presenter.success(&format!("{} = {}", key, stored));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let config = store.load().await?;
    presenter.output(read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Current file value for a key, as written in the file
fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "poll_interval" => config.poll_interval.clone(),
        "max_items" => config.max_items.map(|n| n.to_string()),
        "paste_delay" => config.paste_delay.clone(),
        "restore_mode" => config.restore_mode.clone(),
        "backend" => config.backend.clone(),
        "linux.keystroke_tool" => config.linux.as_ref().and_then(|l| l.keystroke_tool.clone()),
        _ => None,
    }
}

fn invalid(key: &str, message: impl ToString) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// Validate `value` for `key` and store its canonical form
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "poll_interval" => {
            let interval = value.parse::<Interval>().map_err(|e| invalid(key, e))?;
            config.poll_interval = Some(interval.to_string());
        }
        "paste_delay" => {
            let interval = value.parse::<Interval>().map_err(|e| invalid(key, e))?;
            config.paste_delay = Some(interval.to_string());
        }
        "max_items" => {
            let n = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| invalid(key, "Value must be a whole number of at least 1"))?;
            config.max_items = Some(n);
        }
        "restore_mode" => {
            let mode = value.parse::<RestoreMode>().map_err(|e| invalid(key, e))?;
            config.restore_mode = Some(mode.to_string());
        }
        "backend" => {
            let backend = value
                .parse::<ClipboardBackend>()
                .map_err(|e| invalid(key, e))?;
            config.backend = Some(backend.to_string());
        }
        "linux.keystroke_tool" => {
            let tool = value
                .parse::<KeystrokeToolPreference>()
                .map_err(|e| invalid(key, e))?;
            config
                .linux
                .get_or_insert_with(LinuxConfig::default)
                .keystroke_tool = Some(tool.to_string());
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}
