//! Domain error types

use thiserror::Error;

/// Error when parsing an interval string
#[derive(Debug, Clone, Error)]
#[error("Invalid interval format: \"{input}\". Expected <number> followed by ms, s or m (e.g., 500ms, 1s, 1s250ms)")]
pub struct IntervalParseError {
    pub input: String,
}

/// Error when an invalid restore mode is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid restore mode: \"{input}\". Valid modes are: exact, plain")]
pub struct InvalidRestoreModeError {
    pub input: String,
}

/// Error when an unknown item kind is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid item kind: \"{input}\". Valid kinds are: text, image, url, rich_text")]
pub struct InvalidItemKindError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
