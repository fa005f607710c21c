//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for the persisted config file layer.
///
/// Only holds what the user wrote; defaults, env and CLI layers are merged
/// on top by the caller.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the file layer. A missing file is an empty config, not an error.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist `config`, replacing the previous file
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write the defaults. Fails with `AlreadyExists` rather than overwrite.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Load, apply `edit`, save. Nothing is written if `edit` fails.
    async fn update<F>(&self, edit: F) -> Result<AppConfig, ConfigError>
    where
        Self: Sized,
        F: FnOnce(&mut AppConfig) -> Result<(), ConfigError> + Send,
    {
        let mut config = self.load().await?;
        edit(&mut config)?;
        self.save(&config).await?;
        Ok(config)
    }
}
