//! Keystroke port interface

use async_trait::async_trait;
use thiserror::Error;

/// Keystroke errors
#[derive(Debug, Clone, Error)]
pub enum KeystrokeError {
    #[error("No keystroke tool available")]
    NoToolAvailable,

    #[error("{0} not found or not usable")]
    ToolNotFound(String),

    #[error("Failed to create event source: {0}")]
    EventSource(String),

    #[error("Failed to inject paste shortcut: {0}")]
    InjectionFailed(String),
}

/// Port for synthetic key injection
#[async_trait]
pub trait Keystroke: Send + Sync {
    /// Post the platform paste chord (Cmd+V on macOS, Ctrl+V elsewhere)
    /// to the window that currently has keyboard focus.
    async fn send_paste(&self) -> Result<(), KeystrokeError>;
}

/// Blanket implementation for boxed keystroke types
#[async_trait]
impl Keystroke for Box<dyn Keystroke> {
    async fn send_paste(&self) -> Result<(), KeystrokeError> {
        self.as_ref().send_paste().await
    }
}
