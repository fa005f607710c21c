//! Xdotool keystroke adapter for X11

use async_trait::async_trait;

use crate::application::ports::{Keystroke, KeystrokeError};

use super::command::run_tool;

/// Xdotool keystroke adapter for X11 sessions
pub struct XdotoolKeystroke;

impl XdotoolKeystroke {
    /// Create a new xdotool keystroke adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for XdotoolKeystroke {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Keystroke for XdotoolKeystroke {
    async fn send_paste(&self) -> Result<(), KeystrokeError> {
        run_tool("xdotool", &["key", "--clearmodifiers", "ctrl+v"]).await
    }
}
