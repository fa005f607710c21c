//! Wtype keystroke adapter for Wayland support

use async_trait::async_trait;

use crate::application::ports::{Keystroke, KeystrokeError};

use super::command::run_tool;

/// Wtype keystroke adapter for Wayland keystroke injection
///
/// Needs a compositor that implements the virtual-keyboard protocol.
pub struct WtypeKeystroke;

impl WtypeKeystroke {
    /// Create a new wtype keystroke adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for WtypeKeystroke {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Keystroke for WtypeKeystroke {
    async fn send_paste(&self) -> Result<(), KeystrokeError> {
        // modifier down, v, modifier up
        run_tool("wtype", &["-M", "ctrl", "-k", "v", "-m", "ctrl"]).await
    }
}
