//! No-op keystroke adapter

use async_trait::async_trait;

use crate::application::ports::{Keystroke, KeystrokeError};

/// No-op keystroke adapter that does nothing
///
/// Used when paste injection is disabled or no tool can be set up.
pub struct NoOpKeystroke;

impl NoOpKeystroke {
    /// Create a new no-op keystroke adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpKeystroke {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Keystroke for NoOpKeystroke {
    async fn send_paste(&self) -> Result<(), KeystrokeError> {
        tracing::debug!("paste injection disabled, skipping");
        Ok(())
    }
}
