//! Cross-platform keystroke adapter using enigo
//!
//! Works on Windows, macOS, and Linux (X11/Wayland).

use async_trait::async_trait;

use crate::application::ports::{Keystroke, KeystrokeError};

/// Cross-platform keystroke adapter using enigo
pub struct EnigoKeystroke;

impl EnigoKeystroke {
    /// Create a new enigo keystroke adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnigoKeystroke {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Keystroke for EnigoKeystroke {
    async fn send_paste(&self) -> Result<(), KeystrokeError> {
        // enigo operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(|| {
            use enigo::{Direction, Enigo, Key, Keyboard, Settings};

            let mut enigo = Enigo::new(&Settings::default())
                .map_err(|e| KeystrokeError::EventSource(e.to_string()))?;

            #[cfg(target_os = "macos")]
            let modifier = Key::Meta;
            #[cfg(not(target_os = "macos"))]
            let modifier = Key::Control;

            enigo
                .key(modifier, Direction::Press)
                .map_err(|e| KeystrokeError::InjectionFailed(e.to_string()))?;

            let click = enigo.key(Key::Unicode('v'), Direction::Click);

            // Release the modifier even if the click failed
            let release = enigo.key(modifier, Direction::Release);

            click
                .and(release)
                .map_err(|e| KeystrokeError::InjectionFailed(e.to_string()))
        })
        .await
        .map_err(|e| KeystrokeError::InjectionFailed(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keystroke_creates_successfully() {
        let _keystroke = EnigoKeystroke::new();
    }

    #[test]
    fn keystroke_default_creates() {
        let _keystroke = EnigoKeystroke::default();
    }
}
