//! Ydotool keystroke adapter for Wayland support

use async_trait::async_trait;

use crate::application::ports::{Keystroke, KeystrokeError};

use super::command::run_tool;

/// Linux evdev code for left Ctrl
const KEY_LEFTCTRL: u16 = 29;
/// Linux evdev code for V
const KEY_V: u16 = 47;

/// Ydotool keystroke adapter for Wayland keystroke injection
///
/// Requires ydotoold daemon to be running and user to be in the input group.
pub struct YdotoolKeystroke;

impl YdotoolKeystroke {
    /// Create a new ydotool keystroke adapter
    pub fn new() -> Self {
        Self
    }

    /// `code:state` pairs for Ctrl+V
    fn paste_sequence() -> Vec<String> {
        [(KEY_LEFTCTRL, 1), (KEY_V, 1), (KEY_V, 0), (KEY_LEFTCTRL, 0)]
            .iter()
            .map(|(code, state)| format!("{}:{}", code, state))
            .collect()
    }
}

impl Default for YdotoolKeystroke {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Keystroke for YdotoolKeystroke {
    async fn send_paste(&self) -> Result<(), KeystrokeError> {
        let sequence = Self::paste_sequence();
        let mut args = vec!["key"];
        args.extend(sequence.iter().map(String::as_str));
        run_tool("ydotool", &args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paste_sequence_presses_and_releases_in_order() {
        assert_eq!(
            YdotoolKeystroke::paste_sequence(),
            vec!["29:1", "47:1", "47:0", "29:0"]
        );
    }
}
