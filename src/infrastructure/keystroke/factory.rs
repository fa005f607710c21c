//! Paste injector factory with automatic detection

use std::fmt;
use std::str::FromStr;

#[cfg(target_os = "linux")]
use std::path::PathBuf;
#[cfg(target_os = "linux")]
use std::process::Stdio;

#[cfg(target_os = "linux")]
use tokio::process::Command;

use crate::application::ports::{Keystroke, KeystrokeError};

use super::enigo::EnigoKeystroke;
use super::noop::NoOpKeystroke;
#[cfg(target_os = "linux")]
use super::wtype::WtypeKeystroke;
#[cfg(target_os = "linux")]
use super::xdotool::XdotoolKeystroke;
#[cfg(target_os = "linux")]
use super::ydotool::YdotoolKeystroke;

/// Concrete paste injectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeystrokeTool {
    /// Cross-platform enigo library
    Enigo,
    /// Linux: ydotool (requires ydotoold daemon)
    Ydotool,
    /// Linux: wtype (Wayland native)
    Wtype,
    /// Linux: xdotool (X11)
    Xdotool,
    /// Paste injection disabled
    None,
}

impl fmt::Display for KeystrokeTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeystrokeTool::Enigo => "enigo",
            KeystrokeTool::Ydotool => "ydotool",
            KeystrokeTool::Wtype => "wtype",
            KeystrokeTool::Xdotool => "xdotool",
            KeystrokeTool::None => "none",
        };
        write!(f, "{}", name)
    }
}

/// User preference for paste injector selection.
///
/// - All platforms support `Enigo` (the default) and `None`.
/// - Linux additionally supports `Auto`, `Ydotool`, `Xdotool`, and `Wtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeystrokeToolPreference {
    /// Use cross-platform enigo library (default on all platforms)
    #[default]
    Enigo,
    /// Never inject the paste chord
    None,
    /// Auto-detect best native tool (Linux only)
    #[cfg(target_os = "linux")]
    Auto,
    /// Use ydotool (Linux only, requires ydotoold daemon)
    #[cfg(target_os = "linux")]
    Ydotool,
    /// Use xdotool (Linux only, X11)
    #[cfg(target_os = "linux")]
    Xdotool,
    /// Use wtype (Linux only, Wayland native)
    #[cfg(target_os = "linux")]
    Wtype,
}

impl fmt::Display for KeystrokeToolPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeystrokeToolPreference::Enigo => write!(f, "enigo"),
            KeystrokeToolPreference::None => write!(f, "none"),
            #[cfg(target_os = "linux")]
            KeystrokeToolPreference::Auto => write!(f, "auto"),
            #[cfg(target_os = "linux")]
            KeystrokeToolPreference::Ydotool => write!(f, "ydotool"),
            #[cfg(target_os = "linux")]
            KeystrokeToolPreference::Xdotool => write!(f, "xdotool"),
            #[cfg(target_os = "linux")]
            KeystrokeToolPreference::Wtype => write!(f, "wtype"),
        }
    }
}

/// Valid preference names on this platform
#[cfg(target_os = "linux")]
pub const VALID_KEYSTROKE_TOOLS: &str = "enigo, none, auto, ydotool, xdotool, wtype";
#[cfg(not(target_os = "linux"))]
pub const VALID_KEYSTROKE_TOOLS: &str = "enigo, none";

/// Error type for parsing keystroke tool preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeystrokeToolError {
    pub value: String,
}

impl fmt::Display for ParseKeystrokeToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid keystroke tool '{}'. Valid options: {}",
            self.value, VALID_KEYSTROKE_TOOLS
        )
    }
}

impl std::error::Error for ParseKeystrokeToolError {}

impl FromStr for KeystrokeToolPreference {
    type Err = ParseKeystrokeToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "enigo" => Ok(KeystrokeToolPreference::Enigo),
            "none" | "off" => Ok(KeystrokeToolPreference::None),
            #[cfg(target_os = "linux")]
            "auto" => Ok(KeystrokeToolPreference::Auto),
            #[cfg(target_os = "linux")]
            "ydotool" => Ok(KeystrokeToolPreference::Ydotool),
            #[cfg(target_os = "linux")]
            "xdotool" => Ok(KeystrokeToolPreference::Xdotool),
            #[cfg(target_os = "linux")]
            "wtype" => Ok(KeystrokeToolPreference::Wtype),
            _ => Err(ParseKeystrokeToolError {
                value: s.to_string(),
            }),
        }
    }
}

/// Check if a tool binary is available using `which`
#[cfg(target_os = "linux")]
async fn is_tool_available(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// ydotool needs both the binary and a running ydotoold socket
#[cfg(target_os = "linux")]
async fn is_ydotool_available() -> bool {
    if !is_tool_available("ydotool").await {
        return false;
    }

    let runtime_socket = std::env::var_os("XDG_RUNTIME_DIR")
        .map(|dir| PathBuf::from(dir).join(".ydotool_socket"));

    runtime_socket
        .into_iter()
        .chain(std::iter::once(PathBuf::from("/tmp/.ydotool_socket")))
        .any(|path| path.exists())
}

/// Detect the best available paste injector
///
/// On Windows/macOS: always enigo.
/// On Linux: ydotool → wtype → xdotool → enigo.
pub async fn detect_keystroke_tool() -> KeystrokeTool {
    #[cfg(target_os = "linux")]
    {
        if is_ydotool_available().await {
            return KeystrokeTool::Ydotool;
        }
        if is_tool_available("wtype").await {
            return KeystrokeTool::Wtype;
        }
        if is_tool_available("xdotool").await {
            return KeystrokeTool::Xdotool;
        }
    }

    KeystrokeTool::Enigo
}

fn adapter_for(tool: KeystrokeTool) -> Box<dyn Keystroke> {
    match tool {
        KeystrokeTool::Enigo => Box::new(EnigoKeystroke::new()),
        KeystrokeTool::None => Box::new(NoOpKeystroke::new()),
        #[cfg(target_os = "linux")]
        KeystrokeTool::Ydotool => Box::new(YdotoolKeystroke::new()),
        #[cfg(target_os = "linux")]
        KeystrokeTool::Wtype => Box::new(WtypeKeystroke::new()),
        #[cfg(target_os = "linux")]
        KeystrokeTool::Xdotool => Box::new(XdotoolKeystroke::new()),
        #[cfg(not(target_os = "linux"))]
        KeystrokeTool::Ydotool | KeystrokeTool::Wtype | KeystrokeTool::Xdotool => {
            Box::new(EnigoKeystroke::new())
        }
    }
}

/// Create a paste injector for the given preference.
///
/// Returns the adapter and the resolved tool, or an error if an explicitly
/// requested tool is missing.
pub async fn create_keystroke(
    preference: KeystrokeToolPreference,
) -> Result<(Box<dyn Keystroke>, KeystrokeTool), KeystrokeError> {
    let tool = match preference {
        KeystrokeToolPreference::Enigo => KeystrokeTool::Enigo,
        KeystrokeToolPreference::None => KeystrokeTool::None,
        #[cfg(target_os = "linux")]
        KeystrokeToolPreference::Auto => detect_keystroke_tool().await,
        #[cfg(target_os = "linux")]
        KeystrokeToolPreference::Ydotool => {
            if !is_ydotool_available().await {
                return Err(KeystrokeError::ToolNotFound("ydotool".to_string()));
            }
            KeystrokeTool::Ydotool
        }
        #[cfg(target_os = "linux")]
        KeystrokeToolPreference::Xdotool => {
            if !is_tool_available("xdotool").await {
                return Err(KeystrokeError::ToolNotFound("xdotool".to_string()));
            }
            KeystrokeTool::Xdotool
        }
        #[cfg(target_os = "linux")]
        KeystrokeToolPreference::Wtype => {
            if !is_tool_available("wtype").await {
                return Err(KeystrokeError::ToolNotFound("wtype".to_string()));
            }
            KeystrokeTool::Wtype
        }
    };

    tracing::debug!(%preference, %tool, "resolved paste injector");
    Ok((adapter_for(tool), tool))
}
