//! Clipboard infrastructure module
//!
//! Provides cross-platform clipboard support using arboard (primary),
//! wl-clipboard on Wayland, and an in-memory clipboard for tests.

mod arboard;
mod generation;
mod memory;
mod png;
mod wayland;

pub use arboard::ArboardClipboard;
pub use generation::GenerationCounter;
pub use memory::MemoryClipboard;
pub use png::{decode_png, encode_png, RgbaPixels};
pub use wayland::WaylandClipboard;

use std::fmt;
use std::str::FromStr;

use crate::application::ports::ClipboardPort;

/// Available clipboard backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardBackend {
    /// Cross-platform arboard library (default)
    #[default]
    Arboard,
    /// wl-paste / wl-copy (Wayland)
    Wayland,
}

impl fmt::Display for ClipboardBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardBackend::Arboard => write!(f, "arboard"),
            ClipboardBackend::Wayland => write!(f, "wayland"),
        }
    }
}

/// Error type for parsing a clipboard backend name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseClipboardBackendError {
    pub value: String,
}

impl fmt::Display for ParseClipboardBackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid clipboard backend '{}'. Valid options: arboard, wayland",
            self.value
        )
    }
}

impl std::error::Error for ParseClipboardBackendError {}

impl FromStr for ClipboardBackend {
    type Err = ParseClipboardBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arboard" => Ok(ClipboardBackend::Arboard),
            "wayland" | "wl-clipboard" => Ok(ClipboardBackend::Wayland),
            _ => Err(ParseClipboardBackendError {
                value: s.to_string(),
            }),
        }
    }
}

/// Create the clipboard adapter for a backend
pub fn create_clipboard(backend: ClipboardBackend) -> Box<dyn ClipboardPort> {
    match backend {
        ClipboardBackend::Arboard => Box::new(ArboardClipboard::new()),
        ClipboardBackend::Wayland => Box::new(WaylandClipboard::new()),
    }
}
