//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the system clipboard, input injection tools and
//! the config directory.

pub mod clipboard;
pub mod config;
pub mod keystroke;

// Re-export adapters
pub use clipboard::{
    create_clipboard, ArboardClipboard, ClipboardBackend, MemoryClipboard, WaylandClipboard,
};
pub use config::XdgConfigStore;
pub use keystroke::{create_keystroke, KeystrokeTool, KeystrokeToolPreference, NoOpKeystroke};
