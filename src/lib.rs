//! VibeClip - clipboard history daemon
//!
//! Watches the system clipboard, keeps a bounded, deduplicated history of
//! what was copied, and writes entries back on request (optionally pasting
//! them into the focused window).
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Items, change detection, the bounded history, config values
//! - **Application**: Port traits, the history engine and its poll loop
//! - **Infrastructure**: Adapter implementations (arboard, wl-clipboard, enigo, etc.)
//! - **CLI**: Argument parsing, daemon runner, IPC and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
