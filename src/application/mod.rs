//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod engine;
pub mod poll_loop;
pub mod ports;
pub mod restore;
pub mod snapshot;

// Re-export use cases
pub use engine::{HistoryEngine, HistoryView, MonitorConfig, PollOutcome};
pub use poll_loop::{HistoryHandle, MonitorError, PollLoop};
pub use restore::{RestoreError, RestoreService};
pub use snapshot::ClipboardSnapshotReader;
