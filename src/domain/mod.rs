//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod timing;

// Re-export common types
pub use clipboard::{
    ChangeDetector, ClassifiedPayload, ClipboardItem, HistoryStore, IngestOutcome, ItemId,
    ItemKind, RestoreMode,
};
pub use config::AppConfig;
pub use error::*;
pub use timing::Interval;
