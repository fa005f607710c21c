//! Clipboard history domain: items, change detection, bounded history

mod change;
mod history;
mod item;
mod mode;

pub use change::ChangeDetector;
pub use history::{HistoryStore, IngestOutcome, DEFAULT_MAX_ITEMS};
pub use item::{ClassifiedPayload, ClipboardItem, ItemId, ItemKind, IMAGE_PREVIEW, PREVIEW_CHARS};
pub use mode::RestoreMode;
