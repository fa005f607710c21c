//! Bounded, deduplicated clipboard history

use super::item::{ClipboardItem, ItemId, ItemKind};

/// Default history capacity
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// Result of ingesting a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Payload inserted at the front; `evicted` is the tail item pushed out
    Inserted {
        id: ItemId,
        evicted: Option<ClipboardItem>,
    },
    /// An item with identical content already exists; nothing changed
    Duplicate { existing: ItemId },
}

impl IngestOutcome {
    /// Whether the store was modified
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }
}

/// Ordered history, most recent first.
///
/// Invariants:
/// - at most `max_items` entries
/// - no two entries share the same `content`
/// - order only changes by insertion at the front or by removal
#[derive(Debug, Clone)]
pub struct HistoryStore {
    items: Vec<ClipboardItem>,
    max_items: usize,
}

impl HistoryStore {
    /// Create an empty store with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ITEMS)
    }

    /// Create an empty store holding at most `max_items` entries.
    /// A capacity of zero is raised to one.
    pub fn with_capacity(max_items: usize) -> Self {
        let max_items = max_items.max(1);
        Self {
            items: Vec::with_capacity(max_items + 1),
            max_items,
        }
    }

    /// Record a newly observed payload.
    ///
    /// A payload whose content equals an existing entry's content is
    /// rejected outright: the existing entry keeps its position and
    /// timestamp.
    pub fn ingest(&mut self, kind: ItemKind, content: impl Into<String>) -> IngestOutcome {
        let item = ClipboardItem::new(kind, content);

        if let Some(existing) = self.items.iter().find(|i| i.content() == item.content()) {
            return IngestOutcome::Duplicate {
                existing: existing.id(),
            };
        }

        let id = item.id();
        self.items.insert(0, item);

        let evicted = if self.items.len() > self.max_items {
            self.items.pop()
        } else {
            None
        };

        IngestOutcome::Inserted { id, evicted }
    }

    /// Remove the item with `id`. Returns false if no such item exists.
    pub fn delete(&mut self, id: ItemId) -> bool {
        match self.items.iter().position(|i| i.id() == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Read-only view, most recent first
    pub fn list(&self) -> &[ClipboardItem] {
        &self.items
    }

    /// Look up an item by id
    pub fn get(&self, id: ItemId) -> Option<&ClipboardItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
