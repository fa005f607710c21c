//! History engine: the single mutator of clipboard history

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::clipboard::{
    ChangeDetector, ClipboardItem, HistoryStore, IngestOutcome, ItemId, RestoreMode,
    DEFAULT_MAX_ITEMS,
};
use crate::domain::timing::Interval;

use super::ports::{ClipboardPort, Keystroke, Representation};
use super::restore::{RestoreError, RestoreService};
use super::snapshot::ClipboardSnapshotReader;

/// Published, ordered history view (most recent first)
pub type HistoryView = Arc<Vec<ClipboardItem>>;

/// Configuration for the monitor
#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    /// Time between clipboard polls
    pub poll_interval: Interval,
    /// History capacity
    pub max_items: usize,
    /// Delay before the paste chord in restore-and-paste
    pub paste_delay: Interval,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Interval::default_poll_interval(),
            max_items: DEFAULT_MAX_ITEMS,
            paste_delay: Interval::default_paste_delay(),
        }
    }
}

/// Result of a single detection pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Change token unchanged since the last pass
    Unchanged,
    /// Clipboard changed but held nothing readable
    NothingReadable,
    /// Clipboard content already in history
    Duplicate(ItemId),
    /// New item inserted at the front
    Captured {
        id: ItemId,
        evicted: Option<ItemId>,
    },
    /// The change token could not be read
    TokenUnavailable,
}

/// Owns all history state and every operation that mutates it.
pub struct HistoryEngine<C, K>
where
    C: ClipboardPort,
    K: Keystroke,
{
    clipboard: Arc<C>,
    detector: ChangeDetector,
    reader: ClipboardSnapshotReader<C>,
    store: HistoryStore,
    restorer: RestoreService<C, K>,
    publisher: watch::Sender<HistoryView>,
    /// Set while the change token keeps failing; only the first failure warns
    token_failing: bool,
}

impl<C, K> HistoryEngine<C, K>
where
    C: ClipboardPort,
    K: Keystroke + 'static,
{
    /// Create a new engine instance.
    ///
    /// The clipboard may be shared with the caller; the engine stays the
    /// only writer of history state.
    pub fn new(clipboard: Arc<C>, keystroke: Arc<K>, config: MonitorConfig) -> Self {
        let (publisher, _) = watch::channel(HistoryView::default());

        Self {
            detector: ChangeDetector::new(),
            reader: ClipboardSnapshotReader::new(Arc::clone(&clipboard)),
            store: HistoryStore::with_capacity(config.max_items),
            restorer: RestoreService::new(Arc::clone(&clipboard), keystroke, config.paste_delay),
            publisher,
            clipboard,
            token_failing: false,
        }
    }

    /// Run one detection pass: token, detector, reader, ingest.
    pub async fn poll_once(&mut self) -> PollOutcome {
        let token = match self.clipboard.change_token().await {
            Ok(token) => {
                if std::mem::take(&mut self.token_failing) {
                    tracing::info!("clipboard change token readable again");
                }
                token
            }
            Err(e) => {
                if self.token_failing {
                    tracing::debug!(error = %e, "clipboard change token still unavailable");
                } else {
                    tracing::warn!(error = %e, "could not read clipboard change token");
                    self.token_failing = true;
                }
                return PollOutcome::TokenUnavailable;
            }
        };

        if !self.detector.has_changed(token) {
            return PollOutcome::Unchanged;
        }
        tracing::debug!(token, "clipboard changed");

        let Some(payload) = self.reader.read().await else {
            return PollOutcome::NothingReadable;
        };

        match self.store.ingest(payload.kind, payload.content) {
            IngestOutcome::Duplicate { existing } => {
                tracing::debug!(id = %existing, "ignoring duplicate clipboard content");
                PollOutcome::Duplicate(existing)
            }
            IngestOutcome::Inserted { id, evicted } => {
                let evicted = evicted.map(|item| item.id());
                tracing::info!(%id, kind = %payload.kind, "captured clipboard item");
                if let Some(old) = evicted {
                    tracing::debug!(id = %old, "evicted oldest item");
                }
                self.publish();
                PollOutcome::Captured { id, evicted }
            }
        }
    }

    /// Remove an item. Returns false if it was not in history.
    pub fn delete(&mut self, id: ItemId) -> bool {
        let removed = self.store.delete(id);
        if removed {
            tracing::debug!(%id, "deleted item");
            self.publish();
        }
        removed
    }

    /// Remove every item
    pub fn clear(&mut self) {
        self.store.clear();
        tracing::debug!("cleared history");
        self.publish();
    }

    /// Write an item back to the clipboard.
    /// Fails with `NotInHistory` if it was deleted or evicted meanwhile.
    pub async fn restore(
        &self,
        item: &ClipboardItem,
        mode: RestoreMode,
    ) -> Result<Representation, RestoreError> {
        self.restorer.restore(self.stored(item)?, mode).await
    }

    /// Restore an item exactly and paste it after the configured delay
    pub async fn restore_and_paste(&self, item: &ClipboardItem) -> Result<(), RestoreError> {
        self.restorer.restore_and_paste(self.stored(item)?).await
    }

    fn stored(&self, item: &ClipboardItem) -> Result<&ClipboardItem, RestoreError> {
        self.store
            .get(item.id())
            .ok_or(RestoreError::NotInHistory(item.id()))
    }

    /// Current ordered view
    pub fn items(&self) -> HistoryView {
        self.publisher.borrow().clone()
    }

    /// Subscribe to view updates
    pub fn subscribe(&self) -> watch::Receiver<HistoryView> {
        self.publisher.subscribe()
    }

    pub fn max_items(&self) -> usize {
        self.store.max_items()
    }

    fn publish(&self) {
        self.publisher
            .send_replace(Arc::new(self.store.list().to_vec()));
    }
}
