//! Restore use case: write a history item back to the clipboard

use std::sync::Arc;
use std::time::Duration as StdDuration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use crate::domain::clipboard::{ClipboardItem, ItemId, ItemKind, RestoreMode};
use crate::domain::timing::Interval;

use super::ports::{ClipboardError, ClipboardPort, Keystroke, Representation};

/// Errors from restoring an item
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("Item {0} is no longer in history")]
    NotInHistory(ItemId),

    #[error("Stored item could not be decoded: {0}")]
    Decode(String),

    #[error("Clipboard rejected the write: {0}")]
    Write(#[from] ClipboardError),
}

/// Writes history items back to the clipboard and optionally pastes them.
pub struct RestoreService<C, K>
where
    C: ClipboardPort,
    K: Keystroke,
{
    clipboard: Arc<C>,
    keystroke: Arc<K>,
    paste_delay: StdDuration,
}

impl<C, K> RestoreService<C, K>
where
    C: ClipboardPort,
    K: Keystroke + 'static,
{
    /// Create a new restore service
    pub fn new(clipboard: Arc<C>, keystroke: Arc<K>, paste_delay: Interval) -> Self {
        Self {
            clipboard,
            keystroke,
            paste_delay: paste_delay.as_std(),
        }
    }

    /// Write `item` to the clipboard.
    ///
    /// The payload is decoded before anything is touched, so a malformed
    /// item leaves the clipboard as it was. Existing representations are
    /// then cleared and the single target representation is written.
    ///
    /// # Returns
    /// The representation that was written
    pub async fn restore(
        &self,
        item: &ClipboardItem,
        mode: RestoreMode,
    ) -> Result<Representation, RestoreError> {
        let (repr, bytes) = Self::encode(item, mode)?;

        if let Err(e) = self.clipboard.clear().await {
            tracing::warn!(error = %e, "failed to clear clipboard before restore");
        }

        self.clipboard.write(repr, &bytes).await?;

        tracing::info!(id = %item.id(), kind = %item.kind(), %mode, representation = %repr, "restored item");
        Ok(repr)
    }

    /// Restore `item` exactly, then paste it into the focused window after
    /// the configured delay.
    ///
    /// The paste runs as a detached task: its failure is logged and never
    /// reaches the caller. Nothing is pasted if the restore failed.
    pub async fn restore_and_paste(&self, item: &ClipboardItem) -> Result<(), RestoreError> {
        self.restore(item, RestoreMode::Exact).await?;
        self.schedule_paste();
        Ok(())
    }

    fn schedule_paste(&self) {
        let keystroke = Arc::clone(&self.keystroke);
        let delay = self.paste_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match keystroke.send_paste().await {
                Ok(()) => tracing::debug!("paste shortcut sent"),
                Err(e) => tracing::warn!(error = %e, "paste injection failed"),
            }
        });
    }

    fn encode(
        item: &ClipboardItem,
        mode: RestoreMode,
    ) -> Result<(Representation, Vec<u8>), RestoreError> {
        let content = item.content();

        match (mode, item.kind()) {
            (RestoreMode::PlainText, _) => {
                Ok((Representation::PlainText, content.as_bytes().to_vec()))
            }
            (RestoreMode::Exact, ItemKind::Image) => {
                let bytes = STANDARD
                    .decode(content)
                    .map_err(|e| RestoreError::Decode(e.to_string()))?;
                Ok((Representation::Image, bytes))
            }
            (RestoreMode::Exact, kind) => {
                Ok((Representation::for_kind(kind), content.as_bytes().to_vec()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::KeystrokeError;
    use crate::infrastructure::clipboard::MemoryClipboard;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    struct MockKeystroke {
        pasted: mpsc::UnboundedSender<()>,
        fail: bool,
    }

    #[async_trait]
    impl Keystroke for MockKeystroke {
        async fn send_paste(&self) -> Result<(), KeystrokeError> {
            let _ = self.pasted.send(());
            if self.fail {
                Err(KeystrokeError::EventSource("no session".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn service(
        fail_paste: bool,
    ) -> (
        RestoreService<MemoryClipboard, MockKeystroke>,
        Arc<MemoryClipboard>,
        mpsc::UnboundedReceiver<()>,
    ) {
        let clipboard = Arc::new(MemoryClipboard::new());
        let (tx, rx) = mpsc::unbounded_channel();
        let keystroke = Arc::new(MockKeystroke {
            pasted: tx,
            fail: fail_paste,
        });
        let service = RestoreService::new(
            Arc::clone(&clipboard),
            keystroke,
            Interval::from_millis(10),
        );
        (service, clipboard, rx)
    }

    #[tokio::test]
    async fn exact_text_writes_plain_text() {
        let (service, clipboard, _rx) = service(false);
        let item = ClipboardItem::new(ItemKind::Text, "hello");

        let repr = service.restore(&item, RestoreMode::Exact).await.unwrap();

        assert_eq!(repr, Representation::PlainText);
        assert_eq!(clipboard.contents(Representation::PlainText), Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn exact_url_and_rich_text_use_their_representation() {
        let (service, clipboard, _rx) = service(false);

        let url = ClipboardItem::new(ItemKind::Url, "https://example.com");
        service.restore(&url, RestoreMode::Exact).await.unwrap();
        assert_eq!(clipboard.representations(), vec![Representation::Url]);

        let rich = ClipboardItem::new(ItemKind::RichText, "<b>x</b>");
        service.restore(&rich, RestoreMode::Exact).await.unwrap();
        assert_eq!(clipboard.representations(), vec![Representation::RichText]);
        assert_eq!(clipboard.contents(Representation::RichText), Some(b"<b>x</b>".to_vec()));
    }

    #[tokio::test]
    async fn exact_image_decodes_base64() {
        let (service, clipboard, _rx) = service(false);
        let item = ClipboardItem::new(ItemKind::Image, STANDARD.encode([1u8, 2, 3, 4]));

        service.restore(&item, RestoreMode::Exact).await.unwrap();

        assert_eq!(clipboard.contents(Representation::Image), Some(vec![1, 2, 3, 4]));
    }

    #[tokio::test]
    async fn plain_mode_writes_content_as_text_for_any_kind() {
        let (service, clipboard, _rx) = service(false);
        let item = ClipboardItem::new(ItemKind::RichText, "{\\rtf1 hi}");

        let repr = service.restore(&item, RestoreMode::PlainText).await.unwrap();

        assert_eq!(repr, Representation::PlainText);
        assert_eq!(clipboard.representations(), vec![Representation::PlainText]);
    }

    #[tokio::test]
    async fn stale_representations_are_cleared() {
        let (service, clipboard, _rx) = service(false);
        clipboard.set_external_many([
            (Representation::PlainText, b"old".to_vec()),
            (Representation::RichText, b"<i>old</i>".to_vec()),
        ]);

        let item = ClipboardItem::new(ItemKind::Url, "https://example.com");
        service.restore(&item, RestoreMode::Exact).await.unwrap();

        assert_eq!(clipboard.representations(), vec![Representation::Url]);
    }

    #[tokio::test]
    async fn malformed_image_is_decode_error_and_clipboard_untouched() {
        let (service, clipboard, _rx) = service(false);
        clipboard.set_external(Representation::PlainText, "keep me");
        let item = ClipboardItem::new(ItemKind::Image, "not base64!!");

        let result = service.restore(&item, RestoreMode::Exact).await;

        assert!(matches!(result, Err(RestoreError::Decode(_))));
        assert_eq!(clipboard.contents(Representation::PlainText), Some(b"keep me".to_vec()));
    }

    #[tokio::test]
    async fn rejected_write_is_reported() {
        let (service, clipboard, _rx) = service(false);
        clipboard.reject_writes(Representation::PlainText);
        let item = ClipboardItem::new(ItemKind::Text, "hello");

        let result = service.restore(&item, RestoreMode::Exact).await;

        assert!(matches!(result, Err(RestoreError::Write(ClipboardError::WriteFailed(_)))));
    }

    #[tokio::test]
    async fn restore_and_paste_injects_after_delay() {
        let (service, clipboard, mut rx) = service(false);
        let item = ClipboardItem::new(ItemKind::Text, "hello");

        service.restore_and_paste(&item).await.unwrap();

        assert_eq!(clipboard.contents(Representation::PlainText), Some(b"hello".to_vec()));
        let pasted = tokio::time::timeout(StdDuration::from_secs(2), rx.recv()).await;
        assert!(matches!(pasted, Ok(Some(()))));
    }

    #[tokio::test]
    async fn paste_failure_does_not_reach_caller() {
        let (service, _clipboard, mut rx) = service(true);
        let item = ClipboardItem::new(ItemKind::Text, "hello");

        assert!(service.restore_and_paste(&item).await.is_ok());
        let pasted = tokio::time::timeout(StdDuration::from_secs(2), rx.recv()).await;
        assert!(matches!(pasted, Ok(Some(()))));
    }

    #[tokio::test]
    async fn failed_restore_skips_paste() {
        let (service, clipboard, mut rx) = service(false);
        clipboard.reject_writes(Representation::PlainText);
        let item = ClipboardItem::new(ItemKind::Text, "hello");

        assert!(service.restore_and_paste(&item).await.is_err());
        let pasted = tokio::time::timeout(StdDuration::from_millis(100), rx.recv()).await;
        assert!(pasted.is_err());
    }
}
