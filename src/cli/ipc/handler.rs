//! Daemon-side request handling against the running poll loop

use async_trait::async_trait;

use crate::application::HistoryHandle;
use crate::domain::clipboard::{ClipboardItem, RestoreMode};

use super::protocol::{EntrySummary, IpcRequest, IpcResponse};
use super::RequestHandler;

/// Resolves 1-based positions against the latest view and forwards
/// mutations to the poll loop.
pub struct HistoryRequestHandler {
    history: HistoryHandle,
    restore_mode: RestoreMode,
}

impl HistoryRequestHandler {
    /// `restore_mode` applies to `restore <n>` without the `plain` flag
    pub fn new(history: HistoryHandle, restore_mode: RestoreMode) -> Self {
        Self {
            history,
            restore_mode,
        }
    }

    fn item_at(&self, index: usize) -> Result<ClipboardItem, IpcResponse> {
        let items = self.history.items();
        index
            .checked_sub(1)
            .and_then(|i| items.get(i))
            .cloned()
            .ok_or_else(|| {
                IpcResponse::error(format!(
                    "no history entry {} ({} stored)",
                    index,
                    items.len()
                ))
            })
    }

    async fn restore(&self, index: usize, mode: RestoreMode) -> Result<IpcResponse, IpcResponse> {
        let item = self.item_at(index)?;
        let repr = self
            .history
            .restore(&item, mode)
            .await
            .map_err(|e| IpcResponse::error(e.to_string()))?;
        Ok(IpcResponse::ok(format!("restored entry {} as {}", index, repr)))
    }

    async fn paste(&self, index: usize) -> Result<IpcResponse, IpcResponse> {
        let item = self.item_at(index)?;
        self.history
            .restore_and_paste(&item)
            .await
            .map_err(|e| IpcResponse::error(e.to_string()))?;
        Ok(IpcResponse::ok(format!("pasting entry {}", index)))
    }

    async fn delete(&self, index: usize) -> Result<IpcResponse, IpcResponse> {
        let item = self.item_at(index)?;
        let removed = self
            .history
            .delete(item.id())
            .await
            .map_err(|e| IpcResponse::error(e.to_string()))?;
        if removed {
            Ok(IpcResponse::ok(format!("deleted entry {}", index)))
        } else {
            Err(IpcResponse::error(format!("entry {} is already gone", index)))
        }
    }
}

#[async_trait]
impl RequestHandler for HistoryRequestHandler {
    async fn handle(&self, request: IpcRequest) -> IpcResponse {
        let result = match request {
            IpcRequest::List => Ok(IpcResponse::Items {
                items: self
                    .history
                    .items()
                    .iter()
                    .enumerate()
                    .map(|(i, item)| EntrySummary::from_item(i + 1, item))
                    .collect(),
            }),
            IpcRequest::Status => Ok(IpcResponse::State {
                items: self.history.items().len(),
                max_items: self.history.max_items(),
            }),
            IpcRequest::Restore { index, plain } => {
                let mode = if plain {
                    RestoreMode::PlainText
                } else {
                    self.restore_mode
                };
                self.restore(index, mode).await
            }
            IpcRequest::Paste { index } => self.paste(index).await,
            IpcRequest::Delete { index } => self.delete(index).await,
            IpcRequest::Clear => match self.history.clear().await {
                Ok(()) => Ok(IpcResponse::ok("history cleared")),
                Err(e) => Err(IpcResponse::error(e.to_string())),
            },
        };

        result.unwrap_or_else(|error| error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration as StdDuration;

    use crate::application::ports::Representation;
    use crate::application::{HistoryEngine, MonitorConfig, PollLoop};
    use crate::domain::clipboard::ItemKind;
    use crate::domain::timing::Interval;
    use crate::infrastructure::{MemoryClipboard, NoOpKeystroke};

    async fn daemon_with(
        entries: &[&str],
    ) -> (PollLoop, HistoryRequestHandler, Arc<MemoryClipboard>) {
        let clipboard = Arc::new(MemoryClipboard::new());
        let engine = HistoryEngine::new(
            Arc::clone(&clipboard),
            Arc::new(NoOpKeystroke::new()),
            MonitorConfig::default(),
        );
        let (poll_loop, handle) = PollLoop::spawn(engine, Interval::from_millis(10));

        for (n, entry) in entries.iter().enumerate() {
            clipboard.set_external(Representation::PlainText, *entry);
            let mut rx = handle.subscribe();
            let reached = tokio::time::timeout(
                StdDuration::from_secs(2),
                rx.wait_for(|view| view.len() == n + 1),
            )
            .await
            .map(|r| r.is_ok())
            .unwrap_or(false);
            assert!(reached, "entry '{}' never captured", entry);
        }

        let handler = HistoryRequestHandler::new(handle, RestoreMode::Exact);
        (poll_loop, handler, clipboard)
    }

    #[tokio::test]
    async fn list_is_most_recent_first_and_one_based() {
        let (poll_loop, handler, _clipboard) = daemon_with(&["first", "second"]).await;

        match handler.handle(IpcRequest::List).await {
            IpcResponse::Items { items } => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].index, 1);
                assert_eq!(items[0].preview, "second");
                assert_eq!(items[1].preview, "first");
                assert_eq!(items[1].kind, ItemKind::Text);
            }
            other => panic!("unexpected reply {:?}", other),
        }
        poll_loop.cancel().await;
    }

    #[tokio::test]
    async fn status_reports_capacity() {
        let (poll_loop, handler, _clipboard) = daemon_with(&["only"]).await;
        assert_eq!(
            handler.handle(IpcRequest::Status).await,
            IpcResponse::State {
                items: 1,
                max_items: 20
            }
        );
        poll_loop.cancel().await;
    }

    #[tokio::test]
    async fn restore_writes_older_entry_back() {
        let (poll_loop, handler, clipboard) = daemon_with(&["older", "newer"]).await;

        let reply = handler
            .handle(IpcRequest::Restore {
                index: 2,
                plain: false,
            })
            .await;
        assert!(matches!(reply, IpcResponse::Ok { .. }), "{:?}", reply);
        assert_eq!(
            clipboard.contents(Representation::PlainText),
            Some(b"older".to_vec())
        );
        poll_loop.cancel().await;
    }

    #[tokio::test]
    async fn out_of_range_index_is_an_error() {
        let (poll_loop, handler, _clipboard) = daemon_with(&["one"]).await;
        let reply = handler.handle(IpcRequest::Delete { index: 5 }).await;
        assert!(matches!(reply, IpcResponse::Error { .. }));
        poll_loop.cancel().await;
    }

    #[tokio::test]
    async fn delete_and_clear() {
        let (poll_loop, handler, _clipboard) = daemon_with(&["a", "b", "c"]).await;

        let reply = handler.handle(IpcRequest::Delete { index: 1 }).await;
        assert!(matches!(reply, IpcResponse::Ok { .. }));
        match handler.handle(IpcRequest::List).await {
            IpcResponse::Items { items } => {
                let previews: Vec<_> = items.iter().map(|i| i.preview.as_str()).collect();
                assert_eq!(previews, ["b", "a"]);
            }
            other => panic!("unexpected reply {:?}", other),
        }

        let reply = handler.handle(IpcRequest::Clear).await;
        assert!(matches!(reply, IpcResponse::Ok { .. }));
        assert_eq!(
            handler.handle(IpcRequest::Status).await,
            IpcResponse::State {
                items: 0,
                max_items: 20
            }
        );
        poll_loop.cancel().await;
    }

    #[tokio::test]
    async fn requests_after_shutdown_report_error() {
        let (poll_loop, handler, _clipboard) = daemon_with(&["x"]).await;
        poll_loop.cancel().await;
        let reply = handler.handle(IpcRequest::Clear).await;
        assert!(matches!(reply, IpcResponse::Error { .. }));
    }
}
