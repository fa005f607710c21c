//! Poll loop: drives the history engine on one task

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use thiserror::Error;

use crate::domain::clipboard::{ClipboardItem, ItemId, RestoreMode};
use crate::domain::timing::Interval;

use super::engine::{HistoryEngine, HistoryView};
use super::ports::{ClipboardPort, Keystroke, Representation};
use super::restore::RestoreError;

/// Pending commands before senders wait for the loop
const COMMAND_BUFFER: usize = 32;

/// Errors from history commands
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Clipboard monitor is not running")]
    Stopped,

    #[error("Restore failed: {0}")]
    Restore(#[from] RestoreError),
}

enum Command {
    Restore {
        item: ClipboardItem,
        mode: RestoreMode,
        reply: oneshot::Sender<Result<Representation, RestoreError>>,
    },
    RestoreAndPaste {
        item: ClipboardItem,
        reply: oneshot::Sender<Result<(), RestoreError>>,
    },
    Delete {
        id: ItemId,
        reply: oneshot::Sender<bool>,
    },
    Clear {
        reply: oneshot::Sender<()>,
    },
}

/// Running poll loop.
///
/// Owns the task that owns the engine. Every tick and every command runs
/// to completion on that task before the next one starts.
pub struct PollLoop {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollLoop {
    /// Move `engine` onto a new task and start polling every `period`.
    ///
    /// One detection pass runs immediately; the first timer tick follows
    /// one full period later.
    pub fn spawn<C, K>(engine: HistoryEngine<C, K>, period: Interval) -> (Self, HistoryHandle)
    where
        C: ClipboardPort + 'static,
        K: Keystroke + 'static,
    {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = HistoryHandle {
            commands: command_tx,
            view: engine.subscribe(),
            max_items: engine.max_items(),
        };

        let task = tokio::spawn(run(engine, period, command_rx, shutdown_rx));

        tracing::debug!(period = %period, "poll loop started");

        (
            Self {
                shutdown: Some(shutdown_tx),
                task: Some(task),
            },
            handle,
        )
    }

    /// Stop polling.
    ///
    /// When this returns no tick is running and none will fire. Paste
    /// injections already scheduled are detached and may still fire.
    pub async fn cancel(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "poll loop ended abnormally");
            }
        }

        tracing::debug!("poll loop stopped");
    }
}

impl Drop for PollLoop {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run<C, K>(
    mut engine: HistoryEngine<C, K>,
    period: Interval,
    mut commands: mpsc::Receiver<Command>,
    mut shutdown: oneshot::Receiver<()>,
) where
    C: ClipboardPort + 'static,
    K: Keystroke + 'static,
{
    let outcome = engine.poll_once().await;
    tracing::debug!(?outcome, "startup detection pass");

    let period = period.as_std();
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            _ = &mut shutdown => break,

            Some(command) = commands.recv() => execute(&mut engine, command).await,

            _ = ticker.tick() => {
                let outcome = engine.poll_once().await;
                tracing::trace!(?outcome, "poll tick");
            }
        }
    }
}

async fn execute<C, K>(engine: &mut HistoryEngine<C, K>, command: Command)
where
    C: ClipboardPort,
    K: Keystroke + 'static,
{
    // A dropped reply receiver means the caller gave up; nothing to do.
    match command {
        Command::Restore { item, mode, reply } => {
            let _ = reply.send(engine.restore(&item, mode).await);
        }
        Command::RestoreAndPaste { item, reply } => {
            let _ = reply.send(engine.restore_and_paste(&item).await);
        }
        Command::Delete { id, reply } => {
            let _ = reply.send(engine.delete(id));
        }
        Command::Clear { reply } => {
            engine.clear();
            let _ = reply.send(());
        }
    }
}

/// Presentation-side handle to a running poll loop.
///
/// Reads come from the published view; mutations are sent to the loop
/// task and applied there.
#[derive(Clone)]
pub struct HistoryHandle {
    commands: mpsc::Sender<Command>,
    view: watch::Receiver<HistoryView>,
    max_items: usize,
}

impl HistoryHandle {
    /// Latest published view, most recent first
    pub fn items(&self) -> HistoryView {
        self.view.borrow().clone()
    }

    /// Receiver notified after every history mutation
    pub fn subscribe(&self) -> watch::Receiver<HistoryView> {
        self.view.clone()
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Write `item` back to the clipboard
    pub async fn restore(
        &self,
        item: &ClipboardItem,
        mode: RestoreMode,
    ) -> Result<Representation, MonitorError> {
        let item = item.clone();
        self.request(|reply| Command::Restore { item, mode, reply })
            .await?
            .map_err(MonitorError::from)
    }

    /// Restore `item` exactly, then paste it into the focused window
    pub async fn restore_and_paste(&self, item: &ClipboardItem) -> Result<(), MonitorError> {
        let item = item.clone();
        self.request(|reply| Command::RestoreAndPaste { item, reply })
            .await?
            .map_err(MonitorError::from)
    }

    /// Remove an item. Returns false if it was not in history.
    pub async fn delete(&self, id: ItemId) -> Result<bool, MonitorError> {
        self.request(|reply| Command::Delete { id, reply }).await
    }

    /// Remove every item
    pub async fn clear(&self) -> Result<(), MonitorError> {
        self.request(|reply| Command::Clear { reply }).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, MonitorError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(command(reply_tx))
            .await
            .map_err(|_| MonitorError::Stopped)?;
        reply_rx.await.map_err(|_| MonitorError::Stopped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::engine::MonitorConfig;
    use crate::application::ports::KeystrokeError;
    use crate::infrastructure::clipboard::MemoryClipboard;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration as StdDuration;

    struct MockKeystroke;

    #[async_trait]
    impl Keystroke for MockKeystroke {
        async fn send_paste(&self) -> Result<(), KeystrokeError> {
            Ok(())
        }
    }

    fn start(period_ms: u64) -> (PollLoop, HistoryHandle, Arc<MemoryClipboard>) {
        let clipboard = Arc::new(MemoryClipboard::new());
        let engine = HistoryEngine::new(
            Arc::clone(&clipboard),
            Arc::new(MockKeystroke),
            MonitorConfig::default(),
        );
        let (poll_loop, handle) = PollLoop::spawn(engine, Interval::from_millis(period_ms));
        (poll_loop, handle, clipboard)
    }

    async fn wait_for_len(handle: &HistoryHandle, len: usize) {
        let mut rx = handle.subscribe();
        let reached = time::timeout(StdDuration::from_secs(2), rx.wait_for(|v| v.len() == len))
            .await
            .map(|r| r.is_ok())
            .unwrap_or(false);
        assert!(reached, "history never reached {} items", len);
    }

    #[tokio::test]
    async fn startup_pass_captures_before_first_tick() {
        let clipboard = Arc::new(MemoryClipboard::new());
        clipboard.set_external(Representation::PlainText, "pre-existing");
        let engine = HistoryEngine::new(
            Arc::clone(&clipboard),
            Arc::new(MockKeystroke),
            MonitorConfig::default(),
        );

        // Period far longer than the test: only the startup pass can capture
        let (poll_loop, handle) = PollLoop::spawn(engine, Interval::from_secs(3600));

        wait_for_len(&handle, 1).await;
        assert_eq!(handle.items()[0].content(), "pre-existing");
        poll_loop.cancel().await;
    }

    #[tokio::test]
    async fn ticks_capture_new_content() {
        let (poll_loop, handle, clipboard) = start(10);

        clipboard.set_external(Representation::PlainText, "one");
        wait_for_len(&handle, 1).await;
        clipboard.set_external(Representation::PlainText, "two");
        wait_for_len(&handle, 2).await;

        assert_eq!(handle.items()[0].content(), "two");
        poll_loop.cancel().await;
    }

    #[tokio::test]
    async fn commands_mutate_history() {
        let (poll_loop, handle, clipboard) = start(10);
        clipboard.set_external(Representation::PlainText, "a");
        wait_for_len(&handle, 1).await;

        let id = handle.items()[0].id();
        assert!(handle.delete(id).await.unwrap());
        assert!(handle.items().is_empty());
        assert!(!handle.delete(id).await.unwrap());

        handle.clear().await.unwrap();
        assert!(handle.items().is_empty());
        poll_loop.cancel().await;
    }

    #[tokio::test]
    async fn restore_goes_through_loop() {
        let (poll_loop, handle, clipboard) = start(10);
        clipboard.set_external(Representation::Url, "https://example.com");
        wait_for_len(&handle, 1).await;
        let item = handle.items()[0].clone();

        clipboard.set_external(Representation::PlainText, "other");
        wait_for_len(&handle, 2).await;

        let repr = handle.restore(&item, RestoreMode::Exact).await.unwrap();
        assert_eq!(repr, Representation::Url);
        assert_eq!(
            clipboard.contents(Representation::Url),
            Some(b"https://example.com".to_vec())
        );
        poll_loop.cancel().await;
    }

    #[tokio::test]
    async fn smallest_period_keeps_serving_commands() {
        let (poll_loop, handle, clipboard) = start(0);
        clipboard.set_external(Representation::PlainText, "fast");
        wait_for_len(&handle, 1).await;

        handle.clear().await.unwrap();
        assert!(handle.items().is_empty());
        poll_loop.cancel().await;
    }

    #[tokio::test]
    async fn restoring_a_deleted_item_is_refused() {
        let (poll_loop, handle, clipboard) = start(10);
        clipboard.set_external(Representation::PlainText, "gone soon");
        wait_for_len(&handle, 1).await;
        let item = handle.items()[0].clone();

        clipboard.set_external(Representation::PlainText, "current");
        wait_for_len(&handle, 2).await;
        assert!(handle.delete(item.id()).await.unwrap());

        let result = handle.restore(&item, RestoreMode::Exact).await;
        assert!(matches!(
            result,
            Err(MonitorError::Restore(RestoreError::NotInHistory(id))) if id == item.id()
        ));
        assert!(matches!(
            handle.restore_and_paste(&item).await,
            Err(MonitorError::Restore(RestoreError::NotInHistory(_)))
        ));
        assert_eq!(
            clipboard.contents(Representation::PlainText),
            Some(b"current".to_vec())
        );
        poll_loop.cancel().await;
    }

    #[tokio::test]
    async fn commands_after_cancel_report_stopped() {
        let (poll_loop, handle, _clipboard) = start(10);
        poll_loop.cancel().await;

        assert!(matches!(handle.clear().await, Err(MonitorError::Stopped)));
        assert!(matches!(handle.delete(ItemId::new()).await, Err(MonitorError::Stopped)));
    }

    #[tokio::test]
    async fn no_ticks_after_cancel() {
        let (poll_loop, handle, clipboard) = start(10);
        poll_loop.cancel().await;

        clipboard.set_external(Representation::PlainText, "late");
        time::sleep(StdDuration::from_millis(60)).await;

        assert!(handle.items().is_empty());
    }

    #[tokio::test]
    async fn dropping_loop_stops_task() {
        let (poll_loop, handle, _clipboard) = start(10);
        drop(poll_loop);

        let result = time::timeout(StdDuration::from_secs(2), handle.clear()).await;
        assert!(matches!(result, Ok(Err(MonitorError::Stopped))));
    }
}
