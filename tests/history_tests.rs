//! History engine integration tests against the in-memory clipboard

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use base64::Engine as _;
use tokio::sync::mpsc;

use vibeclip::application::ports::{Keystroke, KeystrokeError, Representation};
use vibeclip::application::{HistoryEngine, MonitorConfig, PollLoop, PollOutcome};
use vibeclip::domain::clipboard::{ItemKind, RestoreMode};
use vibeclip::domain::timing::Interval;
use vibeclip::infrastructure::clipboard::{decode_png, encode_png, RgbaPixels};
use vibeclip::infrastructure::MemoryClipboard;

/// Records each paste chord on a channel
struct RecordingKeystroke {
    tx: mpsc::UnboundedSender<()>,
}

#[async_trait]
impl Keystroke for RecordingKeystroke {
    async fn send_paste(&self) -> Result<(), KeystrokeError> {
        let _ = self.tx.send(());
        Ok(())
    }
}

struct Harness {
    engine: HistoryEngine<MemoryClipboard, RecordingKeystroke>,
    clipboard: Arc<MemoryClipboard>,
    pastes: mpsc::UnboundedReceiver<()>,
}

fn harness(config: MonitorConfig) -> Harness {
    let clipboard = Arc::new(MemoryClipboard::new());
    let (tx, pastes) = mpsc::unbounded_channel();
    let engine = HistoryEngine::new(
        Arc::clone(&clipboard),
        Arc::new(RecordingKeystroke { tx }),
        config,
    );
    Harness {
        engine,
        clipboard,
        pastes,
    }
}

async fn copy_text(h: &mut Harness, text: &str) -> PollOutcome {
    h.clipboard.set_external(Representation::PlainText, text);
    h.engine.poll_once().await
}

fn contents(h: &Harness) -> Vec<String> {
    h.engine
        .items()
        .iter()
        .map(|item| item.content().to_string())
        .collect()
}

#[tokio::test]
async fn copying_builds_most_recent_first_history() {
    let mut h = harness(MonitorConfig::default());

    assert!(matches!(copy_text(&mut h, "hello").await, PollOutcome::Captured { .. }));
    assert!(matches!(copy_text(&mut h, "world").await, PollOutcome::Captured { .. }));
    assert!(matches!(copy_text(&mut h, "hello").await, PollOutcome::Duplicate(_)));

    assert_eq!(contents(&h), ["world", "hello"]);
}

#[tokio::test]
async fn unchanged_clipboard_is_not_reread() {
    let mut h = harness(MonitorConfig::default());
    copy_text(&mut h, "once").await;

    assert_eq!(h.engine.poll_once().await, PollOutcome::Unchanged);
    assert_eq!(h.engine.items().len(), 1);
}

#[tokio::test]
async fn empty_clipboard_yields_nothing() {
    let mut h = harness(MonitorConfig::default());
    h.clipboard.set_external(Representation::PlainText, "");
    assert_eq!(h.engine.poll_once().await, PollOutcome::NothingReadable);
    assert!(h.engine.items().is_empty());
}

#[tokio::test]
async fn capacity_evicts_oldest() {
    let mut h = harness(MonitorConfig {
        max_items: 3,
        ..MonitorConfig::default()
    });

    let mut ids = Vec::new();
    for n in 0..5 {
        match copy_text(&mut h, &format!("item {}", n)).await {
            PollOutcome::Captured { id, evicted } => {
                if n < 3 {
                    assert_eq!(evicted, None);
                } else {
                    assert_eq!(evicted, Some(ids[n - 3]));
                }
                ids.push(id);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    assert_eq!(contents(&h), ["item 4", "item 3", "item 2"]);
}

#[tokio::test]
async fn history_never_holds_equal_content_twice() {
    let mut h = harness(MonitorConfig {
        max_items: 5,
        ..MonitorConfig::default()
    });

    for text in ["a", "b", "a", "c", "b", "d", "a", "e", "f"] {
        copy_text(&mut h, text).await;
        let mut seen = contents(&h);
        let len = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), len);
        assert!(len <= 5);
    }
}

#[tokio::test]
async fn same_text_in_different_kinds_is_one_entry() {
    let mut h = harness(MonitorConfig::default());
    h.clipboard
        .set_external(Representation::Url, "https://example.com");
    h.engine.poll_once().await;
    copy_text(&mut h, "https://example.com").await;

    let items = h.engine.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind(), ItemKind::Url);
}

#[tokio::test]
async fn image_round_trips_through_history() {
    let mut h = harness(MonitorConfig::default());
    let pixels = RgbaPixels {
        width: 2,
        height: 1,
        bytes: vec![255, 0, 0, 255, 0, 0, 255, 255],
    };
    let png = encode_png(&pixels).unwrap();

    h.clipboard.set_external(Representation::Image, png.clone());
    h.engine.poll_once().await;

    let item = h.engine.items()[0].clone();
    assert_eq!(item.kind(), ItemKind::Image);
    assert_eq!(item.preview(), "Image");
    let stored = base64::engine::general_purpose::STANDARD
        .decode(item.content())
        .unwrap();
    assert_eq!(stored, png);

    copy_text(&mut h, "something else").await;
    let repr = h.engine.restore(&item, RestoreMode::Exact).await.unwrap();
    assert_eq!(repr, Representation::Image);

    let written = h.clipboard.contents(Representation::Image).unwrap();
    assert_eq!(decode_png(&written).unwrap(), pixels);
    assert_eq!(h.clipboard.contents(Representation::PlainText), None);
}

#[tokio::test]
async fn plain_restore_drops_formatting() {
    let mut h = harness(MonitorConfig::default());
    h.clipboard
        .set_external(Representation::RichText, "{\\rtf1 bold}");
    h.engine.poll_once().await;
    let item = h.engine.items()[0].clone();

    let repr = h
        .engine
        .restore(&item, RestoreMode::PlainText)
        .await
        .unwrap();
    assert_eq!(repr, Representation::PlainText);
    assert_eq!(
        h.clipboard.representations(),
        vec![Representation::PlainText]
    );
}

#[tokio::test]
async fn restoring_does_not_duplicate_history() {
    let mut h = harness(MonitorConfig::default());
    copy_text(&mut h, "first").await;
    copy_text(&mut h, "second").await;
    let first = h.engine.items()[1].clone();

    h.engine.restore(&first, RestoreMode::Exact).await.unwrap();
    assert!(matches!(h.engine.poll_once().await, PollOutcome::Duplicate(id) if id == first.id()));
    assert_eq!(contents(&h), ["second", "first"]);
}

#[tokio::test]
async fn restore_and_paste_sends_chord_after_delay() {
    let mut h = harness(MonitorConfig {
        paste_delay: Interval::from_millis(20),
        ..MonitorConfig::default()
    });
    copy_text(&mut h, "paste me").await;
    let item = h.engine.items()[0].clone();

    h.engine.restore_and_paste(&item).await.unwrap();
    assert!(h.pastes.try_recv().is_err(), "paste fired before the delay");

    let fired = tokio::time::timeout(StdDuration::from_secs(2), h.pastes.recv()).await;
    assert!(matches!(fired, Ok(Some(()))));
}

#[tokio::test]
async fn failed_restore_skips_paste() {
    let mut h = harness(MonitorConfig {
        paste_delay: Interval::from_millis(10),
        ..MonitorConfig::default()
    });
    copy_text(&mut h, "unwritable").await;
    let item = h.engine.items()[0].clone();

    h.clipboard.reject_writes(Representation::PlainText);
    assert!(h.engine.restore_and_paste(&item).await.is_err());

    tokio::time::sleep(StdDuration::from_millis(50)).await;
    assert!(h.pastes.try_recv().is_err());
}

#[tokio::test]
async fn subscribers_see_mutations() {
    let mut h = harness(MonitorConfig::default());
    let mut rx = h.engine.subscribe();

    copy_text(&mut h, "x").await;
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().len(), 1);

    let id = h.engine.items()[0].id();
    assert!(h.engine.delete(id));
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_empty());

    assert!(!h.engine.delete(id));
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn poll_loop_picks_up_changes_until_cancelled() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let (tx, _pastes) = mpsc::unbounded_channel();
    let engine = HistoryEngine::new(
        Arc::clone(&clipboard),
        Arc::new(RecordingKeystroke { tx }),
        MonitorConfig::default(),
    );
    let (poll_loop, history) = PollLoop::spawn(engine, Interval::from_millis(10));
    let mut rx = history.subscribe();

    clipboard.set_external(Representation::PlainText, "from another app");
    let captured = tokio::time::timeout(
        StdDuration::from_secs(2),
        rx.wait_for(|view| view.len() == 1),
    )
    .await
    .map(|r| r.is_ok());
    assert_eq!(captured, Ok(true));

    poll_loop.cancel().await;
    clipboard.set_external(Representation::PlainText, "after cancel");
    tokio::time::sleep(StdDuration::from_millis(50)).await;
    assert_eq!(history.items().len(), 1);
}
