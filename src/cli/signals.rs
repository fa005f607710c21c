//! OS signal handling for the history daemon

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;

/// Why the daemon was asked to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonSignal {
    /// SIGINT (Ctrl+C)
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl DaemonSignal {
    pub const fn name(&self) -> &'static str {
        match self {
            DaemonSignal::Interrupt => "SIGINT",
            DaemonSignal::Terminate => "SIGTERM",
        }
    }
}

/// Daemon signal handler
///
/// Listens for SIGINT/SIGTERM and funnels them into one channel.
pub struct DaemonSignalHandler {
    receiver: mpsc::Receiver<DaemonSignal>,
}

impl DaemonSignalHandler {
    /// Install handlers for SIGINT and SIGTERM
    pub fn new() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(4);

        for (kind, sig) in [
            (SignalKind::interrupt(), DaemonSignal::Interrupt),
            (SignalKind::terminate(), DaemonSignal::Terminate),
        ] {
            let mut stream = signal(kind)?;
            let tx = tx.clone();
            tokio::spawn(async move {
                while stream.recv().await.is_some() {
                    tracing::info!(signal = sig.name(), "received shutdown signal");
                    if tx.send(sig).await.is_err() {
                        break;
                    }
                }
            });
        }

        Ok(Self { receiver: rx })
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<DaemonSignal> {
        self.receiver.recv().await
    }
}
