//! Daemon app runner

use std::process::ExitCode;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::application::ports::Keystroke;
use crate::application::{HistoryEngine, HistoryView, PollLoop};
use crate::infrastructure::{create_clipboard, create_keystroke, NoOpKeystroke};

use super::app::{DaemonOptions, EXIT_ERROR, EXIT_SUCCESS};
use super::ipc::{create_ipc_server, HistoryRequestHandler};
use super::pid_file::{PidFile, PidFileError};
use super::presenter::Presenter;
use super::signals::DaemonSignalHandler;

/// Run the clipboard history daemon until SIGINT/SIGTERM
pub async fn run_daemon(options: DaemonOptions) -> ExitCode {
    let presenter = Presenter::new();

    let pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        match e {
            PidFileError::AlreadyRunning(pid) => {
                presenter.error(&format!("Another daemon is already running (PID: {})", pid));
            }
            _ => {
                presenter.error(&e.to_string());
            }
        }
        return ExitCode::from(EXIT_ERROR);
    }

    let mut signals = match DaemonSignalHandler::new() {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let clipboard = create_clipboard(options.backend);
    let keystroke: Box<dyn Keystroke> = match create_keystroke(options.keystroke_tool).await {
        Ok((keystroke, tool)) => {
            tracing::info!(%tool, "paste injector ready");
            keystroke
        }
        Err(e) => {
            presenter.warn(&format!("{}; paste will only restore", e));
            Box::new(NoOpKeystroke::new())
        }
    };

    let engine = HistoryEngine::new(Arc::new(clipboard), Arc::new(keystroke), options.monitor);
    let (poll_loop, history) = PollLoop::spawn(engine, options.monitor.poll_interval);

    let mut server = create_ipc_server();
    if let Err(e) = server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        poll_loop.cancel().await;
        return ExitCode::from(EXIT_ERROR);
    }
    let socket = server.path();

    let handler = Arc::new(HistoryRequestHandler::new(
        history.clone(),
        options.restore_mode,
    ));
    // Dropping the server on abort removes the socket file
    let server_task = tokio::spawn(async move {
        if let Err(e) = server.run(handler).await {
            tracing::error!(error = %e, "ipc server stopped");
        }
    });

    let announcer = spawn_capture_announcer(history.subscribe());

    presenter.daemon_status(&format!(
        "Watching clipboard every {} ({} via {}, keeping {})",
        options.monitor.poll_interval,
        options.backend,
        options.keystroke_tool,
        options.monitor.max_items
    ));
    presenter.info(&format!(
        "PID: {} | Socket: {} | SIGINT: exit",
        std::process::id(),
        socket
    ));

    let exit = match signals.recv().await {
        Some(signal) => {
            presenter.daemon_status(&format!("Shutting down ({})...", signal.name()));
            ExitCode::from(EXIT_SUCCESS)
        }
        None => ExitCode::from(EXIT_ERROR),
    };

    poll_loop.cancel().await;
    announcer.abort();
    server_task.abort();
    let _ = server_task.await;
    let _ = pid_file.release();

    exit
}

/// Print each newly captured item as the view changes
fn spawn_capture_announcer(mut view: watch::Receiver<HistoryView>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let presenter = Presenter::new();
        let mut newest: Option<DateTime<Utc>> =
            view.borrow_and_update().first().map(|i| i.timestamp());

        // Deletes can expose an older head; only strictly newer items are captures
        while view.changed().await.is_ok() {
            let head = view.borrow_and_update().first().cloned();
            if let Some(item) = head {
                if newest.map_or(true, |at| item.timestamp() > at) {
                    newest = Some(item.timestamp());
                    presenter.captured(item.kind(), &item.preview());
                }
            }
        }
    })
}
