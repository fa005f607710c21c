//! History command handler - talks to the running daemon via IPC

use super::args::HistoryAction;
use super::ipc::{create_ipc_client, IpcRequest, IpcResponse};
use super::presenter::Presenter;

/// Map a CLI action onto its wire request
pub fn request_for(action: HistoryAction) -> IpcRequest {
    match action {
        HistoryAction::List => IpcRequest::List,
        HistoryAction::Status => IpcRequest::Status,
        HistoryAction::Restore { position, plain } => IpcRequest::Restore {
            index: position.index as usize,
            plain,
        },
        HistoryAction::Paste { position } => IpcRequest::Paste {
            index: position.index as usize,
        },
        HistoryAction::Delete { position } => IpcRequest::Delete {
            index: position.index as usize,
        },
        HistoryAction::Clear => IpcRequest::Clear,
    }
}

/// Handle history subcommand
pub async fn handle_history_command(
    action: HistoryAction,
    presenter: &Presenter,
) -> Result<(), String> {
    let client = create_ipc_client();

    if !client.is_daemon_running() {
        return Err("No daemon running. Start with: vibeclip".to_string());
    }

    let response = client
        .send(request_for(action))
        .await
        .map_err(|e| format!("Failed to communicate with daemon: {}", e))?;

    match response {
        IpcResponse::Ok { message } => presenter.success(&message),
        IpcResponse::Error { message } => return Err(message),
        IpcResponse::Items { items } => {
            if items.is_empty() {
                presenter.info("History is empty");
            }
            for entry in items {
                presenter.history_entry(entry.index, entry.kind, entry.timestamp, &entry.preview);
            }
        }
        IpcResponse::State { items, max_items } => {
            presenter.daemon_status(&format!("Running, {}/{} entries", items, max_items));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Position;

    #[test]
    fn actions_map_to_requests() {
        assert_eq!(request_for(HistoryAction::List), IpcRequest::List);
        assert_eq!(
            request_for(HistoryAction::Restore {
                position: Position { index: 3 },
                plain: true
            }),
            IpcRequest::Restore {
                index: 3,
                plain: true
            }
        );
        assert_eq!(
            request_for(HistoryAction::Delete {
                position: Position { index: 1 }
            }),
            IpcRequest::Delete { index: 1 }
        );
    }
}
