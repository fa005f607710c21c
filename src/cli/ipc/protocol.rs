//! Line protocol between `vibeclip history ...` and the daemon
//!
//! One request line in, one JSON line out.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::clipboard::{ClipboardItem, ItemId, ItemKind};

/// Requests understood by the daemon. Indices are 1-based, most recent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpcRequest {
    List,
    Status,
    Restore { index: usize, plain: bool },
    Paste { index: usize },
    Delete { index: usize },
    Clear,
}

impl IpcRequest {
    /// Wire form, without trailing newline
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for IpcRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpcRequest::List => write!(f, "list"),
            IpcRequest::Status => write!(f, "status"),
            IpcRequest::Restore { index, plain: false } => write!(f, "restore {}", index),
            IpcRequest::Restore { index, plain: true } => write!(f, "restore {} plain", index),
            IpcRequest::Paste { index } => write!(f, "paste {}", index),
            IpcRequest::Delete { index } => write!(f, "delete {}", index),
            IpcRequest::Clear => write!(f, "clear"),
        }
    }
}

/// Malformed request line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command: '{line}'")]
pub struct ParseRequestError {
    pub line: String,
}

fn parse_index(token: Option<&str>) -> Option<usize> {
    token?.parse::<usize>().ok().filter(|i| *i >= 1)
}

impl FromStr for IpcRequest {
    type Err = ParseRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let command = tokens.next();
        let index = tokens.next();
        let flag = tokens.next();
        let extra = tokens.next();

        let request = match (command, flag, extra) {
            (Some("list"), None, None) if index.is_none() => Some(IpcRequest::List),
            (Some("status"), None, None) if index.is_none() => Some(IpcRequest::Status),
            (Some("clear"), None, None) if index.is_none() => Some(IpcRequest::Clear),
            (Some("restore"), None, None) => {
                parse_index(index).map(|index| IpcRequest::Restore { index, plain: false })
            }
            (Some("restore"), Some("plain"), None) => {
                parse_index(index).map(|index| IpcRequest::Restore { index, plain: true })
            }
            (Some("paste"), None, None) => parse_index(index).map(|index| IpcRequest::Paste { index }),
            (Some("delete"), None, None) => {
                parse_index(index).map(|index| IpcRequest::Delete { index })
            }
            _ => None,
        };

        request.ok_or_else(|| ParseRequestError {
            line: s.trim().to_string(),
        })
    }
}

/// One history entry as shown to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySummary {
    pub index: usize,
    pub id: ItemId,
    pub kind: ItemKind,
    pub preview: String,
    pub timestamp: DateTime<Utc>,
}

impl EntrySummary {
    pub fn from_item(index: usize, item: &ClipboardItem) -> Self {
        Self {
            index,
            id: item.id(),
            kind: item.kind(),
            preview: item.preview(),
            timestamp: item.timestamp(),
        }
    }
}

/// Daemon reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IpcResponse {
    Ok { message: String },
    Error { message: String },
    Items { items: Vec<EntrySummary> },
    State { items: usize, max_items: usize },
}

impl IpcResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        IpcResponse::Ok {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        IpcResponse::Error {
            message: message.into(),
        }
    }

    /// JSON line, without trailing newline
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"status":"error","message":"failed to encode reply: {}"}}"#,
                e
            )
        })
    }

    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_request() {
        assert_eq!("list".parse::<IpcRequest>().unwrap(), IpcRequest::List);
        assert_eq!("status\n".parse::<IpcRequest>().unwrap(), IpcRequest::Status);
        assert_eq!("clear".parse::<IpcRequest>().unwrap(), IpcRequest::Clear);
        assert_eq!(
            "restore 2".parse::<IpcRequest>().unwrap(),
            IpcRequest::Restore {
                index: 2,
                plain: false
            }
        );
        assert_eq!(
            "restore 4 plain".parse::<IpcRequest>().unwrap(),
            IpcRequest::Restore {
                index: 4,
                plain: true
            }
        );
        assert_eq!(
            "paste 1".parse::<IpcRequest>().unwrap(),
            IpcRequest::Paste { index: 1 }
        );
        assert_eq!(
            "delete 20".parse::<IpcRequest>().unwrap(),
            IpcRequest::Delete { index: 20 }
        );
    }

    #[test]
    fn display_matches_parser() {
        let request = IpcRequest::Restore {
            index: 3,
            plain: true,
        };
        assert_eq!(request.to_line(), "restore 3 plain");
        assert_eq!(request.to_line().parse::<IpcRequest>().unwrap(), request);
    }

    #[test]
    fn rejects_malformed_requests() {
        for line in [
            "",
            "toggle",
            "restore",
            "restore 0",
            "restore -1",
            "restore 1 rich",
            "paste x",
            "list 1",
            "delete 1 2",
        ] {
            assert!(line.parse::<IpcRequest>().is_err(), "accepted '{}'", line);
        }
    }

    #[test]
    fn responses_are_tagged_by_status() {
        let line = IpcResponse::State {
            items: 3,
            max_items: 20,
        }
        .to_line();
        assert_eq!(line, r#"{"status":"state","items":3,"max_items":20}"#);

        let line = IpcResponse::error("no entry 5").to_line();
        assert_eq!(line, r#"{"status":"error","message":"no entry 5"}"#);
    }

    #[test]
    fn items_response_decodes() {
        let item = ClipboardItem::new(ItemKind::Url, "https://example.com");
        let response = IpcResponse::Items {
            items: vec![EntrySummary::from_item(1, &item)],
        };
        let decoded = IpcResponse::from_line(&response.to_line()).unwrap();
        assert_eq!(decoded, response);
    }
}
