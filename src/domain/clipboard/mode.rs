//! Restore mode value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidRestoreModeError;

/// How a history item is written back to the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreMode {
    /// Use the representation matching the item's kind
    #[default]
    Exact,
    /// Always write the raw content as plain text
    PlainText,
}

impl RestoreMode {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::PlainText => "plain",
        }
    }
}

impl fmt::Display for RestoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RestoreMode {
    type Err = InvalidRestoreModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "plain" | "plain_text" | "plaintext" => Ok(Self::PlainText),
            _ => Err(InvalidRestoreModeError {
                input: s.to_string(),
            }),
        }
    }
}
