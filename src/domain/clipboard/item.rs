//! Clipboard history item entity

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::InvalidItemKindError;

/// Number of characters shown in a textual preview
pub const PREVIEW_CHARS: usize = 50;

/// Placeholder preview for image items
pub const IMAGE_PREVIEW: &str = "Image";

/// Process-unique item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Coarse classification of a captured clipboard payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Text,
    Image,
    Url,
    RichText,
}

impl ItemKind {
    /// All kinds, in clipboard read priority order
    pub const ALL: [ItemKind; 4] = [Self::Text, Self::Image, Self::Url, Self::RichText];

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Url => "url",
            Self::RichText => "rich_text",
        }
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Image => "Image",
            Self::Url => "Link",
            Self::RichText => "Rich Text",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = InvalidItemKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "url" => Ok(Self::Url),
            "rich_text" | "richtext" | "rtf" => Ok(Self::RichText),
            _ => Err(InvalidItemKindError {
                input: s.to_string(),
            }),
        }
    }
}

/// A typed payload read from the clipboard, not yet part of the history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPayload {
    pub kind: ItemKind,
    pub content: String,
}

impl ClassifiedPayload {
    pub fn new(kind: ItemKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// Clipboard history entry.
///
/// Immutable after creation. Identity (equality, hashing) is the `id` only;
/// content comparison is the history's business, not the item's.
#[derive(Debug, Clone)]
pub struct ClipboardItem {
    id: ItemId,
    timestamp: DateTime<Utc>,
    kind: ItemKind,
    content: String,
}

impl ClipboardItem {
    /// Create a new item stamped with a fresh id and the current time
    pub fn new(kind: ItemKind, content: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            timestamp: Utc::now(),
            kind,
            content: content.into(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Raw string payload (base64 for images)
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Short display text, derived on demand
    pub fn preview(&self) -> String {
        match self.kind {
            ItemKind::Image => IMAGE_PREVIEW.to_string(),
            ItemKind::Text | ItemKind::Url | ItemKind::RichText => {
                let mut chars = self.content.chars();
                let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
                if chars.next().is_some() {
                    format!("{}...", head)
                } else {
                    head
                }
            }
        }
    }
}

impl PartialEq for ClipboardItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClipboardItem {}

impl Hash for ClipboardItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
