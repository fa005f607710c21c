//! Clipboard port interface

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::clipboard::ItemKind;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("{0} not found. Please install wl-clipboard.")]
    ToolNotFound(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to write clipboard: {0}")]
    WriteFailed(String),

    #[error("Representation not supported by this clipboard: {0}")]
    UnsupportedRepresentation(Representation),

    #[error("Failed to transcode clipboard data: {0}")]
    Encoding(String),
}

/// One typed encoding of clipboard content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    PlainText,
    Image,
    Url,
    RichText,
}

impl Representation {
    /// Read priority: the first present representation wins
    pub const PRIORITY: [Representation; 4] =
        [Self::PlainText, Self::Image, Self::Url, Self::RichText];

    /// History kind produced when this representation is captured
    pub const fn kind(&self) -> ItemKind {
        match self {
            Self::PlainText => ItemKind::Text,
            Self::Image => ItemKind::Image,
            Self::Url => ItemKind::Url,
            Self::RichText => ItemKind::RichText,
        }
    }

    /// Representation used to write back an item of `kind`
    pub const fn for_kind(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Text => Self::PlainText,
            ItemKind::Image => Self::Image,
            ItemKind::Url => Self::Url,
            ItemKind::RichText => Self::RichText,
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PlainText => "plain text",
            Self::Image => "image",
            Self::Url => "url",
            Self::RichText => "rich text",
        };
        write!(f, "{}", name)
    }
}

/// Port for the system clipboard.
///
/// Byte-level: text flavours are UTF-8, images are PNG-encoded.
#[async_trait]
pub trait ClipboardPort: Send + Sync {
    /// Monotonic generation of the last clipboard write.
    async fn change_token(&self) -> Result<u64, ClipboardError>;

    /// Read one representation.
    ///
    /// # Returns
    /// `Ok(None)` if the representation is not present
    async fn read(&self, repr: Representation) -> Result<Option<Vec<u8>>, ClipboardError>;

    /// Remove every representation from the clipboard.
    async fn clear(&self) -> Result<(), ClipboardError>;

    /// Write one representation.
    async fn write(&self, repr: Representation, data: &[u8]) -> Result<(), ClipboardError>;
}

/// Blanket implementation for boxed clipboard types
#[async_trait]
impl ClipboardPort for Box<dyn ClipboardPort> {
    async fn change_token(&self) -> Result<u64, ClipboardError> {
        self.as_ref().change_token().await
    }

    async fn read(&self, repr: Representation) -> Result<Option<Vec<u8>>, ClipboardError> {
        self.as_ref().read(repr).await
    }

    async fn clear(&self) -> Result<(), ClipboardError> {
        self.as_ref().clear().await
    }

    async fn write(&self, repr: Representation, data: &[u8]) -> Result<(), ClipboardError> {
        self.as_ref().write(repr, data).await
    }
}
