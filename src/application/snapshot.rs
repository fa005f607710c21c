//! Clipboard snapshot reader

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::domain::clipboard::{ClassifiedPayload, ItemKind};

use super::ports::{ClipboardPort, Representation};

/// Reads the clipboard and classifies it into a single typed payload.
///
/// Representations are examined in `Representation::PRIORITY` order and the
/// first one present wins. Nothing is merged.
pub struct ClipboardSnapshotReader<C>
where
    C: ClipboardPort,
{
    clipboard: Arc<C>,
}

impl<C> ClipboardSnapshotReader<C>
where
    C: ClipboardPort,
{
    /// Create a new reader over a shared clipboard
    pub fn new(clipboard: Arc<C>) -> Self {
        Self { clipboard }
    }

    /// Read the current clipboard contents.
    ///
    /// Returns None when no known representation is present, when the
    /// clipboard could not be read, or when the winning representation
    /// cannot be transcoded to a string. Failures are logged, never raised.
    pub async fn read(&self) -> Option<ClassifiedPayload> {
        for repr in Representation::PRIORITY {
            let bytes = match self.clipboard.read(repr).await {
                Ok(Some(bytes)) if !bytes.is_empty() => bytes,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(representation = %repr, error = %e, "clipboard read failed");
                    return None;
                }
            };

            return Self::classify(repr, bytes);
        }

        None
    }

    fn classify(repr: Representation, bytes: Vec<u8>) -> Option<ClassifiedPayload> {
        let kind = repr.kind();
        match kind {
            ItemKind::Image => Some(ClassifiedPayload::new(kind, STANDARD.encode(&bytes))),
            ItemKind::Text | ItemKind::Url | ItemKind::RichText => match String::from_utf8(bytes) {
                Ok(text) => Some(ClassifiedPayload::new(kind, text)),
                Err(e) => {
                    tracing::warn!(representation = %repr, error = %e, "dropping non UTF-8 clipboard payload");
                    None
                }
            },
        }
    }
}
