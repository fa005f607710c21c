//! Cross-platform clipboard adapter using arboard
//!
//! Works on Windows, macOS, and Linux (X11/Wayland).

use std::borrow::Cow;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::ports::{ClipboardError, ClipboardPort, Representation};

use super::generation::GenerationCounter;
use super::png::{decode_png, encode_png, RgbaPixels};

/// Cross-platform clipboard adapter using arboard.
///
/// arboard has no change counter, so one is derived from a fingerprint of
/// the highest-priority representation present.
pub struct ArboardClipboard {
    generation: Arc<Mutex<GenerationCounter>>,
}

impl ArboardClipboard {
    /// Create a new arboard clipboard adapter
    pub fn new() -> Self {
        Self {
            generation: Arc::new(Mutex::new(GenerationCounter::new())),
        }
    }

    /// Run a blocking arboard operation on a fresh handle
    async fn with_clipboard<T, F>(f: F) -> Result<T, ClipboardError>
    where
        T: Send + 'static,
        F: FnOnce(&mut arboard::Clipboard) -> Result<T, ClipboardError> + Send + 'static,
    {
        // arboard operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            f(&mut clipboard)
        })
        .await
        .map_err(|e| ClipboardError::Unavailable(format!("Task join error: {}", e)))?
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Map "nothing of that type" to None, anything else to a read failure
fn optional<T>(result: Result<T, arboard::Error>) -> Result<Option<T>, ClipboardError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(ClipboardError::ReadFailed(e.to_string())),
    }
}

fn read_text(clipboard: &mut arboard::Clipboard) -> Result<Option<Vec<u8>>, ClipboardError> {
    Ok(optional(clipboard.get_text())?.map(String::into_bytes))
}

fn read_pixels(clipboard: &mut arboard::Clipboard) -> Result<Option<RgbaPixels>, ClipboardError> {
    Ok(optional(clipboard.get_image())?.map(|image| RgbaPixels {
        width: image.width,
        height: image.height,
        bytes: image.bytes.into_owned(),
    }))
}

fn read_html(clipboard: &mut arboard::Clipboard) -> Result<Option<Vec<u8>>, ClipboardError> {
    Ok(optional(clipboard.get().html())?.map(String::into_bytes))
}

fn read_representation(
    clipboard: &mut arboard::Clipboard,
    repr: Representation,
) -> Result<Option<Vec<u8>>, ClipboardError> {
    match repr {
        Representation::PlainText => read_text(clipboard),
        Representation::Image => read_pixels(clipboard)?
            .map(|pixels| encode_png(&pixels))
            .transpose(),
        // arboard exposes no URL flavour; links arrive as plain text
        Representation::Url => Ok(None),
        Representation::RichText => read_html(clipboard),
    }
}

/// Fingerprint input for the highest-priority representation present.
/// Images are fingerprinted on raw pixels to avoid a PNG encode per poll.
fn top_representation(
    clipboard: &mut arboard::Clipboard,
) -> Result<Option<(Representation, Vec<u8>)>, ClipboardError> {
    if let Some(text) = read_text(clipboard)? {
        return Ok(Some((Representation::PlainText, text)));
    }
    if let Some(pixels) = read_pixels(clipboard)? {
        let mut bytes = pixels.bytes;
        bytes.extend_from_slice(&(pixels.width as u64).to_le_bytes());
        bytes.extend_from_slice(&(pixels.height as u64).to_le_bytes());
        return Ok(Some((Representation::Image, bytes)));
    }
    Ok(read_html(clipboard)?.map(|html| (Representation::RichText, html)))
}

#[async_trait]
impl ClipboardPort for ArboardClipboard {
    async fn change_token(&self) -> Result<u64, ClipboardError> {
        let generation = Arc::clone(&self.generation);

        Self::with_clipboard(move |clipboard| {
            let top = top_representation(clipboard)?;
            let mut counter = generation
                .lock()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            Ok(counter.observe(top.as_ref().map(|(repr, bytes)| (*repr, bytes.as_slice()))))
        })
        .await
    }

    async fn read(&self, repr: Representation) -> Result<Option<Vec<u8>>, ClipboardError> {
        Self::with_clipboard(move |clipboard| read_representation(clipboard, repr)).await
    }

    async fn clear(&self) -> Result<(), ClipboardError> {
        Self::with_clipboard(|clipboard| {
            clipboard
                .clear()
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
        })
        .await
    }

    async fn write(&self, repr: Representation, data: &[u8]) -> Result<(), ClipboardError> {
        let data = data.to_vec();

        Self::with_clipboard(move |clipboard| {
            let result = match repr {
                Representation::PlainText | Representation::Url => {
                    let text = String::from_utf8(data)
                        .map_err(|e| ClipboardError::Encoding(e.to_string()))?;
                    clipboard.set_text(text)
                }
                Representation::Image => {
                    let pixels = decode_png(&data)?;
                    clipboard.set_image(arboard::ImageData {
                        width: pixels.width,
                        height: pixels.height,
                        bytes: Cow::Owned(pixels.bytes),
                    })
                }
                Representation::RichText => {
                    let html = String::from_utf8(data)
                        .map_err(|e| ClipboardError::Encoding(e.to_string()))?;
                    clipboard.set_html(html, None)
                }
            };
            result.map_err(|e| ClipboardError::WriteFailed(e.to_string()))
        })
        .await
    }
}
