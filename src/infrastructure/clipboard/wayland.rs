//! Wayland clipboard adapter using wl-paste / wl-copy

use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{ClipboardError, ClipboardPort, Representation};

use super::generation::GenerationCounter;

const PLAIN_TEXT_TYPES: &[&str] = &["text/plain;charset=utf-8", "text/plain", "UTF8_STRING"];
const IMAGE_TYPES: &[&str] = &["image/png"];
const URL_TYPES: &[&str] = &["text/uri-list"];
const RICH_TEXT_TYPES: &[&str] = &["text/html"];

/// MIME types accepted for a representation, preferred first.
///
/// Writes always use the first entry. Every entry of a list must carry the
/// same payload format, or an exact restore would relabel the bytes.
fn mime_types(repr: Representation) -> &'static [&'static str] {
    match repr {
        Representation::PlainText => PLAIN_TEXT_TYPES,
        Representation::Image => IMAGE_TYPES,
        Representation::Url => URL_TYPES,
        Representation::RichText => RICH_TEXT_TYPES,
    }
}

/// First offered MIME type that maps to `repr`
fn select_mime<'a>(offered: &'a [String], repr: Representation) -> Option<&'a str> {
    mime_types(repr)
        .iter()
        .find_map(|wanted| offered.iter().find(|o| o.as_str() == *wanted))
        .map(String::as_str)
}

fn spawn_error(tool: &str, e: std::io::Error) -> ClipboardError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ClipboardError::ToolNotFound(tool.to_string())
    } else {
        ClipboardError::Unavailable(e.to_string())
    }
}

/// Wayland clipboard adapter using wl-clipboard
pub struct WaylandClipboard {
    generation: Mutex<GenerationCounter>,
}

impl WaylandClipboard {
    /// Create a new Wayland clipboard adapter
    pub fn new() -> Self {
        Self {
            generation: Mutex::new(GenerationCounter::new()),
        }
    }

    /// MIME types currently offered. An empty clipboard offers none.
    async fn offered_types(&self) -> Result<Vec<String>, ClipboardError> {
        let output = Command::new("wl-paste")
            .arg("--list-types")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| spawn_error("wl-paste", e))?;

        // wl-paste exits non-zero when nothing is copied
        if !output.status.success() {
            return Ok(Vec::new());
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    async fn paste(&self, mime: &str) -> Result<Vec<u8>, ClipboardError> {
        let output = Command::new("wl-paste")
            .args(["--no-newline", "--type", mime])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| spawn_error("wl-paste", e))?;

        if !output.status.success() {
            return Err(ClipboardError::ReadFailed(format!(
                "wl-paste exited with status: {}",
                output.status
            )));
        }

        Ok(output.stdout)
    }

    async fn top_representation(&self) -> Result<Option<(Representation, Vec<u8>)>, ClipboardError> {
        let offered = self.offered_types().await?;
        for repr in Representation::PRIORITY {
            if let Some(mime) = select_mime(&offered, repr) {
                let bytes = self.paste(mime).await?;
                return Ok(Some((repr, bytes)));
            }
        }
        Ok(None)
    }
}

impl Default for WaylandClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardPort for WaylandClipboard {
    async fn change_token(&self) -> Result<u64, ClipboardError> {
        let top = self.top_representation().await?;
        let mut counter = self
            .generation
            .lock()
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(counter.observe(top.as_ref().map(|(repr, bytes)| (*repr, bytes.as_slice()))))
    }

    async fn read(&self, repr: Representation) -> Result<Option<Vec<u8>>, ClipboardError> {
        let offered = self.offered_types().await?;
        match select_mime(&offered, repr) {
            Some(mime) => self.paste(mime).await.map(Some),
            None => Ok(None),
        }
    }

    async fn clear(&self) -> Result<(), ClipboardError> {
        let status = Command::new("wl-copy")
            .arg("--clear")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| spawn_error("wl-copy", e))?;

        if !status.success() {
            return Err(ClipboardError::WriteFailed(format!(
                "wl-copy --clear exited with status: {}",
                status
            )));
        }

        Ok(())
    }

    async fn write(&self, repr: Representation, data: &[u8]) -> Result<(), ClipboardError> {
        let mime = mime_types(repr)[0];

        let mut child = Command::new("wl-copy")
            .args(["--type", mime])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| spawn_error("wl-copy", e))?;

        // Write data to stdin, then close it so wl-copy takes ownership
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(data)
                .await
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        }

        // Wait for process to complete
        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;

        if !status.success() {
            return Err(ClipboardError::WriteFailed(format!(
                "wl-copy exited with status: {}",
                status
            )));
        }

        Ok(())
    }
}
