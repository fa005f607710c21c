//! In-memory clipboard adapter
//!
//! Deterministic stand-in for the system clipboard. Every write, clear and
//! simulated external copy bumps the change counter, like a real pasteboard.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::application::ports::{ClipboardError, ClipboardPort, Representation};

#[derive(Debug, Default)]
struct MemoryState {
    generation: u64,
    contents: HashMap<Representation, Vec<u8>>,
    failing_writes: HashSet<Representation>,
    token_unavailable: bool,
}

/// In-memory clipboard
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    state: Mutex<MemoryState>,
}

impl MemoryClipboard {
    /// Create an empty clipboard at generation 0
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Simulate another application copying a single representation.
    pub fn set_external(&self, repr: Representation, data: impl Into<Vec<u8>>) {
        self.set_external_many([(repr, data.into())]);
    }

    /// Simulate another application copying several representations of
    /// one logical item at once.
    pub fn set_external_many(
        &self,
        representations: impl IntoIterator<Item = (Representation, Vec<u8>)>,
    ) {
        let mut state = self.state();
        state.contents.clear();
        state.contents.extend(representations);
        state.generation += 1;
    }

    /// Current bytes for a representation
    pub fn contents(&self, repr: Representation) -> Option<Vec<u8>> {
        self.state().contents.get(&repr).cloned()
    }

    /// Representations currently present
    pub fn representations(&self) -> Vec<Representation> {
        let state = self.state();
        Representation::PRIORITY
            .into_iter()
            .filter(|r| state.contents.contains_key(r))
            .collect()
    }

    /// Current change counter
    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    /// Make writes of `repr` fail until `allow_writes` is called
    pub fn reject_writes(&self, repr: Representation) {
        self.state().failing_writes.insert(repr);
    }

    /// Undo `reject_writes`
    pub fn allow_writes(&self, repr: Representation) {
        self.state().failing_writes.remove(&repr);
    }

    /// Make `change_token` fail, or succeed again
    pub fn set_token_unavailable(&self, unavailable: bool) {
        self.state().token_unavailable = unavailable;
    }
}

#[async_trait]
impl ClipboardPort for MemoryClipboard {
    async fn change_token(&self) -> Result<u64, ClipboardError> {
        let state = self.state();
        if state.token_unavailable {
            return Err(ClipboardError::Unavailable(
                "change counter unavailable".to_string(),
            ));
        }
        Ok(state.generation)
    }

    async fn read(&self, repr: Representation) -> Result<Option<Vec<u8>>, ClipboardError> {
        Ok(self.contents(repr))
    }

    async fn clear(&self) -> Result<(), ClipboardError> {
        let mut state = self.state();
        state.contents.clear();
        state.generation += 1;
        Ok(())
    }

    async fn write(&self, repr: Representation, data: &[u8]) -> Result<(), ClipboardError> {
        let mut state = self.state();
        if state.failing_writes.contains(&repr) {
            return Err(ClipboardError::WriteFailed(format!(
                "{} rejected by clipboard",
                repr
            )));
        }
        state.contents.insert(repr, data.to_vec());
        state.generation += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty_at_generation_zero() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.change_token().await.unwrap(), 0);
        assert!(clipboard.representations().is_empty());
    }

    #[tokio::test]
    async fn external_copy_replaces_contents_and_bumps_generation() {
        let clipboard = MemoryClipboard::new();
        clipboard.set_external(Representation::RichText, b"{\\rtf1}".to_vec());
        clipboard.set_external(Representation::PlainText, "hello");

        assert_eq!(clipboard.generation(), 2);
        assert_eq!(clipboard.representations(), vec![Representation::PlainText]);
    }

    #[tokio::test]
    async fn write_and_clear_bump_generation() {
        let clipboard = MemoryClipboard::new();
        clipboard.write(Representation::PlainText, b"x").await.unwrap();
        assert_eq!(clipboard.change_token().await.unwrap(), 1);

        clipboard.clear().await.unwrap();
        assert_eq!(clipboard.change_token().await.unwrap(), 2);
        assert!(clipboard.read(Representation::PlainText).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejected_write_leaves_state_untouched() {
        let clipboard = MemoryClipboard::new();
        clipboard.reject_writes(Representation::Image);

        let result = clipboard.write(Representation::Image, &[1, 2, 3]).await;

        assert!(matches!(result, Err(ClipboardError::WriteFailed(_))));
        assert_eq!(clipboard.generation(), 0);

        clipboard.allow_writes(Representation::Image);
        assert!(clipboard.write(Representation::Image, &[1, 2, 3]).await.is_ok());
    }

    #[tokio::test]
    async fn token_can_be_made_unavailable() {
        let clipboard = MemoryClipboard::new();
        clipboard.set_token_unavailable(true);
        assert!(clipboard.change_token().await.is_err());
        clipboard.set_token_unavailable(false);
        assert!(clipboard.change_token().await.is_ok());
    }
}
