//! Derived change counter for clipboards without a native one

use sha2::{Digest, Sha256};

use crate::application::ports::Representation;

/// Turns successive clipboard fingerprints into a monotonic generation.
///
/// The generation increments whenever the fingerprint differs from the
/// previous observation. The first observation is generation 1.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    last: Option<[u8; 32]>,
    generation: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the highest-priority representation currently present
    /// (None for an empty clipboard) and return the generation.
    pub fn observe(&mut self, top: Option<(Representation, &[u8])>) -> u64 {
        let fingerprint = Self::fingerprint(top);
        if self.last != Some(fingerprint) {
            self.last = Some(fingerprint);
            self.generation += 1;
        }
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn fingerprint(top: Option<(Representation, &[u8])>) -> [u8; 32] {
        let mut hasher = Sha256::new();
        match top {
            Some((repr, bytes)) => {
                hasher.update(repr.to_string().as_bytes());
                hasher.update([0u8]);
                hasher.update(bytes);
            }
            None => hasher.update(b"empty"),
        }
        hasher.finalize().into()
    }
}
