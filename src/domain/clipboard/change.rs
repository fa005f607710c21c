//! Clipboard change detection

/// Tracks the last observed clipboard change token.
///
/// A fresh detector has seen nothing, so the first token it is shown always
/// counts as a change, whatever its value. This is what lets the startup
/// pass capture content that was already on the clipboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeDetector {
    last_seen: Option<u64>,
}

impl ChangeDetector {
    /// Create a detector that has not observed any token yet
    pub fn new() -> Self {
        Self { last_seen: None }
    }

    /// Create a detector that already considers `token` observed
    pub fn seeded(token: u64) -> Self {
        Self {
            last_seen: Some(token),
        }
    }

    /// Returns true iff `current` differs from the last observed token.
    /// Always records `current` as the new last observed token.
    pub fn has_changed(&mut self, current: u64) -> bool {
        let changed = self.last_seen != Some(current);
        self.last_seen = Some(current);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_same_token_is_unchanged() {
        let mut detector = ChangeDetector::seeded(5);
        assert!(!detector.has_changed(5));
        assert!(!detector.has_changed(5));
    }

    #[test]
    fn new_token_is_changed_and_advances() {
        let mut detector = ChangeDetector::seeded(5);
        assert!(!detector.has_changed(5));
        assert!(detector.has_changed(6));
        assert!(!detector.has_changed(6));
        assert!(detector.has_changed(5));
    }

    #[test]
    fn first_observation_always_counts() {
        let mut detector = ChangeDetector::new();
        assert!(detector.has_changed(0));

        let mut detector = ChangeDetector::new();
        assert!(detector.has_changed(42));
        assert!(!detector.has_changed(42));
    }

    #[test]
    fn lower_token_still_counts_as_change() {
        let mut detector = ChangeDetector::seeded(10);
        assert!(detector.has_changed(3));
    }
}
