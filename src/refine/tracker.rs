//! Dedup state for refinement triggers.
//!
//! Owned by the orchestration layer, never by the alignment engine. Keyed by
//! a stable identifier (e.g. a video id) so the same transcript is not
//! auto-refined twice in one session.

use std::collections::HashSet;

/// Tracks which transcripts have already been refined this session.
#[derive(Debug, Clone, Default)]
pub struct RefineTracker {
    seen: HashSet<String>,
}

impl RefineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an identifier as refined. Returns true if it was not seen before.
    pub fn mark(&mut self, id: &str) -> bool {
        self.seen.insert(id.to_string())
    }

    /// Whether this identifier has already been refined.
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Forget everything (e.g. on session reset).
    pub fn reset(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_mark_returns_true_second_false() {
        let mut tracker = RefineTracker::new();
        assert!(tracker.mark("video-1"));
        assert!(!tracker.mark("video-1"));
        assert!(tracker.mark("video-2"));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn contains_reflects_marks() {
        let mut tracker = RefineTracker::new();
        assert!(!tracker.contains("video-1"));
        tracker.mark("video-1");
        assert!(tracker.contains("video-1"));
    }

    #[test]
    fn reset_clears_state() {
        let mut tracker = RefineTracker::new();
        tracker.mark("video-1");
        tracker.reset();
        assert!(tracker.is_empty());
        assert!(tracker.mark("video-1"));
    }
}
