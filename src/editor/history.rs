//! Undo/redo history
//!
//! A bounded list of deep document snapshots plus a cursor. Every
//! undoable mutation records the *resulting* document exactly once;
//! undo/redo move the cursor by one position per call and hand back a
//! deep copy. Recording past the cap evicts the oldest entry.
//!
//! Callers must record at commit granularity, not per keystroke or per
//! drag frame: text edits commit on blur, drag transforms commit once on
//! release. That keeps the stack meaningful and bounded in practice.

use tracing::debug;

use crate::world::GameDesign;

/// Retention bound for history snapshots
pub const MAX_ENTRIES: usize = 50;

/// Snapshot stack with a cursor
///
/// Invariant: once anything has been recorded, `cursor` indexes a valid
/// entry and the live document shown by the editor deep-equals
/// `entries[cursor]` immediately after any record/undo/redo.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<GameDesign>,
    /// Index of the active entry; meaningless while `entries` is empty
    cursor: usize,
}

impl History {
    /// Empty history; call `record` with the loaded document right away
    /// so undo has a defined floor
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
        }
    }

    /// Record a snapshot of the given document
    ///
    /// Discards any redo branch beyond the cursor, appends a deep copy,
    /// and evicts the oldest entry past the retention bound.
    pub fn record(&mut self, design: &GameDesign) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(design.clone());
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > MAX_ENTRIES {
            self.entries.remove(0);
            self.cursor -= 1;
        }

        debug!(entries = self.entries.len(), cursor = self.cursor, "history recorded");
    }

    /// Step back one entry, returning a deep copy of the now-active
    /// snapshot
    ///
    /// No-op at the floor (the first recorded state is never undone
    /// past).
    pub fn undo(&mut self) -> Option<GameDesign> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one entry, returning a deep copy of the now-active
    /// snapshot. No-op at the top.
    pub fn redo(&mut self) -> Option<GameDesign> {
        if self.entries.is_empty() || self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor + 1 < self.entries.len()
    }

    /// Number of retained snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor position, if anything has been recorded
    pub fn cursor(&self) -> Option<usize> {
        (!self.entries.is_empty()).then_some(self.cursor)
    }

    /// The snapshot at the cursor
    pub fn current(&self) -> Option<&GameDesign> {
        self.entries.get(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str) -> GameDesign {
        let mut design = GameDesign::new_2d();
        design.title = title.to_string();
        design
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let d0 = doc("d0");
        let d1 = doc("d1");

        let mut history = History::new();
        history.record(&d0);
        history.record(&d1);

        let back = history.undo().unwrap();
        assert_eq!(back, d0);

        let forward = history.redo().unwrap();
        assert_eq!(forward, d1);
    }

    #[test]
    fn test_undo_has_floor() {
        let mut history = History::new();
        history.record(&doc("initial"));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_record_discards_redo_branch() {
        let d0 = doc("d0");
        let d1 = doc("d1");
        let d2 = doc("d2");

        let mut history = History::new();
        history.record(&d0);
        history.record(&d1);
        history.undo();
        history.record(&d2);

        // No way back into d1
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.entries, vec![d0, d2]);
        assert_eq!(history.cursor, 1);
    }

    #[test]
    fn test_retention_bound_evicts_oldest() {
        let mut history = History::new();
        for i in 0..60 {
            history.record(&doc(&format!("d{}", i)));
        }

        assert_eq!(history.len(), MAX_ENTRIES);
        let cursor = history.cursor().unwrap();
        assert!(cursor < history.len());
        // The floor is now the 11th recorded document
        assert_eq!(history.entries[0].title, "d10");
        assert_eq!(history.current().unwrap().title, "d59");
    }

    #[test]
    fn test_cursor_stays_valid_through_eviction() {
        let mut history = History::new();
        for i in 0..MAX_ENTRIES + 5 {
            history.record(&doc(&format!("d{}", i)));
            let cursor = history.cursor().unwrap();
            assert!(cursor < history.len());
            assert_eq!(
                history.current().unwrap().title,
                format!("d{}", i),
                "live document must equal entries[cursor] after record"
            );
        }
    }

    #[test]
    fn test_moves_are_single_step() {
        let mut history = History::new();
        for i in 0..5 {
            history.record(&doc(&format!("d{}", i)));
        }
        history.undo();
        assert_eq!(history.current().unwrap().title, "d3");
        history.undo();
        assert_eq!(history.current().unwrap().title, "d2");
        history.redo();
        assert_eq!(history.current().unwrap().title, "d3");
    }
}
