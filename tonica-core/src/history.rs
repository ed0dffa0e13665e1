//! Undo/redo log of note selections.

use tonica_types::PitchSet;

/// Undo/redo log over the note selection.
///
/// A linear list of recorded selections with a cursor at the current one.
/// Starts as a single empty selection. Pushing a new selection drops every
/// entry after the cursor; pushing the selection already at the cursor does
/// nothing. While suppressed (during an undo/redo replay) pushes are ignored,
/// so replaying history never records new entries.
#[derive(Debug, Clone)]
pub struct SelectionHistory {
    entries: Vec<PitchSet>,
    cursor: usize,
    /// Oldest entries are dropped beyond this length. `None` = unbounded.
    max_entries: Option<usize>,
    suppressed: bool,
}

impl Default for SelectionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionHistory {
    pub fn new() -> Self {
        Self {
            entries: vec![PitchSet::empty()],
            cursor: 0,
            max_entries: None,
            suppressed: false,
        }
    }

    /// History that keeps at most `max_entries` selections (at least one).
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries.max(1)),
            ..Self::new()
        }
    }

    /// Record `set` as the current selection. Returns whether an entry was
    /// added.
    pub fn push(&mut self, set: PitchSet) -> bool {
        if self.suppressed || self.entries[self.cursor] == set {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(set);

        if let Some(max) = self.max_entries {
            if self.entries.len() > max {
                let excess = self.entries.len() - max;
                self.entries.drain(..excess);
            }
        }
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Step back one entry. Returns the selection now current, or `None` at
    /// the earliest entry.
    pub fn undo(&mut self) -> Option<PitchSet> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor])
    }

    /// Step forward one entry. Returns the selection now current, or `None`
    /// at the latest entry.
    pub fn redo(&mut self) -> Option<PitchSet> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor])
    }

    pub fn current(&self) -> PitchSet {
        self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// While `true`, [`push`](Self::push) is a no-op.
    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    /// Back to the initial single empty entry. The size limit is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.entries.push(PitchSet::empty());
        self.cursor = 0;
        self.suppressed = false;
    }
}
