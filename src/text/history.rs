//! Bounded snapshot history for undo/redo.

use crate::text::document::Document;
use crate::text::pos::{Pos, Selection};

/// Default maximum number of undo entries to retain.
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Full editor state at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) document: Document,
    pub(crate) cursor: Pos,
    pub(crate) selection: Option<Selection>,
}

/// Undo/redo stacks with bounded depth.
///
/// A limit of 0 disables recording entirely.
#[derive(Clone, Debug)]
pub(crate) struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// Maximum number of entries per stack. Oldest entries are dropped when exceeded.
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_max_depth(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub(crate) fn with_max_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Record the state preceding a new edit. Invalidates redo.
    pub(crate) fn record(&mut self, previous: Snapshot) {
        self.redo_stack.clear();
        self.push_undo(previous);
    }

    /// Push onto the undo stack without touching redo.
    pub(crate) fn push_undo(&mut self, snapshot: Snapshot) {
        if self.max_depth == 0 {
            return;
        }
        self.undo_stack.push(snapshot);
        Self::trim(&mut self.undo_stack, self.max_depth);
    }

    pub(crate) fn pop_undo(&mut self) -> Option<Snapshot> {
        self.undo_stack.pop()
    }

    pub(crate) fn push_redo(&mut self, snapshot: Snapshot) {
        if self.max_depth == 0 {
            return;
        }
        self.redo_stack.push(snapshot);
        Self::trim(&mut self.redo_stack, self.max_depth);
    }

    pub(crate) fn pop_redo(&mut self) -> Option<Snapshot> {
        self.redo_stack.pop()
    }

    pub(crate) fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub(crate) fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub(crate) fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Change the limit, dropping the oldest entries that no longer fit.
    pub(crate) fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        Self::trim(&mut self.undo_stack, max_depth);
        Self::trim(&mut self.redo_stack, max_depth);
    }

    pub(crate) fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn trim(stack: &mut Vec<Snapshot>, max_depth: usize) {
        if stack.len() > max_depth {
            let excess = stack.len() - max_depth;
            stack.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(text: &str) -> Snapshot {
        Snapshot {
            document: Document::from_text(text),
            cursor: Pos::zero(),
            selection: None,
        }
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::default();
        history.record(snap("a"));
        history.push_redo(snap("b"));
        assert!(history.can_redo());
        history.record(snap("c"));
        assert!(!history.can_redo());
        assert_eq!(history.pop_undo().unwrap().document.text(), "c");
    }

    #[test]
    fn test_depth_limit_drops_oldest() {
        let mut history = History::with_max_depth(2);
        history.record(snap("1"));
        history.record(snap("2"));
        history.record(snap("3"));
        assert_eq!(history.pop_undo().unwrap().document.text(), "3");
        assert_eq!(history.pop_undo().unwrap().document.text(), "2");
        assert!(history.pop_undo().is_none());
    }

    #[test]
    fn test_zero_depth_disables_recording() {
        let mut history = History::with_max_depth(0);
        history.record(snap("1"));
        history.push_redo(snap("2"));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_shrinking_limit_trims() {
        let mut history = History::with_max_depth(5);
        for text in ["1", "2", "3", "4"] {
            history.record(snap(text));
        }
        history.set_max_depth(1);
        assert_eq!(history.max_depth(), 1);
        assert_eq!(history.pop_undo().unwrap().document.text(), "4");
        assert!(!history.can_undo());
    }
}
