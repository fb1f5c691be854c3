//! Editable text buffer with cursor, selection, and undo/redo.
//!
//! [`Buffer`] owns a [`Document`] and everything that must stay consistent
//! with it: the cursor, an optional selection, the version counter, the
//! snapshot history, and the last committed [`Change`].
//!
//! Every text-editing call either commits one complete transition (one
//! version bump, one `Change`, at most one history entry) or leaves all of
//! that state exactly as it was. Cursor and selection changes bump the
//! version too, but record neither a `Change` nor history.
//!
//! # Examples
//!
//! ```
//! use editbuf::{Buffer, Pos, Range, TextEdit};
//!
//! let mut buf = Buffer::with_text("abcdef");
//!
//! // Edits in one batch see the results of the edits before them.
//! buf.apply(&[
//!     TextEdit::new(Range::on_row(0, 1, 4), "X"),
//!     TextEdit::new(Range::on_row(0, 1, 3), "YZ"),
//! ]);
//! assert_eq!(buf.text(), "aYZf");
//! assert_eq!(buf.version(), 1);
//! assert_eq!(buf.cursor(), Pos::new(0, 3));
//!
//! buf.undo();
//! assert_eq!(buf.text(), "abcdef");
//! ```

use crate::error::{Error, Result};
use crate::event::{CHANGE_EVENT, LogLevel, emit_event, emit_log_with};
use crate::text::change::{AppliedEdit, Change, ChangeSource, TextEdit};
use crate::text::convert::{Bias, ConvertPolicy, Gap};
use crate::text::document::Document;
use crate::text::history::{DEFAULT_HISTORY_LIMIT, History, Snapshot};
use crate::text::pos::{Pos, Range, Selection};
use crate::unicode::{GraphemeClass, OffsetUnit, classify, is_single_grapheme};

/// Buffer configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferOptions {
    /// Maximum number of undo entries. 0 disables history.
    pub history_limit: usize,
}

impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl BufferOptions {
    #[must_use]
    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }
}

/// Cursor motions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Motion {
    /// One cluster back, wrapping to the end of the previous line.
    Left,
    /// One cluster forward, wrapping to the start of the next line.
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    /// Start of the previous word or punctuation run.
    WordLeft,
    /// End of the next word or punctuation run.
    WordRight,
    DocStart,
    DocEnd,
}

/// Text buffer with editing operations, cursor, and undo/redo.
///
/// `Buffer` is single-threaded: every method runs to completion and
/// there is no internal locking. Hosts that share a buffer across threads
/// wrap it in their own mutex or actor.
#[derive(Clone, Debug)]
pub struct Buffer {
    pub(crate) document: Document,
    pub(crate) cursor: Pos,
    pub(crate) selection: Option<Selection>,
    version: u64,
    pub(crate) history: History,
    last_change: Option<Change>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new("", BufferOptions::default())
    }
}

impl Buffer {
    /// Create a buffer with initial text. The cursor starts at the origin.
    #[must_use]
    pub fn new(text: &str, options: BufferOptions) -> Self {
        Self {
            document: Document::from_text(text),
            cursor: Pos::zero(),
            selection: None,
            version: 0,
            history: History::with_max_depth(options.history_limit),
            last_change: None,
        }
    }

    /// Create a buffer with initial text and default options.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self::new(text, BufferOptions::default())
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> BufferOptions {
        BufferOptions {
            history_limit: self.history.max_depth(),
        }
    }

    /// Current maximum undo depth.
    #[must_use]
    pub fn history_limit(&self) -> usize {
        self.history.max_depth()
    }

    /// Change the maximum undo depth. Oldest entries beyond it are dropped.
    pub fn set_history_limit(&mut self, limit: usize) {
        self.history.set_max_depth(limit);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The full text, lines joined by `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.document.text()
    }

    /// Underlying document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Number of committed transitions since creation, counting cursor and
    /// selection changes as well as edits.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    /// Selected span with `start <= end`, if any.
    #[must_use]
    pub fn selection(&self) -> Option<Range> {
        self.selection.map(|sel| sel.range())
    }

    /// Selection with its direction preserved, if any.
    #[must_use]
    pub fn selection_raw(&self) -> Option<Selection> {
        self.selection
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The most recently committed change, absent until the first mutation.
    #[must_use]
    pub fn last_change(&self) -> Option<&Change> {
        self.last_change.as_ref()
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.document.line_count()
    }

    /// Text of line `row`, without its line break.
    #[must_use]
    pub fn line_text(&self, row: usize) -> Option<String> {
        self.document.line(row).map(|line| line.text())
    }

    /// Grapheme count of line `row`.
    #[must_use]
    pub fn line_len(&self, row: usize) -> Option<usize> {
        self.document.line(row).map(|line| line.len())
    }

    /// Text covered by `range` after normalizing and clamping it.
    #[must_use]
    pub fn text_in_range(&self, range: Range) -> String {
        self.document.text_in_range(range)
    }

    // ------------------------------------------------------------------
    // Cursor and selection
    // ------------------------------------------------------------------

    /// Move the cursor (clamped) and drop the selection.
    pub fn set_cursor(&mut self, pos: Pos) -> bool {
        let pos = self.document.clamp_pos(pos);
        if pos == self.cursor && self.selection.is_none() {
            return false;
        }
        self.cursor = pos;
        self.selection = None;
        self.bump_view();
        true
    }

    /// Select from `anchor` to `head` (both clamped); the cursor follows
    /// `head`. A selection that collapses to a point is cleared.
    pub fn set_selection(&mut self, anchor: Pos, head: Pos) -> bool {
        let anchor = self.document.clamp_pos(anchor);
        let head = self.document.clamp_pos(head);
        let selection = Selection::new(anchor, head);
        if selection == self.selection && head == self.cursor {
            return false;
        }
        self.selection = selection;
        self.cursor = head;
        self.bump_view();
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        if self.selection.take().is_none() {
            return false;
        }
        self.bump_view();
        true
    }

    /// Select the whole document.
    pub fn select_all(&mut self) -> bool {
        self.set_selection(Pos::zero(), self.document.end_pos())
    }

    /// Move the cursor. With `extend`, the selection grows from its
    /// current anchor (or from the old cursor); otherwise it is dropped.
    pub fn move_cursor(&mut self, motion: Motion, extend: bool) -> bool {
        let target = self.motion_target(motion);
        if extend {
            let anchor = self.selection.map_or(self.cursor, |sel| sel.anchor);
            return self.set_selection(anchor, target);
        }
        self.set_cursor(target)
    }

    fn motion_target(&self, motion: Motion) -> Pos {
        let Pos { row, col } = self.cursor;
        let last_row = self.document.line_count() - 1;
        let len = self.document.line_len(row);
        match motion {
            Motion::Left if col > 0 => Pos::new(row, col - 1),
            Motion::Left if row > 0 => Pos::new(row - 1, self.document.line_len(row - 1)),
            Motion::Right if col < len => Pos::new(row, col + 1),
            Motion::Right if row < last_row => Pos::new(row + 1, 0),
            Motion::Up if row > 0 => {
                Pos::new(row - 1, col.min(self.document.line_len(row - 1)))
            }
            Motion::Down if row < last_row => {
                Pos::new(row + 1, col.min(self.document.line_len(row + 1)))
            }
            Motion::LineStart => Pos::new(row, 0),
            Motion::LineEnd => Pos::new(row, len),
            Motion::WordLeft => self.word_left(),
            Motion::WordRight => self.word_right(),
            Motion::DocStart => Pos::zero(),
            Motion::DocEnd => self.document.end_pos(),
            _ => self.cursor,
        }
    }

    fn class_at(&self, row: usize, col: usize) -> GraphemeClass {
        self.document
            .line(row)
            .and_then(|line| line.cluster(col))
            .map_or(GraphemeClass::Whitespace, classify)
    }

    fn word_right(&self) -> Pos {
        let Pos { row, mut col } = self.cursor;
        let len = self.document.line_len(row);
        if col >= len {
            return if row + 1 < self.document.line_count() {
                Pos::new(row + 1, 0)
            } else {
                self.cursor
            };
        }
        while col < len && self.class_at(row, col) == GraphemeClass::Whitespace {
            col += 1;
        }
        if col < len {
            let class = self.class_at(row, col);
            while col < len && self.class_at(row, col) == class {
                col += 1;
            }
        }
        Pos::new(row, col)
    }

    fn word_left(&self) -> Pos {
        let Pos { row, mut col } = self.cursor;
        if col == 0 {
            return if row > 0 {
                Pos::new(row - 1, self.document.line_len(row - 1))
            } else {
                self.cursor
            };
        }
        while col > 0 && self.class_at(row, col - 1) == GraphemeClass::Whitespace {
            col -= 1;
        }
        if col > 0 {
            let class = self.class_at(row, col - 1);
            while col > 0 && self.class_at(row, col - 1) == class {
                col -= 1;
            }
        }
        Pos::new(row, col)
    }

    // ------------------------------------------------------------------
    // Local editing
    // ------------------------------------------------------------------

    /// Replace the selection (or insert at the cursor) with `text`.
    pub fn insert_text(&mut self, text: &str) -> bool {
        self.replace_local(self.edit_target(), text)
    }

    /// Insert exactly one grapheme cluster. Anything else is rejected.
    pub fn insert_grapheme(&mut self, grapheme: &str) -> bool {
        if !is_single_grapheme(grapheme) || grapheme.contains(['\n', '\r']) {
            emit_log_with(LogLevel::Debug, || {
                format!("insert_grapheme rejected {grapheme:?}: not a single cluster")
            });
            return false;
        }
        self.insert_text(grapheme)
    }

    pub fn insert_newline(&mut self) -> bool {
        self.insert_text("\n")
    }

    /// Delete the selection, or the cluster before the cursor, joining
    /// with the previous line at column 0.
    pub fn delete_backward(&mut self) -> bool {
        if let Some(sel) = self.selection {
            return self.replace_local(sel.range(), "");
        }
        let Pos { row, col } = self.cursor;
        let start = if col > 0 {
            Pos::new(row, col - 1)
        } else if row > 0 {
            Pos::new(row - 1, self.document.line_len(row - 1))
        } else {
            return false;
        };
        self.replace_local(Range::new(start, self.cursor), "")
    }

    /// Delete the selection, or the cluster after the cursor, joining
    /// with the next line at the end of a line.
    pub fn delete_forward(&mut self) -> bool {
        if let Some(sel) = self.selection {
            return self.replace_local(sel.range(), "");
        }
        let Pos { row, col } = self.cursor;
        let end = if col < self.document.line_len(row) {
            Pos::new(row, col + 1)
        } else if row + 1 < self.document.line_count() {
            Pos::new(row + 1, 0)
        } else {
            return false;
        };
        self.replace_local(Range::new(self.cursor, end), "")
    }

    pub fn delete_selection(&mut self) -> bool {
        match self.selection {
            Some(sel) => self.replace_local(sel.range(), ""),
            None => false,
        }
    }

    /// Delete the selection, or back to the previous word boundary.
    pub fn delete_word_backward(&mut self) -> bool {
        if self.selection.is_some() {
            return self.delete_selection();
        }
        self.replace_local(Range::new(self.word_left(), self.cursor), "")
    }

    /// Delete the selection, or forward to the next word boundary.
    pub fn delete_word_forward(&mut self) -> bool {
        if self.selection.is_some() {
            return self.delete_selection();
        }
        self.replace_local(Range::new(self.cursor, self.word_right()), "")
    }

    /// Apply `edits` as one transaction.
    ///
    /// Each edit's range is read against the document as left by the
    /// previous edits in the same call, so order matters. Ranges are
    /// normalized and clamped. Ineffective edits are skipped; if none
    /// take effect nothing is committed and `false` is returned.
    /// Otherwise the cursor lands at the end of the last effective edit
    /// and the selection is cleared.
    pub fn apply(&mut self, edits: &[TextEdit]) -> bool {
        let before = self.snapshot();
        let applied: Vec<AppliedEdit> = edits
            .iter()
            .filter_map(|edit| self.document.replace_range(edit.range, &edit.text))
            .collect();
        let Some(last) = applied.last() else {
            return false;
        };
        self.cursor = last.range_after.end;
        self.selection = None;
        self.commit(ChangeSource::Local, before, applied);
        true
    }

    fn edit_target(&self) -> Range {
        self.selection
            .map_or(Range::point(self.cursor), |sel| sel.range())
    }

    fn replace_local(&mut self, range: Range, text: &str) -> bool {
        let before = self.snapshot();
        let Some(edit) = self.document.replace_range(range, text) else {
            return false;
        };
        self.cursor = edit.range_after.end;
        self.selection = None;
        self.commit(ChangeSource::Local, before, vec![edit]);
        true
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Restore the state before the last recorded transaction.
    pub fn undo(&mut self) -> bool {
        let Some(target) = self.history.pop_undo() else {
            return false;
        };
        let current = self.snapshot();
        self.history.push_redo(current.clone());
        self.restore(target, current);
        true
    }

    /// Re-apply the last undone transaction.
    pub fn redo(&mut self) -> bool {
        let Some(target) = self.history.pop_redo() else {
            return false;
        };
        let current = self.snapshot();
        self.history.push_undo(current.clone());
        self.restore(target, current);
        true
    }

    /// Drop all undo and redo entries.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Swap in `target`, describing the switch as one whole-document edit.
    fn restore(&mut self, target: Snapshot, current: Snapshot) {
        self.document = target.document;
        self.cursor = self.document.clamp_pos(target.cursor);
        self.selection = target.selection.and_then(|sel| {
            Selection::new(
                self.document.clamp_pos(sel.anchor),
                self.document.clamp_pos(sel.head),
            )
        });
        let edit = AppliedEdit {
            range_before: current.document.full_range(),
            range_after: self.document.full_range(),
            insert_text: self.document.text(),
            deleted_text: current.document.text(),
        };
        self.publish(
            ChangeSource::Local,
            current.cursor,
            current.selection,
            vec![edit],
        );
    }

    // ------------------------------------------------------------------
    // Commit plumbing
    // ------------------------------------------------------------------

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            document: self.document.clone(),
            cursor: self.cursor,
            selection: self.selection,
        }
    }

    /// Publish a change and record `before` for undo.
    pub(crate) fn commit(
        &mut self,
        source: ChangeSource,
        before: Snapshot,
        edits: Vec<AppliedEdit>,
    ) {
        self.publish(source, before.cursor, before.selection, edits);
        self.history.record(before);
    }

    /// Count a cursor or selection change. The text is untouched, so no
    /// `Change` is stored and history is left alone.
    fn bump_view(&mut self) {
        self.version += 1;
        emit_log_with(LogLevel::Debug, || {
            format!(
                "view changed: version={} cursor=({}, {}) selection={}",
                self.version,
                self.cursor.row,
                self.cursor.col,
                self.selection.is_some()
            )
        });
    }

    /// Bump the version and store the change record. Cursor and selection
    /// must already hold their post-change values.
    fn publish(
        &mut self,
        source: ChangeSource,
        cursor_before: Pos,
        selection_before: Option<Selection>,
        edits: Vec<AppliedEdit>,
    ) {
        let version_before = self.version;
        self.version += 1;
        emit_event(
            CHANGE_EVENT,
            &format!(
                "version={} source={} edits={}",
                self.version,
                source.as_str(),
                edits.len()
            ),
        );
        self.last_change = Some(Change {
            source,
            version_before,
            version_after: self.version,
            cursor_before,
            cursor_after: self.cursor,
            selection_before,
            selection_after: self.selection,
            edits,
        });
    }

    // ------------------------------------------------------------------
    // Offset conversion
    // ------------------------------------------------------------------

    /// Document length in `unit`.
    #[must_use]
    pub fn len_in(&self, unit: OffsetUnit) -> usize {
        self.document.len_in(unit)
    }

    pub fn pos_from_offset(
        &self,
        offset: usize,
        unit: OffsetUnit,
        policy: ConvertPolicy,
    ) -> Result<Pos> {
        self.document.pos_from_offset(offset, unit, policy)
    }

    pub fn offset_from_pos(
        &self,
        pos: Pos,
        unit: OffsetUnit,
        policy: ConvertPolicy,
    ) -> Result<usize> {
        self.document.offset_from_pos(pos, unit, policy)
    }

    pub fn pos_from_byte_offset(&self, offset: usize, policy: ConvertPolicy) -> Result<Pos> {
        self.pos_from_offset(offset, OffsetUnit::Byte, policy)
    }

    pub fn pos_from_rune_offset(&self, offset: usize, policy: ConvertPolicy) -> Result<Pos> {
        self.pos_from_offset(offset, OffsetUnit::Rune, policy)
    }

    pub fn pos_from_utf16_offset(&self, offset: usize, policy: ConvertPolicy) -> Result<Pos> {
        self.pos_from_offset(offset, OffsetUnit::Utf16, policy)
    }

    pub fn byte_offset_from_pos(&self, pos: Pos, policy: ConvertPolicy) -> Result<usize> {
        self.offset_from_pos(pos, OffsetUnit::Byte, policy)
    }

    pub fn rune_offset_from_pos(&self, pos: Pos, policy: ConvertPolicy) -> Result<usize> {
        self.offset_from_pos(pos, OffsetUnit::Rune, policy)
    }

    pub fn utf16_offset_from_pos(&self, pos: Pos, policy: ConvertPolicy) -> Result<usize> {
        self.offset_from_pos(pos, OffsetUnit::Utf16, policy)
    }

    pub fn gap_from_pos(&self, pos: Pos, bias: Bias, policy: ConvertPolicy) -> Result<Gap> {
        self.document.gap_from_pos(pos, bias, policy)
    }

    pub fn pos_from_gap(&self, gap: Gap, policy: ConvertPolicy) -> Result<Pos> {
        self.document.pos_from_gap(gap, policy)
    }

    /// Scalar offset of `pos` as a remap anchor origin.
    pub(crate) fn anchor_offset(&self, pos: Pos) -> Result<usize> {
        self.document
            .offset_from_pos(pos, OffsetUnit::Rune, ConvertPolicy::STRICT)
            .map_err(|err| {
                emit_log_with(LogLevel::Debug, || {
                    format!("anchor at ({}, {}) unresolvable: {err}", pos.row, pos.col)
                });
                Error::AnchorUnresolvable {
                    row: pos.row,
                    col: pos.col,
                }
            })
    }
}
