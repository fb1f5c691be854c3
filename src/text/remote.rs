//! Applying batches of remote edits with cursor/selection reconciliation.
//!
//! A batch is applied sequentially against a working copy of the
//! document. The buffer only adopts the copy once every edit has been
//! validated and applied, so a rejected batch leaves no trace: text,
//! cursor, selection, version, history, and last change are untouched.

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log_with};
use crate::text::buffer::Buffer;
use crate::text::change::{ChangeSource, RemoteEdit};
use crate::text::convert::{ClampMode, ConvertPolicy, NewlineMode};
use crate::text::history::Snapshot;
use crate::text::pos::{Range, Selection};
use crate::text::remap::{Anchor, EditSpan, RemapReport, RemapStatus};
use crate::unicode::{OffsetUnit, unit_len};

/// What to do when a batch's base version differs from the buffer's.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VersionMismatchMode {
    /// Refuse the batch.
    #[default]
    Reject,
    /// Apply regardless; ranges are interpreted against the current state.
    ForceApply,
}

/// Options for [`Buffer::apply_remote`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RemoteApplyOptions {
    /// Version the sender built the batch against.
    pub base_version: u64,
    pub mismatch: VersionMismatchMode,
    /// How out-of-bounds edit ranges are handled.
    pub clamp: ClampMode,
    pub newline: NewlineMode,
}

impl RemoteApplyOptions {
    /// Strict options for a batch built against `base_version`.
    #[must_use]
    pub fn at_version(base_version: u64) -> Self {
        Self {
            base_version,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mismatch(mut self, mismatch: VersionMismatchMode) -> Self {
        self.mismatch = mismatch;
        self
    }

    #[must_use]
    pub fn with_clamp(mut self, clamp: ClampMode) -> Self {
        self.clamp = clamp;
        self
    }

    #[must_use]
    pub fn with_newline(mut self, newline: NewlineMode) -> Self {
        self.newline = newline;
        self
    }

    fn policy(&self) -> ConvertPolicy {
        ConvertPolicy::new(self.clamp, self.newline)
    }
}

/// Successful result of [`Buffer::apply_remote`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// No edit in the batch had an effect; nothing was committed.
    Unchanged,
    /// The batch was committed as one change.
    Applied(RemapReport),
}

impl RemoteOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    #[must_use]
    pub fn report(&self) -> Option<&RemapReport> {
        match self {
            Self::Applied(report) => Some(report),
            Self::Unchanged => None,
        }
    }
}

impl Buffer {
    /// Apply a batch of remote edits as one transaction.
    ///
    /// Edits are applied in order, each against the state left by the
    /// previous one. The cursor and selection endpoints are carried
    /// through every effective edit and reported in a [`RemapReport`].
    ///
    /// # Errors
    ///
    /// - [`Error::VersionMismatch`] if `opts.mismatch` is `Reject` and
    ///   `opts.base_version` is not the current version.
    /// - [`Error::PositionOutOfRange`] if `opts.clamp` is `Error` and an
    ///   edit range falls outside the document at the time it is applied.
    /// - [`Error::AnchorUnresolvable`] if the cursor or selection cannot be
    ///   expressed as an offset.
    ///
    /// On error the buffer is unchanged.
    pub fn apply_remote(
        &mut self,
        edits: &[RemoteEdit],
        opts: &RemoteApplyOptions,
    ) -> Result<RemoteOutcome> {
        if opts.mismatch == VersionMismatchMode::Reject && opts.base_version != self.version() {
            let err = Error::VersionMismatch {
                expected: opts.base_version,
                actual: self.version(),
            };
            emit_log_with(LogLevel::Debug, || format!("apply_remote rejected: {err}"));
            return Err(err);
        }
        let policy = opts.policy();

        let mut cursor = Anchor::new(self.cursor, self.anchor_offset(self.cursor)?);
        let mut selection = match self.selection {
            Some(sel) => Some((
                Anchor::new(sel.anchor, self.anchor_offset(sel.anchor)?),
                Anchor::new(sel.head, self.anchor_offset(sel.head)?),
            )),
            None => None,
        };

        let mut document = self.document.clone();
        let mut applied = Vec::with_capacity(edits.len());
        for (index, edit) in edits.iter().enumerate() {
            let range = match policy.clamp {
                ClampMode::Clamp => document.clamp_range(edit.range),
                ClampMode::Error => {
                    let range = edit.range.normalized();
                    if let Some(bad) = [range.start, range.end]
                        .into_iter()
                        .find(|pos| !document.contains_pos(*pos))
                    {
                        emit_log_with(LogLevel::Debug, || {
                            format!(
                                "apply_remote rejected: edit {index} ({}) out of range at ({}, {})",
                                edit.op_id, bad.row, bad.col
                            )
                        });
                        return Err(Error::PositionOutOfRange {
                            row: bad.row,
                            col: bad.col,
                        });
                    }
                    range
                }
            };
            let start = document.offset_from_pos(range.start, OffsetUnit::Rune, policy)?;
            let end = document.offset_from_pos(range.end, OffsetUnit::Rune, policy)?;
            let Some(done) = document.replace_range(range, &edit.text) else {
                continue;
            };

            let span = EditSpan {
                start,
                end,
                insert_len: unit_len(&done.insert_text, OffsetUnit::Rune),
            };
            cursor.transform(span);
            if let Some((anchor, head)) = selection.as_mut() {
                anchor.transform(span);
                head.transform(span);
            }
            applied.push(done);
        }

        if applied.is_empty() {
            return Ok(RemoteOutcome::Unchanged);
        }

        let cursor = cursor.resolve(&document);
        let (sel_start, sel_end, new_selection) = match selection {
            None => (None, None, None),
            Some((anchor, head)) => {
                let mut anchor = anchor.resolve(&document);
                let mut head = head.resolve(&document);
                if anchor.after == head.after {
                    anchor.status = RemapStatus::Invalidated;
                    head.status = RemapStatus::Invalidated;
                }
                let new_selection = Selection::new(anchor.after, head.after);
                (Some(anchor), Some(head), new_selection)
            }
        };

        let before = Snapshot {
            document: std::mem::replace(&mut self.document, document),
            cursor: self.cursor,
            selection: self.selection,
        };
        self.cursor = cursor.after;
        self.selection = new_selection;
        self.commit(ChangeSource::Remote, before, applied);

        Ok(RemoteOutcome::Applied(RemapReport {
            cursor,
            sel_start,
            sel_end,
        }))
    }
}

/// Convenience for hosts that only need a range back from a report point.
impl RemapReport {
    /// Post-batch selection span, if the selection survived.
    #[must_use]
    pub fn selection_range(&self) -> Option<Range> {
        match (self.sel_start, self.sel_end) {
            (Some(start), Some(end)) if start.status != RemapStatus::Invalidated => {
                Some(Range::new(start.after, end.after).normalized())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::pos::Pos;

    fn edit(start_col: usize, end_col: usize, text: &str) -> RemoteEdit {
        RemoteEdit::new(Range::on_row(0, start_col, end_col), text, "op")
    }

    fn at_current(buf: &Buffer) -> RemoteApplyOptions {
        RemoteApplyOptions::at_version(buf.version())
    }

    fn cursor_at(text: &str, col: usize) -> Buffer {
        let mut buf = Buffer::with_text(text);
        buf.set_cursor(Pos::new(0, col));
        buf
    }

    #[test]
    fn test_edit_after_cursor_is_unchanged() {
        let mut buf = cursor_at("abcdefgh", 1);
        let outcome = buf.apply_remote(&[edit(4, 6, "")], &at_current(&buf)).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.cursor.status, RemapStatus::Unchanged);
        assert_eq!(report.cursor.after, Pos::new(0, 1));
        assert_eq!(buf.text(), "abcdgh");
    }

    #[test]
    fn test_insert_before_cursor_moves_it() {
        let mut buf = cursor_at("abcdefgh", 3);
        let outcome = buf.apply_remote(&[edit(1, 1, "ZZ")], &at_current(&buf)).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.cursor.status, RemapStatus::Moved);
        assert_eq!(report.cursor.after, Pos::new(0, 5));
        assert_eq!(buf.cursor(), Pos::new(0, 5));
    }

    #[test]
    fn test_delete_over_cursor_clamps_it() {
        let mut buf = cursor_at("abcdefgh", 3);
        let outcome = buf.apply_remote(&[edit(2, 5, "")], &at_current(&buf)).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.cursor.status, RemapStatus::Clamped);
        assert_eq!(report.cursor.after, Pos::new(0, 2));
    }

    #[test]
    fn test_collapsed_selection_is_invalidated() {
        let mut buf = Buffer::with_text("abcd");
        buf.set_selection(Pos::new(0, 1), Pos::new(0, 3));
        let outcome = buf.apply_remote(&[edit(0, 4, "")], &at_current(&buf)).unwrap();
        let report = outcome.report().unwrap();
        assert_eq!(report.sel_start.unwrap().status, RemapStatus::Invalidated);
        assert_eq!(report.sel_end.unwrap().status, RemapStatus::Invalidated);
        assert!(report.selection_range().is_none());
        assert!(buf.selection().is_none());
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_surviving_selection_keeps_direction() {
        let mut buf = Buffer::with_text("abcdef");
        buf.set_selection(Pos::new(0, 4), Pos::new(0, 2));
        let outcome = buf.apply_remote(&[edit(0, 0, "xy")], &at_current(&buf)).unwrap();
        let sel = buf.selection_raw().unwrap();
        assert_eq!(sel.anchor, Pos::new(0, 6));
        assert_eq!(sel.head, Pos::new(0, 4));
        assert_eq!(
            outcome.report().unwrap().selection_range(),
            Some(Range::on_row(0, 4, 6))
        );
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let mut buf = cursor_at("abc", 2);
        buf.insert_text("x");
        let err = buf
            .apply_remote(&[edit(0, 1, "")], &RemoteApplyOptions::at_version(0))
            .unwrap_err();
        assert_eq!(
            err,
            Error::VersionMismatch {
                expected: 0,
                actual: 2
            }
        );
        assert_eq!(buf.text(), "abxc");
        assert_eq!(buf.version(), 2);
    }

    #[test]
    fn test_force_apply_ignores_version() {
        let mut buf = Buffer::with_text("abc");
        let opts =
            RemoteApplyOptions::at_version(42).with_mismatch(VersionMismatchMode::ForceApply);
        assert!(buf.apply_remote(&[edit(0, 1, "")], &opts).unwrap().is_applied());
        assert_eq!(buf.text(), "bc");
        assert_eq!(buf.last_change().unwrap().source, ChangeSource::Remote);
    }

    #[test]
    fn test_error_mode_failure_is_atomic() {
        let mut buf = cursor_at("abc", 1);
        let before = buf.clone();
        let edits = [edit(0, 1, "Z"), edit(2, 9, "")];
        let err = buf.apply_remote(&edits, &at_current(&buf)).unwrap_err();
        assert_eq!(err, Error::PositionOutOfRange { row: 0, col: 9 });
        assert_eq!(buf.text(), before.text());
        assert_eq!(buf.cursor(), before.cursor());
        assert_eq!(buf.version(), before.version());
        assert!(!buf.can_undo());
        assert!(buf.last_change().is_none());
    }

    #[test]
    fn test_clamp_mode_repairs_ranges() {
        let mut buf = Buffer::with_text("abc");
        let opts = at_current(&buf).with_clamp(ClampMode::Clamp);
        assert!(buf.apply_remote(&[edit(2, 9, "!")], &opts).unwrap().is_applied());
        assert_eq!(buf.text(), "ab!");
    }

    #[test]
    fn test_all_noop_batch_is_unchanged() {
        let mut buf = Buffer::with_text("abc");
        let outcome = buf
            .apply_remote(&[edit(1, 2, "b"), edit(0, 0, "")], &at_current(&buf))
            .unwrap();
        assert_eq!(outcome, RemoteOutcome::Unchanged);
        assert_eq!(buf.version(), 0);
        assert!(buf.last_change().is_none());
    }

    #[test]
    fn test_batch_is_one_transaction() {
        let mut buf = cursor_at("abcdef", 6);
        let outcome = buf
            .apply_remote(&[edit(0, 0, "1"), edit(7, 7, "2")], &at_current(&buf))
            .unwrap();
        assert!(outcome.is_applied());
        assert_eq!(buf.text(), "1abcdef2");
        assert_eq!(buf.version(), 2);
        assert_eq!(buf.last_change().unwrap().edits.len(), 2);
        // Insertion at the cursor pushes it right.
        assert_eq!(buf.cursor(), Pos::new(0, 8));

        assert!(buf.undo());
        assert_eq!(buf.text(), "abcdef");
        assert_eq!(buf.cursor(), Pos::new(0, 6));
    }
}
