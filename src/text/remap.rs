//! Anchor remapping across a batch of remote edits.
//!
//! Each tracked anchor (the cursor and, when present, both selection
//! endpoints) is a scalar-value offset plus a status. Every effective edit
//! in a batch moves the offset with [`transform_offset`]; the batch as a
//! whole is a left fold of that function over the edits.

use crate::text::convert::ConvertPolicy;
use crate::text::document::Document;
use crate::text::pos::Pos;
use crate::unicode::OffsetUnit;

/// Outcome of remapping one anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RemapStatus {
    /// No edit moved the anchor.
    #[default]
    Unchanged,
    /// Shifted by edits outside it.
    Moved,
    /// The anchor sat inside replaced text and was pinned to the end of
    /// the replacement.
    Clamped,
    /// Selection endpoints collapsed onto each other; the selection was
    /// dropped.
    Invalidated,
}

/// Where an anchor was before and after a batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RemapPoint {
    pub before: Pos,
    pub after: Pos,
    pub status: RemapStatus,
}

/// Reconciliation output of a remote batch.
///
/// `sel_start` and `sel_end` follow the selection's anchor and head
/// respectively, and are `None` when no selection was active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RemapReport {
    pub cursor: RemapPoint,
    pub sel_start: Option<RemapPoint>,
    pub sel_end: Option<RemapPoint>,
}

/// Span of one effective edit in scalar-value offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditSpan {
    pub start: usize,
    pub end: usize,
    pub insert_len: usize,
}

/// Move offset `p` across one edit replacing `[start, end)` with
/// `insert_len` units.
///
/// Returns the new offset and the status this step alone assigns. A span
/// with `start > end` is treated as `[end, start)`.
#[must_use]
pub fn transform_offset(p: usize, span: EditSpan) -> (usize, RemapStatus) {
    let EditSpan {
        start,
        end,
        insert_len,
    } = span;
    let (start, end) = (start.min(end), start.max(end));

    if start == end {
        if p < start || insert_len == 0 {
            return (p, RemapStatus::Unchanged);
        }
        return (p + insert_len, RemapStatus::Moved);
    }
    if p < start {
        return (p, RemapStatus::Unchanged);
    }

    let removed = end - start;
    let unchanged_len = insert_len == removed;
    if p > end {
        let shifted = p - removed + insert_len;
        let status = if unchanged_len {
            RemapStatus::Unchanged
        } else {
            RemapStatus::Moved
        };
        return (shifted, status);
    }
    if p == start || p == end {
        if unchanged_len {
            return (p, RemapStatus::Unchanged);
        }
        // The end boundary follows the replacement; the start boundary
        // stays put.
        let moved = if p == end { start + insert_len } else { p };
        return (moved, RemapStatus::Moved);
    }
    (start + insert_len, RemapStatus::Clamped)
}

/// A tracked anchor: original position, current offset, accumulated status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Anchor {
    origin: Pos,
    offset: usize,
    status: RemapStatus,
}

impl Anchor {
    pub(crate) fn new(origin: Pos, offset: usize) -> Self {
        Self {
            origin,
            offset,
            status: RemapStatus::Unchanged,
        }
    }

    /// Apply one edit. `Clamped` is sticky for the rest of the batch.
    pub(crate) fn transform(&mut self, span: EditSpan) {
        let (offset, step) = transform_offset(self.offset, span);
        self.offset = offset;
        self.status = match (self.status, step) {
            (RemapStatus::Clamped, _) | (_, RemapStatus::Clamped) => RemapStatus::Clamped,
            (RemapStatus::Moved, _) | (_, RemapStatus::Moved) => RemapStatus::Moved,
            (status, _) => status,
        };
    }

    /// Resolve against the post-batch document.
    pub(crate) fn resolve(&self, document: &Document) -> RemapPoint {
        let unit = OffsetUnit::Rune;
        let (after, mut status) =
            match document.pos_from_offset(self.offset, unit, ConvertPolicy::STRICT) {
                Ok(pos) => (pos, self.status),
                Err(_) => {
                    let pos = document
                        .pos_from_offset(self.offset, unit, ConvertPolicy::CLAMP)
                        .unwrap_or_else(|_| document.pos_at_or_before(self.offset, unit));
                    (pos, RemapStatus::Clamped)
                }
            };
        if status == RemapStatus::Unchanged && after != self.origin {
            status = RemapStatus::Moved;
        }
        RemapPoint {
            before: self.origin,
            after,
            status,
        }
    }
}
