//! Positions, ranges, and selections in grapheme coordinates.

use std::cmp::Ordering;

/// A position between grapheme clusters on a logical line.
///
/// Ordered lexicographically: row first, then column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    /// Line number (0-indexed).
    pub row: usize,
    /// Grapheme column (0-indexed).
    pub col: usize,
}

impl Pos {
    /// Create a position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The start of the document.
    #[must_use]
    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Clamp into a document with `line_count` lines whose lengths are
    /// reported by `line_len`. A `line_count` below 1 is treated as 1.
    #[must_use]
    pub fn clamp_to<F>(self, line_count: usize, line_len: F) -> Self
    where
        F: Fn(usize) -> usize,
    {
        let row = self.row.min(line_count.max(1) - 1);
        let col = self.col.min(line_len(row));
        Self { row, col }
    }
}

/// Total order on positions.
#[must_use]
pub fn compare_pos(a: Pos, b: Pos) -> Ordering {
    a.cmp(&b)
}

/// A half-open range `[start, end)` of positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Pos,
    pub end: Pos,
}

impl Range {
    /// Create a range. Endpoints are stored as given.
    #[must_use]
    pub const fn new(start: Pos, end: Pos) -> Self {
        Self { start, end }
    }

    /// Zero-width range at `pos`.
    #[must_use]
    pub const fn point(pos: Pos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Range on a single row from `start_col` to `end_col`.
    #[must_use]
    pub const fn on_row(row: usize, start_col: usize, end_col: usize) -> Self {
        Self {
            start: Pos::new(row, start_col),
            end: Pos::new(row, end_col),
        }
    }

    /// Swap endpoints if reversed. Idempotent.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.end < self.start {
            Self {
                start: self.end,
                end: self.start,
            }
        } else {
            self
        }
    }

    /// True if `start == end`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Clamp both endpoints independently.
    #[must_use]
    pub fn clamp_to<F>(self, line_count: usize, line_len: F) -> Self
    where
        F: Fn(usize) -> usize,
    {
        Self {
            start: self.start.clamp_to(line_count, &line_len),
            end: self.end.clamp_to(line_count, &line_len),
        }
    }

    /// True if `pos` lies in `[start, end)` of the normalized range.
    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        let r = self.normalized();
        r.start <= pos && pos < r.end
    }
}

/// A direction-preserving selection.
///
/// `anchor` is where the selection started, `head` is where it was
/// extended to; `head` may precede `anchor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Pos,
    pub head: Pos,
}

impl Selection {
    /// Create a selection, or `None` if it would be empty.
    #[must_use]
    pub fn new(anchor: Pos, head: Pos) -> Option<Self> {
        (anchor != head).then_some(Self { anchor, head })
    }

    /// The selected span with `start <= end`.
    #[must_use]
    pub fn range(&self) -> Range {
        Range::new(self.anchor, self.head).normalized()
    }

    /// True if the head precedes the anchor.
    #[must_use]
    pub fn is_backward(&self) -> bool {
        self.head < self.anchor
    }
}
