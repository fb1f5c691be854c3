//! Conversion between grapheme positions and linear offsets.
//!
//! Three unit systems are supported (see [`OffsetUnit`]): UTF-8 bytes,
//! Unicode scalar values, and UTF-16 code units. In every system the line
//! break between two lines counts as exactly one unit.
//!
//! Conversions walk the document cluster by cluster. A result always lies
//! on a grapheme-cluster boundary; an offset that would split a cluster
//! is rejected with [`Error::MidCluster`] under both clamp modes, because
//! clamping only repairs out-of-range values.

use crate::error::{Error, Result};
use crate::text::document::Document;
use crate::text::pos::Pos;
use crate::unicode::{OffsetUnit, WidthMethod, display_width, graphemes, unit_len};

/// How out-of-range coordinates are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClampMode {
    /// Reject out-of-range input.
    #[default]
    Error,
    /// Saturate out-of-range input to the nearest valid value.
    Clamp,
}

/// How line breaks are counted in linear offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NewlineMode {
    /// A line break is a single `\n`: one unit in every system.
    #[default]
    Lf,
}

/// Conversion policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConvertPolicy {
    pub clamp: ClampMode,
    pub newline: NewlineMode,
}

impl ConvertPolicy {
    /// Reject anything out of range.
    pub const STRICT: Self = Self {
        clamp: ClampMode::Error,
        newline: NewlineMode::Lf,
    };

    /// Saturate out-of-range values.
    pub const CLAMP: Self = Self {
        clamp: ClampMode::Clamp,
        newline: NewlineMode::Lf,
    };

    #[must_use]
    pub const fn new(clamp: ClampMode, newline: NewlineMode) -> Self {
        Self { clamp, newline }
    }

    const fn clamps(self) -> bool {
        matches!(self.clamp, ClampMode::Clamp)
    }
}

/// Which side of an insertion point a [`Gap`] sticks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Bias {
    /// Stick to the text before the gap.
    #[default]
    Left,
    /// Stick to the text after the gap.
    Right,
}

/// A scalar-value offset tagged with a bias.
///
/// Conversions do not consult `bias`; it is carried so that a caller
/// maintaining stable marks can decide which side of a zero-width
/// insertion the mark belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gap {
    pub rune_offset: usize,
    pub bias: Bias,
}

impl Gap {
    #[must_use]
    pub const fn new(rune_offset: usize, bias: Bias) -> Self {
        Self { rune_offset, bias }
    }
}

impl Document {
    /// Length of one line in `unit`, excluding its line break.
    fn line_unit_len(&self, row: usize, unit: OffsetUnit) -> usize {
        self.line(row)
            .map_or(0, |line| line.clusters().map(|c| unit_len(c, unit)).sum())
    }

    /// Document length in `unit`.
    #[must_use]
    pub fn len_in(&self, unit: OffsetUnit) -> usize {
        let breaks = self.line_count() - 1;
        (0..self.line_count())
            .map(|row| self.line_unit_len(row, unit))
            .sum::<usize>()
            + breaks
    }

    /// Linear offset of `pos` in `unit`.
    pub fn offset_from_pos(
        &self,
        pos: Pos,
        unit: OffsetUnit,
        policy: ConvertPolicy,
    ) -> Result<usize> {
        let pos = if self.contains_pos(pos) {
            pos
        } else if policy.clamps() {
            self.clamp_pos(pos)
        } else {
            return Err(Error::PositionOutOfRange {
                row: pos.row,
                col: pos.col,
            });
        };

        let mut offset = 0;
        for row in 0..pos.row {
            offset += self.line_unit_len(row, unit) + 1;
        }
        if let Some(line) = self.line(pos.row) {
            offset += line
                .clusters()
                .take(pos.col)
                .map(|c| unit_len(c, unit))
                .sum::<usize>();
        }
        Ok(offset)
    }

    /// Position at linear `offset` in `unit`.
    pub fn pos_from_offset(
        &self,
        offset: usize,
        unit: OffsetUnit,
        policy: ConvertPolicy,
    ) -> Result<Pos> {
        let len = self.len_in(unit);
        let offset = if offset <= len {
            offset
        } else if policy.clamps() {
            len
        } else {
            return Err(Error::OffsetOutOfRange { offset, len });
        };

        let mut remaining = offset;
        for (row, line) in self.lines().enumerate() {
            let line_len = self.line_unit_len(row, unit);
            if remaining > line_len {
                remaining -= line_len + 1;
                continue;
            }
            let mut acc = 0;
            for (col, cluster) in line.clusters().enumerate() {
                if acc == remaining {
                    return Ok(Pos::new(row, col));
                }
                acc += unit_len(cluster, unit);
                if acc > remaining {
                    return Err(Error::MidCluster { offset });
                }
            }
            return Ok(Pos::new(row, line.len()));
        }
        Ok(self.end_pos())
    }

    /// Position at `offset`, rounding down to the start of a split cluster.
    ///
    /// Total: out-of-range offsets saturate to the end of the document.
    pub(crate) fn pos_at_or_before(&self, offset: usize, unit: OffsetUnit) -> Pos {
        let mut remaining = offset;
        for (row, line) in self.lines().enumerate() {
            let line_len = self.line_unit_len(row, unit);
            if remaining > line_len {
                remaining -= line_len + 1;
                continue;
            }
            let mut acc = 0;
            for (col, cluster) in line.clusters().enumerate() {
                acc += unit_len(cluster, unit);
                if acc > remaining {
                    return Pos::new(row, col);
                }
            }
            return Pos::new(row, line.len());
        }
        self.end_pos()
    }

    /// Gap at `pos` with the given bias.
    pub fn gap_from_pos(&self, pos: Pos, bias: Bias, policy: ConvertPolicy) -> Result<Gap> {
        let rune_offset = self.offset_from_pos(pos, OffsetUnit::Rune, policy)?;
        Ok(Gap { rune_offset, bias })
    }

    /// Position of a gap. The bias does not affect the result.
    pub fn pos_from_gap(&self, gap: Gap, policy: ConvertPolicy) -> Result<Pos> {
        self.pos_from_offset(gap.rune_offset, OffsetUnit::Rune, policy)
    }
}

/// Offset in `unit` of grapheme column `col` within a single line.
///
/// Returns `None` if `col` is past the end of the line.
#[must_use]
pub fn offset_from_grapheme_col(line: &str, col: usize, unit: OffsetUnit) -> Option<usize> {
    let mut offset = 0;
    let mut clusters = graphemes(line);
    for _ in 0..col {
        offset += unit_len(clusters.next()?, unit);
    }
    Some(offset)
}

/// Grapheme column at `offset` (in `unit`) within a single line.
///
/// Returns `None` if the offset is past the end of the line or splits a
/// cluster.
#[must_use]
pub fn grapheme_col_from_offset(line: &str, offset: usize, unit: OffsetUnit) -> Option<usize> {
    let mut acc = 0;
    for (col, cluster) in graphemes(line).enumerate() {
        if acc == offset {
            return Some(col);
        }
        acc += unit_len(cluster, unit);
        if acc > offset {
            return None;
        }
    }
    (acc == offset).then(|| graphemes(line).count())
}

/// Terminal column at which grapheme column `col` starts, measuring
/// ambiguous-width clusters with `method`.
///
/// Columns past the end of the line saturate to the line's width.
#[must_use]
pub fn display_col_from_grapheme_col(line: &str, col: usize, method: WidthMethod) -> usize {
    graphemes(line)
        .take(col)
        .map(|cluster| display_width(cluster, method))
        .sum()
}
