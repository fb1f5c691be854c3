//! Line-oriented grapheme storage and the single splice primitive.
//!
//! A [`Document`] is an ordered list of lines, each an ordered list of
//! grapheme clusters. Clusters are the atomic unit of addressing: a
//! [`Pos`] column counts clusters, never bytes or scalars. Lines are
//! reference-counted so that history snapshots share every line an edit
//! did not touch.
//!
//! Every text mutation in the crate funnels through
//! [`Document::replace_range`].

use std::sync::Arc;

use crate::text::change::AppliedEdit;
use crate::text::pos::{Pos, Range};
use crate::unicode::graphemes;

/// One grapheme cluster.
pub(crate) type Cluster = Arc<str>;

/// A logical line without its terminating line break.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    clusters: Vec<Cluster>,
}

impl Line {
    fn parse(s: &str) -> Self {
        Self {
            clusters: graphemes(s).map(Arc::from).collect(),
        }
    }

    /// Number of grapheme clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Iterate the clusters in order.
    pub fn clusters(&self) -> impl Iterator<Item = &str> {
        self.clusters.iter().map(AsRef::as_ref)
    }

    /// Cluster at `col`, if any.
    #[must_use]
    pub fn cluster(&self, col: usize) -> Option<&str> {
        self.clusters.get(col).map(AsRef::as_ref)
    }

    /// The line's text.
    #[must_use]
    pub fn text(&self) -> String {
        self.clusters.concat()
    }

    /// Column of the first cluster boundary at or before byte `byte`.
    fn col_at_or_before(&self, byte: usize) -> usize {
        let mut offset = 0;
        for (col, cluster) in self.clusters.iter().enumerate() {
            offset += cluster.len();
            if offset > byte {
                return col;
            }
        }
        self.clusters.len()
    }

    /// Column of the first cluster boundary at or after byte `byte`.
    fn col_at_or_after(&self, byte: usize) -> usize {
        let mut offset = 0;
        for (col, cluster) in self.clusters.iter().enumerate() {
            if offset >= byte {
                return col;
            }
            offset += cluster.len();
        }
        self.clusters.len()
    }

    fn push_text(&self, cols: std::ops::Range<usize>, out: &mut String) {
        for cluster in self.clusters.get(cols).unwrap_or_default() {
            out.push_str(cluster);
        }
    }
}

/// Split text into lines of clusters. `\r\n` and `\n` both end a line.
fn split_lines(text: &str) -> Vec<Line> {
    text.split('\n')
        .map(|piece| Line::parse(piece.strip_suffix('\r').unwrap_or(piece)))
        .collect()
}

/// Document text as a sequence of lines. Always holds at least one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Arc<Line>>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            lines: vec![Arc::new(Line::default())],
        }
    }
}

impl Document {
    /// Create a document from text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: split_lines(text).into_iter().map(Arc::new).collect(),
        }
    }

    /// Number of lines (at least 1).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line at `row`.
    #[must_use]
    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row).map(AsRef::as_ref)
    }

    /// Iterate over all lines.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().map(AsRef::as_ref)
    }

    /// Cluster count of `row`, or 0 past the end.
    #[must_use]
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |line| line.len())
    }

    /// The full text, lines joined by `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            line.push_text(0..line.len(), &mut out);
        }
        out
    }

    /// Position just past the last cluster.
    #[must_use]
    pub fn end_pos(&self) -> Pos {
        let row = self.lines.len().saturating_sub(1);
        Pos::new(row, self.line_len(row))
    }

    /// Range covering the whole document.
    #[must_use]
    pub fn full_range(&self) -> Range {
        Range::new(Pos::zero(), self.end_pos())
    }

    /// Clamp a position into the document.
    #[must_use]
    pub fn clamp_pos(&self, pos: Pos) -> Pos {
        pos.clamp_to(self.line_count(), |row| self.line_len(row))
    }

    /// Clamp a range into the document, then normalize it.
    ///
    /// Clamping each endpoint on its own can reorder them, so ordering is
    /// restored afterwards.
    #[must_use]
    pub fn clamp_range(&self, range: Range) -> Range {
        range
            .clamp_to(self.line_count(), |row| self.line_len(row))
            .normalized()
    }

    /// True if `pos` addresses an existing boundary without clamping.
    #[must_use]
    pub fn contains_pos(&self, pos: Pos) -> bool {
        pos.row < self.line_count() && pos.col <= self.line_len(pos.row)
    }

    /// Text covered by `range` after normalizing and clamping it.
    #[must_use]
    pub fn text_in_range(&self, range: Range) -> String {
        let range = self.clamp_range(range);
        let (start, end) = (range.start, range.end);
        let mut out = String::new();
        for row in start.row..=end.row {
            let Some(line) = self.lines.get(row) else {
                break;
            };
            if row > start.row {
                out.push('\n');
            }
            let from = if row == start.row { start.col } else { 0 };
            let to = if row == end.row { end.col } else { line.len() };
            line.push_text(from..to, &mut out);
        }
        out
    }

    /// Replace `range` with `text`.
    ///
    /// The range is clamped and normalized first, so this never fails.
    /// Returns `None` when nothing changed: an empty range with empty
    /// text, or a replacement identical to the text it would replace.
    /// Otherwise returns the applied edit.
    ///
    /// Lines touched by the splice are re-segmented, so inserted text can
    /// fuse with a neighbouring cluster (a combining mark after a base
    /// letter, say). `range_after` then widens to whole clusters: its start
    /// is the boundary at or before the insertion point and its end the
    /// boundary at or after the end of the inserted text.
    pub fn replace_range(&mut self, range: Range, text: &str) -> Option<AppliedEdit> {
        let range = self.clamp_range(range);
        if range.is_empty() && text.is_empty() {
            return None;
        }

        let insert_text = split_lines(text)
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n");
        let deleted_text = self.text_in_range(range);
        if deleted_text == insert_text {
            return None;
        }

        let (start, end) = (range.start, range.end);
        let mut head = String::new();
        self.lines[start.row].push_text(0..start.col, &mut head);
        let mut tail = String::new();
        let end_line = &self.lines[end.row];
        end_line.push_text(end.col..end_line.len(), &mut tail);

        let pieces: Vec<&str> = insert_text.split('\n').collect();
        let last = pieces.len() - 1;
        let new_lines: Vec<Arc<Line>> = pieces
            .iter()
            .enumerate()
            .map(|(i, piece)| {
                let mut line = String::new();
                if i == 0 {
                    line.push_str(&head);
                }
                line.push_str(piece);
                if i == last {
                    line.push_str(&tail);
                }
                Arc::new(Line::parse(&line))
            })
            .collect();

        let start_col = new_lines[0].col_at_or_before(head.len());
        let end_byte = if last == 0 { head.len() } else { 0 } + pieces[last].len();
        let end_col = new_lines[last].col_at_or_after(end_byte);
        self.lines.splice(start.row..=end.row, new_lines);

        Some(AppliedEdit {
            range_before: range,
            range_after: Range::new(
                Pos::new(start.row, start_col),
                Pos::new(start.row + last, end_col),
            ),
            insert_text,
            deleted_text,
        })
    }
}
