//! Edit instructions and committed change records.

use crate::text::pos::{Pos, Range, Selection};

/// A local replacement instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range,
    pub text: String,
}

impl TextEdit {
    /// Replace `range` with `text`.
    #[must_use]
    pub fn new(range: Range, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    /// Insert `text` at `pos`.
    #[must_use]
    pub fn insert(pos: Pos, text: impl Into<String>) -> Self {
        Self::new(Range::point(pos), text)
    }

    /// Delete `range`.
    #[must_use]
    pub fn delete(range: Range) -> Self {
        Self::new(range, String::new())
    }
}

/// A replacement instruction received from another replica.
///
/// `op_id` is carried through untouched; the buffer never interprets it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteEdit {
    pub range: Range,
    pub text: String,
    pub op_id: String,
}

impl RemoteEdit {
    #[must_use]
    pub fn new(range: Range, text: impl Into<String>, op_id: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
            op_id: op_id.into(),
        }
    }
}

/// One effective replacement inside a committed [`Change`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedEdit {
    /// Replaced span, normalized and clamped, in pre-edit coordinates.
    pub range_before: Range,
    /// Span covered by the inserted text, in post-edit coordinates.
    pub range_after: Range,
    /// Inserted text with line breaks normalized to `\n`.
    pub insert_text: String,
    /// Text that occupied `range_before`.
    pub deleted_text: String,
}

/// Origin of a committed change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeSource {
    Local,
    Remote,
}

impl ChangeSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

/// Record of one committed transaction.
///
/// Exactly one `Change` is produced per committed edit transaction; cursor
/// and selection moves bump the version without one. Edits are listed in
/// application order; each edit's `range_before` is expressed against the
/// document as left by the edits before it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Change {
    pub source: ChangeSource,
    pub version_before: u64,
    pub version_after: u64,
    pub cursor_before: Pos,
    pub cursor_after: Pos,
    pub selection_before: Option<Selection>,
    pub selection_after: Option<Selection>,
    pub edits: Vec<AppliedEdit>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_edit_constructors() {
        let insert = TextEdit::insert(Pos::new(1, 2), "x");
        assert!(insert.range.is_empty());
        assert_eq!(insert.text, "x");

        let delete = TextEdit::delete(Range::on_row(0, 1, 3));
        assert!(delete.text.is_empty());
        assert_eq!(delete.range.end, Pos::new(0, 3));
    }

    #[test]
    fn test_remote_edit_keeps_op_id() {
        let edit = RemoteEdit::new(Range::on_row(0, 0, 1), "y", "site-a:17");
        assert_eq!(edit.op_id, "site-a:17");
    }

    #[test]
    fn test_source_names() {
        assert_eq!(ChangeSource::Local.as_str(), "local");
        assert_eq!(ChangeSource::Remote.as_str(), "remote");
    }
}
