//! Grapheme-addressed text storage and editing.
//!
//! Positions are `(row, col)` pairs where `col` counts grapheme clusters,
//! so an edit can never split a cluster. Offsets in bytes, scalar values,
//! or UTF-16 code units are available for interop with hosts that count
//! differently.
//!
//! Key types:
//!
//! - [`Buffer`]: Editable document with cursor, selection, undo/redo and a
//!   version counter
//! - [`Document`]: Line-based storage with structural sharing between
//!   snapshots
//! - [`Change`]: Record of one committed transition
//! - [`RemapReport`]: How the cursor and selection moved under a remote batch
//!
//! # Examples
//!
//! ## Local Editing with Undo
//!
//! ```
//! use editbuf::{Buffer, Pos};
//!
//! let mut buf = Buffer::with_text("Hello");
//! buf.set_cursor(Pos::new(0, 5));
//! buf.insert_text(" World");
//! assert_eq!(buf.text(), "Hello World");
//!
//! buf.undo();
//! assert_eq!(buf.text(), "Hello");
//! buf.redo();
//! assert_eq!(buf.text(), "Hello World");
//! ```
//!
//! ## Remote Batches
//!
//! ```
//! use editbuf::{Buffer, Pos, Range, RemapStatus, RemoteApplyOptions, RemoteEdit};
//!
//! let mut buf = Buffer::with_text("abcdefgh");
//! buf.set_cursor(Pos::new(0, 3));
//!
//! let edits = [RemoteEdit::new(Range::on_row(0, 1, 1), "ZZ", "op-1")];
//! let outcome = buf
//!     .apply_remote(&edits, &RemoteApplyOptions::at_version(buf.version()))
//!     .unwrap();
//!
//! let report = outcome.report().unwrap();
//! assert_eq!(report.cursor.after, Pos::new(0, 5));
//! assert_eq!(report.cursor.status, RemapStatus::Moved);
//! assert_eq!(buf.text(), "aZZbcdefgh");
//! ```
//!
//! ## Offset Conversion
//!
//! ```
//! use editbuf::{Buffer, ConvertPolicy, OffsetUnit, Pos};
//!
//! let buf = Buffer::with_text("a😀b");
//! let pos = Pos::new(0, 2);
//! assert_eq!(buf.offset_from_pos(pos, OffsetUnit::Byte, ConvertPolicy::STRICT), Ok(5));
//! assert_eq!(buf.offset_from_pos(pos, OffsetUnit::Rune, ConvertPolicy::STRICT), Ok(2));
//! assert_eq!(buf.offset_from_pos(pos, OffsetUnit::Utf16, ConvertPolicy::STRICT), Ok(3));
//! ```

mod buffer;
mod change;
mod convert;
mod document;
mod history;
mod pos;
mod remap;
mod remote;

pub use buffer::{Buffer, BufferOptions, Motion};
pub use change::{AppliedEdit, Change, ChangeSource, RemoteEdit, TextEdit};
pub use convert::{
    Bias, ClampMode, ConvertPolicy, Gap, NewlineMode, display_col_from_grapheme_col,
    grapheme_col_from_offset, offset_from_grapheme_col,
};
pub use document::{Document, Line};
pub use history::DEFAULT_HISTORY_LIMIT;
pub use pos::{Pos, Range, Selection, compare_pos};
pub use remap::{EditSpan, RemapPoint, RemapReport, RemapStatus, transform_offset};
pub use remote::{RemoteApplyOptions, RemoteOutcome, VersionMismatchMode};
