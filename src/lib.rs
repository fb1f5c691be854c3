//! `editbuf` - Grapheme-aware text buffer engine
//!
//! An editable document with cursor, selection, snapshot undo/redo, a
//! monotonic version counter, and reconciliation of remote edit batches.
//! Columns count grapheme clusters; byte, scalar-value, and UTF-16 offsets
//! are derived on demand.

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)] // Allow text::TextEdit etc
#![allow(clippy::missing_errors_doc)] // Errors documented on the main entry points
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::must_use_candidate)] // Accessors are obviously pure
#![allow(clippy::return_self_not_must_use)] // Builders are used by value
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod error;
pub mod event;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use event::{
    CHANGE_EVENT, LogLevel, clear_callbacks, emit_event, emit_log, set_event_callback,
    set_log_callback,
};

// Re-export buffer and edit types
pub use text::{
    AppliedEdit, Buffer, BufferOptions, Change, ChangeSource, Document, Motion, Pos, Range,
    RemoteEdit, Selection, TextEdit,
};

// Re-export conversion and remote reconciliation types
pub use text::{
    Bias, ClampMode, ConvertPolicy, Gap, NewlineMode, RemapPoint, RemapReport, RemapStatus,
    RemoteApplyOptions, RemoteOutcome, VersionMismatchMode,
};
pub use unicode::{OffsetUnit, WidthMethod};
