//! Unicode utilities for grapheme handling, unit widths, and display width.

mod grapheme;
mod width;

pub use grapheme::{
    GraphemeClass, GraphemeIterator, OffsetUnit, classify, graphemes, is_punctuation,
    is_single_grapheme, is_whitespace, unit_len,
};
pub use width::{WidthMethod, display_width};
