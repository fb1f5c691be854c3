//! Grapheme cluster iteration, classification, and unit widths.

use unicode_segmentation::UnicodeSegmentation;

/// Linear unit system used when measuring text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OffsetUnit {
    /// UTF-8 bytes.
    Byte,
    /// Unicode scalar values (`char`s).
    #[default]
    Rune,
    /// UTF-16 code units (LSP, JavaScript hosts).
    Utf16,
}

impl OffsetUnit {
    /// All unit systems, in declaration order.
    pub const ALL: [Self; 3] = [Self::Byte, Self::Rune, Self::Utf16];
}

/// Coarse classification of a grapheme cluster, used by word motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphemeClass {
    Whitespace,
    Punctuation,
    Word,
}

/// Iterator over grapheme clusters in a string.
pub struct GraphemeIterator<'a> {
    inner: unicode_segmentation::Graphemes<'a>,
}

impl<'a> Iterator for GraphemeIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Iterate over extended grapheme clusters in a string.
#[must_use]
pub fn graphemes(s: &str) -> GraphemeIterator<'_> {
    GraphemeIterator {
        inner: s.graphemes(true),
    }
}

/// Length of `s` in the given unit system.
#[inline]
#[must_use]
pub fn unit_len(s: &str, unit: OffsetUnit) -> usize {
    match unit {
        OffsetUnit::Byte => s.len(),
        OffsetUnit::Rune if s.is_ascii() => s.len(),
        OffsetUnit::Rune => s.chars().count(),
        OffsetUnit::Utf16 if s.is_ascii() => s.len(),
        OffsetUnit::Utf16 => s.chars().map(char::len_utf16).sum(),
    }
}

/// Classify a cluster by its leading scalar.
///
/// Combining marks and emoji modifiers never lead a cluster, so the base
/// character decides.
#[must_use]
pub fn classify(grapheme: &str) -> GraphemeClass {
    match grapheme.chars().next() {
        None => GraphemeClass::Whitespace,
        Some(c) if c.is_whitespace() => GraphemeClass::Whitespace,
        Some(c) if c.is_alphanumeric() || c == '_' => GraphemeClass::Word,
        Some(c) if c.is_ascii_punctuation() => GraphemeClass::Punctuation,
        // Non-ASCII symbols (emoji, CJK punctuation) behave as their own words
        // unless they are general punctuation.
        Some(c) if is_general_punctuation(c) => GraphemeClass::Punctuation,
        Some(_) => GraphemeClass::Word,
    }
}

/// True if the cluster is whitespace.
#[must_use]
pub fn is_whitespace(grapheme: &str) -> bool {
    classify(grapheme) == GraphemeClass::Whitespace
}

/// True if the cluster is punctuation.
#[must_use]
pub fn is_punctuation(grapheme: &str) -> bool {
    classify(grapheme) == GraphemeClass::Punctuation
}

fn is_general_punctuation(c: char) -> bool {
    matches!(c,
        '\u{2010}'..='\u{2027}'
        | '\u{2030}'..='\u{205E}'
        | '\u{3000}'..='\u{303F}'
        | '\u{00A1}' | '\u{00A7}' | '\u{00AB}' | '\u{00B6}' | '\u{00B7}' | '\u{00BB}' | '\u{00BF}'
    )
}

/// True if `s` is exactly one grapheme cluster.
#[must_use]
pub fn is_single_grapheme(s: &str) -> bool {
    let mut iter = s.graphemes(true);
    iter.next().is_some() && iter.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphemes_ascii() {
        let g: Vec<_> = graphemes("hello").collect();
        assert_eq!(g, vec!["h", "e", "l", "l", "o"]);
    }

    #[test]
    fn test_graphemes_emoji() {
        // Family emoji (ZWJ sequence)
        assert_eq!(graphemes("👨‍👩‍👧").count(), 1);
        assert_eq!(graphemes("a👨‍👩‍👧b").count(), 3);
    }

    #[test]
    fn test_graphemes_combining() {
        // e + combining acute accent
        assert_eq!(graphemes("e\u{0301}").count(), 1);
        assert!(is_single_grapheme("e\u{0301}"));
        assert!(!is_single_grapheme("ab"));
        assert!(!is_single_grapheme(""));
    }

    #[test]
    fn test_unit_len() {
        let s = "é😀";
        assert_eq!(unit_len(s, OffsetUnit::Byte), 2 + 4);
        assert_eq!(unit_len(s, OffsetUnit::Rune), 2);
        assert_eq!(unit_len(s, OffsetUnit::Utf16), 1 + 2);

        let combining = "e\u{0301}";
        assert_eq!(unit_len(combining, OffsetUnit::Byte), 3);
        assert_eq!(unit_len(combining, OffsetUnit::Rune), 2);
        assert_eq!(unit_len(combining, OffsetUnit::Utf16), 2);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(" "), GraphemeClass::Whitespace);
        assert_eq!(classify("\t"), GraphemeClass::Whitespace);
        assert_eq!(classify("a"), GraphemeClass::Word);
        assert_eq!(classify("_"), GraphemeClass::Word);
        assert_eq!(classify("e\u{0301}"), GraphemeClass::Word);
        assert_eq!(classify("."), GraphemeClass::Punctuation);
        assert_eq!(classify("\u{2014}"), GraphemeClass::Punctuation);
        assert!(is_whitespace(" "));
        assert!(is_punctuation(","));
    }
}
