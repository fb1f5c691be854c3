//! Position/offset conversion across byte, scalar-value, and UTF-16 units.

use editbuf::text::{
    display_col_from_grapheme_col, grapheme_col_from_offset, offset_from_grapheme_col,
};
use editbuf::{Bias, Buffer, ClampMode, ConvertPolicy, Error, Gap, OffsetUnit, Pos, WidthMethod};

const COMBINING: &str = "e\u{0301}";
const FAMILY: &str = "👨\u{200D}👩\u{200D}👧";

#[test]
fn unit_specific_entry_points_agree() {
    let buf = Buffer::with_text("x😀\ny");
    let pos = Pos::new(1, 1);
    assert_eq!(buf.byte_offset_from_pos(pos, ConvertPolicy::STRICT), Ok(7));
    assert_eq!(buf.rune_offset_from_pos(pos, ConvertPolicy::STRICT), Ok(4));
    assert_eq!(buf.utf16_offset_from_pos(pos, ConvertPolicy::STRICT), Ok(5));

    assert_eq!(buf.pos_from_byte_offset(7, ConvertPolicy::STRICT), Ok(pos));
    assert_eq!(buf.pos_from_rune_offset(4, ConvertPolicy::STRICT), Ok(pos));
    assert_eq!(buf.pos_from_utf16_offset(5, ConvertPolicy::STRICT), Ok(pos));
}

#[test]
fn newline_counts_as_one_unit() {
    let buf = Buffer::with_text("a\r\nb");
    for unit in OffsetUnit::ALL {
        assert_eq!(buf.len_in(unit), 3, "{unit:?}");
        assert_eq!(
            buf.offset_from_pos(Pos::new(1, 0), unit, ConvertPolicy::STRICT),
            Ok(2),
            "{unit:?}"
        );
    }
}

#[test]
fn line_end_and_next_line_start_are_distinct() {
    let buf = Buffer::with_text("ab\ncd");
    assert_eq!(buf.pos_from_rune_offset(2, ConvertPolicy::STRICT), Ok(Pos::new(0, 2)));
    assert_eq!(buf.pos_from_rune_offset(3, ConvertPolicy::STRICT), Ok(Pos::new(1, 0)));
    assert_eq!(buf.pos_from_rune_offset(5, ConvertPolicy::STRICT), Ok(Pos::new(1, 2)));
}

#[test]
fn mid_cluster_offsets_fail_in_every_mode() {
    let text = format!("a{COMBINING}{FAMILY}");
    let buf = Buffer::with_text(&text);
    // Byte boundaries: a=0, é=1..4, family=4..22.
    for offset in [2, 3, 5, 10, 21] {
        for policy in [ConvertPolicy::STRICT, ConvertPolicy::CLAMP] {
            assert_eq!(
                buf.pos_from_byte_offset(offset, policy),
                Err(Error::MidCluster { offset }),
                "byte {offset} {policy:?}"
            );
        }
    }
    // Scalar-value boundaries: a=0, é=1..3, family=3..8.
    for offset in [2, 4, 5, 6, 7] {
        assert!(buf.pos_from_rune_offset(offset, ConvertPolicy::STRICT).is_err());
    }
    // UTF-16 boundaries: a=0, é=1..3, family=3..11.
    for offset in [2, 4, 8, 10] {
        assert!(buf.pos_from_utf16_offset(offset, ConvertPolicy::STRICT).is_err());
    }
    assert_eq!(buf.pos_from_utf16_offset(11, ConvertPolicy::STRICT), Ok(Pos::new(0, 3)));
}

#[test]
fn out_of_range_depends_on_clamp_mode() {
    let buf = Buffer::with_text("ab\nc");
    assert_eq!(
        buf.pos_from_rune_offset(99, ConvertPolicy::STRICT),
        Err(Error::OffsetOutOfRange { offset: 99, len: 4 })
    );
    assert_eq!(buf.pos_from_rune_offset(99, ConvertPolicy::CLAMP), Ok(Pos::new(1, 1)));

    let past = Pos::new(0, 9);
    assert_eq!(
        buf.rune_offset_from_pos(past, ConvertPolicy::STRICT),
        Err(Error::PositionOutOfRange { row: 0, col: 9 })
    );
    assert_eq!(buf.rune_offset_from_pos(past, ConvertPolicy::CLAMP), Ok(2));
    assert_eq!(
        ConvertPolicy::CLAMP,
        ConvertPolicy::new(ClampMode::Clamp, Default::default())
    );
}

#[test]
fn gaps_carry_bias_through() {
    let buf = Buffer::with_text("h\u{e9}llo");
    let gap = buf
        .gap_from_pos(Pos::new(0, 2), Bias::Right, ConvertPolicy::STRICT)
        .unwrap();
    assert_eq!(gap, Gap::new(2, Bias::Right));
    assert_eq!(buf.pos_from_gap(gap, ConvertPolicy::STRICT), Ok(Pos::new(0, 2)));
    assert_eq!(
        buf.pos_from_gap(Gap::new(2, Bias::Left), ConvertPolicy::STRICT),
        Ok(Pos::new(0, 2))
    );
}

#[test]
fn line_local_helpers() {
    let line = format!("{FAMILY}x");
    assert_eq!(offset_from_grapheme_col(&line, 1, OffsetUnit::Utf16), Some(8));
    assert_eq!(offset_from_grapheme_col(&line, 2, OffsetUnit::Byte), Some(19));
    assert_eq!(offset_from_grapheme_col(&line, 3, OffsetUnit::Byte), None);

    assert_eq!(grapheme_col_from_offset(&line, 8, OffsetUnit::Utf16), Some(1));
    assert_eq!(grapheme_col_from_offset(&line, 9, OffsetUnit::Utf16), Some(2));
    assert_eq!(grapheme_col_from_offset(&line, 4, OffsetUnit::Utf16), None);
    assert_eq!(grapheme_col_from_offset(&line, 10, OffsetUnit::Utf16), None);

    assert_eq!(display_col_from_grapheme_col("😀x", 1, WidthMethod::WcWidth), 2);
    assert_eq!(display_col_from_grapheme_col("a中b", 2, WidthMethod::WcWidth), 3);
    assert_eq!(display_col_from_grapheme_col("\u{b1}b", 1, WidthMethod::Unicode), 2);
}
