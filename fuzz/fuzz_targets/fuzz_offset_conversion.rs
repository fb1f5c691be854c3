//! Fuzz target for offset conversion.
//!
//! Any offset that resolves to a position must convert back to itself.

#![no_main]

use editbuf::{Buffer, ConvertPolicy, OffsetUnit};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (String, u16)| {
    let (text, offset) = input;
    let buf = Buffer::with_text(&text);
    let offset = usize::from(offset);

    for unit in OffsetUnit::ALL {
        if let Ok(pos) = buf.pos_from_offset(offset, unit, ConvertPolicy::STRICT) {
            assert_eq!(
                buf.offset_from_pos(pos, unit, ConvertPolicy::STRICT),
                Ok(offset)
            );
        }
        let clamped = buf.pos_from_offset(offset, unit, ConvertPolicy::CLAMP);
        if offset >= buf.len_in(unit) {
            assert_eq!(clamped, Ok(buf.document().end_pos()));
        }
    }
});
