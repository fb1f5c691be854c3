//! Fuzz target for remote batch application.
//!
//! A batch must either commit exactly once or leave the buffer untouched.

#![no_main]

use arbitrary::Arbitrary;
use editbuf::{
    Buffer, ClampMode, Pos, Range, RemoteApplyOptions, RemoteEdit, VersionMismatchMode,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    cursor: (u8, u8),
    selection: Option<(u8, u8)>,
    edits: Vec<(u8, u8, u8, u8, String)>,
    clamp: bool,
    stale: bool,
    force: bool,
}

fn pos((row, col): (u8, u8)) -> Pos {
    Pos::new(usize::from(row), usize::from(col))
}

fuzz_target!(|input: Input| {
    let mut buf = Buffer::with_text(&input.text);
    buf.set_cursor(pos(input.cursor));
    if let Some(anchor) = input.selection {
        buf.set_selection(pos(anchor), pos(input.cursor));
    }

    let edits: Vec<RemoteEdit> = input
        .edits
        .iter()
        .take(32)
        .enumerate()
        .map(|(i, (sr, sc, er, ec, text))| {
            RemoteEdit::new(
                Range::new(pos((*sr, *sc)), pos((*er, *ec))),
                text.clone(),
                i.to_string(),
            )
        })
        .collect();

    let mut opts = RemoteApplyOptions::at_version(buf.version() + u64::from(input.stale));
    if input.clamp {
        opts = opts.with_clamp(ClampMode::Clamp);
    }
    if input.force {
        opts = opts.with_mismatch(VersionMismatchMode::ForceApply);
    }

    let before = (buf.text(), buf.cursor(), buf.selection(), buf.version());
    match buf.apply_remote(&edits, &opts) {
        Ok(outcome) if outcome.is_applied() => {
            assert_eq!(buf.version(), before.3 + 1);
            let report = outcome.report().copied().unwrap_or_default();
            assert_eq!(report.cursor.after, buf.cursor());
            assert!(buf.undo());
            assert_eq!(buf.text(), before.0);
        }
        _ => {
            assert_eq!((buf.text(), buf.cursor(), buf.selection(), buf.version()), before);
        }
    }
});
