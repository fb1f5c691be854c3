//! Fuzz target for local editing.
//!
//! Drives a buffer through arbitrary edit sequences and checks that the
//! cursor and selection stay inside the document after every call.

#![no_main]

use arbitrary::Arbitrary;
use editbuf::{Buffer, BufferOptions, Motion, Pos, Range, TextEdit};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Insert(String),
    InsertGrapheme(String),
    Newline,
    DeleteBackward,
    DeleteForward,
    DeleteWordBackward,
    DeleteWordForward,
    SetCursor(u8, u8),
    Select(u8, u8, u8, u8),
    Move(u8, bool),
    Apply(Vec<(u8, u8, u8, u8, String)>),
    Undo,
    Redo,
}

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    history_limit: u8,
    ops: Vec<Op>,
}

const MOTIONS: [Motion; 10] = [
    Motion::Left,
    Motion::Right,
    Motion::Up,
    Motion::Down,
    Motion::LineStart,
    Motion::LineEnd,
    Motion::WordLeft,
    Motion::WordRight,
    Motion::DocStart,
    Motion::DocEnd,
];

fn pos(row: u8, col: u8) -> Pos {
    Pos::new(usize::from(row), usize::from(col))
}

fuzz_target!(|input: Input| {
    let options = BufferOptions::default().with_history_limit(usize::from(input.history_limit % 8));
    let mut buf = Buffer::new(&input.text, options);

    for op in input.ops.iter().take(200) {
        let version = buf.version();
        let changed = match op {
            Op::Insert(text) => buf.insert_text(text),
            Op::InsertGrapheme(text) => buf.insert_grapheme(text),
            Op::Newline => buf.insert_newline(),
            Op::DeleteBackward => buf.delete_backward(),
            Op::DeleteForward => buf.delete_forward(),
            Op::DeleteWordBackward => buf.delete_word_backward(),
            Op::DeleteWordForward => buf.delete_word_forward(),
            Op::SetCursor(row, col) => buf.set_cursor(pos(*row, *col)),
            Op::Select(ar, ac, hr, hc) => buf.set_selection(pos(*ar, *ac), pos(*hr, *hc)),
            Op::Move(motion, extend) => {
                buf.move_cursor(MOTIONS[usize::from(*motion) % MOTIONS.len()], *extend)
            }
            Op::Apply(edits) => {
                let edits: Vec<TextEdit> = edits
                    .iter()
                    .map(|(sr, sc, er, ec, text)| {
                        TextEdit::new(Range::new(pos(*sr, *sc), pos(*er, *ec)), text.clone())
                    })
                    .collect();
                buf.apply(&edits)
            }
            Op::Undo => buf.undo(),
            Op::Redo => buf.redo(),
        };

        let expected = if changed { version + 1 } else { version };
        assert_eq!(buf.version(), expected);

        let cursor = buf.cursor();
        assert!(cursor.row < buf.line_count());
        assert!(cursor.col <= buf.line_len(cursor.row).unwrap_or(0));
        if let Some(sel) = buf.selection() {
            assert!(!sel.is_empty());
        }
    }
});
