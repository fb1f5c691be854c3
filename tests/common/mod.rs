//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Once;

use editbuf::{Buffer, LogLevel, Pos, set_log_callback};

/// Install a tracing subscriber and route buffer diagnostics into it.
pub fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        set_log_callback(|level, message| match level {
            LogLevel::Debug => tracing::debug!(target: "editbuf", "{message}"),
            LogLevel::Info => tracing::info!(target: "editbuf", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "editbuf", "{message}"),
            LogLevel::Error => tracing::error!(target: "editbuf", "{message}"),
        });
    });
}

/// Buffer holding `text` with the cursor at `(row, col)`.
pub fn buffer_at(text: &str, row: usize, col: usize) -> Buffer {
    let mut buf = Buffer::with_text(text);
    buf.set_cursor(Pos::new(row, col));
    buf
}
