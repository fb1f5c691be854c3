//! Event and log callback system.
//!
//! The engine never writes to stdout/stderr. Hosts that want diagnostics
//! install a log callback; hosts that want change notifications without
//! polling [`Buffer::version`](crate::Buffer::version) install an event
//! callback.

use std::sync::{Mutex, MutexGuard, OnceLock};

/// Log level for debug callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Event name published when a buffer commits a change.
pub const CHANGE_EVENT: &str = "buffer.change";

type EventCallback = Box<dyn Fn(&str, &str) + Send + Sync + 'static>;
type LogCallback = Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>;

fn event_callback() -> &'static Mutex<Option<EventCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<EventCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

fn log_callback() -> &'static Mutex<Option<LogCallback>> {
    static CALLBACK: OnceLock<Mutex<Option<LogCallback>>> = OnceLock::new();
    CALLBACK.get_or_init(|| Mutex::new(None))
}

// A callback that panicked must not disable logging for the whole process.
fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Set the global event callback.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    *lock(event_callback()) = Some(Box::new(callback));
}

/// Emit an event to the registered callback.
pub fn emit_event(name: &str, data: &str) {
    if let Some(callback) = lock(event_callback()).as_ref() {
        callback(name, data);
    }
}

/// Set the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    *lock(log_callback()) = Some(Box::new(callback));
}

/// Emit a log event.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Some(callback) = lock(log_callback()).as_ref() {
        callback(level, message);
    }
}

/// Emit a log event whose message is only built when a callback is installed.
pub(crate) fn emit_log_with<F>(level: LogLevel, message: F)
where
    F: FnOnce() -> String,
{
    if let Some(callback) = lock(log_callback()).as_ref() {
        callback(level, &message());
    }
}

/// Remove both callbacks.
pub fn clear_callbacks() {
    *lock(event_callback()) = None;
    *lock(log_callback()) = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Callbacks are process-global; keep every assertion in one test so
    // parallel test threads cannot race on the slots.
    #[test]
    fn test_callbacks() {
        let events = Arc::new(AtomicUsize::new(0));
        let events_clone = Arc::clone(&events);
        set_event_callback(move |name, _data| {
            if name == "test" {
                events_clone.fetch_add(1, Ordering::SeqCst);
            }
        });
        emit_event("test", "{}");
        assert!(events.load(Ordering::SeqCst) >= 1);

        let logs = Arc::new(AtomicUsize::new(0));
        let logs_clone = Arc::clone(&logs);
        set_log_callback(move |level, msg| {
            if level == LogLevel::Warn && msg == "hello" {
                logs_clone.fetch_add(1, Ordering::SeqCst);
            }
        });
        emit_log(LogLevel::Warn, "hello");
        emit_log_with(LogLevel::Warn, || "hello".to_string());
        assert!(logs.load(Ordering::SeqCst) >= 2);

        clear_callbacks();
        let before = logs.load(Ordering::SeqCst);
        emit_log(LogLevel::Warn, "hello");
        assert_eq!(logs.load(Ordering::SeqCst), before);
    }
}
