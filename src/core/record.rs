//! Log record structure

use super::destination::Destination;
use super::log_level::LogLevel;
use chrono::{DateTime, Local};
use std::cell::Cell;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Maximum rendered message length in bytes. Longer messages are silently
/// truncated at a char boundary at or below this limit.
pub const MAX_MESSAGE_LEN: usize = 512;

// Hashing a ThreadId is cheap but not free; cache it per thread.
thread_local! {
    static THREAD_HASH_CACHE: Cell<Option<u64>> = const { Cell::new(None) };
}

fn current_thread_hash() -> u64 {
    THREAD_HASH_CACHE.with(|cache| match cache.get() {
        Some(hash) => hash,
        None => {
            let mut hasher = DefaultHasher::new();
            std::thread::current().id().hash(&mut hasher);
            let hash = hasher.finish();
            cache.set(Some(hash));
            hash
        }
    })
}

/// Immutable snapshot of everything needed to render one log line.
///
/// Every field is captured at enqueue time; configuration changes made
/// while the record waits in the queue do not affect it.
#[derive(Debug, Clone)]
pub struct Record {
    pub level: LogLevel,
    pub color: Option<colored::Color>,
    pub file: &'static str,
    pub function: &'static str,
    pub line: u32,
    pub pid: u32,
    pub thread_hash: u64,
    pub msg_id: u64,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub template: Arc<str>,
    pub colored: bool,
    pub destination: Destination,
}

impl Record {
    /// Capture a record at the call site.
    ///
    /// `template`, `colored` and `destination` are the caller's settings
    /// snapshot; the timestamp, pid and thread hash are taken here.
    #[allow(clippy::too_many_arguments)]
    pub fn capture(
        level: LogLevel,
        file: &'static str,
        function: &'static str,
        line: u32,
        msg_id: u64,
        message: String,
        template: Arc<str>,
        colored: bool,
        destination: Destination,
    ) -> Self {
        Self {
            level,
            color: level.color_code(),
            file,
            function,
            line,
            pid: std::process::id(),
            thread_hash: current_thread_hash(),
            msg_id,
            message: prepare_message(message),
            timestamp: Local::now(),
            template,
            colored,
            destination,
        }
    }
}

/// Escape line breaks and tabs, then truncate to [`MAX_MESSAGE_LEN`].
///
/// Escaping first keeps one record on one output line even when the
/// truncation cut lands inside an escape-expanded region.
fn prepare_message(message: String) -> String {
    let mut message = if message.contains(['\n', '\r', '\t']) {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    } else {
        message
    };

    if message.len() > MAX_MESSAGE_LEN {
        let mut end = MAX_MESSAGE_LEN;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message.truncate(end);
    }
    message
}
