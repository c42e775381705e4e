//! # Deferlog
//!
//! Lightweight thread-safe asynchronous logging: call sites capture a
//! record and enqueue it without blocking on I/O, a single background
//! writer thread drains the queue and writes every line.
//!
//! ## Features
//!
//! - **Non-blocking call sites**: producers only append to an unbounded
//!   queue; all rendering and writing happens on the writer thread
//! - **No lost messages**: shutdown drains everything already enqueued
//!   before the writer terminates
//! - **Template formatting**: `%(LEVEL)`, `%(FILENAME)`, `%(LINE)`,
//!   `%(MSG)` and friends, swappable at runtime
//! - **Stable message ids**: every call consumes one id, filtered or not,
//!   so ids line up across runs with different verbosity
//!
//! ## Quick start
//!
//! ```
//! use deferlog::{info, error};
//!
//! deferlog::set_level(deferlog::LogLevel::Debug);
//! info!("server listening on {}", 8080);
//! error!("lost connection to {}", "10.0.0.7");
//! deferlog::flush();
//! ```

pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        install_signal_flush, Destination, LogLevel, Logger, LoggerError, Record, Result, Task,
        TaskQueue, DEFAULT_FORMAT, FLUSH_SIGNALS, LEVEL_ENV_VAR, MAX_MESSAGE_LEN,
    };
}

pub use core::{
    install_signal_flush, Destination, LogLevel, Logger, LoggerError, Record, Result, Task,
    TaskQueue, DEFAULT_FORMAT, FLUSH_SIGNALS, LEVEL_ENV_VAR, MAX_MESSAGE_LEN,
};

// Convenience functions over the process-wide logger.

/// Set the minimum level on the global logger.
pub fn set_level(level: LogLevel) {
    Logger::global().set_level(level);
}

/// Current minimum level of the global logger.
pub fn level() -> LogLevel {
    Logger::global().level()
}

/// Enable or disable colored output on the global logger.
pub fn set_colored(colored: bool) {
    Logger::global().set_colored(colored);
}

/// Whether colored output is enabled on the global logger.
pub fn is_colored() -> bool {
    Logger::global().is_colored()
}

/// Swap the global logger's destination. The previous handle is not
/// closed automatically; see [`close_destination`].
pub fn set_destination(destination: Destination) {
    Logger::global().set_destination(destination);
}

/// A clone of the global logger's active destination.
pub fn destination() -> Destination {
    Logger::global().destination()
}

/// Schedule closing a destination (`None` for the active one). Standard
/// streams are a no-op.
pub fn close_destination(target: Option<Destination>) {
    Logger::global().close_destination(target);
}

/// Set the global format template.
pub fn set_format_str(template: impl Into<String>) {
    Logger::global().set_format_str(template);
}

/// The global format template.
pub fn format_str() -> std::sync::Arc<str> {
    Logger::global().format_str()
}

/// Block until everything enqueued on the global logger has been written.
pub fn flush() {
    Logger::global().flush();
}

/// Drain and stop the global logger's writer thread. Idempotent.
pub fn shutdown() {
    Logger::global().shutdown();
}
