//! Call-site logging macros
//!
//! Each invocation reserves a message id, checks the threshold, and only
//! then formats the message and captures a record, so a filtered call
//! costs one atomic increment and one level read. Source location comes
//! from `file!()` / `line!()` and the enclosing function path.
//!
//! # Examples
//!
//! ```
//! use deferlog::{info, warn};
//!
//! info!("listening on port {}", 8080);
//! warn!("retry {} of {}", 2, 5);
//! ```

/// Expands to the path of the enclosing function.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn __here() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(__here);
        name.strip_suffix("::__here").unwrap_or(name)
    }};
}

/// Log a message at an explicit level through the global logger.
///
/// # Examples
///
/// ```
/// use deferlog::{log, LogLevel};
///
/// log!(LogLevel::Info, "cache warmed in {} ms", 12);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        $crate::Logger::global().log_with(
            $level,
            file!(),
            $crate::__function_name!(),
            line!(),
            || ::std::format!($($arg)+),
        )
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        $crate::log!($crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log!($crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log!($crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::log!($crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log!($crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical message. Never filtered: the threshold cannot suppress
/// it, so the message is always formatted and enqueued.
#[macro_export]
macro_rules! critical {
    ($($arg:tt)+) => {
        $crate::log!($crate::LogLevel::Critical, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Logger;

    #[test]
    fn test_function_name_macro() {
        let name = __function_name!();
        assert!(
            name.ends_with("test_function_name_macro"),
            "unexpected function path: {}",
            name
        );
    }

    #[test]
    fn test_macros_expand_against_the_global_logger() {
        // Smoke: each macro reserves an id and enqueues without panicking.
        // Output assertions live in the integration tests with an owned
        // logger and a private file destination.
        let before = Logger::global().next_message_id();

        trace!("trace {}", 1);
        debug!("debug {}", 2);
        info!("info {}", 3);
        warn!("warn {}", 4);
        error!("error {}", 5);
        critical!("critical {}", 6);

        let after = Logger::global().next_message_id();
        assert!(after >= before + 6);

        Logger::global().flush();
    }
}
