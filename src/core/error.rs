//! Error types for deferlog

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error (opening a destination file, writing a line)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A level string that maps to none of the six levels
    #[error("invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Signal handler registration failure
    #[error("failed to register handler for signal {signal}: {message}")]
    Signal { signal: i32, message: String },
}

impl LoggerError {
    /// Create a signal registration error
    pub fn signal(signal: i32, message: impl Into<String>) -> Self {
        LoggerError::Signal {
            signal,
            message: message.into(),
        }
    }
}
