//! Output destination handles
//!
//! A destination is a cheap-to-clone tagged handle. Records snapshot the
//! active destination at enqueue time, so a runtime swap never affects a
//! line that is already in flight. File handles are shared through an
//! `Arc`; the file closes when the last clone is dropped, which is how the
//! deferred close task works.

use crate::core::error::Result;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub enum Destination {
    /// The standard error stream (default)
    #[default]
    Stderr,
    /// The standard output stream
    Stdout,
    /// A shared writable file handle (regular file, pipe, tty)
    File(Arc<Mutex<File>>),
}

impl Destination {
    /// Open `path` for appending, creating it if needed.
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::from_file(file))
    }

    /// Wrap an already-open file handle.
    pub fn from_file(file: File) -> Self {
        Destination::File(Arc::new(Mutex::new(file)))
    }

    /// True for the standard streams, which are never closed.
    pub fn is_standard(&self) -> bool {
        matches!(self, Destination::Stderr | Destination::Stdout)
    }

    /// Whether the underlying stream is an interactive terminal.
    pub fn is_terminal(&self) -> bool {
        match self {
            Destination::Stderr => io::stderr().is_terminal(),
            Destination::Stdout => io::stdout().is_terminal(),
            Destination::File(file) => file.lock().is_terminal(),
        }
    }

    /// Write one rendered line. Called only from the writer thread.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        match self {
            Destination::Stderr => io::stderr().lock().write_all(line.as_bytes()),
            Destination::Stdout => io::stdout().lock().write_all(line.as_bytes()),
            Destination::File(file) => file.lock().write_all(line.as_bytes()),
        }
    }
}
