//! Deferred writer-thread actions

use super::destination::Destination;
use super::formatter;
use super::record::Record;

/// A deferred, owned, zero-argument action executed by the writer thread.
///
/// Tasks carry immutable snapshots of their inputs; nothing a task needs
/// can change between enqueue and execution.
#[derive(Debug)]
pub enum Task {
    /// Render the record and write it to the record's destination snapshot
    Write(Record),
    /// Release a destination handle after all earlier writes to it ran.
    /// The close itself is the drop of the held handle when the task is
    /// discarded; `run` has nothing left to do.
    Close(Destination),
}

impl Task {
    pub fn run(&self) {
        match self {
            Task::Write(record) => {
                let line = formatter::render_line(record);
                if let Err(e) = record.destination.write_line(&line) {
                    // A failed write never propagates past the writer loop
                    eprintln!("[DEFERLOG ERROR] write to destination failed: {}", e);
                }
            }
            Task::Close(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_write_task_renders_and_writes() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("task.log");
        let dest = Destination::file(&path).expect("open");

        let record = Record::capture(
            LogLevel::Warning,
            "src/a.rs",
            "a::b",
            3,
            0,
            "careful".to_string(),
            Arc::from("[%(LEVEL)] %(MSG)"),
            false,
            dest,
        );
        Task::Write(record).run();

        let content = fs::read_to_string(&path).expect("read");
        assert_eq!(content, "[WRN] careful\n");
    }

    #[test]
    fn test_close_task_run_is_inert() {
        let temp_dir = TempDir::new().expect("temp dir");
        let dest = Destination::file(temp_dir.path().join("c.log")).expect("open");
        let task = Task::Close(dest.clone());
        task.run();
        // The handle is still usable until the task itself is dropped
        dest.write_line("still open\n").expect("write");
    }
}
