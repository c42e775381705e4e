//! Logger and writer loop
//!
//! One `Logger` owns the task queue, the configuration, and the single
//! background writer thread. The process-wide instance lives behind
//! [`Logger::global`]; owned instances exist so tests can run a complete
//! pipeline against a private destination.

use super::destination::Destination;
use super::formatter::DEFAULT_FORMAT;
use super::log_level::LogLevel;
use super::queue::TaskQueue;
use super::record::Record;
use super::task::Task;
use parking_lot::{Condvar, Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

/// Upper bound on how long a flush waiter sleeps between idle checks when
/// a drain-cycle notification is missed (writer already gone, late wakeup).
const FLUSH_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Mutable configuration, read by producers on every call and written by
/// the accessors. All fields swap together under one lock; records capture
/// a consistent snapshot.
struct Settings {
    level: LogLevel,
    colored: bool,
    template: Arc<str>,
    destination: Destination,
}

/// State shared between the logger handle and the writer thread.
struct Shared {
    queue: TaskQueue,
    /// Claimed-but-not-yet-executed tasks. Only the writer pushes and pops;
    /// flush checks emptiness.
    exec_list: Mutex<VecDeque<Task>>,
    /// Raised before the writer claims a batch, lowered after the batch
    /// ran. Covers the instants where tasks are in neither collection.
    busy: AtomicBool,
    stop: AtomicBool,
    worker_exited: AtomicBool,
    drain_cycles: Mutex<u64>,
    drained: Condvar,
}

impl Shared {
    fn new() -> Self {
        Self {
            queue: TaskQueue::new(),
            exec_list: Mutex::new(VecDeque::new()),
            busy: AtomicBool::new(false),
            stop: AtomicBool::new(false),
            worker_exited: AtomicBool::new(false),
            drain_cycles: Mutex::new(0),
            drained: Condvar::new(),
        }
    }

    fn is_idle(&self) -> bool {
        !self.busy.load(Ordering::Acquire)
            && self.queue.is_empty()
            && self.exec_list.lock().is_empty()
    }

    fn mark_drain_cycle(&self) {
        let mut cycles = self.drain_cycles.lock();
        *cycles += 1;
        self.drained.notify_all();
    }
}

pub struct Logger {
    shared: Arc<Shared>,
    settings: RwLock<Settings>,
    msg_counter: AtomicU64,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();

impl Logger {
    /// Construct an owned logger and start its writer thread.
    ///
    /// The initial level comes from the `DEFERLOG_LEVEL` environment
    /// variable (`Info` when absent or unrecognized); color is on, the
    /// destination is stderr, the template is [`DEFAULT_FORMAT`].
    pub fn new() -> Self {
        let shared = Arc::new(Shared::new());
        let worker = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || writer_loop(&shared))
        };

        Self {
            shared,
            settings: RwLock::new(Settings {
                level: LogLevel::from_env(),
                colored: true,
                template: Arc::from(DEFAULT_FORMAT),
                destination: Destination::Stderr,
            }),
            msg_counter: AtomicU64::new(0),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// The process-wide logger, constructed on first use.
    ///
    /// First construction also registers a shutdown hook for normal
    /// process exit. Signal handlers are a separate opt-in, see
    /// [`install_signal_flush`](crate::install_signal_flush).
    pub fn global() -> &'static Logger {
        GLOBAL.get_or_init(|| {
            extern "C" fn shutdown_at_exit() {
                if let Some(logger) = Logger::try_global() {
                    logger.shutdown();
                }
            }
            unsafe {
                libc::atexit(shutdown_at_exit);
            }
            Logger::new()
        })
    }

    /// The global instance, if it was ever constructed.
    pub(crate) fn try_global() -> Option<&'static Logger> {
        GLOBAL.get()
    }

    pub fn set_level(&self, level: LogLevel) {
        self.settings.write().level = level;
    }

    pub fn level(&self) -> LogLevel {
        self.settings.read().level
    }

    pub fn set_colored(&self, colored: bool) {
        self.settings.write().colored = colored;
    }

    pub fn is_colored(&self) -> bool {
        self.settings.read().colored
    }

    pub fn set_destination(&self, destination: Destination) {
        self.settings.write().destination = destination;
    }

    /// A clone of the active destination handle.
    pub fn destination(&self) -> Destination {
        self.settings.read().destination.clone()
    }

    pub fn set_format_str(&self, template: impl Into<String>) {
        self.settings.write().template = Arc::from(template.into());
    }

    pub fn format_str(&self) -> Arc<str> {
        Arc::clone(&self.settings.read().template)
    }

    /// Reserve the next message id.
    ///
    /// Exactly one id is consumed per call-site invocation, filtered or
    /// not, so ids are stable across runs with different verbosity.
    pub fn next_message_id(&self) -> u64 {
        self.msg_counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Whether a record at `level` would pass the current threshold.
    #[inline]
    pub fn level_enabled(&self, level: LogLevel) -> bool {
        level.enabled_at(self.settings.read().level)
    }

    /// Reserve an id, filter, and only then build the message.
    ///
    /// The closure runs after the threshold check, so a filtered call
    /// never pays for formatting. This is the path the macros expand to.
    pub fn log_with<F>(
        &self,
        level: LogLevel,
        file: &'static str,
        function: &'static str,
        line: u32,
        message: F,
    ) where
        F: FnOnce() -> String,
    {
        let msg_id = self.next_message_id();
        if self.level_enabled(level) {
            self.enqueue_record(level, file, function, line, msg_id, message());
        }
    }

    /// Capture a record under the current settings snapshot and enqueue
    /// its write task.
    pub fn enqueue_record(
        &self,
        level: LogLevel,
        file: &'static str,
        function: &'static str,
        line: u32,
        msg_id: u64,
        message: String,
    ) {
        let (template, colored, destination) = {
            let settings = self.settings.read();
            (
                Arc::clone(&settings.template),
                settings.colored,
                settings.destination.clone(),
            )
        };
        let record = Record::capture(
            level,
            file,
            function,
            line,
            msg_id,
            message,
            template,
            colored,
            destination,
        );
        self.enqueue_task(Task::Write(record));
    }

    /// Hand a task to the writer thread.
    pub fn enqueue_task(&self, task: Task) {
        self.shared.queue.enqueue(task);
    }

    /// Schedule closing a destination handle.
    ///
    /// `None` targets the currently active destination. Standard streams
    /// are never closed; anything else is released by a deferred task, so
    /// the close happens after every write already queued for it.
    pub fn close_destination(&self, target: Option<Destination>) {
        let target = match target {
            Some(destination) => destination,
            None => self.destination(),
        };
        if target.is_standard() {
            return;
        }
        self.enqueue_task(Task::Close(target));
    }

    /// Block until the queue and the execution list are both empty.
    ///
    /// Best-effort under concurrent producers: a record enqueued after the
    /// emptiness observation but before return is picked up by the next
    /// drain cycle, not this one. Stop logging first for a deterministic
    /// "fully drained" guarantee.
    pub fn flush(&self) {
        self.shared.queue.notify();
        let mut cycles = self.shared.drain_cycles.lock();
        while !self.shared.is_idle() {
            if self.shared.worker_exited.load(Ordering::Acquire) {
                break;
            }
            self.shared.queue.notify();
            self.shared
                .drained
                .wait_for(&mut cycles, FLUSH_POLL_INTERVAL);
        }
    }

    /// Stop the writer thread after it drains everything still queued.
    ///
    /// Idempotent: a second call finds no join handle and returns
    /// immediately.
    pub fn shutdown(&self) {
        self.shared.stop.store(true, Ordering::Release);
        self.shared.queue.notify();

        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                eprintln!("[DEFERLOG ERROR] writer thread panicked during shutdown");
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// The single consumer. Waits for work, claims the whole queue into the
/// execution list, runs the batch outside any lock, and terminates only
/// when stop is requested and nothing remains anywhere.
fn writer_loop(shared: &Shared) {
    loop {
        shared.queue.wait_for_work(&shared.stop);

        // Raised before the claim so an idle check never observes a task
        // in neither the queue nor the execution list.
        shared.busy.store(true, Ordering::Release);
        {
            // Only this thread ever holds both locks, exec list first.
            let mut list = shared.exec_list.lock();
            shared.queue.drain_into(&mut list);
        }

        loop {
            let task = shared.exec_list.lock().pop_front();
            match task {
                Some(task) => task.run(),
                None => break,
            }
        }
        shared.busy.store(false, Ordering::Release);
        shared.mark_drain_cycle();

        if shared.stop.load(Ordering::Acquire) && shared.queue.is_empty() {
            break;
        }
    }
    shared.worker_exited.store(true, Ordering::Release);
    shared.mark_drain_cycle();
}
