//! Task queue
//!
//! Unbounded multi-producer queue with a single consumer (the writer
//! thread). Producers only ever touch this lock; depth is unbounded by
//! design, so `enqueue` never blocks on the consumer.

use super::task::Task;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct TaskQueue {
    tasks: Mutex<VecDeque<Task>>,
    ready: Condvar,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
            ready: Condvar::new(),
        }
    }

    /// Append a task and wake the consumer.
    ///
    /// Sequential enqueues from one thread are delivered in that order.
    pub fn enqueue(&self, task: Task) {
        let mut tasks = self.tasks.lock();
        tasks.push_back(task);
        self.ready.notify_one();
    }

    /// Move every currently queued task into `list`, preserving order.
    pub fn drain_into(&self, list: &mut VecDeque<Task>) {
        let mut tasks = self.tasks.lock();
        list.append(&mut tasks);
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Wake the consumer without enqueuing (flush, shutdown).
    pub fn notify(&self) {
        self.ready.notify_one();
    }

    /// Consumer-side wait: block until the queue is non-empty or `stop`
    /// is raised.
    pub fn wait_for_work(&self, stop: &AtomicBool) {
        let mut tasks = self.tasks.lock();
        while tasks.is_empty() && !stop.load(Ordering::Acquire) {
            self.ready.wait(&mut tasks);
        }
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}
