//! Joinable task queue with outstanding-item counting.
//!
//! The queue tracks how many items have been enqueued but not yet
//! acknowledged. `join` resolves exactly when that count reaches zero, which
//! is the coordinator's only completion signal. Dequeuing does NOT decrement
//! the count: a [`TaskLease`] acknowledges on drop, so every code path
//! through a worker (normal, early-return, panic unwind, task abort)
//! acknowledges exactly once.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{watch, Mutex, Notify};

/// FIFO queue of candidate image paths shared between the coordinator and
/// the worker pool.
pub struct TaskQueue {
    items: Mutex<VecDeque<PathBuf>>,
    available: Notify,
    outstanding: watch::Sender<usize>,
}

impl TaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (outstanding, _) = watch::channel(0);
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Notify::new(),
            outstanding,
        }
    }

    /// Enqueue an item and increment the outstanding count.
    ///
    /// The count is incremented before the item becomes visible, so a
    /// concurrent `join` can never observe a transient zero while an item
    /// is in flight.
    pub async fn put(&self, path: PathBuf) {
        self.outstanding.send_modify(|n| *n += 1);
        self.items.lock().await.push_back(path);
        self.available.notify_one();
    }

    /// Dequeue one item, waiting until one is available.
    ///
    /// The returned lease keeps the item counted as outstanding until it is
    /// dropped. This future never resolves once the queue has drained; the
    /// caller is expected to be aborted by its owner.
    pub async fn get(self: &Arc<Self>) -> TaskLease {
        loop {
            let path = self.items.lock().await.pop_front();
            if let Some(path) = path {
                // Another worker may be parked while more items remain;
                // chain the wakeup.
                if !self.items.lock().await.is_empty() {
                    self.available.notify_one();
                }
                return TaskLease {
                    queue: Arc::clone(self),
                    path,
                };
            }
            self.available.notified().await;
        }
    }

    /// Wait until every enqueued item has been acknowledged.
    ///
    /// Returns immediately if nothing is outstanding.
    pub async fn join(&self) {
        let mut rx = self.outstanding.subscribe();
        // wait_for inspects the current value before parking, so there is no
        // window where the count hits zero unobserved. The sender lives in
        // self and cannot be dropped while we borrow it.
        let _ = rx.wait_for(|n| *n == 0).await;
    }

    /// Number of enqueued-but-unacknowledged items.
    pub fn outstanding(&self) -> usize {
        *self.outstanding.borrow()
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A dequeued item that acknowledges itself when dropped.
pub struct TaskLease {
    queue: Arc<TaskQueue>,
    path: PathBuf,
}

impl TaskLease {
    /// The path being processed under this lease.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TaskLease {
    fn drop(&mut self) {
        // saturating_sub guards the never-negative invariant even if a lease
        // were somehow duplicated.
        self.queue.outstanding.send_modify(|n| *n = n.saturating_sub(1));
    }
}
