//! Multi-writer sink for decode failures.
//!
//! Workers push failure records concurrently through cloned [`FailureSink`]
//! handles; the coordinator drains the collected records exactly once, after
//! the queue's join has resolved. Insertion order is unspecified.

use std::path::PathBuf;
use tokio::sync::mpsc;

/// Create a connected sink/drain pair.
pub fn failure_channel() -> (FailureSink, FailureDrain) {
    let (tx, rx) = mpsc::unbounded_channel();
    (FailureSink { tx }, FailureDrain { rx })
}

/// Write half, cloned into every worker.
#[derive(Clone)]
pub struct FailureSink {
    tx: mpsc::UnboundedSender<PathBuf>,
}

impl FailureSink {
    /// Record a path that failed to decode. Never blocks.
    pub fn put(&self, path: PathBuf) {
        // The drain outlives the workers in every scan; a send after the
        // drain is gone means the scan was already torn down and the record
        // is moot.
        let _ = self.tx.send(path);
    }
}

/// Read half, held by the coordinator.
pub struct FailureDrain {
    rx: mpsc::UnboundedReceiver<PathBuf>,
}

impl FailureDrain {
    /// Collect everything the workers deposited.
    ///
    /// Must only be called after the task queue's join has resolved: every
    /// worker `put` happens before its acknowledgment, and all
    /// acknowledgments happen before join returns, so nothing can arrive
    /// late.
    pub fn drain(mut self) -> Vec<PathBuf> {
        let mut records = Vec::new();
        while let Ok(path) = self.rx.try_recv() {
            records.push(path);
        }
        records
    }
}
