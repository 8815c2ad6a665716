//! The worker loop: pull, probe, report, acknowledge.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;

use super::probe::DecodeProbe;
use super::queue::TaskQueue;
use super::sink::FailureSink;
use super::ProgressFn;

/// Run one worker until its task is aborted.
///
/// Workers are long-lived: they never exit on their own, and the scanner
/// tears the pool down by dropping the owning `JoinSet` once the queue has
/// joined. A probe that panics is contained here and counted as a failed
/// decode, so the lease is acknowledged and the loop keeps running; a worker
/// that died holding an unacknowledged item would stall the join forever.
pub async fn run(
    id: usize,
    queue: Arc<TaskQueue>,
    sink: FailureSink,
    probe: Arc<dyn DecodeProbe>,
    progress: Option<ProgressFn>,
) {
    tracing::trace!(worker = id, "worker started");
    loop {
        let lease = queue.get().await;
        tracing::trace!(worker = id, "checking {:?}", lease.path());

        let loads = AssertUnwindSafe(probe.probe(lease.path()))
            .catch_unwind()
            .await
            .unwrap_or(false);

        if !loads {
            sink.put(lease.path().to_path_buf());
        }
        if let Some(progress) = &progress {
            progress();
        }
        drop(lease); // acknowledge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::queue::TaskQueue;
    use crate::scan::sink::failure_channel;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::time::Duration;
    use tokio::time::timeout;

    struct PanicProbe;

    #[async_trait]
    impl DecodeProbe for PanicProbe {
        async fn probe(&self, _path: &Path) -> bool {
            panic!("decoder blew up");
        }
    }

    #[tokio::test]
    async fn test_panicking_probe_does_not_stall_join() {
        let queue = Arc::new(TaskQueue::new());
        queue.put(PathBuf::from("a.png")).await;
        queue.put(PathBuf::from("b.png")).await;

        let (sink, drain) = failure_channel();
        let mut pool = tokio::task::JoinSet::new();
        pool.spawn(run(0, Arc::clone(&queue), sink, Arc::new(PanicProbe), None));

        timeout(Duration::from_secs(5), queue.join())
            .await
            .expect("a single worker must survive panics and drain the queue");
        drop(pool);

        let mut failures = drain.drain();
        failures.sort();
        assert_eq!(
            failures,
            vec![PathBuf::from("a.png"), PathBuf::from("b.png")]
        );
    }
}
