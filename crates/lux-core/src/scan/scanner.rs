//! Scan orchestration - fills the queue, runs the pool, collects the report.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::{Result, ScanError};
use crate::report::ScanReport;

use super::discovery::FileDiscovery;
use super::probe::{DecodeProbe, ImageDecodeProbe};
use super::queue::TaskQueue;
use super::sink::failure_channel;
use super::{worker, ProgressFn};

/// Coordinates a scan: discovery, work distribution, completion detection
/// and report assembly.
///
/// The outcome is deterministic regardless of the worker count: the same
/// directory always yields the same (sorted) report.
pub struct Scanner {
    discovery: FileDiscovery,
    probe: Arc<dyn DecodeProbe>,
    workers: usize,
}

impl Scanner {
    /// Create a scanner that probes files with the `image` crate decoder.
    pub fn new(config: &Config) -> Self {
        Self::with_probe(config, Arc::new(ImageDecodeProbe::new()))
    }

    /// Create a scanner with a custom decode probe.
    pub fn with_probe(config: &Config, probe: Arc<dyn DecodeProbe>) -> Self {
        Self {
            discovery: FileDiscovery::new(config.scan.clone()),
            probe,
            workers: config.scan.effective_workers(),
        }
    }

    /// Discover candidate files under a root, sorted.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        self.discovery.discover(root)
    }

    /// Scan a directory tree and return the failure report.
    pub async fn scan(&self, root: &Path) -> Result<ScanReport> {
        self.scan_with_progress(root, None).await
    }

    /// Scan with a callback invoked once per checked file.
    pub async fn scan_with_progress(
        &self,
        root: &Path,
        progress: Option<ProgressFn>,
    ) -> Result<ScanReport> {
        if !root.exists() {
            return Err(ScanError::RootNotFound(root.to_path_buf()).into());
        }
        let files = self.discover(root);
        tracing::info!("Found {} candidate file(s) under {:?}", files.len(), root);
        Ok(self.check_paths(files, progress).await)
    }

    /// Check an explicit list of paths.
    ///
    /// Every path is enqueued before any worker starts, so the queue's join
    /// cannot observe a transient empty state mid-submission. After join
    /// resolves, the pool is dropped; `JoinSet` aborts the (otherwise
    /// endless) worker tasks on drop.
    pub async fn check_paths(
        &self,
        mut paths: Vec<PathBuf>,
        progress: Option<ProgressFn>,
    ) -> ScanReport {
        let total = paths.len();
        if total == 0 {
            return ScanReport {
                total: 0,
                failures: Vec::new(),
            };
        }
        // Submission order is sorted so processing order does not depend on
        // whatever order the caller collected the paths in.
        paths.sort();

        let queue = Arc::new(TaskQueue::new());
        for path in paths {
            queue.put(path).await;
        }

        let (sink, drain) = failure_channel();
        let pool_size = self.workers.min(total);
        tracing::debug!("Starting {} worker(s) for {} file(s)", pool_size, total);

        let mut pool = JoinSet::new();
        for id in 0..pool_size {
            pool.spawn(worker::run(
                id,
                Arc::clone(&queue),
                sink.clone(),
                Arc::clone(&self.probe),
                progress.clone(),
            ));
        }
        // The coordinator's only sink handle must die with the workers, not
        // linger and suggest the channel is still writable.
        drop(sink);

        queue.join().await;
        drop(pool);

        let mut failures = drain.drain();
        failures.sort();
        ScanReport { total, failures }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Probe scripted per file name: "fail" in the name -> false,
    /// "panic" in the name -> panic.
    struct StubProbe {
        calls: AtomicUsize,
    }

    impl StubProbe {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl DecodeProbe for StubProbe {
        async fn probe(&self, path: &Path) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let name = path.to_string_lossy();
            if name.contains("panic") {
                panic!("scripted decoder fault");
            }
            !name.contains("fail")
        }
    }

    fn scanner_with(probe: Arc<dyn DecodeProbe>, workers: usize) -> Scanner {
        let mut config = Config::default();
        config.scan.workers = workers;
        Scanner::with_probe(&config, probe)
    }

    #[tokio::test]
    async fn test_failures_reported_sorted() {
        let probe = StubProbe::new();
        let scanner = scanner_with(probe.clone(), 4);

        let paths = vec![
            PathBuf::from("z_fail.png"),
            PathBuf::from("a.png"),
            PathBuf::from("m_fail.png"),
            PathBuf::from("b.png"),
        ];
        let report = scanner.check_paths(paths, None).await;

        assert_eq!(report.total, 4);
        assert_eq!(
            report.failures,
            vec![PathBuf::from("m_fail.png"), PathBuf::from("z_fail.png")]
        );
        assert_eq!(probe.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_panicking_decode_is_a_failure() {
        // a.png decodes, b_panic.png panics, c_fail.png returns false.
        let scanner = scanner_with(StubProbe::new(), 2);
        let paths = vec![
            PathBuf::from("a.png"),
            PathBuf::from("b_panic.png"),
            PathBuf::from("c_fail.png"),
        ];
        let report = scanner.check_paths(paths, None).await;

        assert_eq!(
            report.failures,
            vec![PathBuf::from("b_panic.png"), PathBuf::from("c_fail.png")]
        );
    }

    #[tokio::test]
    async fn test_empty_input_spawns_no_pool() {
        let probe = StubProbe::new();
        let scanner = scanner_with(probe.clone(), 4);

        let report = scanner.check_paths(Vec::new(), None).await;
        assert_eq!(report.total, 0);
        assert!(report.failures.is_empty());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_result_independent_of_worker_count() {
        let paths: Vec<PathBuf> = (0..50)
            .map(|i| {
                if i % 7 == 0 {
                    PathBuf::from(format!("img_{i:02}_fail.png"))
                } else {
                    PathBuf::from(format!("img_{i:02}.png"))
                }
            })
            .collect();

        let serial = scanner_with(StubProbe::new(), 1)
            .check_paths(paths.clone(), None)
            .await;
        let parallel = scanner_with(StubProbe::new(), 8)
            .check_paths(paths, None)
            .await;

        assert_eq!(serial.failures, parallel.failures);
        assert_eq!(serial.total, parallel.total);
        let unique: HashSet<_> = serial.failures.iter().collect();
        assert_eq!(unique.len(), serial.failures.len());
    }

    #[tokio::test]
    async fn test_progress_called_once_per_file() {
        let scanner = scanner_with(StubProbe::new(), 3);
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let progress: ProgressFn = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let paths: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("{i}.png"))).collect();
        scanner.check_paths(paths, Some(progress)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 20);
    }

    #[tokio::test]
    async fn test_scan_missing_root_errors() {
        let scanner = scanner_with(StubProbe::new(), 1);
        let result = scanner.scan(Path::new("/definitely/not/here")).await;
        assert!(result.is_err());
    }
}
