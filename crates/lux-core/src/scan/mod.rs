//! The parallel scan pipeline.
//!
//! Work distribution follows a bounded producer/consumer shape:
//! - **queue**: joinable task queue with outstanding-item counting
//! - **sink**: multi-writer collection point for decode failures
//! - **probe**: the decode oracle consulted for each file
//! - **worker**: long-lived pull/probe/acknowledge loop
//! - **discovery**: find candidate files under a root
//! - **scanner**: orchestrates submission, the pool, and completion

pub mod discovery;
pub mod probe;
pub mod queue;
pub mod scanner;
pub mod sink;
pub mod worker;

use std::sync::Arc;

/// Callback invoked once per checked file, from any worker.
pub type ProgressFn = Arc<dyn Fn() + Send + Sync>;

// Re-exports for convenient access
pub use discovery::FileDiscovery;
pub use probe::{DecodeProbe, ImageDecodeProbe};
pub use queue::{TaskLease, TaskQueue};
pub use scanner::Scanner;
pub use sink::{failure_channel, FailureDrain, FailureSink};
