//! Lux Core - parallel image corruption scanner.
//!
//! Lux walks a directory tree, tries to decode every candidate image, and
//! reports the files that fail so they can be pulled before a downstream
//! batch job (a classifier, a trainer) crashes on them.
//!
//! # Architecture
//!
//! ```text
//! Discover → TaskQueue → Worker pool (probe each file) → FailureSink → Report
//! ```
//!
//! The coordinator enqueues every path first, spawns a fixed pool of
//! workers, and blocks on the queue's join until each item has been
//! acknowledged exactly once. Failures flow through a multi-writer sink and
//! are sorted into a deterministic report.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lux_core::{Config, Scanner};
//!
//! #[tokio::main]
//! async fn main() -> lux_core::Result<()> {
//!     let config = Config::load()?;
//!     let scanner = Scanner::new(&config);
//!
//!     let report = scanner.scan("./photos".as_ref()).await?;
//!     println!("{} of {} failed", report.failures.len(), report.total);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod report;
pub mod scan;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, LuxError, Result, ScanError};
pub use report::ScanReport;
pub use scan::{DecodeProbe, ImageDecodeProbe, Scanner};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
