//! Scan report assembly and the CSV side artifact.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ScanError;

/// Outcome of a scan: how many files were checked and which ones failed.
///
/// `failures` is sorted lexicographically and, for unique inputs,
/// duplicate-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Number of files checked
    pub total: usize,
    /// Paths that failed to decode, sorted
    pub failures: Vec<PathBuf>,
}

impl ScanReport {
    /// True if every checked file decoded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Write the failure list as CSV: a `Path` header, then one path per
    /// line.
    ///
    /// Nothing is written for a clean report; returns whether a file was
    /// created.
    pub fn write_csv(&self, path: &Path) -> Result<bool, ScanError> {
        if self.is_clean() {
            return Ok(false);
        }

        let write = |path: &Path| -> std::io::Result<()> {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "Path")?;
            for failure in &self.failures {
                writeln!(writer, "{}", failure.display())?;
            }
            writer.flush()
        };

        write(path).map_err(|source| ScanError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(true)
    }
}
