//! Decode probe: the boolean oracle workers consult per file.
//!
//! The scan pipeline only cares whether a file is loadable; the probe
//! converts every possible decode outcome (I/O error, undetectable format,
//! decoder error, decoder panic) into `false`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Answers "does this image file decode?" for a single path.
///
/// Implementations must never propagate an error or panic from the decode
/// attempt; anything other than a clean decode is `false`.
#[async_trait]
pub trait DecodeProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> bool;
}

/// Production probe backed by the `image` crate.
///
/// Decoding runs on the blocking thread pool. A decoder panic surfaces as a
/// `JoinError` and is classified as a failed decode like any other error.
pub struct ImageDecodeProbe;

impl ImageDecodeProbe {
    pub fn new() -> Self {
        Self
    }

    fn decode_sync(path: &Path) -> bool {
        let reader = match image::ImageReader::open(path) {
            Ok(reader) => reader,
            Err(e) => {
                tracing::debug!("Cannot open {:?}: {}", path, e);
                return false;
            }
        };
        let reader = match reader.with_guessed_format() {
            Ok(reader) => reader,
            Err(e) => {
                tracing::debug!("Cannot sniff format of {:?}: {}", path, e);
                return false;
            }
        };
        match reader.decode() {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Decode failed for {:?}: {}", path, e);
                false
            }
        }
    }
}

impl Default for ImageDecodeProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DecodeProbe for ImageDecodeProbe {
    async fn probe(&self, path: &Path) -> bool {
        let owned: PathBuf = path.to_path_buf();
        match tokio::task::spawn_blocking(move || Self::decode_sync(&owned)).await {
            Ok(loads) => loads,
            Err(e) => {
                tracing::warn!("Decoder task failed for {:?}: {}", path, e);
                false
            }
        }
    }
}
