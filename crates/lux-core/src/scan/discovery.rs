//! File discovery for finding candidate images under a scan root.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ScanConfig;

/// Discovers candidate image files by extension.
pub struct FileDiscovery {
    config: ScanConfig,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Discover all candidate files at a path.
    ///
    /// If path is a file, returns it if its extension matches.
    /// If path is a directory, recursively finds all matching files.
    /// The result is sorted so downstream processing order does not depend
    /// on traversal order.
    pub fn discover(&self, path: &Path) -> Vec<PathBuf> {
        if path.is_file() {
            if self.is_candidate(path) {
                return vec![path.to_path_buf()];
            }
            return vec![];
        }

        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .follow_links(self.config.follow_symlinks)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && self.is_candidate(e.path()))
            .map(|e| e.into_path())
            .collect();

        files.sort();
        files
    }

    /// Check if a file has one of the configured extensions.
    fn is_candidate(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.config
                    .extensions
                    .iter()
                    .any(|want| want.to_lowercase() == ext_lower)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discovery() -> FileDiscovery {
        FileDiscovery::new(ScanConfig::default())
    }

    #[test]
    fn test_is_candidate() {
        let discovery = discovery();

        assert!(discovery.is_candidate(Path::new("test.png")));
        assert!(discovery.is_candidate(Path::new("test.PNG")));
        assert!(!discovery.is_candidate(Path::new("test.jpg")));
        assert!(!discovery.is_candidate(Path::new("test.txt")));
        assert!(!discovery.is_candidate(Path::new("no_extension")));
    }

    #[test]
    fn test_discover_is_sorted_and_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.png"), b"x").unwrap();
        std::fs::write(dir.path().join("a.png"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("nested/c.png"), b"x").unwrap();

        let files = discovery().discover(dir.path());
        assert_eq!(
            files,
            vec![
                dir.path().join("a.png"),
                dir.path().join("b.png"),
                dir.path().join("nested/c.png"),
            ]
        );
    }

    #[test]
    fn test_discover_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("only.png");
        std::fs::write(&png, b"x").unwrap();

        assert_eq!(discovery().discover(&png), vec![png.clone()]);
        assert!(discovery()
            .discover(&dir.path().join("missing.png"))
            .is_empty());
    }

    #[test]
    fn test_configured_extensions() {
        let config = ScanConfig {
            extensions: vec!["jpg".to_string(), "jpeg".to_string()],
            ..ScanConfig::default()
        };
        let discovery = FileDiscovery::new(config);

        assert!(discovery.is_candidate(Path::new("photo.JPEG")));
        assert!(!discovery.is_candidate(Path::new("photo.png")));
    }
}
