//! Configuration management for Lux.
//!
//! Configuration is loaded from the platform config directory (e.g.
//! `~/.config/lux/config.toml` on Linux) with sensible defaults. All config
//! structs implement `Default` and tolerate missing keys via
//! `#[serde(default)]`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Lux.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scan settings
    pub scan: ScanConfig,

    /// Report settings
    pub report: ReportConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.lux.lux/config.toml
    /// - Linux: ~/.config/lux/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\lux\config\config.toml
    ///
    /// Falls back to ~/.lux/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "lux", "lux")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".lux").join("config.toml")
            })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Scan settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of worker tasks. 0 means one per available core.
    pub workers: usize,

    /// File extensions treated as candidate images
    pub extensions: Vec<String>,

    /// Follow symlinks during traversal
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            extensions: vec!["png".to_string()],
            follow_symlinks: true,
        }
    }
}

impl ScanConfig {
    /// Resolve the requested worker count to an effective pool size.
    ///
    /// `0` means "one worker per available core". An explicit request is
    /// bounded above by the host's available parallelism and below by 1, so
    /// a misconfigured value degrades to a sane pool instead of spawning an
    /// absurd number of tasks or none at all.
    pub fn effective_workers(&self) -> usize {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        match self.workers {
            0 => cores,
            n => n.min(cores).max(1),
        }
    }

    /// Expand a path with `~` resolution applied.
    pub fn expand_root(root: &Path) -> PathBuf {
        let path_str = root.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }
}

/// Report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// File name of the CSV written into the scan root
    pub csv_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            csv_name: "Bad_Images.csv".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.workers, 0);
        assert_eq!(config.scan.extensions, vec!["png".to_string()]);
        assert_eq!(config.report.csv_name, "Bad_Images.csv");
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[scan]"));
        assert!(toml.contains("[report]"));
    }

    #[test]
    fn test_effective_workers_auto() {
        let config = ScanConfig::default();
        assert!(config.effective_workers() >= 1);
    }

    #[test]
    fn test_effective_workers_bounded_by_cores() {
        let config = ScanConfig {
            workers: 10_000,
            ..ScanConfig::default()
        };
        let cores = std::thread::available_parallelism().unwrap().get();
        assert_eq!(config.effective_workers(), cores);
    }

    #[test]
    fn test_effective_workers_explicit() {
        let config = ScanConfig {
            workers: 1,
            ..ScanConfig::default()
        };
        assert_eq!(config.effective_workers(), 1);
    }
}
