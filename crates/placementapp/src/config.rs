//! # Configuration
//!
//! Settings are loaded with [`confique`], layered in priority order:
//!
//! 1. **Environment variables**: `PLACEMENT_DATA_FILE`, `PLACEMENT_PAGE_SIZE`,
//!    `PLACEMENT_LATENCY_MS`, `PLACEMENT_NOTICE_MS`.
//! 2. **Local Config**: `placement.toml` in the working directory.
//! 3. **Global Config**: `placement.toml` in the OS config directory (via
//!    the `directories` crate).
//! 4. **Compiled Defaults**: `#[config(default = ...)]` below.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_file` | none | JSON data file; demo records are used without one |
//! | `page_size` | `20` | Rows per page in list output |
//! | `latency_ms` | `0` | Simulated latency of the demo data source |
//! | `notice_ms` | `3000` | Auto-dismiss delay of success notices |

use crate::error::{PlacementError, Result};
use confique::Config;
use directories::ProjectDirs;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "placement.toml";

#[derive(Config, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PlacementConfig {
    /// JSON data file holding every record family. When absent, the built-in
    /// demo records are used and nothing is written to disk.
    #[config(env = "PLACEMENT_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Rows per page in list output.
    #[config(env = "PLACEMENT_PAGE_SIZE", default = 20)]
    pub page_size: usize,

    /// Simulated latency, in milliseconds, of the demo data source.
    #[config(env = "PLACEMENT_LATENCY_MS", default = 0)]
    pub latency_ms: u64,

    /// How long success notices stay up, in milliseconds.
    #[config(env = "PLACEMENT_NOTICE_MS", default = 3000)]
    pub notice_ms: u64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            page_size: 20,
            latency_ms: 0,
            notice_ms: 3000,
        }
    }
}

impl PlacementConfig {
    /// Load from the environment, the working directory and the OS config
    /// directory.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE_NAME), global_config_path().as_deref())
    }

    /// Load with explicit file locations. Missing files are skipped.
    pub fn load_from(local: &Path, global: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env().file(local);
        if let Some(global) = global {
            builder = builder.file(global);
        }
        builder
            .load()
            .map_err(|err| PlacementError::Config(err.to_string()))
    }

    /// A commented `placement.toml` listing every setting.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}

/// `placement.toml` in the OS config directory, if one can be determined.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "placement").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = PlacementConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.notice_duration(), Duration::from_secs(3));
        assert_eq!(config.latency(), Duration::ZERO);
        assert!(config.data_file.is_none());
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config =
            PlacementConfig::load_from(&dir.path().join("none.toml"), None).unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.notice_ms, 3000);
    }

    #[test]
    fn test_local_file_overrides_global_file() {
        let dir = tempdir().unwrap();
        let local = dir.path().join("local.toml");
        let global = dir.path().join("global.toml");
        fs::write(&local, "page_size = 5\n").unwrap();
        fs::write(&global, "page_size = 50\nlatency_ms = 250\n").unwrap();

        let config = PlacementConfig::load_from(&local, Some(&global)).unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.latency_ms, 250);
    }

    #[test]
    fn test_bad_value_is_a_config_error() {
        let dir = tempdir().unwrap();
        let local = dir.path().join("placement.toml");
        fs::write(&local, "page_size = \"many\"\n").unwrap();
        assert!(matches!(
            PlacementConfig::load_from(&local, None),
            Err(PlacementError::Config(_))
        ));
    }

    #[test]
    fn test_template_is_valid_toml() {
        let template = PlacementConfig::template();
        assert!(template.contains("page_size"));
        assert!(toml::from_str::<toml::Table>(&template).is_ok());
    }
}
