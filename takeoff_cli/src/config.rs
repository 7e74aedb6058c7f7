//! CLI configuration: an optional TOML file overridden by command-line flags.
//!
//! ```toml
//! storage_dir = "/shared/jobs/24-117/takeoff-data"
//! log_filter = "takeoff_core=debug"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use takeoff_core::{TakeoffError, TakeoffResult};

pub const DEFAULT_STORAGE_DIR: &str = "takeoff-data";
pub const DEFAULT_LOG_FILTER: &str = "takeoff_core=info";

/// Contents of a config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub storage_dir: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> TakeoffResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| TakeoffError::file_error("read config", path.display().to_string(), e.to_string()))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> TakeoffResult<Self> {
        toml::from_str(contents).map_err(TakeoffError::serialization)
    }
}

/// Effective settings after merging defaults, file and flags
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub storage_dir: PathBuf,
    pub log_filter: String,
}

impl Settings {
    /// Flags win over the file, the file wins over defaults
    pub fn resolve(file: ConfigFile, storage_dir: Option<PathBuf>, log_filter: Option<String>) -> Self {
        Settings {
            storage_dir: storage_dir
                .or(file.storage_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR)),
            log_filter: log_filter
                .or(file.log_filter)
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
