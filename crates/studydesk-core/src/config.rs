//! StudyDesk configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StudyDeskError};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "studydesk.toml";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyDeskConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl StudyDeskConfig {
    /// Load config from `studydesk.toml` in the working directory, or defaults.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StudyDeskError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| StudyDeskError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Get the default config path (relative to the working directory).
    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 { 3000 }
fn default_host() -> String { "0.0.0.0".into() }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Where and how the two collection files are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_tasks_file")]
    pub tasks_file: String,
    #[serde(default = "default_study_file")]
    pub study_file: String,
    /// Run each load-mutate-save cycle under a per-collection lock.
    /// Off by default: concurrent writers race and the last one wins.
    #[serde(default)]
    pub serialize_writes: bool,
}

fn default_data_dir() -> PathBuf { PathBuf::from(".") }
fn default_tasks_file() -> String { "tasks.json".into() }
fn default_study_file() -> String { "study_time.json".into() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            tasks_file: default_tasks_file(),
            study_file: default_study_file(),
            serialize_writes: false,
        }
    }
}

impl StorageConfig {
    /// Full path of the tasks collection file.
    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(&self.tasks_file)
    }

    /// Full path of the study-time collection file.
    pub fn study_path(&self) -> PathBuf {
        self.data_dir.join(&self.study_file)
    }
}
