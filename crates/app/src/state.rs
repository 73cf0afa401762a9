use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "graftfs";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// A backend to graft into the namespace at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkEntry {
    /// Absolute namespace path to bind (e.g. "/ext")
    pub path: String,
    /// Host directory that backs the subtree
    pub target: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the API HTTP server
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Log level directive (trace, debug, info, warn, error)
    #[serde(default)]
    pub log_level: Option<String>,
    /// Directory for log files (logs to stdout only if not set)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Backends grafted into the namespace when the daemon starts
    #[serde(default)]
    pub links: Vec<LinkEntry>,
}

fn default_api_port() -> u16 {
    8080
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            log_level: None,
            log_dir: None,
            links: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the graftfs directory (~/.graftfs)
    pub graftfs_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the graftfs directory path (custom or default ~/.graftfs)
    pub fn graftfs_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        // Use home directory directly since we want ~/.graftfs
        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Load state from the graftfs directory.
    ///
    /// A missing directory or config file is not an error; the daemon runs
    /// fine with defaults. Only an unreadable or malformed config fails.
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let graftfs_dir = Self::graftfs_dir(custom_path)?;
        let config_path = graftfs_dir.join(CONFIG_FILE_NAME);

        let config = if config_path.exists() {
            let config_toml = fs::read_to_string(&config_path)?;
            toml::from_str(&config_toml)?
        } else {
            AppConfig::default()
        };

        Ok(Self {
            graftfs_dir,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}
