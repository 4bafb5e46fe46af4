use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server configuration, loaded from an optional `agency.yaml`.
///
/// The database path has no default on purpose: the binary refuses to start
/// without one and prints setup instructions instead of inventing a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_port() -> u16 {
    8080
}

fn default_service_name() -> String {
    "agency-workflow".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            db_path: None,
            service_name: default_service_name(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    /// Load `path` if given and present; otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            _ => Ok(Self::default()),
        }
    }
}
