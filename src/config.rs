use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::text::TextStyle;

/// Everything `DisplayContext::create` needs, as loaded from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub text: TextStyle,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            title: "Demo".to_string(),
            width: 800,
            height: 600,
            text: TextStyle::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SurfaceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}
