use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings of the `qna` command, stored in `~/.config/qna/client.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    pub fn load() -> ClientResult<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Reads `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> ClientResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::Config(format!("Failed to create config directory: {}", e)))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ClientError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)
            .map_err(|e| ClientError::Config(format!("Failed to write {}: {}", path.display(), e)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("qna").join("client.toml")
        } else {
            PathBuf::from("./qna-client.toml")
        }
    }
}
