use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cors: Option<CorsConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    /// HMAC secret used to validate bearer tokens
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                path: get_default_db_path(),
            },
            auth: AuthConfig {
                jwt_secret: generate_secret(),
            },
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
        }
    }
}

impl ApiConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();
        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    /// Loads the config file at `config_path`, writing a default one first if
    /// it does not exist. `QNA_*` environment variables override file values,
    /// e.g. `QNA_SERVER__PORT=9000`.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        // Create default config file if it doesn't exist
        if !config_path.exists() {
            let default_config = format!(
                r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
path = "{}"

[auth]
jwt_secret = "{}"

[cors]
allowed_origins = ["http://localhost:3000"]
"#,
                get_default_db_path().display(),
                generate_secret()
            );
            std::fs::write(config_path, default_config).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .add_source(Environment::with_prefix("QNA").separator("__"))
            .build()?;

        let mut config: ApiConfig = builder.try_deserialize()?;

        // Expand tilde in database path
        if config.database.path.starts_with("~") {
            if let Some(home) = home::home_dir() {
                let path_str = config.database.path.to_string_lossy();
                let expanded = path_str.replacen("~", &home.to_string_lossy(), 1);
                config.database.path = PathBuf::from(expanded);
            }
        }

        if config.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt_secret must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn allowed_origins(&self) -> &[String] {
        self.cors
            .as_ref()
            .map(|c| c.allowed_origins.as_slice())
            .unwrap_or(&[])
    }
}

fn generate_secret() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("qna/api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

fn get_default_db_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("qna/qna.db")
    } else {
        PathBuf::from("qna.db")
    }
}
