//! Configuration file loading for scribed.
//!
//! Configuration lives in a TOML file with `[server]` and `[deepgram]`
//! sections. Every field has a default, so an empty or missing file yields a
//! working configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on. Overridden by the PORT environment variable.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory where uploads are spooled for the duration of a request
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,
    /// Directory the browser UI is served from
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// When set, logs are also written to daily-rotated files in this directory
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_port() -> u16 {
    3456
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            uploads_dir: default_uploads_dir(),
            static_dir: default_static_dir(),
            log_dir: None,
        }
    }
}

/// Deepgram API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepgramConfig {
    /// Endpoint for pre-recorded transcription requests
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Overall request timeout in seconds. Large uploads need generous room.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.deepgram.com/v1/listen".to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for DeepgramConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScribedConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub deepgram: DeepgramConfig,
}

impl ScribedConfig {
    /// Loads configuration from the given path, falling back to defaults if
    /// the file does not exist. The PORT environment variable, when set,
    /// overrides the configured port.
    ///
    /// # Errors
    /// - If the file exists but cannot be read
    /// - If the TOML is malformed
    /// - If PORT is set but not a valid port number
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {e}", path.display()))?;
            toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {}: {e}", path.display()))?
        } else {
            ScribedConfig::default()
        };

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid PORT value: {port}"))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: ScribedConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3456);
        assert_eq!(config.server.uploads_dir, PathBuf::from("uploads"));
        assert_eq!(config.deepgram.api_url, "https://api.deepgram.com/v1/listen");
        assert!(config.server.log_dir.is_none());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config: ScribedConfig = toml::from_str(
            r#"
            [server]
            port = 8080

            [deepgram]
            api_url = "https://eu.api.deepgram.com/v1/listen"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
        assert_eq!(
            config.deepgram.api_url,
            "https://eu.api.deepgram.com/v1/listen"
        );
        assert_eq!(config.deepgram.timeout_secs, 600);
    }
}
