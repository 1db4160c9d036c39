use std::path::PathBuf;

use serde::Deserialize;

/// Endpoint used when nothing else is configured.
const DEFAULT_ENDPOINT: &str = "http://192.168.1.254:8000/images/upload";

/// Name of the environment variable that overrides the endpoint.
const ENDPOINT_ENV_VAR: &str = "GALLERY_ENDPOINT";

/// Runtime configuration, resolved once at startup and injected into the
/// screen. The endpoint serves both upload (POST) and listing (GET).
///
/// Resolution order: `GALLERY_ENDPOINT` environment variable, then the JSON
/// config file in the user config directory, then the built-in default.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// Resolve the configuration from the environment and filesystem.
    pub fn load() -> Self {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV_VAR) {
            if !endpoint.is_empty() {
                return Config { endpoint };
            }
        }

        if let Some(path) = Self::config_path() {
            if let Some(config) = Self::from_file(&path) {
                return config;
            }
        }

        Config::default()
    }

    /// Path of the config file:
    /// - Linux: ~/.config/gallery-client/config.json
    /// - macOS: ~/Library/Application Support/gallery-client/config.json
    /// - Windows: %APPDATA%\gallery-client\config.json
    fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("gallery-client");
        path.push("config.json");
        Some(path)
    }

    fn from_file(path: &PathBuf) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("⚠️  Ignoring malformed config {}: {e}", path.display());
                None
            }
        }
    }
}
