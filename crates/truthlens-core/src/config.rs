//! Service configuration.
//!
//! Values come from serde defaults, then an optional TOML file, then
//! environment variables. Provider secrets are not validated here: a missing
//! key surfaces later as a provider error and the analysis degrades to its
//! fallback path.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{TruthLensError, TruthLensResult};
use crate::verdict::VerdictFormat;

pub const ENV_GEMINI_API_KEY: &str = "GOOGLE_GEMINI_API_KEY";
pub const ENV_HF_API_TOKEN: &str = "HUGGINGFACE_API_TOKEN";
pub const ENV_GEMINI_MODEL: &str = "TRUTHLENS_GEMINI_MODEL";
pub const ENV_GEMINI_URL: &str = "TRUTHLENS_GEMINI_URL";
pub const ENV_HF_URL: &str = "TRUTHLENS_HF_URL";
pub const ENV_HOST: &str = "TRUTHLENS_HOST";
pub const ENV_PORT: &str = "TRUTHLENS_PORT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
    #[serde(default)]
    pub verdict_format: VerdictFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Primary provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_gemini_model(),
            base_url: default_gemini_url(),
            timeout_secs: default_gemini_timeout(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_timeout() -> u64 {
    60
}

/// Secondary provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_hf_url")]
    pub model_url: String,
    #[serde(default = "default_hf_timeout")]
    pub timeout_secs: u64,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            model_url: default_hf_url(),
            timeout_secs: default_hf_timeout(),
        }
    }
}

fn default_hf_url() -> String {
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli".to_string()
}

fn default_hf_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml_str(content: &str) -> TruthLensResult<Self> {
        toml::from_str(content).map_err(|e| TruthLensError::config(e.to_string()))
    }

    /// Load from an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> TruthLensResult<Self> {
        let mut config = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration file");
                let content = std::fs::read_to_string(path)?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to resolve variables.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> TruthLensResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_GEMINI_API_KEY) {
            self.gemini.api_key = key;
        }
        if let Some(token) = lookup(ENV_HF_API_TOKEN) {
            self.huggingface.api_token = token;
        }
        if let Some(model) = lookup(ENV_GEMINI_MODEL) {
            self.gemini.model = model;
        }
        if let Some(url) = lookup(ENV_GEMINI_URL) {
            self.gemini.base_url = url;
        }
        if let Some(url) = lookup(ENV_HF_URL) {
            self.huggingface.model_url = url;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port
                .parse()
                .map_err(|_| TruthLensError::config(format!("{ENV_PORT} is not a valid port: {port}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert!(config.gemini.api_key.is_empty());
        assert!(config.huggingface.model_url.ends_with("facebook/bart-large-mnli"));
        assert_eq!(config.verdict_format, VerdictFormat::Labeled);
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml_str(
            "verdict_format = \"json\"\n\n[server]\nport = 9100\n\n[gemini]\ntimeout_secs = 5\n",
        )
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.gemini.timeout_secs, 5);
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.verdict_format, VerdictFormat::Json);
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppConfig::from_toml_str("[server\nport = 1").unwrap_err();
        assert!(matches!(err, TruthLensError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_GEMINI_API_KEY, "g-key"),
            (ENV_HF_API_TOKEN, "hf-token"),
            (ENV_PORT, "8081"),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_env_with(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.gemini.api_key, "g-key");
        assert_eq!(config.huggingface.api_token, "hf-token");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_env_bad_port() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_with(|k| (k == ENV_PORT).then(|| "eighty".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("not a valid port"));
    }
}
