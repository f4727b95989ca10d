//! Server configuration.
//!
//! Loaded once at startup: defaults, then `~/.qanet/ttsd/config.yaml` (or
//! `--config`), then environment variables, then command line flags.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use qanet_tts::TtsConfig;

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".qanet";
/// Application directory under the base directory.
pub const APP_NAME: &str = "ttsd";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Port used when neither `PORT` nor `--addr` is given.
pub const DEFAULT_PORT: u16 = 3001;

/// Browser origins allowed by default (local dev and preview servers).
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://localhost:4173",
    "http://127.0.0.1:5173",
];

/// Environment variables read by the server on top of [`qanet_tts::env`].
pub mod env {
    pub const PORT: &str = "PORT";
    pub const CORS_ORIGINS: &str = "CORS_ORIGINS";
    pub const HEADER_POLICY: &str = "TTS_HEADER_POLICY";
}

/// How response headers are chosen for synthesized audio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPolicy {
    /// Derive headers from the configured provider identity, even when the
    /// router fell back to the WAV tone.
    #[default]
    Configured,
    /// Derive headers from the audio actually produced.
    Produced,
}

impl HeaderPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderPolicy::Configured => "configured",
            HeaderPolicy::Produced => "produced",
        }
    }
}

impl fmt::Display for HeaderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "configured" => Ok(HeaderPolicy::Configured),
            "produced" => Ok(HeaderPolicy::Produced),
            other => anyhow::bail!("unknown header policy '{}'", other),
        }
    }
}

/// Top-level configuration for the `ttsd` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, `host:port` or `:port`.
    pub addr: String,

    /// Origins allowed to call the API from a browser.
    pub cors_origins: Vec<String>,

    /// Response header selection.
    pub header_policy: HeaderPolicy,

    /// Synthesis routing.
    pub tts: TtsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: format!(":{}", DEFAULT_PORT),
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            header_policy: HeaderPolicy::default(),
            tts: TtsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Gets the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| {
            home.join(DEFAULT_BASE_DIR)
                .join(APP_NAME)
                .join(DEFAULT_CONFIG_FILE)
        })
    }

    /// Loads the YAML configuration.
    ///
    /// An explicit path must exist. The default path is optional; when it is
    /// absent the built-in defaults are used.
    pub fn load(custom_path: Option<&str>) -> anyhow::Result<Self> {
        let path = match custom_path {
            Some(p) => PathBuf::from(p),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("parse config {}", path.display()))
    }

    /// Parses a YAML document. Missing fields take their defaults.
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Overlays environment values from `lookup`.
    ///
    /// Returns the names of variables whose values were rejected.
    pub fn apply_env<F>(&mut self, lookup: F) -> Vec<&'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = self.tts.apply_env(&lookup);
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = get(env::PORT) {
            match port.trim().parse::<u16>() {
                Ok(port) => self.addr = format!(":{}", port),
                Err(_) => rejected.push(env::PORT),
            }
        }
        if let Some(origins) = get(env::CORS_ORIGINS) {
            self.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(policy) = get(env::HEADER_POLICY) {
            match policy.parse() {
                Ok(policy) => self.header_policy = policy,
                Err(_) => rejected.push(env::HEADER_POLICY),
            }
        }
        rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qanet_tts::ProviderIdentity;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.addr, ":3001");
        assert_eq!(config.cors_origins.len(), 3);
        assert_eq!(config.header_policy, HeaderPolicy::Configured);
        assert_eq!(config.tts.provider, ProviderIdentity::Mock);
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
addr: "127.0.0.1:8080"
header_policy: produced
tts:
  provider: azure
  timeout_secs: 5
  azure:
    key: abc
    region: eastus
"#;
        let config = ServerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.addr, "127.0.0.1:8080");
        assert_eq!(config.header_policy, HeaderPolicy::Produced);
        assert_eq!(config.tts.provider, ProviderIdentity::Azure);
        assert_eq!(config.tts.timeout_secs, 5);
        assert_eq!(config.tts.azure.key.as_deref(), Some("abc"));
        assert_eq!(config.tts.azure.region, "eastus");
        // Untouched sections keep their defaults.
        assert_eq!(config.cors_origins.len(), 3);
        assert_eq!(config.tts.aws.region, "us-east-1");
    }

    #[test]
    fn test_from_yaml_empty() {
        assert_eq!(ServerConfig::from_yaml("").unwrap(), ServerConfig::default());
        assert!(ServerConfig::from_yaml("header_policy: sometimes").is_err());
    }

    #[test]
    fn test_load_missing_explicit_path() {
        assert!(ServerConfig::load(Some("/nonexistent/ttsd/config.yaml")).is_err());
    }

    #[test]
    fn test_apply_env() {
        let mut config = ServerConfig::default();
        let rejected = config.apply_env(lookup(&[
            ("PORT", "8088"),
            ("CORS_ORIGINS", "https://a.example, ,https://b.example"),
            ("TTS_HEADER_POLICY", "Produced"),
            ("TTS_PROVIDER", "google"),
            ("GOOGLE_TTS_API_KEY", "g"),
        ]));
        assert!(rejected.is_empty());
        assert_eq!(config.addr, ":8088");
        assert_eq!(config.cors_origins, ["https://a.example", "https://b.example"]);
        assert_eq!(config.header_policy, HeaderPolicy::Produced);
        assert_eq!(config.tts.provider, ProviderIdentity::Google);
        assert_eq!(config.tts.google.api_key.as_deref(), Some("g"));
    }

    #[test]
    fn test_apply_env_rejects_bad_values() {
        let mut config = ServerConfig::default();
        let rejected = config.apply_env(lookup(&[
            ("PORT", "http"),
            ("TTS_HEADER_POLICY", "maybe"),
        ]));
        assert_eq!(rejected, [env::PORT, env::HEADER_POLICY]);
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_header_policy_parse() {
        assert_eq!("configured".parse::<HeaderPolicy>().unwrap(), HeaderPolicy::Configured);
        assert_eq!(" PRODUCED ".parse::<HeaderPolicy>().unwrap(), HeaderPolicy::Produced);
        assert!("".parse::<HeaderPolicy>().is_err());
    }
}
