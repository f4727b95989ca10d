//! Routing configuration.
//!
//! A [`TtsConfig`] is built once at startup and handed to
//! [`Router::from_config`](crate::Router::from_config); nothing in this crate
//! reads the process environment on the request path.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::provider::ProviderIdentity;

/// Default bound on a single adapter call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Environment variable names understood by [`TtsConfig::apply_env`].
pub mod env {
    pub const PROVIDER: &str = "TTS_PROVIDER";
    pub const TIMEOUT_SECS: &str = "TTS_TIMEOUT_SECS";
    pub const GOOGLE_API_KEY: &str = "GOOGLE_TTS_API_KEY";
    pub const AZURE_KEY: &str = "AZURE_TTS_KEY";
    pub const AZURE_REGION: &str = "AZURE_TTS_REGION";
    pub const AWS_REGION: &str = "AWS_REGION";
    pub const AWS_PROFILE: &str = "AWS_PROFILE";
}

/// Text-to-speech routing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    /// Selected backend.
    pub provider: ProviderIdentity,

    /// Bound on each adapter call, in seconds.
    pub timeout_secs: u64,

    /// Google Cloud Text-to-Speech settings.
    pub google: GoogleConfig,

    /// Azure Speech settings.
    pub azure: AzureConfig,

    /// Amazon Polly settings.
    pub aws: AwsConfig,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider: ProviderIdentity::Mock,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            google: GoogleConfig::default(),
            azure: AzureConfig::default(),
            aws: AwsConfig::default(),
        }
    }
}

/// Google Cloud Text-to-Speech settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    /// API key sent as the `key` query parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API base URL (optional, uses default if empty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Azure Speech settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    /// Subscription key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Service region, e.g. `westus`.
    pub region: String,

    /// Overrides the regional endpoint host (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            key: None,
            region: crate::azure::DEFAULT_REGION.to_string(),
            base_url: None,
        }
    }
}

/// Amazon Polly settings. Credentials come from the standard AWS chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    /// AWS region.
    pub region: String,

    /// Named profile from the shared config files (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Overrides the Polly endpoint (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: crate::polly::DEFAULT_REGION.to_string(),
            profile: None,
            endpoint_url: None,
        }
    }
}

impl TtsConfig {
    /// Returns the per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Builds a configuration from defaults and the process environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Overlays values from `lookup` onto this configuration.
    ///
    /// Empty values are treated as unset. Returns the names of variables
    /// whose values could not be used.
    pub fn apply_env<F>(&mut self, lookup: F) -> Vec<&'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut rejected = Vec::new();

        if let Some(name) = get(env::PROVIDER) {
            if !ProviderIdentity::is_known(&name) {
                rejected.push(env::PROVIDER);
            }
            self.provider = ProviderIdentity::resolve(Some(&name));
        }
        if let Some(secs) = get(env::TIMEOUT_SECS) {
            match secs.trim().parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => rejected.push(env::TIMEOUT_SECS),
            }
        }
        if let Some(key) = get(env::GOOGLE_API_KEY) {
            self.google.api_key = Some(key);
        }
        if let Some(key) = get(env::AZURE_KEY) {
            self.azure.key = Some(key);
        }
        if let Some(region) = get(env::AZURE_REGION) {
            self.azure.region = region;
        }
        if let Some(region) = get(env::AWS_REGION) {
            self.aws.region = region;
        }
        if let Some(profile) = get(env::AWS_PROFILE) {
            self.aws.profile = Some(profile);
        }
        rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
        let config = TtsConfig::default();
        assert_eq!(config.provider, ProviderIdentity::Mock);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.azure.region, "westus");
        assert_eq!(config.aws.region, "us-east-1");
        assert!(config.google.api_key.is_none());
    }

    #[test]
    fn test_apply_env() {
        let mut config = TtsConfig::default();
        let rejected = config.apply_env(lookup(&[
            ("TTS_PROVIDER", "Azure"),
            ("TTS_TIMEOUT_SECS", "3"),
            ("AZURE_TTS_KEY", "secret"),
            ("AZURE_TTS_REGION", "eastus"),
            ("GOOGLE_TTS_API_KEY", ""),
        ]));
        assert!(rejected.is_empty());
        assert_eq!(config.provider, ProviderIdentity::Azure);
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.azure.key.as_deref(), Some("secret"));
        assert_eq!(config.azure.region, "eastus");
        assert!(config.google.api_key.is_none());
    }

    #[test]
    fn test_apply_env_rejects_bad_values() {
        let mut config = TtsConfig::default();
        let rejected = config.apply_env(lookup(&[
            ("TTS_PROVIDER", "watson"),
            ("TTS_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(rejected, vec![env::PROVIDER, env::TIMEOUT_SECS]);
        assert_eq!(config.provider, ProviderIdentity::Mock);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let config = TtsConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TtsConfig =
            serde_json::from_str(r#"{"provider":"google","google":{"api_key":"k"}}"#).unwrap();
        assert_eq!(config.provider, ProviderIdentity::Google);
        assert_eq!(config.google.api_key.as_deref(), Some("k"));
        assert_eq!(config.azure.region, "westus");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
