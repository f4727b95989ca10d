//! Provider selection with tone fallback.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::audio::AudioResult;
use crate::azure::AzureSynthesizer;
use crate::config::TtsConfig;
use crate::error::{AdapterError, Result};
use crate::google::GoogleSynthesizer;
use crate::http::build_client;
use crate::polly::PollySynthesizer;
use crate::provider::ProviderIdentity;
use crate::request::SynthesisRequest;
use crate::synthesizer::Synthesizer;
use crate::tone::ToneSynthesizer;

/// Routes requests to the configured provider.
///
/// Adapter failures of any kind are logged and replaced by the fallback
/// tone, so [`Router::route`] only fails if the tone itself cannot be
/// rendered. Each request makes at most one adapter call.
pub struct Router {
    identity: ProviderIdentity,
    adapter: Option<Arc<dyn Synthesizer>>,
    fallback: ToneSynthesizer,
    timeout: Duration,
}

impl Router {
    /// Creates a router that always renders the tone.
    pub fn mock() -> Self {
        Self {
            identity: ProviderIdentity::Mock,
            adapter: None,
            fallback: ToneSynthesizer::default(),
            timeout: Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Creates a router around an adapter. The identity is the adapter's.
    pub fn with_adapter(adapter: Arc<dyn Synthesizer>, timeout: Duration) -> Self {
        Self {
            identity: adapter.provider(),
            adapter: Some(adapter),
            fallback: ToneSynthesizer::default(),
            timeout,
        }
    }

    /// Builds the router for `config.provider`.
    ///
    /// Adapter construction does not validate credentials; a provider with
    /// missing credentials falls back on every request.
    pub async fn from_config(config: &TtsConfig) -> Result<Self> {
        let timeout = config.timeout();
        let adapter: Arc<dyn Synthesizer> = match config.provider {
            ProviderIdentity::Mock => return Ok(Self::mock()),
            ProviderIdentity::Google => Arc::new(GoogleSynthesizer::new(
                build_client(timeout)?,
                &config.google,
            )),
            ProviderIdentity::Azure => {
                Arc::new(AzureSynthesizer::new(build_client(timeout)?, &config.azure))
            }
            ProviderIdentity::Aws => Arc::new(PollySynthesizer::new(&config.aws).await),
        };
        Ok(Self::with_adapter(adapter, timeout))
    }

    /// Returns the configured provider identity.
    pub fn identity(&self) -> ProviderIdentity {
        self.identity
    }

    /// Returns the per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Synthesizes `request` with the configured provider or the fallback tone.
    pub async fn route(&self, request: &SynthesisRequest) -> Result<AudioResult> {
        let Some(adapter) = &self.adapter else {
            return self.fallback.synthesize();
        };
        let outcome = self.invoke(adapter.as_ref(), request).await;
        self.recover(outcome)
    }

    /// Makes the single bounded adapter call for a request.
    async fn invoke(
        &self,
        adapter: &dyn Synthesizer,
        request: &SynthesisRequest,
    ) -> std::result::Result<AudioResult, AdapterError> {
        match tokio::time::timeout(self.timeout, adapter.invoke(request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(AdapterError::Timeout {
                provider: adapter.provider(),
                after: self.timeout,
            }),
        }
    }

    /// Returns adapter audio as-is, or the fallback tone on any adapter error.
    pub fn recover(
        &self,
        outcome: std::result::Result<AudioResult, AdapterError>,
    ) -> Result<AudioResult> {
        match outcome {
            Ok(audio) => {
                debug!(provider = %self.identity, bytes = audio.len(), "tts: synthesized");
                Ok(audio)
            }
            Err(e) => {
                warn!(
                    provider = %e.provider(),
                    error = %e,
                    "tts: adapter failed, falling back to tone"
                );
                self.fallback.synthesize()
            }
        }
    }
}
