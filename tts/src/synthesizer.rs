//! The adapter seam between the router and external providers.

use async_trait::async_trait;

use crate::audio::AudioResult;
use crate::error::AdapterError;
use crate::provider::ProviderIdentity;
use crate::request::SynthesisRequest;

/// A backend that turns a canonical request into provider audio.
///
/// Implementations make exactly one provider call per `invoke` and never
/// retry; retries and fallback belong to the caller.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Returns the identity this adapter serves.
    fn provider(&self) -> ProviderIdentity;

    /// Synthesizes `request`, returning the provider's bytes unmodified.
    async fn invoke(&self, request: &SynthesisRequest) -> Result<AudioResult, AdapterError>;
}
