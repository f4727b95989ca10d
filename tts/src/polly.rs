//! Amazon Polly adapter.

use async_trait::async_trait;
use aws_sdk_polly::Client;
use aws_sdk_polly::config::Region;
use aws_sdk_polly::error::DisplayErrorContext;
use aws_sdk_polly::types::{Engine, OutputFormat, TextType, VoiceId};

use crate::audio::AudioResult;
use crate::config::AwsConfig;
use crate::error::AdapterError;
use crate::provider::ProviderIdentity;
use crate::request::SynthesisRequest;
use crate::ssml;
use crate::synthesizer::Synthesizer;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

const PROVIDER: ProviderIdentity = ProviderIdentity::Aws;

/// Supported locales and their voices. The first entry is the default.
const VOICES: [(&str, &str); 2] = [("en-US", "Joanna"), ("es-ES", "Lucia")];

/// Returns the Polly voice for `locale`, defaulting to Joanna.
pub fn voice_for(locale: &str) -> &'static str {
    VOICES
        .iter()
        .find(|(lang, _)| *lang == locale)
        .map_or(VOICES[0].1, |(_, voice)| *voice)
}

/// Maps a canonical rate multiplier to Polly's absolute percentage,
/// `round(rate × 100)`.
pub fn rate_percent(rate: f64) -> i64 {
    (rate * 100.0).round() as i64
}

/// Builds the SSML document for `request`.
///
/// Polly has no rate/pitch request fields; both travel in `<prosody>`.
/// The neural engine does not support the `pitch` attribute, so pitch has
/// no audible effect on neural voices and may be rejected for some of them.
pub fn build_ssml(request: &SynthesisRequest) -> String {
    format!(
        "<speak><prosody rate='{}%' pitch='{}'>{}</prosody></speak>",
        rate_percent(request.rate()),
        ssml::signed_percent(ssml::relative_offset(request.pitch())),
        ssml::escape(request.text()),
    )
}

/// Synthesizer backed by Amazon Polly.
pub struct PollySynthesizer {
    client: Client,
}

impl PollySynthesizer {
    /// Creates an adapter from the shared AWS configuration chain.
    ///
    /// Credentials are resolved lazily; missing credentials surface as an
    /// SDK error on `invoke`.
    pub async fn new(config: &AwsConfig) -> Self {
        let region = if config.region.is_empty() {
            DEFAULT_REGION.to_string()
        } else {
            config.region.clone()
        };

        let mut loader =
            aws_config::defaults(aws_config::BehaviorVersion::latest()).region(Region::new(region));
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl Synthesizer for PollySynthesizer {
    fn provider(&self) -> ProviderIdentity {
        PROVIDER
    }

    async fn invoke(&self, request: &SynthesisRequest) -> Result<AudioResult, AdapterError> {
        let output = self
            .client
            .synthesize_speech()
            .text(build_ssml(request))
            .text_type(TextType::Ssml)
            .voice_id(VoiceId::from(voice_for(request.locale())))
            .output_format(OutputFormat::Mp3)
            .engine(Engine::Neural)
            .send()
            .await
            .map_err(|e| AdapterError::Sdk {
                provider: PROVIDER,
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let audio = output
            .audio_stream
            .collect()
            .await
            .map_err(|e| AdapterError::malformed(PROVIDER, format!("audio stream: {}", e)))?
            .into_bytes();
        if audio.is_empty() {
            return Err(AdapterError::malformed(PROVIDER, "empty audio stream"));
        }
        Ok(AudioResult::mpeg(audio))
    }
}
