//! Azure Speech adapter (SSML over REST).

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use reqwest::header::CONTENT_TYPE;

use crate::audio::AudioResult;
use crate::config::AzureConfig;
use crate::error::AdapterError;
use crate::http::success_body;
use crate::provider::ProviderIdentity;
use crate::request::SynthesisRequest;
use crate::ssml;
use crate::synthesizer::Synthesizer;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "westus";

/// MP3 output requested from the service.
pub const OUTPUT_FORMAT: &str = "audio-16khz-32kbitrate-mono-mp3";

const SYNTHESIZE_PATH: &str = "/cognitiveservices/v1";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OUTPUT_FORMAT_HEADER: &str = "X-Microsoft-OutputFormat";
const PROVIDER: ProviderIdentity = ProviderIdentity::Azure;

/// Supported languages and their neural voices. The first entry is the default.
const VOICES: [(&str, &str); 2] = [
    ("en-US", "en-US-AriaNeural"),
    ("es-ES", "es-ES-ElviraNeural"),
];

/// Returns the SSML language for `locale`, defaulting to `en-US`.
pub fn language_for(locale: &str) -> &'static str {
    VOICES
        .iter()
        .find(|(lang, _)| *lang == locale)
        .map_or(VOICES[0].0, |(lang, _)| *lang)
}

/// Returns the neural voice for a supported language.
pub fn voice_for(language: &str) -> &'static str {
    VOICES
        .iter()
        .find(|(lang, _)| *lang == language)
        .map_or(VOICES[0].1, |(_, voice)| *voice)
}

/// Builds the SSML document for `request`.
///
/// Rate and pitch are relative offsets, `(value - 1) × 50` percent.
pub fn build_ssml(request: &SynthesisRequest) -> String {
    let language = language_for(request.locale());
    format!(
        "<speak version='1.0' xml:lang='{lang}'><voice name='{voice}'>\
         <prosody rate='{rate}' pitch='{pitch}'>{text}</prosody></voice></speak>",
        lang = language,
        voice = voice_for(language),
        rate = ssml::signed_percent(ssml::relative_offset(request.rate())),
        pitch = ssml::signed_percent(ssml::relative_offset(request.pitch())),
        text = ssml::escape(request.text()),
    )
}

/// Synthesizer backed by Azure Speech.
pub struct AzureSynthesizer {
    http: ReqwestClient,
    key: Option<String>,
    endpoint: String,
}

impl AzureSynthesizer {
    /// Creates an adapter. A missing key is reported on each `invoke`.
    pub fn new(http: ReqwestClient, config: &AzureConfig) -> Self {
        let base_url = match config.base_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => {
                let region = if config.region.is_empty() {
                    DEFAULT_REGION
                } else {
                    config.region.as_str()
                };
                format!("https://{}.tts.speech.microsoft.com", region)
            }
        };
        Self {
            http,
            key: config.key.clone().filter(|key| !key.is_empty()),
            endpoint: format!("{}{}", base_url, SYNTHESIZE_PATH),
        }
    }

    /// Returns the synthesis endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Synthesizer for AzureSynthesizer {
    fn provider(&self) -> ProviderIdentity {
        PROVIDER
    }

    async fn invoke(&self, request: &SynthesisRequest) -> Result<AudioResult, AdapterError> {
        let key = self.key.as_deref().ok_or(AdapterError::MissingCredentials {
            provider: PROVIDER,
            what: crate::config::env::AZURE_KEY,
        })?;

        let response = self
            .http
            .post(&self.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .header(CONTENT_TYPE, "application/ssml+xml")
            .header(OUTPUT_FORMAT_HEADER, OUTPUT_FORMAT)
            .body(build_ssml(request))
            .send()
            .await
            .map_err(|e| AdapterError::http(PROVIDER, e))?;

        let audio = success_body(PROVIDER, response).await?;
        if audio.is_empty() {
            return Err(AdapterError::malformed(PROVIDER, "empty audio body"));
        }
        Ok(AudioResult::mpeg(audio))
    }
}
