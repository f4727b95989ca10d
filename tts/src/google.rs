//! Google Cloud Text-to-Speech adapter (REST, API key).

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};

use crate::audio::AudioResult;
use crate::config::GoogleConfig;
use crate::error::AdapterError;
use crate::http::success_body;
use crate::provider::ProviderIdentity;
use crate::request::SynthesisRequest;
use crate::synthesizer::Synthesizer;

/// Default Google Cloud Text-to-Speech base URL.
pub const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";

const SYNTHESIZE_PATH: &str = "/v1/text:synthesize";
const PROVIDER: ProviderIdentity = ProviderIdentity::Google;

/// Maps a canonical pitch multiplier onto Google's semitone offset,
/// `(pitch - 1) × 20`: 0.5 → -10, 2.0 → +20.
pub fn pitch_semitones(pitch: f64) -> f64 {
    (pitch - 1.0) * 20.0
}

/// Returns the Neural2 voice for `locale`, e.g. `en-US-Neural2-A`.
pub fn voice_name(locale: &str) -> String {
    format!("{}-Neural2-A", locale)
}

/// Synthesizer backed by Google Cloud Text-to-Speech.
pub struct GoogleSynthesizer {
    http: ReqwestClient,
    api_key: Option<String>,
    base_url: String,
}

impl GoogleSynthesizer {
    /// Creates an adapter. A missing key is reported on each `invoke`.
    pub fn new(http: ReqwestClient, config: &GoogleConfig) -> Self {
        let base_url = config
            .base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        Self {
            http,
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
            base_url,
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Synthesizer for GoogleSynthesizer {
    fn provider(&self) -> ProviderIdentity {
        PROVIDER
    }

    async fn invoke(&self, request: &SynthesisRequest) -> Result<AudioResult, AdapterError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AdapterError::MissingCredentials {
                provider: PROVIDER,
                what: crate::config::env::GOOGLE_API_KEY,
            })?;

        let url = format!("{}{}", self.base_url, SYNTHESIZE_PATH);
        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&SynthesizeRequest::from_request(request))
            .send()
            .await
            .map_err(|e| AdapterError::http(PROVIDER, e))?;

        let body = success_body(PROVIDER, response).await?;
        let resp: SynthesizeResponse = serde_json::from_slice(&body)
            .map_err(|e| AdapterError::malformed(PROVIDER, e.to_string()))?;

        let content = resp
            .audio_content
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AdapterError::malformed(PROVIDER, "response has no audioContent"))?;
        let audio = BASE64
            .decode(content)
            .map_err(|e| AdapterError::malformed(PROVIDER, format!("audioContent: {}", e)))?;

        Ok(AudioResult::mpeg(audio))
    }
}

// ==================== Wire Types ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelectionParams,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelectionParams {
    language_code: String,
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    speaking_rate: f64,
    pitch: f64,
}

impl<'a> SynthesizeRequest<'a> {
    pub(crate) fn from_request(request: &'a SynthesisRequest) -> Self {
        Self {
            input: SynthesisInput {
                text: request.text(),
            },
            voice: VoiceSelectionParams {
                language_code: request.locale().to_string(),
                name: voice_name(request.locale()),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
                speaking_rate: request.rate(),
                pitch: pitch_semitones(request.pitch()),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: Option<String>,
}
