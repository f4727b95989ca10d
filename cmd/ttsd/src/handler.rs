//! Request handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, warn};

use qanet_tts::{
    AudioResult, ContentType, DEFAULT_LOCALE, DEFAULT_PARAM, ProviderIdentity, SynthesisRequest,
    ValidationError,
};

use crate::config::HeaderPolicy;
use crate::server::AppState;

const CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";

/// Body of `POST /api/tts`.
///
/// `text` is kept as raw JSON so that a missing or non-string value is
/// reported as "Text is required" rather than as a decoding error.
#[derive(Debug, Default, Deserialize)]
pub struct TtsBody {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub pitch: Option<f64>,
}

impl TtsBody {
    /// Validates the body into a synthesis request.
    pub fn into_request(self) -> Result<SynthesisRequest, ValidationError> {
        let text = match &self.text {
            Some(Value::String(text)) => text.as_str(),
            _ => return Err(ValidationError::EmptyText),
        };
        let locale = self
            .locale
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        SynthesisRequest::new(
            text,
            locale,
            self.rate.unwrap_or(DEFAULT_PARAM),
            self.pitch.unwrap_or(DEFAULT_PARAM),
        )
    }
}

/// Errors rendered as `{"error": message}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Synthesis(#[from] qanet_tts::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Synthesis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "ttsd: synthesis failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `POST /api/tts`: validates, synthesizes and returns the audio as a download.
pub async fn synthesize(
    State(state): State<AppState>,
    body: Result<Json<TtsBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let request = body.into_request()?;
    let audio = state.router.route(&request).await?;
    Ok(audio_response(audio, state.router.identity(), state.header_policy))
}

/// `GET /health`.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "provider": state.router.identity().as_str(),
    }))
}

/// Picks the content type announced to the client.
pub fn header_content_type(
    audio: &AudioResult,
    identity: ProviderIdentity,
    policy: HeaderPolicy,
) -> ContentType {
    match policy {
        HeaderPolicy::Produced => audio.content_type(),
        HeaderPolicy::Configured => {
            let announced = identity.content_type();
            if announced != audio.content_type() {
                warn!(
                    provider = %identity,
                    announced = announced.mime(),
                    produced = audio.content_type().mime(),
                    "ttsd: response headers do not match audio"
                );
            }
            announced
        }
    }
}

fn audio_response(audio: AudioResult, identity: ProviderIdentity, policy: HeaderPolicy) -> Response {
    let content_type = header_content_type(&audio, identity, policy);
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type.mime())),
            (
                header::CONTENT_DISPOSITION,
                HeaderValue::from_static(content_type.content_disposition()),
            ),
            (header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL)),
        ],
        Body::from(audio.into_bytes()),
    )
        .into_response()
}
