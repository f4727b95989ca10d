//! Text-to-speech acquisition for the qanet export service.
//!
//! This crate provides:
//! - [`SynthesisRequest`]: a validated text/locale/rate/pitch request
//! - [`Synthesizer`]: the adapter seam, implemented for Google Cloud TTS,
//!   Azure Speech and Amazon Polly
//! - [`ToneSynthesizer`]: the deterministic WAV beep used by the mock
//!   provider and as fallback
//! - [`Router`]: provider selection with unconditional fallback
//!
//! # Example
//!
//! ```rust,no_run
//! use qanet_tts::{Router, SynthesisRequest, TtsConfig};
//!
//! # async fn run() -> qanet_tts::Result<()> {
//! let router = Router::from_config(&TtsConfig::from_env()).await?;
//! let request = SynthesisRequest::new("Hello", "en-US", 1.0, 1.0).unwrap();
//! let audio = router.route(&request).await?;
//! println!("{} bytes of {}", audio.len(), audio.content_type().mime());
//! # Ok(())
//! # }
//! ```

mod audio;
pub mod azure;
mod config;
mod error;
pub mod google;
pub mod http;
pub mod polly;
mod provider;
mod request;
mod router;
pub mod ssml;
mod synthesizer;
mod tone;

pub use audio::{AudioResult, ContentType};
pub use config::{AwsConfig, AzureConfig, DEFAULT_TIMEOUT_SECS, GoogleConfig, TtsConfig, env};
pub use error::{AdapterError, Error, Result, ValidationError};
pub use provider::ProviderIdentity;
pub use request::{
    DEFAULT_LOCALE, DEFAULT_PARAM, MAX_PARAM, MAX_TEXT_CHARS, MIN_PARAM, SynthesisRequest,
};
pub use router::Router;
pub use synthesizer::Synthesizer;
pub use tone::ToneSynthesizer;
