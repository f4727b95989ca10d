//! Error types for text-to-speech routing.

use std::time::Duration;

use thiserror::Error;

use crate::provider::ProviderIdentity;
use crate::request::{MAX_PARAM, MAX_TEXT_CHARS, MIN_PARAM};

/// Result type alias for routing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A synthesis request that violates the input contract.
///
/// The display strings are returned verbatim to HTTP clients.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Text is missing or blank.
    #[error("Text is required")]
    EmptyText,

    /// Text is longer than [`MAX_TEXT_CHARS`] characters.
    #[error("Text exceeds {} characters", MAX_TEXT_CHARS)]
    TextTooLong { chars: usize },

    /// Rate or pitch is outside the canonical range.
    #[error("Rate and pitch must be between {} and {}", MIN_PARAM, MAX_PARAM)]
    OutOfRange { rate: f64, pitch: f64 },
}

/// A failed attempt to obtain audio from an external provider.
///
/// The router never surfaces these to callers; they are logged and replaced
/// by the fallback tone.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The provider credentials are not configured.
    #[error("{provider}: missing credentials: {what} not configured")]
    MissingCredentials {
        provider: ProviderIdentity,
        what: &'static str,
    },

    /// The request could not be sent or the response could not be read.
    #[error("{provider}: http error: {source}")]
    Http {
        provider: ProviderIdentity,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[error("{provider}: api error (status={status}): {message}")]
    Api {
        provider: ProviderIdentity,
        status: u16,
        message: String,
    },

    /// The provider answered successfully but the payload is unusable.
    #[error("{provider}: malformed response: {message}")]
    Malformed {
        provider: ProviderIdentity,
        message: String,
    },

    /// The call did not complete within the configured timeout.
    #[error("{provider}: no response after {after:?}")]
    Timeout {
        provider: ProviderIdentity,
        after: Duration,
    },

    /// The provider SDK reported an error.
    #[error("{provider}: sdk error: {message}")]
    Sdk {
        provider: ProviderIdentity,
        message: String,
    },
}

impl AdapterError {
    pub(crate) fn http(provider: ProviderIdentity, source: reqwest::Error) -> Self {
        AdapterError::Http { provider, source }
    }

    pub(crate) fn malformed(provider: ProviderIdentity, message: impl Into<String>) -> Self {
        AdapterError::Malformed {
            provider,
            message: message.into(),
        }
    }

    /// Returns the provider the failed call was addressed to.
    pub fn provider(&self) -> ProviderIdentity {
        match self {
            AdapterError::MissingCredentials { provider, .. }
            | AdapterError::Http { provider, .. }
            | AdapterError::Api { provider, .. }
            | AdapterError::Malformed { provider, .. }
            | AdapterError::Timeout { provider, .. }
            | AdapterError::Sdk { provider, .. } => *provider,
        }
    }

    /// Returns true if the adapter was never called because credentials are missing.
    pub fn is_missing_credentials(&self) -> bool {
        matches!(self, AdapterError::MissingCredentials { .. })
    }

    /// Returns true if the call was abandoned after the timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            AdapterError::Timeout { .. } => true,
            AdapterError::Http { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Returns the HTTP status of an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AdapterError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error type for failures that cannot be recovered by fallback.
#[derive(Error, Debug)]
pub enum Error {
    /// The fallback tone could not be rendered.
    #[error("tone synthesis failed: {0}")]
    Tone(#[from] qanet_audio::Error),

    /// The shared HTTP client could not be built.
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
}
