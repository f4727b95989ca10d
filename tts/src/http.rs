//! HTTP plumbing shared by the REST-based adapters.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client as ReqwestClient, Response};

use crate::error::{AdapterError, Result};
use crate::provider::ProviderIdentity;

/// User agent sent to every provider.
pub const USER_AGENT: &str = concat!("qanet-tts-rust/", env!("CARGO_PKG_VERSION"));

/// Longest provider error body echoed into logs.
const MAX_ERROR_BODY: usize = 512;

/// Builds the client shared by all adapters of a process.
///
/// `timeout` bounds each request end to end; the router applies the same
/// bound around the whole adapter call.
pub fn build_client(timeout: Duration) -> Result<ReqwestClient> {
    let client = ReqwestClient::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Reads the full body of a successful response.
///
/// Non-success statuses become [`AdapterError::Api`] carrying a truncated
/// copy of the provider's error body.
pub(crate) async fn success_body(
    provider: ProviderIdentity,
    response: Response,
) -> std::result::Result<Bytes, AdapterError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| AdapterError::http(provider, e))?;

    if !status.is_success() {
        return Err(AdapterError::Api {
            provider,
            status: status.as_u16(),
            message: error_message(status.canonical_reason(), &body),
        });
    }
    Ok(body)
}

fn error_message(reason: Option<&str>, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return reason.unwrap_or("unknown error").to_string();
    }
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_body() {
        assert_eq!(error_message(Some("Forbidden"), b"  bad key \n"), "bad key");
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        assert_eq!(error_message(Some("Unauthorized"), b""), "Unauthorized");
        assert_eq!(error_message(None, b""), "unknown error");
    }

    #[test]
    fn test_error_message_truncates() {
        let body = "x".repeat(MAX_ERROR_BODY + 10);
        let msg = error_message(None, body.as_bytes());
        assert_eq!(msg.len(), MAX_ERROR_BODY + 3);
        assert!(msg.ends_with("..."));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(Duration::from_secs(5)).is_ok());
    }
}
