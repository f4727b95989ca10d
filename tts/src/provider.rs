//! Provider identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::audio::ContentType;

/// The backend selected for a process.
///
/// Parsing is lenient: names are matched case-insensitively and anything
/// unrecognized resolves to [`ProviderIdentity::Mock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProviderIdentity {
    /// Local tone synthesis only.
    #[default]
    Mock,
    /// Google Cloud Text-to-Speech.
    Google,
    /// Azure Cognitive Services Speech.
    Azure,
    /// Amazon Polly.
    Aws,
}

impl ProviderIdentity {
    /// All identities, in configuration order.
    pub const ALL: [ProviderIdentity; 4] = [
        ProviderIdentity::Mock,
        ProviderIdentity::Google,
        ProviderIdentity::Azure,
        ProviderIdentity::Aws,
    ];

    /// Returns the configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderIdentity::Mock => "mock",
            ProviderIdentity::Google => "google",
            ProviderIdentity::Azure => "azure",
            ProviderIdentity::Aws => "aws",
        }
    }

    /// Resolves a configured name, or `None` for unset.
    pub fn resolve(name: Option<&str>) -> Self {
        let Some(name) = name else {
            return ProviderIdentity::Mock;
        };
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }

    /// Returns true if `name` is a known identity.
    pub fn is_known(name: &str) -> bool {
        let name = name.trim();
        Self::ALL.iter().any(|p| p.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns true for the local tone backend.
    pub fn is_mock(&self) -> bool {
        matches!(self, ProviderIdentity::Mock)
    }

    /// Returns the content type this provider produces when it succeeds.
    pub fn content_type(&self) -> ContentType {
        if self.is_mock() {
            ContentType::Wav
        } else {
            ContentType::Mpeg
        }
    }
}

impl fmt::Display for ProviderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ProviderIdentity {
    fn from(name: String) -> Self {
        ProviderIdentity::resolve(Some(&name))
    }
}

impl From<ProviderIdentity> for String {
    fn from(provider: ProviderIdentity) -> Self {
        provider.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_names() {
        assert_eq!(ProviderIdentity::resolve(Some("google")), ProviderIdentity::Google);
        assert_eq!(ProviderIdentity::resolve(Some("AZURE")), ProviderIdentity::Azure);
        assert_eq!(ProviderIdentity::resolve(Some(" Aws ")), ProviderIdentity::Aws);
        assert_eq!(ProviderIdentity::resolve(Some("mock")), ProviderIdentity::Mock);
    }

    #[test]
    fn test_resolve_defaults_to_mock() {
        assert_eq!(ProviderIdentity::resolve(None), ProviderIdentity::Mock);
        assert_eq!(ProviderIdentity::resolve(Some("")), ProviderIdentity::Mock);
        assert_eq!(ProviderIdentity::resolve(Some("elevenlabs")), ProviderIdentity::Mock);
        assert!(!ProviderIdentity::is_known("elevenlabs"));
    }

    #[test]
    fn test_content_type_by_identity() {
        assert_eq!(ProviderIdentity::Mock.content_type(), ContentType::Wav);
        for p in [ProviderIdentity::Google, ProviderIdentity::Azure, ProviderIdentity::Aws] {
            assert_eq!(p.content_type(), ContentType::Mpeg);
        }
    }

    #[test]
    fn test_serde_is_lenient() {
        let p: ProviderIdentity = serde_json::from_str("\"Google\"").unwrap();
        assert_eq!(p, ProviderIdentity::Google);
        let p: ProviderIdentity = serde_json::from_str("\"unknown\"").unwrap();
        assert_eq!(p, ProviderIdentity::Mock);
        assert_eq!(serde_json::to_string(&ProviderIdentity::Aws).unwrap(), "\"aws\"");
    }
}
