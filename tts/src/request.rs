//! Canonical synthesis request.

use crate::error::ValidationError;

/// Maximum text length, in characters.
pub const MAX_TEXT_CHARS: usize = 1000;

/// Lower bound of the canonical rate/pitch range.
pub const MIN_PARAM: f64 = 0.5;

/// Upper bound of the canonical rate/pitch range.
pub const MAX_PARAM: f64 = 2.0;

/// Neutral rate and pitch.
pub const DEFAULT_PARAM: f64 = 1.0;

/// Locale used when the client does not send one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// A validated synthesis request.
///
/// Rate and pitch are multipliers in `[0.5, 2.0]` where 1.0 is neutral;
/// adapters map them onto their provider's own units.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    text: String,
    locale: String,
    rate: f64,
    pitch: f64,
}

impl SynthesisRequest {
    /// Validates the inputs and builds a request.
    ///
    /// The length limit applies to `text` as given; the stored text is trimmed.
    pub fn new(
        text: &str,
        locale: impl Into<String>,
        rate: f64,
        pitch: f64,
    ) -> Result<Self, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let chars = text.chars().count();
        if chars > MAX_TEXT_CHARS {
            return Err(ValidationError::TextTooLong { chars });
        }
        if !in_range(rate) || !in_range(pitch) {
            return Err(ValidationError::OutOfRange { rate, pitch });
        }
        Ok(Self {
            text: text.trim().to_string(),
            locale: locale.into(),
            rate,
            pitch,
        })
    }

    /// Returns the trimmed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the language/region tag, e.g. `en-US`.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Returns the speaking rate multiplier.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the pitch multiplier.
    pub fn pitch(&self) -> f64 {
        self.pitch
    }
}

fn in_range(value: f64) -> bool {
    (MIN_PARAM..=MAX_PARAM).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request_is_trimmed() {
        let req = SynthesisRequest::new("  Hello  ", "en-US", 1.0, 1.0).unwrap();
        assert_eq!(req.text(), "Hello");
        assert_eq!(req.locale(), "en-US");
        assert_eq!(req.rate(), 1.0);
        assert_eq!(req.pitch(), 1.0);
    }

    #[test]
    fn test_blank_text_rejected() {
        for text in ["", "   ", "\n\t"] {
            assert_eq!(
                SynthesisRequest::new(text, "en-US", 1.0, 1.0),
                Err(ValidationError::EmptyText)
            );
        }
    }

    #[test]
    fn test_length_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_TEXT_CHARS);
        assert!(SynthesisRequest::new(&at_limit, "fr-FR", 1.0, 1.0).is_ok());

        let over = "a".repeat(MAX_TEXT_CHARS + 1);
        assert_eq!(
            SynthesisRequest::new(&over, "en-US", 1.0, 1.0),
            Err(ValidationError::TextTooLong { chars: 1001 })
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(SynthesisRequest::new("hi", "en-US", 0.5, 2.0).is_ok());
        assert!(SynthesisRequest::new("hi", "en-US", 2.0, 0.5).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        for (rate, pitch) in [(3.0, 1.0), (1.0, 0.49), (0.0, 1.0), (1.0, 2.01), (f64::NAN, 1.0)] {
            assert!(matches!(
                SynthesisRequest::new("hi", "en-US", rate, pitch),
                Err(ValidationError::OutOfRange { .. })
            ));
        }
    }
}
