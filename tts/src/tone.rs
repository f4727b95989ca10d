//! Local tone synthesis used for the mock provider and as fallback.

use qanet_audio::tone::Tone;

use crate::audio::AudioResult;
use crate::error::Result;

/// Renders a fixed placeholder beep as WAV.
///
/// The output does not depend on the request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSynthesizer {
    tone: Tone,
}

impl Default for ToneSynthesizer {
    fn default() -> Self {
        Self::new(Tone::BEEP)
    }
}

impl ToneSynthesizer {
    /// Creates a synthesizer for `tone`.
    pub fn new(tone: Tone) -> Self {
        Self { tone }
    }

    /// Renders the tone.
    pub fn synthesize(&self) -> Result<AudioResult> {
        Ok(AudioResult::wav(self.tone.to_wav()?))
    }
}
