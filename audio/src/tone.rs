//! Pure sine tone generation.

use std::f64::consts::PI;
use std::time::Duration;

use crate::error::Result;
use crate::pcm::Format;
use crate::wav;

/// A fixed-length sine tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Output format. Stereo formats carry the same sample on both channels.
    pub format: Format,
    /// Frequency in Hz.
    pub frequency: f64,
    /// Length of the tone; the frame count is rounded down.
    pub duration: Duration,
    /// Peak amplitude in 16-bit sample units.
    pub amplitude: f64,
}

impl Tone {
    /// The 800 Hz, half-second beep used as placeholder audio.
    ///
    /// An amplitude of 15000 leaves headroom below `i16::MAX`.
    pub const BEEP: Tone = Tone {
        format: Format::MONO_22K,
        frequency: 800.0,
        duration: Duration::from_millis(500),
        amplitude: 15000.0,
    };

    /// Returns the number of sample frames the tone spans.
    pub fn frame_count(&self) -> usize {
        self.format.frames_in_duration(self.duration)
    }

    /// Generates the interleaved samples.
    pub fn samples(&self) -> Vec<i16> {
        let frames = self.frame_count();
        let channels = self.format.channels() as usize;
        let rate = self.format.sample_rate as f64;
        let mut data = Vec::with_capacity(frames * channels);

        for i in 0..frames {
            let t = i as f64 / rate;
            let value = (self.amplitude * (2.0 * PI * self.frequency * t).sin()).round();
            let sample = value.clamp(i16::MIN as f64, i16::MAX as f64) as i16;
            data.extend(std::iter::repeat_n(sample, channels));
        }
        data
    }

    /// Renders the tone as a complete WAV file.
    pub fn to_wav(&self) -> Result<Vec<u8>> {
        wav::encode(self.format, &self.samples())
    }
}
