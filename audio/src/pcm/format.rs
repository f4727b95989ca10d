//! PCM audio format definitions.

use std::time::Duration;

/// Bit depth of every format handled by this crate.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Describes a 16-bit signed little-endian PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Sample rate in Hz (e.g., 22050, 44100).
    pub sample_rate: u32,
    /// True for stereo (2 channels), false for mono (1 channel).
    pub stereo: bool,
}

impl Format {
    /// Creates a new format with the given sample rate and mono audio.
    pub const fn mono(sample_rate: u32) -> Self {
        Self { sample_rate, stereo: false }
    }

    /// Creates a new format with the given sample rate and stereo audio.
    pub const fn stereo(sample_rate: u32) -> Self {
        Self { sample_rate, stereo: true }
    }

    /// Returns the number of channels (1 for mono, 2 for stereo).
    pub const fn channels(&self) -> u16 {
        if self.stereo { 2 } else { 1 }
    }

    /// Returns the number of bytes per sample frame (the WAV block alignment).
    pub const fn block_align(&self) -> u16 {
        self.channels() * (BITS_PER_SAMPLE / 8)
    }

    /// Returns the number of bytes per second.
    pub const fn bytes_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// Returns the number of sample frames covering `duration`, rounded down.
    pub fn frames_in_duration(&self, duration: Duration) -> usize {
        (self.sample_rate as f64 * duration.as_secs_f64()).floor() as usize
    }
}

// Common format presets
impl Format {
    /// 16kHz mono
    pub const MONO_16K: Format = Format::mono(16000);
    /// 22.05kHz mono (fallback tone output)
    pub const MONO_22K: Format = Format::mono(22050);
    /// 44.1kHz stereo (CD quality)
    pub const STEREO_44K: Format = Format::stereo(44100);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_channels() {
        assert_eq!(Format::mono(16000).channels(), 1);
        assert_eq!(Format::stereo(48000).channels(), 2);
    }

    #[test]
    fn test_format_block_align() {
        assert_eq!(Format::MONO_22K.block_align(), 2); // 16-bit mono = 2 bytes
        assert_eq!(Format::STEREO_44K.block_align(), 4);
    }

    #[test]
    fn test_format_bytes_rate() {
        assert_eq!(Format::MONO_22K.bytes_rate(), 44100);
        assert_eq!(Format::STEREO_44K.bytes_rate(), 176400);
    }

    #[test]
    fn test_frames_in_duration_rounds_down() {
        let format = Format::MONO_22K;
        assert_eq!(format.frames_in_duration(Duration::from_millis(500)), 11025);
        // 22050 * 0.0001 = 2.205
        assert_eq!(format.frames_in_duration(Duration::from_micros(100)), 2);
    }
}
