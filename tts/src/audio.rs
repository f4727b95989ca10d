//! Synthesized audio returned to callers.

use bytes::Bytes;

/// MIME type of a synthesized payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// Uncompressed RIFF/WAVE (the fallback tone).
    Wav,
    /// MP3 as returned by external providers.
    Mpeg,
}

impl ContentType {
    /// Returns the MIME string.
    pub fn mime(&self) -> &'static str {
        match self {
            ContentType::Wav => "audio/wav",
            ContentType::Mpeg => "audio/mpeg",
        }
    }

    /// Returns the download file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            ContentType::Wav => "audio.wav",
            ContentType::Mpeg => "audio.mp3",
        }
    }

    /// Returns the `Content-Disposition` value for a download.
    pub fn content_disposition(&self) -> &'static str {
        match self {
            ContentType::Wav => "attachment; filename=\"audio.wav\"",
            ContentType::Mpeg => "attachment; filename=\"audio.mp3\"",
        }
    }
}

/// Audio bytes produced by exactly one adapter or by the tone synthesizer.
///
/// The bytes are opaque; provider payloads are passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioResult {
    data: Bytes,
    content_type: ContentType,
}

impl AudioResult {
    /// Creates a result with an explicit content type.
    pub fn new(data: impl Into<Bytes>, content_type: ContentType) -> Self {
        Self {
            data: data.into(),
            content_type,
        }
    }

    /// Wraps a WAV file.
    pub fn wav(data: impl Into<Bytes>) -> Self {
        Self::new(data, ContentType::Wav)
    }

    /// Wraps an MP3 payload.
    pub fn mpeg(data: impl Into<Bytes>) -> Self {
        Self::new(data, ContentType::Mpeg)
    }

    /// Returns the content type of the bytes actually produced.
    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Returns the audio bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if no bytes were produced.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consumes the result and returns the bytes.
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}
