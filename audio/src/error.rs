//! Error types for audio encoding.

use thiserror::Error;

/// Result type alias for audio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for audio operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The payload does not fit the 32-bit size fields of a RIFF container.
    #[error("wav: payload of {0} bytes exceeds the RIFF size limit")]
    TooLarge(usize),

    /// The PCM payload is not a whole number of sample frames.
    #[error("wav: {len} bytes is not a multiple of the {block_align}-byte frame")]
    UnalignedData { len: usize, block_align: u16 },

    /// The buffer is shorter than a WAV header.
    #[error("wav: truncated header ({0} bytes)")]
    Truncated(usize),

    /// The header is not a canonical 16-bit PCM WAV header.
    #[error("wav: invalid header: {0}")]
    InvalidHeader(String),
}
