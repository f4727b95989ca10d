//! Audio utilities for the qanet text-to-speech service.
//!
//! - `pcm`: 16-bit PCM format descriptions and sample packing
//! - `tone`: sine tone generation
//! - `wav`: canonical RIFF/WAVE container encoding and parsing
//!
//! # Example
//!
//! ```rust
//! use qanet_audio::tone::Tone;
//! use qanet_audio::wav;
//!
//! let wav = Tone::BEEP.to_wav()?;
//! let (header, pcm) = wav::decode(&wav)?;
//! assert_eq!(header.data_len as usize, pcm.len());
//! # Ok::<(), qanet_audio::Error>(())
//! ```

mod error;
pub mod pcm;
pub mod tone;
pub mod wav;

pub use error::{Error, Result};
pub use pcm::Format;
