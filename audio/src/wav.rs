//! Canonical 44-byte RIFF/WAVE container for 16-bit PCM.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! 0   "RIFF"    4   riff_len = 36 + data_len
//! 8   "WAVE"    12  "fmt "   16  16 (fmt chunk size)
//! 20  1 (PCM)   22  channels 24  sample_rate
//! 28  byte_rate 32  block_align  34  bits_per_sample
//! 36  "data"    40  data_len
//! 44  samples...
//! ```

use crate::error::{Error, Result};
use crate::pcm::{BITS_PER_SAMPLE, Format, samples_to_bytes};

/// Size of the canonical header in bytes.
pub const HEADER_LEN: usize = 44;

/// Bytes of the RIFF chunk that precede the data payload, excluding the
/// 8-byte RIFF preamble itself.
const RIFF_OVERHEAD: u32 = (HEADER_LEN - 8) as u32;

const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;

/// A parsed or to-be-written WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Audio format of the payload.
    pub format: Format,
    /// Length of the data chunk in bytes.
    pub data_len: u32,
}

impl Header {
    /// Creates a header for `data_len` bytes of PCM.
    pub fn new(format: Format, data_len: usize) -> Result<Self> {
        let block_align = format.block_align();
        if data_len % block_align as usize != 0 {
            return Err(Error::UnalignedData { len: data_len, block_align });
        }
        let fits = u32::try_from(data_len)
            .ok()
            .filter(|len| len.checked_add(RIFF_OVERHEAD).is_some());
        match fits {
            Some(data_len) => Ok(Self { format, data_len }),
            None => Err(Error::TooLarge(data_len)),
        }
    }

    /// Returns the RIFF chunk size field (total file size minus 8).
    pub fn riff_len(&self) -> u32 {
        RIFF_OVERHEAD + self.data_len
    }

    /// Returns the total container size, header included.
    pub fn file_len(&self) -> usize {
        HEADER_LEN + self.data_len as usize
    }

    /// Serializes the header.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        let mut put = |offset: usize, bytes: &[u8]| {
            out[offset..offset + bytes.len()].copy_from_slice(bytes);
        };
        put(0, b"RIFF");
        put(4, &self.riff_len().to_le_bytes());
        put(8, b"WAVE");
        put(12, b"fmt ");
        put(16, &FMT_CHUNK_LEN.to_le_bytes());
        put(20, &FORMAT_PCM.to_le_bytes());
        put(22, &self.format.channels().to_le_bytes());
        put(24, &self.format.sample_rate.to_le_bytes());
        put(28, &self.format.bytes_rate().to_le_bytes());
        put(32, &self.format.block_align().to_le_bytes());
        put(34, &BITS_PER_SAMPLE.to_le_bytes());
        put(36, b"data");
        put(40, &self.data_len.to_le_bytes());
        out
    }

    /// Parses a canonical header from the start of `data`.
    ///
    /// Only the layout written by [`Header::to_bytes`] is accepted: a single
    /// 16-byte `fmt ` chunk describing 16-bit PCM, immediately followed by
    /// the `data` chunk.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(Error::Truncated(data.len()));
        }
        let tag = |offset: usize| &data[offset..offset + 4];
        let u16_at = |offset: usize| u16::from_le_bytes([data[offset], data[offset + 1]]);
        let u32_at = |offset: usize| {
            u32::from_le_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
        };

        for (offset, expected) in [(0, b"RIFF"), (8, b"WAVE"), (12, b"fmt "), (36, b"data")] {
            if tag(offset) != expected {
                return Err(Error::InvalidHeader(format!(
                    "expected {:?} at offset {}",
                    String::from_utf8_lossy(expected),
                    offset
                )));
            }
        }
        if u32_at(16) != FMT_CHUNK_LEN || u16_at(20) != FORMAT_PCM {
            return Err(Error::InvalidHeader("not a PCM fmt chunk".to_string()));
        }
        if u16_at(34) != BITS_PER_SAMPLE {
            return Err(Error::InvalidHeader(format!("unsupported bit depth {}", u16_at(34))));
        }
        let format = match u16_at(22) {
            1 => Format::mono(u32_at(24)),
            2 => Format::stereo(u32_at(24)),
            n => return Err(Error::InvalidHeader(format!("unsupported channel count {}", n))),
        };
        if u32_at(28) != format.bytes_rate() || u16_at(32) != format.block_align() {
            return Err(Error::InvalidHeader("inconsistent byte rate".to_string()));
        }

        let header = Self { format, data_len: u32_at(40) };
        if u32_at(4) != header.riff_len() {
            return Err(Error::InvalidHeader(format!(
                "riff size {} does not match data size {}",
                u32_at(4),
                header.data_len
            )));
        }
        Ok(header)
    }
}

/// Encodes samples into a complete WAV file.
pub fn encode(format: Format, samples: &[i16]) -> Result<Vec<u8>> {
    encode_bytes(format, &samples_to_bytes(samples))
}

/// Wraps raw little-endian PCM bytes into a complete WAV file.
pub fn encode_bytes(format: Format, pcm: &[u8]) -> Result<Vec<u8>> {
    let header = Header::new(format, pcm.len())?;
    let mut out = Vec::with_capacity(header.file_len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(pcm);
    Ok(out)
}

/// Splits a WAV file into its header and PCM payload.
///
/// Fails if the declared data size disagrees with the actual payload length.
pub fn decode(data: &[u8]) -> Result<(Header, &[u8])> {
    let header = Header::parse(data)?;
    let payload = &data[HEADER_LEN..];
    if payload.len() != header.data_len as usize {
        return Err(Error::InvalidHeader(format!(
            "declared {} data bytes, found {}",
            header.data_len,
            payload.len()
        )));
    }
    Ok((header, payload))
}
