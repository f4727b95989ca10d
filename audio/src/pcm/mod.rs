//! PCM (Pulse Code Modulation) audio format handling.
//!
//! Every stream in this crate is 16-bit signed little-endian; [`Format`]
//! only varies the sample rate and channel count.

mod format;

pub use format::{BITS_PER_SAMPLE, Format};

/// Serializes samples as 16-bit little-endian bytes.
pub fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_little_endian() {
        let bytes = samples_to_bytes(&[1, -2, 0x1234]);
        assert_eq!(bytes, vec![0x01, 0x00, 0xFE, 0xFF, 0x34, 0x12]);
    }
}
