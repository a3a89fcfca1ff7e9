//! Raw PCM sample decoding and normalization
//!
//! Conventions per bit depth:
//! - 8-bit: unsigned offset-binary, centred on 128
//! - 16-bit: signed, sign bit at bit 15
//! - 24-bit: signed, sign-extended from bit 23
//! - 32-bit: signed
//!
//! Every depth is divided by `2^(bits-1) - 1`, so the most negative code
//! normalizes to slightly below -1.0.

use super::header::WavHeader;
use byteorder::{ByteOrder, LittleEndian};

/// Decode one little-endian sample into a signed integer
///
/// # Arguments
/// * `bytes` - Exactly `bits_per_sample / 8` bytes
/// * `bits_per_sample` - 8, 16, 24 or 32
pub(crate) fn decode_raw(bytes: &[u8], bits_per_sample: u16) -> i32 {
    match bits_per_sample {
        8 => i32::from(bytes[0]) - 128,
        16 => i32::from(LittleEndian::read_i16(bytes)),
        24 => {
            let mut raw = LittleEndian::read_u24(bytes) as i32;
            if raw & 0x80_0000 != 0 {
                raw |= !0xFF_FFFF;
            }
            raw
        }
        32 => LittleEndian::read_i32(bytes),
        other => unreachable!("bit depth {other} rejected during header validation"),
    }
}

/// Split interleaved PCM bytes into one normalized sequence per channel
///
/// Frame count is `(data.len() / bytes_per_sample) / num_channels`, truncated;
/// trailing bytes that do not form a whole frame are ignored.
pub fn deinterleave(data: &[u8], header: &WavHeader) -> Vec<Vec<f64>> {
    let width = header.bytes_per_sample();
    let channels = usize::from(header.num_channels);
    let frames = data.len() / width / channels;
    let scale = header.max_amplitude();

    let mut output: Vec<Vec<f64>> = (0..channels).map(|_| Vec::with_capacity(frames)).collect();

    for frame in data.chunks_exact(width * channels).take(frames) {
        for (ch, sample) in frame.chunks_exact(width).enumerate() {
            let raw = decode_raw(sample, header.bits_per_sample);
            output[ch].push(f64::from(raw) / scale);
        }
    }

    output
}
