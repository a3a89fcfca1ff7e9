//! RIFF/WAVE preamble and PCM format chunk
//!
//! Fields are decoded one by one from the stream in little-endian order.

use super::error::{DecodeError, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

pub const RIFF_MAGIC: [u8; 4] = *b"RIFF";
pub const WAVE_MAGIC: [u8; 4] = *b"WAVE";
pub const FMT_CHUNK_ID: [u8; 4] = *b"fmt ";
pub const DATA_CHUNK_ID: [u8; 4] = *b"data";

/// Format code for uncompressed linear PCM
pub const WAVE_FORMAT_PCM: u16 = 1;

/// Size of the PCM format descriptor in bytes
pub const PCM_FMT_SIZE: u32 = 16;

pub const SUPPORTED_BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];
pub const MAX_CHANNELS: u16 = 2;

/// Parsed PCM format header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Format code (always [`WAVE_FORMAT_PCM`] once validated)
    pub audio_format: u16,

    /// 1 = mono, 2 = stereo
    pub num_channels: u16,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Declared bytes per second
    pub byte_rate: u32,

    /// Declared bytes per frame
    pub block_align: u16,

    /// 8, 16, 24 or 32
    pub bits_per_sample: u16,
}

impl WavHeader {
    /// Bytes occupied by one sample of one channel
    pub fn bytes_per_sample(&self) -> usize {
        usize::from(self.bits_per_sample / 8)
    }

    /// Largest positive raw value for the bit depth, `2^(bits-1) - 1`
    ///
    /// Used as the normalization divisor, so the most negative raw value
    /// lands slightly below -1.0.
    pub fn max_amplitude(&self) -> f64 {
        ((1u64 << (self.bits_per_sample - 1)) - 1) as f64
    }

    /// Read the RIFF preamble and the format chunk
    ///
    /// Leaves the reader positioned at the first chunk after `fmt `.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        // Markers are checked as soon as they are read
        let riff = read_fourcc(reader, "RIFF magic")?;
        if riff != RIFF_MAGIC {
            return Err(DecodeError::Format(format!(
                "expected RIFF, found {}",
                fourcc_display(&riff)
            )));
        }
        let _riff_size = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| DecodeError::from_read(e, "RIFF size"))?;
        let wave = read_fourcc(reader, "WAVE magic")?;
        if wave != WAVE_MAGIC {
            return Err(DecodeError::Format(format!(
                "expected WAVE, found {}",
                fourcc_display(&wave)
            )));
        }

        let fmt_id = read_fourcc(reader, "format chunk id")?;
        if fmt_id != FMT_CHUNK_ID {
            return Err(DecodeError::Format(format!(
                "expected \"fmt \" chunk, found {}",
                fourcc_display(&fmt_id)
            )));
        }
        let fmt_size = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| DecodeError::from_read(e, "format chunk size"))?;
        if fmt_size < PCM_FMT_SIZE {
            return Err(DecodeError::Format(format!(
                "format chunk is {fmt_size} bytes, need at least {PCM_FMT_SIZE}"
            )));
        }

        let header = Self::read_fields(reader).map_err(|e| DecodeError::from_read(e, "format chunk"))?;

        // Extended descriptors (cbSize and friends) carry nothing PCM needs
        let surplus = u64::from(fmt_size - PCM_FMT_SIZE);
        if surplus > 0 {
            let skipped = io::copy(&mut reader.by_ref().take(surplus), &mut io::sink())?;
            if skipped < surplus {
                return Err(DecodeError::Truncated(
                    "stream ended inside format chunk".to_string(),
                ));
            }
        }

        header.validate()?;
        Ok(header)
    }

    fn read_fields<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            audio_format: reader.read_u16::<LittleEndian>()?,
            num_channels: reader.read_u16::<LittleEndian>()?,
            sample_rate: reader.read_u32::<LittleEndian>()?,
            byte_rate: reader.read_u32::<LittleEndian>()?,
            block_align: reader.read_u16::<LittleEndian>()?,
            bits_per_sample: reader.read_u16::<LittleEndian>()?,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.audio_format != WAVE_FORMAT_PCM {
            return Err(DecodeError::UnsupportedFormat(format!(
                "only PCM (format={WAVE_FORMAT_PCM}) is supported, found format={}",
                self.audio_format
            )));
        }
        if self.num_channels == 0 || self.num_channels > MAX_CHANNELS {
            return Err(DecodeError::UnsupportedFormat(format!(
                "{} channels (only mono and stereo are supported)",
                self.num_channels
            )));
        }
        if !SUPPORTED_BIT_DEPTHS.contains(&self.bits_per_sample) {
            return Err(DecodeError::UnsupportedFormat(format!(
                "{} bits per sample (expected 8, 16, 24 or 32)",
                self.bits_per_sample
            )));
        }
        if self.sample_rate == 0 {
            return Err(DecodeError::Format("sample rate is zero".to_string()));
        }
        Ok(())
    }
}

/// Read a four-character chunk code
pub(crate) fn read_fourcc<R: Read>(reader: &mut R, what: &str) -> Result<[u8; 4]> {
    let mut id = [0u8; 4];
    reader
        .read_exact(&mut id)
        .map_err(|e| DecodeError::from_read(e, what))?;
    Ok(id)
}

pub(crate) fn fourcc_display(id: &[u8; 4]) -> String {
    format!("{:?}", String::from_utf8_lossy(id))
}
