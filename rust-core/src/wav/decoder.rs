//! PCM WAV decoder
//!
//! Reads the container strictly forward: header, chunk scan, then the whole
//! `data` payload. Nothing is returned unless the payload is complete.

use super::error::{DecodeError, Result};
use super::header::{fourcc_display, read_fourcc, WavHeader, DATA_CHUNK_ID};
use super::samples::deinterleave;
use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Decoded audio: header plus one normalized sample sequence per channel
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    header: WavHeader,
    channels: Vec<Vec<f64>>,
}

impl DecodedAudio {
    /// Format header as read from the file
    pub fn header(&self) -> &WavHeader {
        &self.header
    }

    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / f64::from(self.header.sample_rate)
    }

    /// Samples of channel `index` (0 = left/mono, 1 = right)
    pub fn channel(&self, index: usize) -> Option<&[f64]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn left(&self) -> &[f64] {
        &self.channels[0]
    }

    pub fn right(&self) -> Option<&[f64]> {
        self.channel(1)
    }

    /// Consume and return the per-channel buffers
    pub fn into_channels(self) -> Vec<Vec<f64>> {
        self.channels
    }
}

/// Forward-only PCM WAV decoder
pub struct WavDecoder;

impl WavDecoder {
    /// Open and decode a file
    pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<DecodedAudio> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("decoding {}", path.display());
        Self::decode(BufReader::new(file))
    }

    /// Decode a complete WAV stream
    pub fn decode<R: Read>(mut reader: R) -> Result<DecodedAudio> {
        let header = WavHeader::read(&mut reader)?;
        info!(
            "PCM header: {} Hz, {} channel(s), {} bits",
            header.sample_rate, header.num_channels, header.bits_per_sample
        );

        let data_size = find_data_chunk(&mut reader)?;
        let data = read_payload(&mut reader, data_size)?;

        let channels = deinterleave(&data, &header);
        debug!(
            "decoded {} frames from {} data bytes",
            channels.first().map_or(0, Vec::len),
            data_size
        );

        Ok(DecodedAudio { header, channels })
    }
}

/// Skip chunks until `data` is found and return its declared size
fn find_data_chunk<R: Read>(reader: &mut R) -> Result<u32> {
    loop {
        let id = read_fourcc(reader, "chunk id").map_err(|e| match e {
            DecodeError::Truncated(_) => {
                DecodeError::Truncated("no \"data\" chunk before end of stream".to_string())
            }
            other => other,
        })?;
        let size = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| DecodeError::from_read(e, "chunk size"))?;

        if id == DATA_CHUNK_ID {
            debug!("found data chunk ({size} bytes)");
            return Ok(size);
        }

        debug!("skipping chunk {} ({size} bytes)", fourcc_display(&id));
        let skipped = io::copy(&mut reader.by_ref().take(u64::from(size)), &mut io::sink())?;
        if skipped < u64::from(size) {
            return Err(DecodeError::Truncated(format!(
                "chunk {} declares {size} bytes, only {skipped} available",
                fourcc_display(&id)
            )));
        }
    }
}

/// Read exactly `size` bytes of sample payload
fn read_payload<R: Read>(reader: &mut R, size: u32) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.by_ref().take(u64::from(size)).read_to_end(&mut data)?;
    if data.len() < size as usize {
        return Err(DecodeError::Truncated(format!(
            "data chunk declares {size} bytes, only {} available",
            data.len()
        )));
    }
    Ok(data)
}
