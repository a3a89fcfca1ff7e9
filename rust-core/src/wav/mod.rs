//! PCM WAV container decoding

pub mod error;
pub mod header;
pub mod samples;
pub mod decoder;

pub use error::{DecodeError, DecodeErrorKind};
pub use header::WavHeader;
pub use decoder::{DecodedAudio, WavDecoder};
