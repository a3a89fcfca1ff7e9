//! PCM Spectrum - WAV decoding and single-segment spectral analysis
//!
//! Decodes linear-PCM WAV files into normalized per-channel samples and
//! computes a windowed radix-2 FFT magnitude spectrum of the leading segment.

pub mod wav;
pub mod spectrum;
pub mod report;

pub use wav::{DecodeError, DecodedAudio, WavDecoder, WavHeader};
pub use spectrum::{AnalyzerConfig, SpectrumAnalyzer, SpectrumReport, WindowType};
