//! Spectral analysis with a radix-2 FFT

pub mod fft;
pub mod windowing;
pub mod analysis;

pub use fft::{fft_in_place, FftEngine};
pub use windowing::{generate_window, WindowType};
pub use analysis::{AnalyzerConfig, SpectrumAnalyzer, SpectrumBin, SpectrumReport};
