//! Single-segment spectrum analyzer
//!
//! Windows the leading segment of one channel, transforms it and extracts the
//! magnitude spectrum plus the dominant bin.

use super::fft::{next_power_of_two, FftEngine};
use super::windowing::WindowType;
use log::debug;

/// Default requested analysis length
pub const DEFAULT_FFT_SIZE: usize = 1024;

/// Default display threshold, as a fraction of the peak magnitude
pub const DEFAULT_THRESHOLD_RATIO: f64 = 0.01;

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Requested FFT size, rounded up to a power of two
    pub fft_size: usize,

    /// Window type for spectral analysis
    pub window_type: WindowType,

    /// Bins above `threshold_ratio * peak` are reported as significant
    pub threshold_ratio: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: DEFAULT_FFT_SIZE,
            window_type: WindowType::Hann,
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
        }
    }
}

impl AnalyzerConfig {
    /// Actual transform length `n`
    pub fn fft_len(&self) -> usize {
        next_power_of_two(self.fft_size)
    }
}

/// One frequency bin of the magnitude spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumBin {
    pub index: usize,
    pub frequency_hz: f64,

    /// `|X[k]| / n`
    pub magnitude: f64,
}

impl SpectrumBin {
    /// Magnitude in dB relative to `reference`, floored at -200 dB
    pub fn magnitude_db(&self, reference: f64) -> f64 {
        let mag_clamped = self.magnitude.max(1e-10);
        20.0 * (mag_clamped / reference).log10()
    }
}

/// Result of analyzing one segment
#[derive(Debug, Clone)]
pub struct SpectrumReport {
    /// Transform length `n`
    pub fft_size: usize,

    /// Number of input samples that were windowed (`min(n, available)`)
    pub segment_len: usize,

    pub sample_rate: u32,
    pub window_type: WindowType,
    pub threshold_ratio: f64,

    /// Bins 0..=n/2 in ascending order
    pub bins: Vec<SpectrumBin>,

    /// Strongest bin; bin 0 with magnitude 0 for silent input
    pub peak: SpectrumBin,
}

impl SpectrumReport {
    /// Bins whose magnitude exceeds `ratio * peak`, in ascending order
    ///
    /// Empty for silent input, since nothing exceeds a zero peak.
    pub fn significant(&self, ratio: f64) -> Vec<SpectrumBin> {
        let floor = self.peak.magnitude * ratio;
        self.bins
            .iter()
            .filter(|bin| bin.magnitude > floor)
            .copied()
            .collect()
    }

    /// Significant bins under the configured threshold
    pub fn significant_bins(&self) -> Vec<SpectrumBin> {
        self.significant(self.threshold_ratio)
    }

    /// Frequency spacing between adjacent bins in Hz
    pub fn bin_width_hz(&self) -> f64 {
        f64::from(self.sample_rate) / self.fft_size as f64
    }

    pub fn nyquist_hz(&self) -> f64 {
        f64::from(self.sample_rate) / 2.0
    }

    /// True when every bin is zero
    pub fn is_silent(&self) -> bool {
        self.peak.magnitude == 0.0
    }
}

/// Spectrum analyzer for the leading segment of a sample sequence
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Analyze the first `n` samples of `samples`
    ///
    /// # Arguments
    /// * `samples` - One channel of normalized samples
    /// * `sample_rate` - Sample rate in Hz, used only to label bins
    pub fn analyze(&self, samples: &[f64], sample_rate: u32) -> SpectrumReport {
        let mut engine = FftEngine::new(self.config.fft_size);
        let n = engine.fft_size();
        let num_bins = engine.num_bins();
        let bin_width = f64::from(sample_rate) / n as f64;

        let (spectrum, segment_len) = engine.transform(samples, self.config.window_type);
        debug!(
            "analyzing {segment_len} of {} samples with a {n}-point FFT ({} window)",
            samples.len(),
            self.config.window_type
        );

        let bins: Vec<SpectrumBin> = spectrum[..num_bins]
            .iter()
            .enumerate()
            .map(|(index, c)| SpectrumBin {
                index,
                frequency_hz: index as f64 * bin_width,
                magnitude: c.norm() / n as f64,
            })
            .collect();

        let mut peak = bins[0];
        for bin in &bins[1..] {
            if bin.magnitude > peak.magnitude {
                peak = *bin;
            }
        }

        SpectrumReport {
            fft_size: n,
            segment_len,
            sample_rate,
            window_type: self.config.window_type,
            threshold_ratio: self.config.threshold_ratio,
            bins,
            peak,
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Update configuration
    pub fn update_config(&mut self, config: AnalyzerConfig) {
        self.config = config;
    }
}
