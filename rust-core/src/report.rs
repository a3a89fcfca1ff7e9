//! Human-readable analysis report

use crate::spectrum::{SpectrumBin, SpectrumReport};
use crate::wav::DecodedAudio;
use std::fmt;

/// Output options for [`render`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Print magnitudes as dBFS instead of linear values
    pub magnitude_db: bool,
}

/// File and channel summary block
pub struct WavSummary<'a> {
    pub audio: &'a DecodedAudio,
    pub channel: usize,
}

impl fmt::Display for WavSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.audio.header();
        writeln!(f, "=== WAV Info ===")?;
        writeln!(f, "  Sample rate:      {} Hz", header.sample_rate)?;
        writeln!(f, "  Channels:         {}", header.num_channels)?;
        writeln!(f, "  Bits per sample:  {}", header.bits_per_sample)?;
        writeln!(f, "  Total frames:     {}", self.audio.frames())?;
        writeln!(f, "  Duration:         {:.3} s", self.audio.duration_secs())?;
        writeln!(f, "  Channel analyzed: {} ({})", self.channel, channel_name(self.channel))
    }
}

/// Table of bins above the display threshold
pub struct SpectrumTable<'a> {
    pub report: &'a SpectrumReport,
    pub options: ReportOptions,
}

impl fmt::Display for SpectrumTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(
            f,
            "=== FFT Magnitude (first segment, {} points, {} window) ===",
            report.fft_size, report.window_type
        )?;
        let unit = if self.options.magnitude_db { "Magnitude (dB)" } else { "Magnitude" };
        writeln!(f, "  Bin  |  Freq (Hz)  |  {unit}")?;
        writeln!(f, "  -----|-------------|------------")?;

        for bin in report.significant_bins() {
            writeln!(
                f,
                "  {:<5}|  {:>10.2} |  {}",
                bin.index,
                bin.frequency_hz,
                format_magnitude(&bin, self.options)
            )?;
        }
        Ok(())
    }
}

/// Dominant bin summary
pub struct PeakSummary<'a> {
    pub report: &'a SpectrumReport,
    pub options: ReportOptions,
}

impl fmt::Display for PeakSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let peak = &self.report.peak;
        writeln!(f, "=== Dominant Peak ===")?;
        write!(
            f,
            "  Bin {} -> {:.2} Hz (mag: {})",
            peak.index,
            peak.frequency_hz,
            format_magnitude(peak, self.options)
        )?;
        if self.report.is_silent() {
            write!(f, " [silent segment]")?;
        }
        writeln!(f)
    }
}

/// Render the full report: file summary, significant bins, dominant peak
pub fn render(
    audio: &DecodedAudio,
    channel: usize,
    report: &SpectrumReport,
    options: ReportOptions,
) -> String {
    format!(
        "{}\n{}\n{}",
        WavSummary { audio, channel },
        SpectrumTable { report, options },
        PeakSummary { report, options }
    )
}

fn channel_name(channel: usize) -> &'static str {
    match channel {
        0 => "left",
        1 => "right",
        _ => "other",
    }
}

fn format_magnitude(bin: &SpectrumBin, options: ReportOptions) -> String {
    if options.magnitude_db {
        format!("{:.2} dB", bin.magnitude_db(1.0))
    } else {
        format!("{:.6}", bin.magnitude)
    }
}
