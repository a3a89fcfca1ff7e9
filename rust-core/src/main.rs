//! pcm-spectrum - print the FFT magnitude spectrum of a WAV file's first segment

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use pcm_spectrum::report::{self, ReportOptions};
use pcm_spectrum::spectrum::analysis::{DEFAULT_FFT_SIZE, DEFAULT_THRESHOLD_RATIO};
use pcm_spectrum::{AnalyzerConfig, SpectrumAnalyzer, WavDecoder, WindowType};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::filter::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Channel {
    Left,
    Right,
}

impl Channel {
    fn index(self) -> usize {
        match self {
            Channel::Left => 0,
            Channel::Right => 1,
        }
    }
}

#[derive(Parser)]
#[command(name = "pcm-spectrum")]
#[command(version, about = "Decode a PCM WAV file and report the FFT spectrum of its first segment", long_about = None)]
struct Cli {
    /// Path to the WAV file
    #[arg()]
    path: PathBuf,

    /// Requested FFT size, rounded up to the next power of two
    #[arg(default_value_t = DEFAULT_FFT_SIZE, value_parser = parse_fft_size)]
    fft_size: usize,

    /// Channel to analyze
    #[arg(short, long, value_enum, default_value_t = Channel::Left)]
    channel: Channel,

    /// Window applied before the transform (hann, hamming, blackman, rectangular)
    #[arg(short, long, default_value_t = WindowType::Hann)]
    window: WindowType,

    /// Report bins whose magnitude exceeds this fraction of the peak
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD_RATIO)]
    threshold: f64,

    /// Print magnitudes in dBFS
    #[arg(long)]
    db: bool,
}

fn parse_fft_size(value: &str) -> Result<usize, String> {
    let size: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a valid FFT size"))?;
    if size == 0 {
        return Err("FFT size must be at least 1".to_string());
    }
    Ok(size)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let audio = WavDecoder::decode_file(&cli.path)
        .with_context(|| format!("failed to decode {}", cli.path.display()))?;

    let channel = cli.channel.index();
    let samples = audio.channel(channel).ok_or_else(|| {
        anyhow!(
            "{} has {} channel(s); cannot analyze the right channel",
            cli.path.display(),
            audio.num_channels()
        )
    })?;

    if !(0.0..=1.0).contains(&cli.threshold) {
        warn!("threshold {} is outside 0..=1", cli.threshold);
    }

    let config = AnalyzerConfig {
        fft_size: cli.fft_size,
        window_type: cli.window,
        threshold_ratio: cli.threshold,
    };
    if config.fft_len() != cli.fft_size {
        info!("FFT size {} rounded up to {}", cli.fft_size, config.fft_len());
    }

    let analyzer = SpectrumAnalyzer::new(config);
    let spectrum = analyzer.analyze(samples, audio.sample_rate());

    Ok(report::render(
        &audio,
        channel,
        &spectrum,
        ReportOptions { magnitude_db: cli.db },
    ))
}
