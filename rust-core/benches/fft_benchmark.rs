use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex;
use pcm_spectrum::spectrum::fft_in_place;
use pcm_spectrum::{AnalyzerConfig, SpectrumAnalyzer};
use std::f64::consts::PI;

fn fft_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft_in_place");
    for n in [256usize, 1024, 4096, 16384] {
        let input: Vec<Complex<f64>> = (0..n)
            .map(|i| Complex::new((2.0 * PI * 7.0 * i as f64 / n as f64).sin(), 0.0))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| {
                let mut buf = input.clone();
                fft_in_place(black_box(&mut buf));
                buf
            })
        });
    }
    group.finish();
}

fn analyzer_benchmark(c: &mut Criterion) {
    let samples: Vec<f64> = (0..48000)
        .map(|n| (2.0 * PI * 1000.0 * n as f64 / 48000.0).sin())
        .collect();
    let analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
        fft_size: 4096,
        ..AnalyzerConfig::default()
    });

    c.bench_function("analyze 4096", |b| {
        b.iter(|| analyzer.analyze(black_box(&samples), 48000))
    });
}

criterion_group!(benches, fft_benchmark, analyzer_benchmark);
criterion_main!(benches);
