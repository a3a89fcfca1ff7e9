//! Radix-2 decimation-in-time FFT
//!
//! In-place iterative Cooley-Tukey transform on double-precision complex
//! buffers. The output is unscaled and in natural order: index 0 is DC and
//! index n/2 is Nyquist.

use super::windowing::{generate_window, WindowType};
use num_complex::Complex;
use std::f64::consts::PI;

/// Smallest power of two >= `n` (1 for `n == 0`)
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

pub fn is_power_of_two(n: usize) -> bool {
    n.is_power_of_two()
}

/// Forward FFT, in place
///
/// # Arguments
/// * `x` - Buffer whose length is a power of two. Lengths 0 and 1 are left untouched.
pub fn fft_in_place(x: &mut [Complex<f64>]) {
    let n = x.len();
    if n <= 1 {
        return;
    }
    debug_assert!(is_power_of_two(n), "FFT length {n} is not a power of two");

    bit_reverse_permute(x);

    let mut len = 2;
    while len <= n {
        let angle = -2.0 * PI / len as f64;
        let wn = Complex::from_polar(1.0, angle);
        let half = len / 2;

        for block in x.chunks_exact_mut(len) {
            let (lo, hi) = block.split_at_mut(half);
            let mut w = Complex::new(1.0, 0.0);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                let u = *a;
                let t = w * *b;
                *a = u + t;
                *b = u - t;
                w *= wn;
            }
        }

        len <<= 1;
    }
}

/// Reorder so element `i` lands at the bit-reversal of `i`
///
/// `j` tracks the reversed counterpart of `i` by adding one from the top bit
/// down, so no per-index reversal is computed.
fn bit_reverse_permute(x: &mut [Complex<f64>]) {
    let n = x.len();
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            x.swap(i, j);
        }
    }
}

/// FFT engine for windowed real-valued segments
///
/// Owns a zero-padded working buffer of length `n`, rebuilt on every call.
pub struct FftEngine {
    /// FFT length (power of two)
    fft_size: usize,

    /// Working buffer, frequency-domain after [`FftEngine::transform`]
    buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `requested_size` - Rounded up to the next power of two
    pub fn new(requested_size: usize) -> Self {
        let fft_size = next_power_of_two(requested_size);
        Self {
            fft_size,
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
        }
    }

    /// Window the leading segment of `signal`, zero-pad and transform
    ///
    /// # Returns
    /// The full complex spectrum (length `fft_size`) and the number of
    /// samples that were windowed
    pub fn transform(&mut self, signal: &[f64], window_type: WindowType) -> (&[Complex<f64>], usize) {
        let seg_len = self.fft_size.min(signal.len());
        let window = generate_window(window_type, seg_len);

        self.buffer.fill(Complex::new(0.0, 0.0));
        for (slot, (&s, &w)) in self.buffer.iter_mut().zip(signal.iter().zip(window.iter())) {
            *slot = Complex::new(s * w, 0.0);
        }

        fft_in_place(&mut self.buffer);
        (&self.buffer, seg_len)
    }

    /// Transform and return `|X[k]| / n` for k = 0..=n/2
    pub fn compute_magnitude(&mut self, signal: &[f64], window_type: WindowType) -> Vec<f64> {
        let n = self.fft_size as f64;
        let bins = self.num_bins();
        let (spectrum, _) = self.transform(signal, window_type);
        spectrum[..bins].iter().map(|c| c.norm() / n).collect()
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of non-negative frequency bins (n/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Centre frequency of `bin` in Hz
    pub fn bin_to_hz(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * (sample_rate / self.fft_size as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::FftPlanner;

    fn assert_close(a: Complex<f64>, b: Complex<f64>, tol: f64) {
        assert!((a - b).norm() < tol, "{a} != {b}");
    }

    fn pseudo_random(n: usize) -> Vec<Complex<f64>> {
        // Deterministic LCG so the test needs no rand dependency
        let mut state: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
        };
        (0..n).map(|_| Complex::new(next(), next())).collect()
    }

    #[test]
    fn test_next_power_of_two() {
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(2), 2);
        assert_eq!(next_power_of_two(3), 4);
        assert_eq!(next_power_of_two(1000), 1024);
        assert_eq!(next_power_of_two(1024), 1024);
        assert_eq!(next_power_of_two(1025), 2048);
    }

    #[test]
    fn test_trivial_lengths_are_noops() {
        let mut empty: Vec<Complex<f64>> = Vec::new();
        fft_in_place(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![Complex::new(3.5, -1.0)];
        fft_in_place(&mut single);
        assert_eq!(single[0], Complex::new(3.5, -1.0));
    }

    #[test]
    fn test_bit_reversal_order() {
        let mut x: Vec<Complex<f64>> = (0..8).map(|i| Complex::new(i as f64, 0.0)).collect();
        bit_reverse_permute(&mut x);
        let order: Vec<usize> = x.iter().map(|c| c.re as usize).collect();
        assert_eq!(order, vec![0, 4, 2, 6, 1, 5, 3, 7]);
    }

    #[test]
    fn test_impulse_has_flat_spectrum() {
        for n in [2, 8, 64, 1024] {
            let mut x = vec![Complex::new(0.0, 0.0); n];
            x[0] = Complex::new(1.0, 0.0);
            fft_in_place(&mut x);
            for c in &x {
                assert!((c.norm() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_dc_signal() {
        let n = 16;
        let mut x = vec![Complex::new(1.0, 0.0); n];
        fft_in_place(&mut x);
        assert_close(x[0], Complex::new(n as f64, 0.0), 1e-12);
        for c in &x[1..] {
            assert!(c.norm() < 1e-12);
        }
    }

    #[test]
    fn test_two_point_butterfly() {
        let mut x = vec![Complex::new(3.0, 0.0), Complex::new(1.0, 0.0)];
        fft_in_place(&mut x);
        assert_close(x[0], Complex::new(4.0, 0.0), 1e-15);
        assert_close(x[1], Complex::new(2.0, 0.0), 1e-15);
    }

    #[test]
    fn test_forward_sign_convention() {
        // e^{+2πi k/n} concentrates at bin +1 under the e^{-2πi} forward kernel
        let n = 32;
        let mut x: Vec<Complex<f64>> = (0..n)
            .map(|k| Complex::from_polar(1.0, 2.0 * PI * k as f64 / n as f64))
            .collect();
        fft_in_place(&mut x);
        assert_close(x[1], Complex::new(n as f64, 0.0), 1e-9);
        assert!(x[n - 1].norm() < 1e-9);
    }

    #[test]
    fn test_matches_rustfft() {
        let mut planner = FftPlanner::<f64>::new();
        for n in [4, 16, 128, 2048] {
            let input = pseudo_random(n);

            let mut ours = input.clone();
            fft_in_place(&mut ours);

            let mut reference = input;
            planner.plan_fft_forward(n).process(&mut reference);

            for (a, b) in ours.iter().zip(reference.iter()) {
                assert_close(*a, *b, 1e-9 * n as f64);
            }
        }
    }

    #[test]
    fn test_parseval() {
        let n = 512;
        let input = pseudo_random(n);
        let time_energy: f64 = input.iter().map(|c| c.norm_sqr()).sum();

        let mut x = input;
        fft_in_place(&mut x);
        let freq_energy: f64 = x.iter().map(|c| c.norm_sqr()).sum::<f64>() / n as f64;

        assert!((time_energy - freq_energy).abs() < 1e-9 * time_energy);
    }

    #[test]
    fn test_real_input_is_conjugate_symmetric() {
        let n = 64;
        let mut x: Vec<Complex<f64>> = pseudo_random(n).into_iter().map(|c| Complex::new(c.re, 0.0)).collect();
        fft_in_place(&mut x);
        for k in 1..n / 2 {
            assert_close(x[k], x[n - k].conj(), 1e-10);
        }
        assert!(x[n / 2].im.abs() < 1e-10);
    }

    #[test]
    fn test_engine_zero_pads_short_signal() {
        let mut engine = FftEngine::new(1000);
        assert_eq!(engine.fft_size(), 1024);
        assert_eq!(engine.num_bins(), 513);

        // Rectangular window, 100 ones: DC = 100 / 1024
        let magnitude = engine.compute_magnitude(&[1.0; 100], WindowType::Rectangular);
        assert_eq!(magnitude.len(), 513);
        assert!((magnitude[0] - 100.0 / 1024.0).abs() < 1e-12);
    }

    #[test]
    fn test_engine_truncates_long_signal() {
        let mut engine = FftEngine::new(8);
        let signal: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let (spectrum, seg_len) = engine.transform(&signal, WindowType::Rectangular);
        assert_eq!(seg_len, 8);
        assert_close(spectrum[0], Complex::new(28.0, 0.0), 1e-12);
    }

    #[test]
    fn test_engine_sine_peak() {
        let mut engine = FftEngine::new(1024);
        let sample_rate = 48000.0;
        let signal: Vec<f64> = (0..1024)
            .map(|n| (2.0 * PI * 3000.0 * n as f64 / sample_rate).sin())
            .collect();

        let magnitude = engine.compute_magnitude(&signal, WindowType::Hann);
        let (peak_bin, _) = magnitude
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();

        // 3000 Hz falls exactly on bin 64 at 46.875 Hz per bin
        assert_eq!(peak_bin, 64);
        assert_eq!(engine.bin_to_hz(peak_bin, sample_rate), 3000.0);
    }
}
