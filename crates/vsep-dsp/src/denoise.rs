//! Spectral-gate noise suppression.
//!
//! A noise magnitude profile is estimated from a reference clip (typically
//! the first half second of the recording, assumed to hold no speech).
//! Each STFT bin of the signal is then gated: bins that do not rise above
//! the profile are attenuated to a gain floor, everything else passes
//! through. The result is resynthesized with windowed overlap-add.
//!
//! This is a deliberately small cousin of full spectral subtraction: good
//! enough to strip steady hum and hiss before separation, not a
//! general-purpose denoiser.

use num_complex::Complex32;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;
use tracing::debug;

use crate::error::{DspError, DspResult};

/// Configuration for the spectral gate.
#[derive(Debug, Clone)]
pub struct SpectralGateConfig {
    /// FFT size in samples. Must be a power of two.
    pub fft_size: usize,
    /// Hop between STFT frames. `fft_size / 4` gives 75% overlap.
    pub hop_size: usize,
    /// How many standard deviations above the mean noise magnitude a bin
    /// must rise to be treated as signal.
    pub n_std_thresh: f32,
    /// Gain applied to gated (noise-classified) bins. 0.1 is roughly -20dB.
    pub gain_floor: f32,
}

impl Default for SpectralGateConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            hop_size: 256,
            n_std_thresh: 1.5,
            gain_floor: 0.1,
        }
    }
}

/// Spectral-gate noise suppressor.
///
/// Holds the FFT plans so repeated calls share them; the gate itself is
/// stateless between calls.
pub struct SpectralGate {
    config: SpectralGateConfig,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
}

impl SpectralGate {
    pub fn new(config: SpectralGateConfig) -> DspResult<Self> {
        if config.fft_size == 0 || !config.fft_size.is_power_of_two() {
            return Err(DspError::InvalidFftSize(config.fft_size));
        }
        if config.hop_size == 0 || config.hop_size > config.fft_size {
            return Err(DspError::InvalidHopLength {
                hop: config.hop_size,
                frame: config.fft_size,
            });
        }

        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(config.fft_size);
        let inverse = planner.plan_fft_inverse(config.fft_size);
        let window = hann_window(config.fft_size);

        Ok(Self {
            config,
            forward,
            inverse,
            window,
        })
    }

    /// Suppress noise in `samples` using `noise_reference` as the profile.
    ///
    /// The output has the same length as the input. Fails on empty input or
    /// an empty reference; callers are expected to fall back to the raw
    /// signal on error rather than aborting the request.
    pub fn apply(&self, samples: &[f32], noise_reference: &[f32]) -> DspResult<Vec<f32>> {
        if samples.is_empty() {
            return Err(DspError::EmptySignal);
        }
        if noise_reference.is_empty() {
            return Err(DspError::EmptyNoiseReference);
        }

        let bins = self.config.fft_size / 2 + 1;
        let (noise_mean, noise_std) = self.noise_profile(noise_reference, bins);

        // Per-bin gate level
        let gate: Vec<f32> = noise_mean
            .iter()
            .zip(&noise_std)
            .map(|(&m, &s)| m + self.config.n_std_thresh * s)
            .collect();

        debug!(
            frames = samples.len().div_ceil(self.config.hop_size),
            fft_size = self.config.fft_size,
            "Applying spectral gate"
        );

        let mut output = vec![0.0f32; samples.len() + self.config.fft_size];
        let mut weight = vec![0.0f32; samples.len() + self.config.fft_size];
        let mut frame = vec![Complex32::default(); self.config.fft_size];

        let mut start = 0;
        while start < samples.len() {
            self.load_windowed(samples, start, &mut frame);
            self.forward.process(&mut frame);

            // Gate the positive-frequency bins and mirror onto the
            // conjugate half so the inverse transform stays real.
            for bin in 0..bins {
                if frame[bin].norm() <= gate[bin] {
                    frame[bin] *= self.config.gain_floor;
                }
            }
            for bin in bins..self.config.fft_size {
                frame[bin] = frame[self.config.fft_size - bin].conj();
            }

            self.inverse.process(&mut frame);

            // Windowed overlap-add; rustfft's inverse is unnormalized.
            let scale = 1.0 / self.config.fft_size as f32;
            for (i, value) in frame.iter().enumerate() {
                let w = self.window[i];
                output[start + i] += value.re * scale * w;
                weight[start + i] += w * w;
            }

            start += self.config.hop_size;
        }

        // Normalize by the accumulated window energy
        let mut result = Vec::with_capacity(samples.len());
        for i in 0..samples.len() {
            let w = weight[i].max(1e-8);
            result.push(output[i] / w);
        }

        Ok(result)
    }

    /// Mean and standard deviation of the STFT magnitude per bin over the
    /// reference clip.
    fn noise_profile(&self, reference: &[f32], bins: usize) -> (Vec<f32>, Vec<f32>) {
        let mut frame = vec![Complex32::default(); self.config.fft_size];
        let mut sums = vec![0.0f64; bins];
        let mut sq_sums = vec![0.0f64; bins];
        let mut count = 0u32;

        let mut start = 0;
        while start < reference.len() {
            self.load_windowed(reference, start, &mut frame);
            self.forward.process(&mut frame);

            for bin in 0..bins {
                let mag = frame[bin].norm() as f64;
                sums[bin] += mag;
                sq_sums[bin] += mag * mag;
            }
            count += 1;
            start += self.config.hop_size;
        }

        let n = count.max(1) as f64;
        let mean: Vec<f32> = sums.iter().map(|&s| (s / n) as f32).collect();
        let std: Vec<f32> = sums
            .iter()
            .zip(&sq_sums)
            .map(|(&s, &sq)| {
                let m = s / n;
                ((sq / n - m * m).max(0.0)).sqrt() as f32
            })
            .collect();

        (mean, std)
    }

    /// Copy a zero-padded, windowed frame starting at `start` into `frame`.
    fn load_windowed(&self, samples: &[f32], start: usize, frame: &mut [Complex32]) {
        for (i, slot) in frame.iter_mut().enumerate() {
            let sample = samples.get(start + i).copied().unwrap_or(0.0);
            *slot = Complex32::new(sample * self.window[i], 0.0);
        }
    }
}

fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let x = std::f32::consts::PI * i as f32 / size as f32;
            x.sin() * x.sin()
        })
        .collect()
}
