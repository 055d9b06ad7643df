//! In-memory mono audio.

use crate::error::{MediaError, MediaResult};

/// A mono signal held in memory: samples plus their sample rate.
///
/// This is the unit every processing stage exchanges; it is produced once
/// per request by the decoder and dropped when the response is built.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Samples in [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> MediaResult<Self> {
        if sample_rate == 0 {
            return Err(MediaError::InvalidSampleRate(sample_rate));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Duration of the buffer in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Scale the signal so its peak magnitude is 1.
    ///
    /// The epsilon keeps an all-zero buffer from dividing by zero; silence
    /// stays silence.
    pub fn peak_normalize(&mut self) {
        let peak = self
            .samples
            .iter()
            .fold(0.0f32, |acc, &s| acc.max(s.abs()));
        let scale = 1.0 / (peak + 1e-8);
        for sample in &mut self.samples {
            *sample *= scale;
        }
    }

    /// The leading `seconds` of the buffer, used as a noise reference.
    ///
    /// Clamped to the buffer length, so short uploads still produce a
    /// usable (if less representative) reference.
    pub fn leading_clip(&self, seconds: f64) -> &[f32] {
        let count = ((self.sample_rate as f64 * seconds) as usize).min(self.samples.len());
        &self.samples[..count]
    }
}
