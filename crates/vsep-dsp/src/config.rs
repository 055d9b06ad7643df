//! Configuration for energy-based speech segmentation.
//!
//! These parameters control the framing of the energy curve and how
//! aggressively frames are classified as speech.

use serde::{Deserialize, Serialize};

use crate::error::{DspError, DspResult};

/// Configuration for energy-based speech segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Number of samples analyzed per energy value.
    ///
    /// Longer frames smooth the curve; shorter frames track fast
    /// transients. 2048 samples is ~93ms at 22.05kHz.
    pub frame_length: usize,

    /// Stride in samples between consecutive frames.
    ///
    /// Must not exceed `frame_length`. 512 gives 75% overlap against the
    /// default frame length.
    pub hop_length: usize,

    /// Multiplier applied to the mean energy to form the speech threshold.
    ///
    /// The threshold adapts to per-clip loudness: `mean(curve) * multiplier`.
    /// - 2.0-2.5: permissive, catches quiet speech
    /// - 3.0+: only clearly energetic frames count as speech
    pub threshold_multiplier: f32,

    /// Minimum duration in seconds for a segment to be kept.
    ///
    /// Runs at or below this length are dropped as spurious spikes.
    pub min_segment_duration: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            frame_length: 2048,
            hop_length: 512,
            threshold_multiplier: 2.5,
            min_segment_duration: 0.2,
        }
    }
}

impl SegmentationConfig {
    /// Preset used when segmenting an isolated vocal stem.
    ///
    /// Separated vocals have a cleaner energy profile, so the threshold can
    /// be stricter and shorter bursts are still trustworthy.
    pub fn studio() -> Self {
        Self {
            threshold_multiplier: 3.0,
            min_segment_duration: 0.15,
            ..Self::default()
        }
    }

    /// Builder-style setter for the frame length.
    pub fn with_frame_length(mut self, samples: usize) -> Self {
        self.frame_length = samples;
        self
    }

    /// Builder-style setter for the hop length.
    pub fn with_hop_length(mut self, samples: usize) -> Self {
        self.hop_length = samples;
        self
    }

    /// Builder-style setter for the threshold multiplier.
    pub fn with_threshold_multiplier(mut self, multiplier: f32) -> Self {
        self.threshold_multiplier = multiplier;
        self
    }

    /// Builder-style setter for the minimum segment duration.
    pub fn with_min_segment_duration(mut self, seconds: f64) -> Self {
        self.min_segment_duration = seconds;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> DspResult<()> {
        if self.frame_length == 0 {
            return Err(DspError::InvalidFrameLength(self.frame_length));
        }
        if self.hop_length == 0 || self.hop_length > self.frame_length {
            return Err(DspError::InvalidHopLength {
                hop: self.hop_length,
                frame: self.frame_length,
            });
        }
        if !(self.threshold_multiplier > 0.0) {
            return Err(DspError::InvalidThresholdMultiplier(
                self.threshold_multiplier,
            ));
        }
        if !(self.min_segment_duration > 0.0) {
            return Err(DspError::InvalidMinSegmentDuration(
                self.min_segment_duration,
            ));
        }
        Ok(())
    }
}
