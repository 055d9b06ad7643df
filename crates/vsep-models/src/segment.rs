//! Speech segment types produced by energy-based segmentation.

use serde::{Deserialize, Serialize};

/// A detected interval of speech activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSegment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Duration in seconds (`end - start`).
    pub duration: f64,
    /// Arithmetic mean of the RMS energy curve over this segment's frames.
    pub mean_energy: f32,
}

impl SpeechSegment {
    pub fn new(start: f64, end: f64, mean_energy: f32) -> Self {
        Self {
            start,
            end,
            duration: end - start,
            mean_energy,
        }
    }
}

/// Result of segmenting one signal: chronological, non-overlapping segments
/// plus the total duration of the analyzed signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationResult {
    /// Detected speech segments, in chronological order.
    pub segments: Vec<SpeechSegment>,
    /// Total duration of the input signal in seconds.
    pub total_duration: f64,
}

impl SegmentationResult {
    pub fn new(total_duration: f64, segments: Vec<SpeechSegment>) -> Self {
        Self {
            segments,
            total_duration,
        }
    }

    /// Sum of all segment durations in seconds.
    pub fn speech_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Fraction of the signal classified as speech, as a percentage in [0, 100].
    ///
    /// A zero-duration signal reports 0 rather than dividing by zero.
    pub fn speech_percentage(&self) -> f64 {
        if self.total_duration > 0.0 {
            (self.speech_duration() / self.total_duration * 100.0).min(100.0)
        } else {
            0.0
        }
    }
}
