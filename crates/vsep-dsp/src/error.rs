//! Error types for DSP operations.

use thiserror::Error;

/// Result type for DSP operations.
pub type DspResult<T> = Result<T, DspError>;

/// Errors from signal analysis.
///
/// Everything here is an input-validation failure: the analysis itself is
/// pure arithmetic and cannot fail once its inputs are accepted.
#[derive(Debug, Error, PartialEq)]
pub enum DspError {
    #[error("signal is empty")]
    EmptySignal,

    #[error("energy curve is empty")]
    EmptyCurve,

    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(u32),

    #[error("frame length must be positive, got {0}")]
    InvalidFrameLength(usize),

    #[error("hop length must be positive and no larger than the frame length, got hop={hop} frame={frame}")]
    InvalidHopLength { hop: usize, frame: usize },

    #[error("threshold multiplier must be positive, got {0}")]
    InvalidThresholdMultiplier(f32),

    #[error("minimum segment duration must be positive, got {0}")]
    InvalidMinSegmentDuration(f64),

    #[error("noise reference clip is empty")]
    EmptyNoiseReference,

    #[error("FFT size must be a positive power of two, got {0}")]
    InvalidFftSize(usize),
}
