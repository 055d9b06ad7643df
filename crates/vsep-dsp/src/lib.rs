//! Pure DSP core for the voice separation service.
//!
//! This crate provides:
//! - Short-time RMS energy curves over mono signals
//! - Adaptive-threshold, run-length speech segmentation
//! - Spectral-gate noise suppression with a reference clip
//!
//! Everything here is synchronous, allocation-local, and free of I/O;
//! concurrent callers need no coordination.

pub mod config;
pub mod denoise;
pub mod energy;
pub mod error;
pub mod segmenter;

pub use config::SegmentationConfig;
pub use denoise::{SpectralGate, SpectralGateConfig};
pub use energy::rms_energy_curve;
pub use error::{DspError, DspResult};
pub use segmenter::{detect_segments, segment_signal};
