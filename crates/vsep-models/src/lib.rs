//! Shared data models for the voice separation backend.
//!
//! This crate provides Serde-serializable types for:
//! - Speech segments and segmentation results
//! - Separation reports returned by the API
//! - Stem naming for produced output files

pub mod report;
pub mod segment;
pub mod stem;

// Re-export common types
pub use report::{SeparationReport, StemFiles, DEFAULT_SEGMENT_LIMIT};
pub use segment::{SegmentationResult, SpeechSegment};
pub use stem::{InvalidStemName, StemKind};
