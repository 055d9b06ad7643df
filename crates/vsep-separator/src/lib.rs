//! Source separation backends for the voice separation service.
//!
//! This crate provides:
//! - The [`SourceSeparator`] and [`NoiseSuppressor`] traits the request
//!   pipeline is written against
//! - A remote HTTP backend for a Demucs inference service
//! - A passthrough backend for CPU-only deployments
//! - Spectral-gate noise suppression with raw-signal fallback

pub mod backend;
pub mod error;
pub mod passthrough;
pub mod remote;

pub use backend::{
    denoise_or_passthrough, BackendKind, NoiseSuppressor, NoopSuppressor, SeparatedStems,
    SourceSeparator, SpectralGateSuppressor,
};
pub use error::{SeparatorError, SeparatorResult};
pub use passthrough::PassthroughSeparator;
pub use remote::{RemoteSeparator, RemoteSeparatorConfig};
