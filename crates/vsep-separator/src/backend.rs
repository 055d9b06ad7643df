//! Backend traits for source separation and noise suppression.
//!
//! Deployments differ only in which implementations get constructed at
//! startup: the GPU deployment wires a [`RemoteSeparator`] to a Demucs
//! inference service, the CPU-only deployment wires a
//! [`PassthroughSeparator`] and relies on the spectral gate alone. The
//! request pipeline is identical either way.
//!
//! [`RemoteSeparator`]: crate::remote::RemoteSeparator
//! [`PassthroughSeparator`]: crate::passthrough::PassthroughSeparator

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;
use vsep_dsp::{SpectralGate, SpectralGateConfig};
use vsep_media::AudioBuffer;

use crate::error::SeparatorResult;

/// Which separation backend a deployment is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// No model: the vocal stem is the input mix.
    Cpu,
    /// Remote Demucs inference service.
    Remote,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Cpu => "cpu",
            BackendKind::Remote => "remote",
        }
    }
}

/// The isolated sources produced by a separation backend.
#[derive(Debug, Clone)]
pub struct SeparatedStems {
    /// Isolated vocal track.
    pub vocals: AudioBuffer,
    /// Everything that is not vocals.
    pub background: AudioBuffer,
}

/// A source separation backend.
///
/// Implementations take one mono buffer and return isolated stems at the
/// same sample rate and length. The model itself is opaque to this
/// service.
#[async_trait]
pub trait SourceSeparator: Send + Sync {
    /// Which backend this is, for health reporting.
    fn kind(&self) -> BackendKind;

    /// Whether the backend is currently able to serve requests.
    async fn is_available(&self) -> bool;

    /// Separate a mono mix into vocal and background stems.
    async fn separate(&self, input: &AudioBuffer) -> SeparatorResult<SeparatedStems>;
}

/// A noise suppression stage applied before separation.
pub trait NoiseSuppressor: Send + Sync {
    /// Denoise a buffer, returning a same-length, same-rate buffer.
    fn denoise(&self, input: &AudioBuffer) -> SeparatorResult<AudioBuffer>;
}

/// Spectral-gate suppression using the leading part of the upload as the
/// noise reference.
pub struct SpectralGateSuppressor {
    gate: SpectralGate,
    reference_secs: f64,
}

impl SpectralGateSuppressor {
    /// Seconds of leading audio used as the noise reference.
    pub const DEFAULT_REFERENCE_SECS: f64 = 0.5;

    pub fn new(config: SpectralGateConfig, reference_secs: f64) -> SeparatorResult<Self> {
        Ok(Self {
            gate: SpectralGate::new(config)?,
            reference_secs,
        })
    }
}

impl Default for SpectralGateSuppressor {
    fn default() -> Self {
        // The default gate config is statically valid
        Self::new(SpectralGateConfig::default(), Self::DEFAULT_REFERENCE_SECS)
            .expect("default spectral gate config is valid")
    }
}

impl NoiseSuppressor for SpectralGateSuppressor {
    fn denoise(&self, input: &AudioBuffer) -> SeparatorResult<AudioBuffer> {
        let reference = input.leading_clip(self.reference_secs);
        let samples = self.gate.apply(&input.samples, reference)?;
        Ok(AudioBuffer {
            samples,
            sample_rate: input.sample_rate,
        })
    }
}

/// A suppressor that returns the input unchanged.
pub struct NoopSuppressor;

impl NoiseSuppressor for NoopSuppressor {
    fn denoise(&self, input: &AudioBuffer) -> SeparatorResult<AudioBuffer> {
        Ok(input.clone())
    }
}

/// Denoise with fallback: on failure the raw input is carried forward.
///
/// Noise suppression is an enhancement, never a gate on the request.
pub fn denoise_or_passthrough(
    suppressor: &dyn NoiseSuppressor,
    input: &AudioBuffer,
) -> AudioBuffer {
    match suppressor.denoise(input) {
        Ok(clean) => clean,
        Err(e) => {
            warn!(error = %e, "Noise suppression failed, using raw signal");
            input.clone()
        }
    }
}
