//! Application state.

use std::sync::Arc;

use vsep_dsp::SegmentationConfig;
use vsep_separator::{
    NoiseSuppressor, PassthroughSeparator, RemoteSeparator, SourceSeparator,
    SpectralGateSuppressor,
};

use crate::config::{ApiConfig, BackendChoice};
use crate::output::OutputStore;

/// Shared application state.
///
/// Backends are constructed once at startup and injected into handlers by
/// reference; no handler holds its own model or output path.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub separator: Arc<dyn SourceSeparator>,
    pub suppressor: Arc<dyn NoiseSuppressor>,
    pub segmentation: SegmentationConfig,
    pub output: OutputStore,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let separator: Arc<dyn SourceSeparator> = match config.backend {
            BackendChoice::Cpu => Arc::new(PassthroughSeparator),
            BackendChoice::Remote => Arc::new(RemoteSeparator::from_env()?),
        };

        // Separated vocals have a cleaner energy profile than a raw mix,
        // so the remote deployment segments with the stricter preset.
        let segmentation = match config.backend {
            BackendChoice::Cpu => SegmentationConfig::default(),
            BackendChoice::Remote => SegmentationConfig::studio(),
        };
        segmentation.validate()?;

        let suppressor: Arc<dyn NoiseSuppressor> = Arc::new(SpectralGateSuppressor::default());
        let output = OutputStore::new(config.output_dir.clone())?;

        Ok(Self {
            config,
            separator,
            suppressor,
            segmentation,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vsep_separator::BackendKind;

    #[test]
    fn test_cpu_state_wiring() {
        let dir = tempdir().unwrap();
        let config = ApiConfig {
            output_dir: dir.path().to_path_buf(),
            ..ApiConfig::default()
        };

        let state = AppState::new(config).unwrap();
        assert_eq!(state.separator.kind(), BackendKind::Cpu);
        assert_eq!(state.segmentation, SegmentationConfig::default());
    }
}
