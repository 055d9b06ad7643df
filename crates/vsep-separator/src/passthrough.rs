//! CPU-only separation backend.

use async_trait::async_trait;
use vsep_media::AudioBuffer;

use crate::backend::{BackendKind, SeparatedStems, SourceSeparator};
use crate::error::SeparatorResult;

/// A backend for deployments without an inference service.
///
/// No separation happens: the vocal stem is the (denoised) input mix and
/// the background stem is silence of the same length. Segmentation then
/// runs on the full mix, which is what the lightweight deployment wants.
pub struct PassthroughSeparator;

#[async_trait]
impl SourceSeparator for PassthroughSeparator {
    fn kind(&self) -> BackendKind {
        BackendKind::Cpu
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn separate(&self, input: &AudioBuffer) -> SeparatorResult<SeparatedStems> {
        Ok(SeparatedStems {
            vocals: input.clone(),
            background: AudioBuffer {
                samples: vec![0.0; input.samples.len()],
                sample_rate: input.sample_rate,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_passthrough_stems() {
        let input = AudioBuffer::new(vec![0.5, -0.5, 0.25], 22050).unwrap();
        let stems = PassthroughSeparator.separate(&input).await.unwrap();

        assert_eq!(stems.vocals, input);
        assert_eq!(stems.background.samples, vec![0.0; 3]);
        assert_eq!(stems.background.sample_rate, 22050);
    }

    #[tokio::test]
    async fn test_passthrough_is_always_available() {
        assert!(PassthroughSeparator.is_available().await);
        assert_eq!(PassthroughSeparator.kind(), BackendKind::Cpu);
    }
}
