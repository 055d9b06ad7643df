//! Audio decoding via the FFmpeg CLI.
//!
//! Any container/codec FFmpeg understands is decoded to raw mono f32
//! little-endian at the requested rate, then read back into an
//! [`AudioBuffer`]. This mirrors the upload path: whatever the client
//! sends, the rest of the pipeline only ever sees mono f32.

use std::path::Path;
use std::process::Stdio;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::buffer::AudioBuffer;
use crate::command::create_ffmpeg_command;
use crate::error::{MediaError, MediaResult};

/// Decode an audio file to a mono buffer at `sample_rate` Hz.
pub async fn decode_to_mono(input: &Path, sample_rate: u32) -> MediaResult<AudioBuffer> {
    if sample_rate == 0 {
        return Err(MediaError::InvalidSampleRate(sample_rate));
    }
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let raw = NamedTempFile::new()?;
    extract_raw_audio(input, raw.path(), sample_rate).await?;

    let samples = load_raw_samples(raw.path()).await?;
    if samples.is_empty() {
        return Err(MediaError::NoAudioData);
    }

    debug!(
        input = %input.display(),
        samples = samples.len(),
        sample_rate,
        "Decoded audio"
    );

    AudioBuffer::new(samples, sample_rate)
}

/// Run FFmpeg to convert `input` into raw mono f32le at `sample_rate`.
async fn extract_raw_audio(input: &Path, output: &Path, sample_rate: u32) -> MediaResult<()> {
    let output_result = create_ffmpeg_command()?
        .args([
            "-i",
            input.to_str().unwrap_or_default(),
            "-vn",
            "-ac",
            "1",
            "-ar",
            &sample_rate.to_string(),
            "-f",
            "f32le",
            "-y",
            output.to_str().unwrap_or_default(),
        ])
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| MediaError::ffmpeg_failed(e.to_string(), None, None))?;

    if !output_result.status.success() {
        let stderr = String::from_utf8_lossy(&output_result.stderr).into_owned();
        return Err(MediaError::ffmpeg_failed(
            "audio decode failed",
            Some(stderr),
            output_result.status.code(),
        ));
    }

    Ok(())
}

/// Load raw f32le samples from a file.
async fn load_raw_samples(path: &Path) -> MediaResult<Vec<f32>> {
    let bytes = tokio::fs::read(path).await?;

    let samples: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_samples_empty_file() {
        let temp = NamedTempFile::new().unwrap();
        let samples = load_raw_samples(temp.path()).await.unwrap();
        assert!(samples.is_empty());
    }

    #[tokio::test]
    async fn test_load_samples_round_trip() {
        let temp = NamedTempFile::new().unwrap();

        let written: Vec<f32> = vec![0.0, 0.5, 1.0, -1.0];
        let bytes: Vec<u8> = written.iter().flat_map(|f| f.to_le_bytes()).collect();
        tokio::fs::write(temp.path(), &bytes).await.unwrap();

        let loaded = load_raw_samples(temp.path()).await.unwrap();
        assert_eq!(loaded.len(), 4);
        for (a, b) in loaded.iter().zip(&written) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[tokio::test]
    async fn test_decode_missing_file() {
        let result = decode_to_mono(Path::new("/nonexistent/audio.wav"), 22050).await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_decode_rejects_zero_rate() {
        let temp = NamedTempFile::new().unwrap();
        let result = decode_to_mono(temp.path(), 0).await;
        assert!(matches!(result, Err(MediaError::InvalidSampleRate(0))));
    }
}
