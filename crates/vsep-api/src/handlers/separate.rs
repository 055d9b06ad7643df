//! The separation endpoint.
//!
//! Pipeline per request:
//! 1. Persist the multipart upload to a temp file
//! 2. Decode to mono f32 at the configured rate
//! 3. Peak-normalize and denoise (raw signal on denoise failure)
//! 4. Separate into vocal/background stems
//! 5. Segment the vocal stem by short-time energy
//! 6. Write stems as WAVs and build the report
//!
//! The temp file lives only for the duration of the request; produced
//! stems stay in the output store for the download route.

use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::{info, warn};
use uuid::Uuid;
use vsep_dsp::segment_signal;
use vsep_media::{decode_to_mono, AudioBuffer};
use vsep_models::SeparationReport;
use vsep_separator::denoise_or_passthrough;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Handle `POST /api/separate`.
pub async fn separate_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<SeparationReport>> {
    let start = Instant::now();
    let request_id = Uuid::new_v4();

    let (filename, upload) = read_upload(&mut multipart).await?;

    info!(
        request_id = %request_id,
        filename = %filename,
        bytes = upload.len(),
        backend = state.separator.kind().as_str(),
        "Separation request received"
    );

    // Stage the upload on disk for FFmpeg
    let temp = tempfile::NamedTempFile::new().map_err(vsep_media::MediaError::Io)?;
    tokio::fs::write(temp.path(), &upload)
        .await
        .map_err(vsep_media::MediaError::Io)?;

    let mut audio = decode_to_mono(temp.path(), state.config.sample_rate).await?;
    drop(temp);

    // Normalize and denoise off the async runtime; both are CPU-bound
    let suppressor = state.suppressor.clone();
    let clean = tokio::task::spawn_blocking(move || {
        audio.peak_normalize();
        denoise_or_passthrough(suppressor.as_ref(), &audio)
    })
    .await
    .map_err(|e| ApiError::internal(format!("denoise task panicked: {e}")))?;

    let stems = state.separator.separate(&clean).await?;

    // Segment the vocal stem
    let segmentation = state.segmentation.clone();
    let vocals = stems.vocals.clone();
    let result = tokio::task::spawn_blocking(move || {
        segment_signal(&vocals.samples, vocals.sample_rate, &segmentation)
    })
    .await
    .map_err(|e| ApiError::internal(format!("segmentation task panicked: {e}")))??;

    // Persist stems for the download route
    let output = state.output.clone();
    let files = {
        let stems = stems.clone();
        let clean = clean.clone();
        tokio::task::spawn_blocking(move || output.write_stems(request_id, &stems, &clean))
            .await
            .map_err(|e| ApiError::internal(format!("stem write task panicked: {e}")))??
    };

    let report =
        SeparationReport::from_segmentation(filename, &result, files, state.config.segment_limit);

    metrics::record_separation(
        state.separator.kind().as_str(),
        "success",
        start.elapsed().as_secs_f64(),
        report.segment_count,
    );

    info!(
        request_id = %request_id,
        duration_secs = report.duration,
        speech_secs = report.speech_duration,
        speech_pct = report.speech_percentage,
        segments = report.segment_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Separation request complete"
    );

    Ok(Json(report))
}

/// Pull the uploaded file out of the multipart body.
///
/// The first field carrying a file name is treated as the upload; clients
/// conventionally call it `file` but nothing depends on that.
async fn read_upload(multipart: &mut Multipart) -> ApiResult<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;

        if bytes.is_empty() {
            warn!(filename = %filename, "Empty upload rejected");
            return Err(ApiError::bad_request("uploaded file is empty"));
        }

        return Ok((filename, bytes.to_vec()));
    }

    Err(ApiError::bad_request("no file field in multipart body"))
}

/// Segment an already-decoded buffer.
pub fn segment_buffer(
    buffer: &AudioBuffer,
    config: &vsep_dsp::SegmentationConfig,
) -> ApiResult<vsep_models::SegmentationResult> {
    Ok(segment_signal(&buffer.samples, buffer.sample_rate, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsep_dsp::SegmentationConfig;

    #[test]
    fn test_segment_buffer_silence() {
        let buffer = AudioBuffer::new(vec![0.0; 22050], 22050).unwrap();
        let result = segment_buffer(&buffer, &SegmentationConfig::default()).unwrap();
        assert!(result.segments.is_empty());
        assert!(result.total_duration > 0.0);
    }

    #[test]
    fn test_segment_buffer_propagates_invalid_input() {
        let buffer = AudioBuffer::new(vec![], 22050).unwrap();
        let result = segment_buffer(&buffer, &SegmentationConfig::default());
        assert!(result.is_err());
    }
}
