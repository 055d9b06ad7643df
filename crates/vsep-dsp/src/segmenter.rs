//! Run-length segmentation of an energy curve.
//!
//! A single adaptive threshold is computed per call from the curve itself
//! (`mean * multiplier`), frames are classified speech/non-speech against
//! it, and consecutive speech frames are merged into segments. Segments at
//! or below the minimum duration are dropped as spurious spikes.

use tracing::debug;
use vsep_models::{SegmentationResult, SpeechSegment};

use crate::config::SegmentationConfig;
use crate::energy::rms_energy_curve;
use crate::error::{DspError, DspResult};

/// Detect speech segments in an RMS energy curve.
///
/// `hop_length` and `sample_rate` convert frame indices to seconds via
/// `index * hop_length / sample_rate`; they must match the framing used to
/// compute the curve. The reported total duration is frame-aligned
/// (`curve.len() * hop_length / sample_rate`), so segment end times can
/// never exceed it.
///
/// Frames are speech iff `energy > threshold` strictly. An all-zero curve
/// therefore produces no segments: silence never outgrows a zero threshold.
pub fn detect_segments(
    curve: &[f32],
    hop_length: usize,
    sample_rate: u32,
    config: &SegmentationConfig,
) -> DspResult<SegmentationResult> {
    if curve.is_empty() {
        return Err(DspError::EmptyCurve);
    }
    if sample_rate == 0 {
        return Err(DspError::InvalidSampleRate(sample_rate));
    }
    if hop_length == 0 {
        return Err(DspError::InvalidHopLength {
            hop: hop_length,
            frame: hop_length,
        });
    }
    if !(config.threshold_multiplier > 0.0) {
        return Err(DspError::InvalidThresholdMultiplier(
            config.threshold_multiplier,
        ));
    }
    if !(config.min_segment_duration > 0.0) {
        return Err(DspError::InvalidMinSegmentDuration(
            config.min_segment_duration,
        ));
    }

    let mean = curve.iter().map(|&e| e as f64).sum::<f64>() / curve.len() as f64;
    let threshold = mean * config.threshold_multiplier as f64;
    let seconds_per_frame = hop_length as f64 / sample_rate as f64;

    debug!(
        frames = curve.len(),
        mean_energy = mean,
        threshold = threshold,
        "Detecting speech segments"
    );

    let mut segments = Vec::new();
    let mut run_start: Option<usize> = None;

    for (i, &energy) in curve.iter().enumerate() {
        let is_speech = (energy as f64) > threshold;
        match (run_start, is_speech) {
            (None, true) => run_start = Some(i),
            (Some(start), false) => {
                push_if_long_enough(&mut segments, curve, start, i, seconds_per_frame, config);
                run_start = None;
            }
            _ => {}
        }
    }

    // Close a run still open at the end of the curve
    if let Some(start) = run_start {
        push_if_long_enough(
            &mut segments,
            curve,
            start,
            curve.len(),
            seconds_per_frame,
            config,
        );
    }

    let total_duration = curve.len() as f64 * seconds_per_frame;

    debug!(segments = segments.len(), total_duration, "Segmentation complete");

    Ok(SegmentationResult::new(total_duration, segments))
}

/// Convert a frame run `[start, end)` to a segment, keeping it only when it
/// outlasts the minimum duration (strictly).
fn push_if_long_enough(
    segments: &mut Vec<SpeechSegment>,
    curve: &[f32],
    start: usize,
    end: usize,
    seconds_per_frame: f64,
    config: &SegmentationConfig,
) {
    let duration = (end - start) as f64 * seconds_per_frame;
    if duration <= config.min_segment_duration {
        return;
    }

    let mean_energy =
        (curve[start..end].iter().map(|&e| e as f64).sum::<f64>() / (end - start) as f64) as f32;

    segments.push(SpeechSegment::new(
        start as f64 * seconds_per_frame,
        end as f64 * seconds_per_frame,
        mean_energy,
    ));
}

/// Segment a raw signal: energy curve plus run-length detection in one call.
pub fn segment_signal(
    samples: &[f32],
    sample_rate: u32,
    config: &SegmentationConfig,
) -> DspResult<SegmentationResult> {
    config.validate()?;
    if sample_rate == 0 {
        return Err(DspError::InvalidSampleRate(sample_rate));
    }

    let curve = rms_energy_curve(samples, config.frame_length, config.hop_length)?;
    detect_segments(&curve, config.hop_length, sample_rate, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(multiplier: f32, min_duration: f64) -> SegmentationConfig {
        SegmentationConfig::default()
            .with_threshold_multiplier(multiplier)
            .with_min_segment_duration(min_duration)
    }

    /// Reference scenario: one burst of four loud frames in a ten-frame
    /// curve, mean 4.0, threshold 4.0, frames 3..7 speech.
    #[test]
    fn test_single_burst_detected() {
        let curve = [0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0, 0.0, 0.0];
        let result = detect_segments(&curve, 512, 5120, &config(1.0, 0.2)).unwrap();

        assert_eq!(result.segments.len(), 1);
        let seg = &result.segments[0];
        assert!((seg.start - 0.3).abs() < 1e-9);
        assert!((seg.end - 0.7).abs() < 1e-9);
        assert!((seg.duration - 0.4).abs() < 1e-9);
        assert!((seg.mean_energy - 10.0).abs() < 1e-6);
        assert!((result.total_duration - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_duration_discards_burst() {
        let curve = [0.0, 0.0, 0.0, 10.0, 10.0, 10.0, 10.0, 0.0, 0.0, 0.0];
        let result = detect_segments(&curve, 512, 5120, &config(1.0, 0.5)).unwrap();
        assert!(result.segments.is_empty());
        assert_eq!(result.speech_duration(), 0.0);
    }

    #[test]
    fn test_all_zero_curve_yields_no_segments() {
        // Zero mean means zero threshold; strict comparison keeps silence
        // from classifying as speech.
        let curve = [0.0f32; 10];
        let result = detect_segments(&curve, 512, 5120, &config(2.5, 0.2)).unwrap();
        assert!(result.segments.is_empty());
    }

    #[test]
    fn test_all_below_threshold_yields_no_segments() {
        // Uniform curve: every value equals the mean, nothing exceeds
        // mean * 2.5.
        let curve = [1.0f32; 20];
        let result = detect_segments(&curve, 512, 5120, &config(2.5, 0.1)).unwrap();
        assert!(result.segments.is_empty());
    }

    #[test]
    fn test_uniform_curve_with_permissive_multiplier_spans_everything() {
        // With a multiplier below 1 a uniform curve sits entirely above
        // its own threshold: one segment covering the whole curve.
        let curve = [5.0f32; 30];
        let result = detect_segments(&curve, 512, 5120, &config(0.5, 0.2)).unwrap();

        assert_eq!(result.segments.len(), 1);
        let seg = &result.segments[0];
        assert_eq!(seg.start, 0.0);
        assert!((seg.end - result.total_duration).abs() < 1e-12);
        assert!((seg.mean_energy - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_entirely_loud_curve_yields_single_spanning_segment() {
        // One tiny value drags the mean low enough that every other frame
        // exceeds it; the run is closed by the end of the curve.
        let mut curve = vec![10.0f32; 40];
        curve[0] = 0.0;
        let result = detect_segments(&curve, 512, 5120, &config(1.0, 0.2)).unwrap();

        assert_eq!(result.segments.len(), 1);
        let seg = &result.segments[0];
        assert!((seg.start - 0.1).abs() < 1e-9);
        assert!((seg.end - result.total_duration).abs() < 1e-9);
    }

    #[test]
    fn test_segments_ordered_and_disjoint() {
        let curve = [
            0.0, 9.0, 9.0, 9.0, 0.0, 0.0, 9.0, 9.0, 9.0, 0.0, 9.0, 9.0, 9.0, 9.0, 0.0, 0.0,
        ];
        let result = detect_segments(&curve, 512, 5120, &config(1.0, 0.1)).unwrap();

        assert!(result.segments.len() >= 2);
        for pair in result.segments.windows(2) {
            assert!(pair[0].end <= pair[1].start);
            assert!(pair[0].start < pair[1].start);
        }
        for seg in &result.segments {
            assert!(seg.start < seg.end);
            assert!(seg.duration > 0.1);
            assert!((seg.duration - (seg.end - seg.start)).abs() < 1e-12);
        }
        assert!(result.speech_duration() <= result.total_duration);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let curve = [0.1, 0.2, 5.0, 6.0, 5.5, 0.1, 0.0, 4.0, 4.5, 4.2, 0.2];
        let cfg = config(1.5, 0.1);
        let first = detect_segments(&curve, 512, 5120, &cfg).unwrap();
        let second = detect_segments(&curve, 512, 5120, &cfg).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let curve = [1.0f32; 10];
        assert_eq!(
            detect_segments(&[], 512, 5120, &config(1.0, 0.1)),
            Err(DspError::EmptyCurve)
        );
        assert_eq!(
            detect_segments(&curve, 512, 0, &config(1.0, 0.1)),
            Err(DspError::InvalidSampleRate(0))
        );
        assert!(matches!(
            detect_segments(&curve, 0, 5120, &config(1.0, 0.1)),
            Err(DspError::InvalidHopLength { .. })
        ));
        assert!(matches!(
            detect_segments(&curve, 512, 5120, &config(-1.0, 0.1)),
            Err(DspError::InvalidThresholdMultiplier(_))
        ));
        assert!(matches!(
            detect_segments(&curve, 512, 5120, &config(1.0, 0.0)),
            Err(DspError::InvalidMinSegmentDuration(_))
        ));
    }

    #[test]
    fn test_segment_signal_end_to_end() {
        // 0.5s of silence, 0.5s of loud square wave, 0.5s of silence at
        // 22.05kHz with the default framing.
        let sr = 22050usize;
        let mut samples = vec![0.0f32; sr / 2];
        samples.extend((0..sr / 2).map(|i| if i % 2 == 0 { 0.8 } else { -0.8 }));
        samples.extend(vec![0.0f32; sr / 2]);

        let cfg = SegmentationConfig::default();
        let result = segment_signal(&samples, sr as u32, &cfg).unwrap();

        assert_eq!(result.segments.len(), 1);
        let seg = &result.segments[0];
        // The burst sits in the middle third; framing blurs the edges by
        // at most one frame length.
        let frame_secs = cfg.frame_length as f64 / sr as f64;
        assert!((seg.start - 0.5).abs() < frame_secs);
        assert!((seg.end - 1.0).abs() < frame_secs);
    }

    #[test]
    fn test_segment_signal_all_silence() {
        let samples = vec![0.0f32; 22050];
        let result =
            segment_signal(&samples, 22050, &SegmentationConfig::default()).unwrap();
        assert!(result.segments.is_empty());
    }
}
