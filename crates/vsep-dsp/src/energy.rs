//! Short-time RMS energy computation.
//!
//! The signal is partitioned into overlapping frames of `frame_length`
//! samples advancing by `hop_length`; each frame contributes one
//! root-mean-square value. Frames extending past the signal end are
//! zero-padded, so the curve always has `ceil(len / hop_length)` entries
//! and the frame-to-time conversion `index * hop_length / sample_rate`
//! stays consistent with the framing.

use crate::error::{DspError, DspResult};

/// Compute the RMS energy curve of a mono signal.
///
/// Returns one non-negative value per analysis frame. Tail frames are
/// zero-padded: the sum of squares runs over whatever samples exist, but
/// the divisor is always the full `frame_length`.
pub fn rms_energy_curve(
    samples: &[f32],
    frame_length: usize,
    hop_length: usize,
) -> DspResult<Vec<f32>> {
    if samples.is_empty() {
        return Err(DspError::EmptySignal);
    }
    if frame_length == 0 {
        return Err(DspError::InvalidFrameLength(frame_length));
    }
    if hop_length == 0 || hop_length > frame_length {
        return Err(DspError::InvalidHopLength {
            hop: hop_length,
            frame: frame_length,
        });
    }

    let frame_count = samples.len().div_ceil(hop_length);
    let mut curve = Vec::with_capacity(frame_count);

    for frame_index in 0..frame_count {
        let start = frame_index * hop_length;
        let end = (start + frame_length).min(samples.len());

        let sum_sq: f64 = samples[start..end].iter().map(|&s| (s as f64) * (s as f64)).sum();
        curve.push((sum_sq / frame_length as f64).sqrt() as f32);
    }

    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_length_is_ceil_of_hops() {
        let samples = vec![0.0f32; 1000];
        let curve = rms_energy_curve(&samples, 256, 128).unwrap();
        assert_eq!(curve.len(), 1000usize.div_ceil(128));
    }

    #[test]
    fn test_constant_signal_full_frames() {
        // A constant 0.5 signal has RMS 0.5 wherever the frame is fully
        // inside the signal.
        let samples = vec![0.5f32; 4096];
        let curve = rms_energy_curve(&samples, 1024, 512).unwrap();
        for &value in &curve[..curve.len() - 2] {
            assert!((value - 0.5).abs() < 1e-6, "value={value}");
        }
    }

    #[test]
    fn test_tail_frames_are_zero_padded() {
        // Last frame covers only half the frame length, so with zero
        // padding its RMS is 0.5 * sqrt(1/2).
        let samples = vec![0.5f32; 512];
        let curve = rms_energy_curve(&samples, 1024, 512).unwrap();
        assert_eq!(curve.len(), 1);
        let expected = 0.5 * (0.5f32).sqrt();
        assert!((curve[0] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_values_are_non_negative() {
        let samples: Vec<f32> = (0..2000).map(|i| if i % 2 == 0 { -0.7 } else { 0.3 }).collect();
        let curve = rms_energy_curve(&samples, 512, 256).unwrap();
        assert!(curve.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_silence_has_zero_energy() {
        let samples = vec![0.0f32; 4096];
        let curve = rms_energy_curve(&samples, 2048, 512).unwrap();
        assert!(curve.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_rejects_empty_signal() {
        assert_eq!(
            rms_energy_curve(&[], 2048, 512),
            Err(DspError::EmptySignal)
        );
    }

    #[test]
    fn test_rejects_bad_framing() {
        let samples = vec![0.0f32; 100];
        assert!(matches!(
            rms_energy_curve(&samples, 0, 1),
            Err(DspError::InvalidFrameLength(0))
        ));
        assert!(matches!(
            rms_energy_curve(&samples, 512, 0),
            Err(DspError::InvalidHopLength { .. })
        ));
        assert!(matches!(
            rms_energy_curve(&samples, 512, 1024),
            Err(DspError::InvalidHopLength { .. })
        ));
    }
}
