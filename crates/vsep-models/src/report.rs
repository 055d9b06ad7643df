//! The separation report returned to API clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::segment::{SegmentationResult, SpeechSegment};
use crate::stem::StemKind;

/// Maximum number of segments inlined into a report by default.
///
/// Long recordings can produce hundreds of segments; the report carries the
/// first N and the total count so clients can still show "N of M".
pub const DEFAULT_SEGMENT_LIMIT: usize = 10;

/// Output file names for the stems a request produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemFiles {
    pub vocals: String,
    pub background: String,
    pub clean: String,
}

impl StemFiles {
    /// Stem file names for one request id.
    pub fn for_request(request_id: Uuid) -> Self {
        Self {
            vocals: StemKind::Vocals.file_name(request_id),
            background: StemKind::Background.file_name(request_id),
            clean: StemKind::Clean.file_name(request_id),
        }
    }
}

/// Summary of one separation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeparationReport {
    pub status: String,
    /// Original upload file name, as supplied by the client.
    pub filename: String,
    /// Total signal duration in seconds.
    pub duration: f64,
    /// Seconds of detected speech.
    pub speech_duration: f64,
    /// Speech share of the signal, clamped to [0, 100].
    pub speech_percentage: f64,
    /// Number of segments detected before truncation.
    pub segment_count: usize,
    /// Detected segments, truncated to the configured limit.
    pub segments: Vec<SpeechSegment>,
    /// Names of the produced stem files, served by the download route.
    pub files: StemFiles,
}

impl SeparationReport {
    /// Build a report from a segmentation result.
    ///
    /// `segment_limit` bounds how many segments are inlined; the full count
    /// is always reported in `segment_count`.
    pub fn from_segmentation(
        filename: impl Into<String>,
        result: &SegmentationResult,
        files: StemFiles,
        segment_limit: usize,
    ) -> Self {
        Self {
            status: "success".to_string(),
            filename: filename.into(),
            duration: result.total_duration,
            speech_duration: result.speech_duration(),
            speech_percentage: result.speech_percentage(),
            segment_count: result.segments.len(),
            segments: result.segments.iter().take(segment_limit).cloned().collect(),
            files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with_segments(n: usize) -> SegmentationResult {
        let segments = (0..n)
            .map(|i| SpeechSegment::new(i as f64, i as f64 + 0.5, 1.0))
            .collect();
        SegmentationResult::new(n as f64, segments)
    }

    #[test]
    fn test_report_truncates_segments() {
        let result = result_with_segments(25);
        let files = StemFiles::for_request(Uuid::new_v4());
        let report =
            SeparationReport::from_segmentation("in.wav", &result, files, DEFAULT_SEGMENT_LIMIT);

        assert_eq!(report.segments.len(), DEFAULT_SEGMENT_LIMIT);
        assert_eq!(report.segment_count, 25);
        // Truncation keeps the earliest segments
        assert_eq!(report.segments[0].start, 0.0);
    }

    #[test]
    fn test_report_stats_match_result() {
        let result = result_with_segments(4);
        let files = StemFiles::for_request(Uuid::new_v4());
        let report = SeparationReport::from_segmentation("a.mp3", &result, files, 100);

        assert_eq!(report.status, "success");
        assert!((report.speech_duration - 2.0).abs() < 1e-12);
        assert!((report.speech_percentage - 50.0).abs() < 1e-9);
        assert_eq!(report.segments.len(), 4);
    }

    #[test]
    fn test_report_serializes_expected_shape() {
        let result = result_with_segments(1);
        let files = StemFiles::for_request(Uuid::nil());
        let report = SeparationReport::from_segmentation("x.wav", &result, files, 10);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["filename"], "x.wav");
        assert!(json["files"]["vocals"]
            .as_str()
            .unwrap()
            .starts_with("vocals_"));
    }
}
