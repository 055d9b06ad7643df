//! WAV output for produced stems.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::buffer::AudioBuffer;
use crate::error::MediaResult;

/// Write a mono buffer as a 16-bit PCM WAV file.
///
/// Samples are clamped to [-1.0, 1.0] before quantization so upstream
/// stages never produce clipped wraparound artifacts.
pub fn write_wav(path: &Path, buffer: &AudioBuffer) -> MediaResult<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in &buffer.samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.wav");

        let buffer = AudioBuffer::new(vec![0.0, 0.5, -0.5, 1.0], 22050).unwrap();
        write_wav(&path, &buffer).unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.bits_per_sample, 16);

        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], 0);
        assert!((samples[1] as f32 / i16::MAX as f32 - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_out_of_range_samples_are_clamped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hot.wav");

        let buffer = AudioBuffer::new(vec![2.0, -2.0], 22050).unwrap();
        write_wav(&path, &buffer).unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples[0], i16::MAX);
        assert_eq!(samples[1], -i16::MAX);
    }
}
