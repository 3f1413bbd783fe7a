//! WAV decoding into Whisper-ready samples

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Sample rate Whisper expects
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Load audio from a WAV file and convert to f32 samples at 16kHz mono
pub fn load_audio(path: &Path) -> Result<Vec<f32>> {
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open audio file: {}", path.display()))?;

    decode(reader).with_context(|| format!("Failed to decode audio file: {}", path.display()))
}

fn decode<R: Read>(reader: hound::WavReader<R>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    tracing::debug!(
        "Decoding audio: {} Hz, {} channels, {:?} {}bit",
        spec.sample_rate,
        channels,
        spec.sample_format,
        spec.bits_per_sample
    );

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => reader
            .into_samples::<i16>()
            .map(|s| s.map(|s| s as f32 / 32768.0))
            .collect::<std::result::Result<Vec<f32>, hound::Error>>()?,
        (hound::SampleFormat::Int, 24) => reader
            .into_samples::<i32>()
            .map(|s| s.map(|s| s as f32 / 8388608.0))
            .collect::<std::result::Result<Vec<f32>, hound::Error>>()?,
        (hound::SampleFormat::Int, 32) => reader
            .into_samples::<i32>()
            .map(|s| s.map(|s| s as f32 / 2147483648.0))
            .collect::<std::result::Result<Vec<f32>, hound::Error>>()?,
        (hound::SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, hound::Error>>()?,
        _ => anyhow::bail!(
            "Unsupported audio format: {:?} {}bit",
            spec.sample_format,
            spec.bits_per_sample
        ),
    };

    let samples = if channels > 1 {
        downmix(&samples, channels)
    } else {
        samples
    };

    let samples = if spec.sample_rate != WHISPER_SAMPLE_RATE {
        resample(&samples, spec.sample_rate, WHISPER_SAMPLE_RATE)
    } else {
        samples
    };

    Ok(samples)
}

/// Average interleaved channels into mono.
fn downmix(samples: &[f32], channels: usize) -> Vec<f32> {
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Simple linear resampling
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    let ratio = from_rate as f64 / to_rate as f64;
    let new_len = (samples.len() as f64 / ratio) as usize;
    let mut result = Vec::with_capacity(new_len);

    for i in 0..new_len {
        let src_pos = i as f64 * ratio;
        let src_idx = src_pos as usize;
        let frac = (src_pos - src_idx as f64) as f32;

        let sample = match (samples.get(src_idx), samples.get(src_idx + 1)) {
            (Some(a), Some(b)) => a * (1.0 - frac) + b * frac,
            (Some(a), None) => *a,
            _ => 0.0,
        };

        result.push(sample);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, sample_rate: u32, channels: u16, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for s in samples {
            writer.write_sample(*s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn loads_16khz_mono_without_resampling() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("mono.wav");
        write_wav(&path, 16000, 1, &[0, 16384, -16384, 32767]);

        let samples = load_audio(&path).unwrap();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], 0.0);
        assert!((samples[1] - 0.5).abs() < 1e-6);
        assert!((samples[2] + 0.5).abs() < 1e-6);
    }

    #[test]
    fn downmixes_stereo_and_resamples_to_16khz() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("stereo.wav");
        // One second of 32 kHz stereo: left 0.5, right -0.5
        let frames: Vec<i16> = (0..32000).flat_map(|_| [16384i16, -16384]).collect();
        write_wav(&path, 32000, 2, &frames);

        let samples = load_audio(&path).unwrap();
        assert_eq!(samples.len(), 16000);
        assert!(samples.iter().all(|s| s.abs() < 1e-6));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_audio(Path::new("/nonexistent/talk.wav")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/talk.wav"));
    }

    #[test]
    fn resample_interpolates_linearly() {
        let out = resample(&[0.0, 1.0, 0.0, -1.0], 2, 4);
        assert_eq!(out.len(), 8);
        assert!((out[1] - 0.5).abs() < 1e-6);
        assert!((out[2] - 1.0).abs() < 1e-6);
    }
}
