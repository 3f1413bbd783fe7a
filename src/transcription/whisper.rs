//! Whisper transcription using whisper-rs

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::config::Settings;
use crate::transcription::audio::{load_audio, WHISPER_SAMPLE_RATE};
use crate::transcription::transcriber::Transcriber;

/// Whisper-based transcriber
///
/// The model is loaded per call; a run transcribes a single file.
#[derive(Debug, Clone)]
pub struct WhisperTranscriber {
    model_path: PathBuf,
    model_name: String,
    language: Option<String>,
    translate: bool,
    threads: u32,
}

impl WhisperTranscriber {
    pub fn new(settings: &Settings) -> Self {
        let language = if settings.whisper.language.trim().is_empty() {
            None
        } else {
            Some(settings.whisper.language.trim().to_string())
        };

        Self {
            model_path: settings.model_path(),
            model_name: settings.whisper.model.clone(),
            language,
            translate: settings.whisper.translate,
            threads: settings.whisper.threads,
        }
    }

    fn load_context(&self) -> Result<WhisperContext> {
        if !self.model_path.exists() {
            anyhow::bail!(
                "Whisper model '{}' not found at {}. Download ggml-{}.bin into the models directory first.",
                self.model_name,
                self.model_path.display(),
                self.model_name
            );
        }

        let model_path = self
            .model_path
            .to_str()
            .context("Whisper model path is not valid UTF-8")?;

        WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .context("Failed to load Whisper model")
    }

    /// Run inference over 16kHz mono samples and join the segment texts.
    fn transcribe_samples(&self, samples: &[f32]) -> Result<String> {
        let ctx = self.load_context()?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_translate(self.translate);

        if self.threads > 0 {
            params.set_n_threads(self.threads as i32);
        }

        if let Some(ref lang) = self.language {
            params.set_language(Some(lang.as_str()));
        }

        let mut state = ctx.create_state().context("Failed to create Whisper state")?;
        state
            .full(params, samples)
            .context("Whisper inference failed")?;

        let num_segments = state
            .full_n_segments()
            .context("Failed to get segment count")?;

        let mut parts = Vec::with_capacity(num_segments.max(0) as usize);
        for i in 0..num_segments {
            let text = state
                .full_get_segment_text(i)
                .context("Failed to get segment text")?;

            let text = text.trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
        }

        tracing::debug!("Whisper produced {} non-empty segments", parts.len());

        Ok(parts.join(" "))
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let transcriber = self.clone();
        let audio_path = audio_path.to_path_buf();

        tokio::task::spawn_blocking(move || {
            tracing::info!("Loading audio from: {}", audio_path.display());
            let samples = load_audio(&audio_path)?;

            tracing::info!(
                "Transcribing {:.1}s of audio with Whisper '{}'",
                samples.len() as f64 / WHISPER_SAMPLE_RATE as f64,
                transcriber.model_name
            );

            transcriber.transcribe_samples(&samples)
        })
        .await
        .context("Transcription task panicked")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_language_means_auto_detect() {
        let mut settings = Settings::default();
        settings.whisper.language = "  ".to_string();
        assert!(WhisperTranscriber::new(&settings).language.is_none());

        settings.whisper.language = "en".to_string();
        assert_eq!(
            WhisperTranscriber::new(&settings).language.as_deref(),
            Some("en")
        );
    }

    #[tokio::test]
    async fn missing_model_is_reported_before_inference() {
        let tmp = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.whisper.models_dir = tmp.path().to_path_buf();
        settings.whisper.model = "tiny".to_string();

        let wav = tmp.path().join("silence.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&wav, spec).unwrap();
        for _ in 0..1600 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let err = WhisperTranscriber::new(&settings)
            .transcribe(&wav)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Whisper model 'tiny' not found"));
    }
}
