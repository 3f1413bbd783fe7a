use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::config::Settings;

/// Speech-to-text capability.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file at `audio_path` into plain text.
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

/// Build the configured transcriber.
///
/// The model is not loaded here, so a run that reuses a cached transcript
/// never touches it.
#[cfg(feature = "whisper")]
pub fn build_transcriber(settings: &Settings) -> Result<Box<dyn Transcriber>> {
    Ok(Box::new(crate::transcription::WhisperTranscriber::new(
        settings,
    )))
}

#[cfg(not(feature = "whisper"))]
pub fn build_transcriber(_settings: &Settings) -> Result<Box<dyn Transcriber>> {
    Ok(Box::new(Unavailable))
}

/// Stand-in used when the crate is built without a speech-to-text engine.
#[cfg(not(feature = "whisper"))]
struct Unavailable;

#[cfg(not(feature = "whisper"))]
#[async_trait]
impl Transcriber for Unavailable {
    async fn transcribe(&self, _audio_path: &Path) -> Result<String> {
        anyhow::bail!("This build has no transcription engine. Rebuild with the `whisper` feature.")
    }
}
