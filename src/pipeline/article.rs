//! Audio-to-article orchestration

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::export::{export_article, ExportedArticle};
use crate::llm::prompts::{DRAFT_INSTRUCTION, IMPROVE_INSTRUCTION};
use crate::llm::{GenerationRequest, TextGenerator};
use crate::transcription::Transcriber;
use crate::{ArticleError, Result};

/// Everything a completed run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stem: String,
    pub transcript_path: PathBuf,
    /// Whether the transcript came from a previous run
    pub transcript_cached: bool,
    pub transcript: String,
    pub draft: String,
    pub article: String,
    pub exported: ExportedArticle,
}

/// Sequential audio-to-article pipeline.
///
/// Each stage consumes the previous stage's output; the first failure ends
/// the run and later stages are never invoked.
pub struct ArticlePipeline<'a> {
    settings: &'a Settings,
    transcriber: &'a dyn Transcriber,
    generator: &'a dyn TextGenerator,
    reuse_transcript: bool,
}

impl<'a> ArticlePipeline<'a> {
    pub fn new(
        settings: &'a Settings,
        transcriber: &'a dyn Transcriber,
        generator: &'a dyn TextGenerator,
    ) -> Self {
        Self {
            settings,
            transcriber,
            generator,
            reuse_transcript: settings.pipeline.reuse_transcript,
        }
    }

    /// Override whether an existing transcript file is reused.
    pub fn reuse_transcript(mut self, reuse: bool) -> Self {
        self.reuse_transcript = reuse;
        self
    }

    /// Run all four stages for one audio file.
    pub async fn run(&self, audio_path: &Path) -> Result<RunReport> {
        let stem = artifact_stem(audio_path)?;
        self.settings
            .ensure_dirs()
            .map_err(|e| ArticleError::Config(format!("{:#}", e)))?;

        tracing::info!("Step 1/4: Transcribe {}", audio_path.display());
        let transcript_path = self.settings.transcript_path(&stem);
        let (transcript, transcript_cached) =
            self.load_or_transcribe(audio_path, &transcript_path).await?;

        tracing::info!("Step 2/4: Draft article");
        let draft = self.draft(&transcript).await?;

        tracing::info!("Step 3/4: Improve article");
        let article = self.improve(&draft).await?;

        tracing::info!("Step 4/4: Export article");
        let exported = self.export(&stem, &article)?;

        Ok(RunReport {
            stem,
            transcript_path,
            transcript_cached,
            transcript,
            draft,
            article,
            exported,
        })
    }

    /// Transcribe an audio file, rejecting missing input and empty results.
    pub async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        if !audio_path.is_file() {
            return Err(ArticleError::Transcription(format!(
                "Audio file not found: {}",
                audio_path.display()
            )));
        }

        let text = self
            .transcriber
            .transcribe(audio_path)
            .await
            .map_err(|e| ArticleError::Transcription(format!("{:#}", e)))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(ArticleError::Transcription(format!(
                "No speech recognised in {}",
                audio_path.display()
            )));
        }

        tracing::info!("Transcript ready ({} chars)", text.len());
        Ok(text.to_string())
    }

    /// Turn a transcript into a first draft.
    pub async fn draft(&self, transcript: &str) -> Result<String> {
        let llm = &self.settings.llm;
        self.generate(
            "Draft",
            GenerationRequest {
                model: &llm.draft_model,
                instruction: DRAFT_INSTRUCTION,
                content: transcript,
                temperature: Some(llm.draft_temperature),
            },
        )
        .await
    }

    /// Polish a draft into the final article.
    pub async fn improve(&self, draft: &str) -> Result<String> {
        self.generate(
            "Improve",
            GenerationRequest {
                model: &self.settings.llm.improve_model,
                instruction: IMPROVE_INSTRUCTION,
                content: draft,
                temperature: None,
            },
        )
        .await
    }

    /// Write the final article as DOCX and PDF.
    pub fn export(&self, stem: &str, article: &str) -> Result<ExportedArticle> {
        export_article(
            article,
            &self.settings.article_base(stem),
            self.settings.export.font_size,
        )
        .map_err(|e| ArticleError::Export(format!("{:#}", e)))
    }

    async fn load_or_transcribe(
        &self,
        audio_path: &Path,
        transcript_path: &Path,
    ) -> Result<(String, bool)> {
        if self.reuse_transcript && transcript_path.is_file() {
            let cached = std::fs::read_to_string(transcript_path).map_err(|e| {
                ArticleError::Transcription(format!(
                    "Failed to read transcript {}: {}",
                    transcript_path.display(),
                    e
                ))
            })?;
            if !cached.trim().is_empty() {
                tracing::info!(
                    "Reusing existing transcript: {}",
                    transcript_path.display()
                );
                return Ok((cached.trim().to_string(), true));
            }
            tracing::warn!(
                "Ignoring empty transcript file: {}",
                transcript_path.display()
            );
        }

        let transcript = self.transcribe(audio_path).await?;
        std::fs::write(transcript_path, &transcript).map_err(|e| {
            ArticleError::Transcription(format!(
                "Failed to save transcript {}: {}",
                transcript_path.display(),
                e
            ))
        })?;
        tracing::info!("Transcript saved to {}", transcript_path.display());

        Ok((transcript, false))
    }

    async fn generate(&self, step: &str, request: GenerationRequest<'_>) -> Result<String> {
        if request.content.trim().is_empty() {
            return Err(ArticleError::Generation(format!(
                "{step}: input text is empty"
            )));
        }

        tracing::debug!(model = request.model, "{step} request");

        let text = self
            .generator
            .generate(request)
            .await
            .map_err(|e| ArticleError::Generation(format!("{step} failed: {:#}", e)))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(ArticleError::Generation(format!(
                "{step} returned empty text"
            )));
        }

        tracing::info!("{step} ready ({} chars)", text.len());
        Ok(text.to_string())
    }
}

/// Name shared by every artifact of a run: the audio file name minus its extension.
pub fn artifact_stem(audio_path: &Path) -> Result<String> {
    audio_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            ArticleError::Config(format!(
                "Cannot derive an artifact name from {}",
                audio_path.display()
            ))
        })
}
