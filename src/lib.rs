//! scribe-article - Turn a recorded talk into a polished article
//!
//! Audio is transcribed with Whisper, drafted and refined by Gemini, then
//! exported as DOCX and PDF.

pub mod cli;
pub mod config;
pub mod export;
pub mod llm;
pub mod pipeline;
pub mod transcription;

use thiserror::Error;

/// Main error type for scribe-article
#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArticleError {
    /// Name of the pipeline stage this error belongs to.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Transcription(_) => "transcribe",
            Self::Generation(_) => "generate",
            Self::Export(_) => "export",
            Self::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, ArticleError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "scribe-article";
