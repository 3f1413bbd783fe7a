//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables consulted for the Gemini API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["SCRIBE_GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Input audio selection
    #[serde(default)]
    pub input: InputSettings,

    /// Whisper transcription settings
    #[serde(default)]
    pub whisper: WhisperSettings,

    /// Article generation settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Pipeline behaviour
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// Document export settings
    #[serde(default)]
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Root directory holding audio_files/, transcripts/ and articles/
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSettings {
    /// Audio file to process. Relative paths live under `<data_dir>/audio_files`.
    #[serde(default = "default_audio_file")]
    pub audio_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperSettings {
    /// Whisper model to use (tiny, base, small, medium, large)
    #[serde(default = "default_model")]
    pub model: String,

    /// Path to model files directory
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Language for transcription (empty = auto-detect)
    #[serde(default)]
    pub language: String,

    /// Enable translation to English
    #[serde(default)]
    pub translate: bool,

    /// Number of threads for inference (0 = auto)
    #[serde(default)]
    pub threads: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// API endpoint override
    #[serde(default)]
    pub endpoint: String,

    /// Model used to draft the article from the transcript
    #[serde(default = "default_draft_model")]
    pub draft_model: String,

    /// Sampling temperature for the draft
    #[serde(default = "default_draft_temperature")]
    pub draft_temperature: f64,

    /// Model used to polish the draft
    #[serde(default = "default_improve_model")]
    pub improve_model: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Reuse an existing transcript instead of transcribing again
    #[serde(default = "default_true")]
    pub reuse_transcript: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Body font size in points
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

// Default value functions

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "scribe-article", "scribe-article")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

fn default_models_dir() -> PathBuf {
    let mut dir = default_data_dir();
    dir.push("models");
    dir
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_audio_file() -> PathBuf {
    PathBuf::from("AI_Foundation_Model_Selection.wav")
}

fn default_model() -> String {
    "small".to_string()
}

fn default_llm_provider() -> String {
    "gemini".to_string()
}

fn default_draft_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_draft_temperature() -> f64 {
    0.4
}

fn default_improve_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

fn default_font_size() -> f32 {
    11.0
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            audio_file: default_audio_file(),
        }
    }
}

impl Default for WhisperSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            models_dir: default_models_dir(),
            language: String::new(),
            translate: false,
            threads: 0,
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            endpoint: String::new(),
            draft_model: default_draft_model(),
            draft_temperature: default_draft_temperature(),
            improve_model: default_improve_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            reuse_transcript: true,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load settings from a specific file, falling back to defaults when it is absent.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(config_path).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })?;

            toml::from_str(&content).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })?
        } else {
            Self::default()
        };

        settings.apply_env_overrides(|name| std::env::var(name).ok());

        Ok(settings)
    }

    /// Fill an empty API key from the environment.
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.llm.api_key.trim().is_empty() {
            return;
        }

        if let Some(key) = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|key| !key.trim().is_empty())
        {
            self.llm.api_key = key;
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "scribe-article", "scribe-article")
            .context("Could not determine config directory")?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory holding input audio
    pub fn audio_dir(&self) -> PathBuf {
        self.general.data_dir.join("audio_files")
    }

    /// Directory holding transcripts
    pub fn transcripts_dir(&self) -> PathBuf {
        self.general.data_dir.join("transcripts")
    }

    /// Directory holding exported articles
    pub fn articles_dir(&self) -> PathBuf {
        self.general.data_dir.join("articles")
    }

    /// Ensure all required directories exist
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [self.audio_dir(), self.transcripts_dir(), self.articles_dir()] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Transcript file for an audio stem
    pub fn transcript_path(&self, stem: &str) -> PathBuf {
        self.transcripts_dir().join(format!("{stem}_transcript.txt"))
    }

    /// Export base path (without extension) for an audio stem
    pub fn article_base(&self, stem: &str) -> PathBuf {
        self.articles_dir().join(format!("{stem}_article"))
    }

    /// Get the path to a whisper model file
    pub fn model_path(&self) -> PathBuf {
        self.whisper
            .models_dir
            .join(format!("ggml-{}.bin", self.whisper.model))
    }

    /// Resolve the audio file to process.
    ///
    /// An explicit path wins when it exists or is absolute; anything else is
    /// looked up under the audio directory.
    pub fn resolve_audio_path(&self, requested: Option<&Path>) -> PathBuf {
        let candidate = requested.unwrap_or(self.input.audio_file.as_path());
        if candidate.is_absolute() || (requested.is_some() && candidate.exists()) {
            candidate.to_path_buf()
        } else {
            self.audio_dir().join(candidate)
        }
    }

    /// Whether an API key is available
    pub fn has_api_key(&self) -> bool {
        !self.llm.api_key.trim().is_empty()
    }
}
