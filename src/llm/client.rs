use anyhow::Result;
use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;

/// Text generation request payload.
///
/// The instruction and the material it applies to travel separately so
/// providers decide how to combine them.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub model: &'a str,
    pub instruction: &'a str,
    pub content: &'a str,
    pub temperature: Option<f64>,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String>;
}

/// Build a text generator from runtime settings.
pub fn build_generator(settings: &Settings) -> Result<Box<dyn TextGenerator>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "gemini" => Ok(Box::new(GeminiClient::from_settings(settings)?)),
        other => anyhow::bail!(
            "Unsupported llm.provider '{}'. Supported providers: gemini",
            other
        ),
    }
}
