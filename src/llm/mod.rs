//! LLM module for scribe-article
//!
//! Drafts and polishes articles through a replaceable text generator,
//! backed by the Gemini API in production.

mod client;
mod gemini;
pub mod prompts;

pub use client::{build_generator, GenerationRequest, TextGenerator};
pub use gemini::GeminiClient;
