//! Pipeline module for scribe-article
//!
//! Runs transcribe, draft, improve and export in sequence.

mod article;

pub use article::{artifact_stem, ArticlePipeline, RunReport};
