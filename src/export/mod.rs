//! Export module for scribe-article
//!
//! Renders article text into DOCX and PDF documents.

mod document;
mod docx;
mod metrics;
mod pdf;

pub use document::{ArticleDocument, Block};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Files written for one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArticle {
    pub docx: PathBuf,
    pub pdf: PathBuf,
}

/// Render `text` to `<base>.docx` and `<base>.pdf`.
///
/// Both documents are rendered in memory before either file is written.
/// Empty text is rejected without touching the filesystem.
pub fn export_article(text: &str, base: &Path, font_size: f32) -> Result<ExportedArticle> {
    let document = ArticleDocument::parse(text);
    if document.is_empty() {
        anyhow::bail!("Article text is empty; nothing to export");
    }

    let title = document
        .title()
        .map(str::to_string)
        .or_else(|| base.file_name().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| crate::APP_NAME.to_string());

    let docx_bytes = docx::render(&document, font_size)?;
    let pdf_bytes = pdf::render(&document, font_size, &title)?;

    let exported = ExportedArticle {
        docx: append_extension(base, "docx"),
        pdf: append_extension(base, "pdf"),
    };

    if let Some(parent) = base.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&exported.docx, docx_bytes)
        .with_context(|| format!("Failed to write {}", exported.docx.display()))?;
    std::fs::write(&exported.pdf, pdf_bytes)
        .with_context(|| format!("Failed to write {}", exported.pdf.display()))?;

    tracing::info!(
        "Exported article to {} and {}",
        exported.docx.display(),
        exported.pdf.display()
    );

    Ok(exported)
}

/// `Path::with_extension` would eat anything after a dot in the stem.
fn append_extension(base: &Path, extension: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
