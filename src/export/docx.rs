//! DOCX rendering with docx-rs

use anyhow::{Context, Result};
use docx_rs::{Docx, Paragraph, Run};
use std::io::Cursor;

use crate::export::document::{ArticleDocument, Block};

/// Render an article into DOCX bytes.
///
/// `font_size` is the body size in points; headings scale from it.
pub fn render(document: &ArticleDocument, font_size: f32) -> Result<Vec<u8>> {
    let mut docx = Docx::new();

    for block in &document.blocks {
        let run = match block {
            Block::Heading { level, text } => Run::new()
                .add_text(text.as_str())
                .size(half_points(heading_size(*level, font_size)))
                .bold(),
            Block::Paragraph(text) => Run::new()
                .add_text(text.as_str())
                .size(half_points(font_size)),
        };
        docx = docx.add_paragraph(Paragraph::new().add_run(run));
    }

    let mut bytes = Vec::new();
    docx.build()
        .pack(Cursor::new(&mut bytes))
        .context("Failed to pack DOCX archive")?;

    Ok(bytes)
}

/// Heading size in points for a level, relative to the body size.
pub(crate) fn heading_size(level: u8, body: f32) -> f32 {
    match level {
        1 => body + 5.0,
        2 => body + 3.0,
        _ => body + 1.0,
    }
}

/// Word measures run sizes in half-points.
fn half_points(points: f32) -> usize {
    (points * 2.0).round().max(2.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn document_xml(bytes: Vec<u8>) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml
    }

    #[test]
    fn renders_headings_larger_than_body() {
        let doc = ArticleDocument::parse("# Title\n\nBody text.");
        let xml = document_xml(render(&doc, 11.0).unwrap());

        assert!(xml.contains("Title"));
        assert!(xml.contains("Body text."));
        assert!(xml.contains("w:val=\"32\""));
        assert!(xml.contains("w:val=\"22\""));
    }

    #[test]
    fn heading_sizes_shrink_with_level() {
        assert_eq!(heading_size(1, 11.0), 16.0);
        assert_eq!(heading_size(2, 11.0), 14.0);
        assert_eq!(heading_size(4, 11.0), 12.0);
        assert_eq!(half_points(11.0), 22);
    }
}
