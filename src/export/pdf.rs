//! PDF rendering with printpdf

use anyhow::{anyhow, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;

use crate::export::docx::heading_size;
use crate::export::document::{ArticleDocument, Block};
use crate::export::metrics::{char_width, text_width};

// US Letter with one-inch margins
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 25.4;

const PT_TO_MM: f32 = 0.352_778;
const LINE_SPACING: f32 = 1.4;

/// A line of text positioned on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub size: f32,
    pub bold: bool,
    /// Baseline distance from the bottom edge
    pub y_mm: f32,
}

/// Render an article into PDF bytes.
pub fn render(document: &ArticleDocument, font_size: f32, title: &str) -> Result<Vec<u8>> {
    let pages = layout(document, font_size);

    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow!("Failed to load Helvetica: {:?}", e))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow!("Failed to load Helvetica-Bold: {:?}", e))?;

    let mut first = Some((first_page, first_layer));
    for lines in &pages {
        let (page, layer) = match first.take() {
            Some(indices) => indices,
            None => doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1"),
        };
        let layer = doc.get_page(page).get_layer(layer);

        for line in lines {
            let font = if line.bold { &bold } else { &regular };
            layer.use_text(
                line.text.as_str(),
                line.size,
                Mm(MARGIN_MM),
                Mm(line.y_mm),
                font,
            );
        }
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| anyhow!("Failed to write PDF: {:?}", e))?;

    writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush PDF buffer: {}", e.error()))
}

/// Break an article into pages of positioned, word-wrapped lines.
///
/// Always returns at least one page.
pub fn layout(document: &ArticleDocument, font_size: f32) -> Vec<Vec<PlacedLine>> {
    let top = PAGE_HEIGHT_MM - MARGIN_MM;
    let printable_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

    let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
    let mut y = top;

    for block in &document.blocks {
        let (size, bold) = match block {
            Block::Heading { level, .. } => (heading_size(*level, font_size), true),
            Block::Paragraph(_) => (font_size, false),
        };
        let line_height = size * LINE_SPACING * PT_TO_MM;
        // Printable width in 1/1000 em at this size
        let max_width = (printable_width / (size * PT_TO_MM) * 1000.0).floor() as u32;

        let on_fresh_page = pages.last().map_or(true, |page| page.is_empty());
        if !on_fresh_page {
            y -= line_height * 0.5;
        }

        for text in wrap(&to_win_ansi(block.text()), max_width, bold) {
            if y - line_height < MARGIN_MM {
                pages.push(Vec::new());
                y = top;
            }
            y -= line_height;

            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    text,
                    size,
                    bold,
                    y_mm: y,
                });
            }
        }
    }

    pages
}

/// Greedy word wrap by measured glyph width; overlong words are split.
fn wrap(text: &str, max_width: u32, bold: bool) -> Vec<String> {
    let space = u32::from(char_width(' ', bold));
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        for piece in split_to_width(word, max_width, bold) {
            let width = text_width(&piece, bold);

            if !current.is_empty() && current_width + space + width > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if !current.is_empty() {
                current.push(' ');
                current_width += space;
            }
            current.push_str(&piece);
            current_width += width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

// Pieces of a single word, each at most `max_width` wide (at least one char).
fn split_to_width(word: &str, max_width: u32, bold: bool) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0;

    for c in word.chars() {
        let w = u32::from(char_width(c, bold));
        if !piece.is_empty() && width + w > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0;
        }
        piece.push(c);
        width += w;
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }

    pieces
}

/// Restrict text to what WinAnsiEncoding can carry.
///
/// Characters outside the encoding and control characters become `?`.
fn to_win_ansi(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            c if c.is_whitespace() => ' ',
            '\u{201B}' => '\'',
            '\u{201F}' => '"',
            '\u{2010}' | '\u{2011}' | '\u{2212}' => '-',
            c if is_win_ansi(c) => c,
            _ => '?',
        })
        .collect()
}

fn is_win_ansi(c: char) -> bool {
    matches!(
        c,
        ' '..='~'
            | '\u{00A1}'..='\u{00FF}'
            | '\u{20AC}'
            | '\u{201A}'
            | '\u{0192}'
            | '\u{201E}'
            | '\u{2026}'
            | '\u{2020}'
            | '\u{2021}'
            | '\u{02C6}'
            | '\u{2030}'
            | '\u{0160}'
            | '\u{2039}'
            | '\u{0152}'
            | '\u{017D}'
            | '\u{2018}'
            | '\u{2019}'
            | '\u{201C}'
            | '\u{201D}'
            | '\u{2022}'
            | '\u{2013}'
            | '\u{2014}'
            | '\u{02DC}'
            | '\u{2122}'
            | '\u{0161}'
            | '\u{203A}'
            | '\u{0153}'
            | '\u{017E}'
            | '\u{0178}'
    )
}
