//! Structural view of article text

/// One structural element of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. } => text,
            Block::Paragraph(text) => text,
        }
    }
}

/// An article as an ordered list of headings and paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDocument {
    pub blocks: Vec<Block>,
}

impl ArticleDocument {
    /// Parse Markdown-flavoured article text.
    ///
    /// `#` lines and lines wrapped entirely in `**` become headings; runs of
    /// other non-blank lines become paragraphs.
    pub fn parse(text: &str) -> Self {
        let mut blocks = Vec::new();
        let mut paragraph: Vec<&str> = Vec::new();

        for line in text.lines() {
            let line = line.trim();

            if line.is_empty() {
                flush_paragraph(&mut paragraph, &mut blocks);
                continue;
            }

            if let Some((level, heading)) = parse_heading(line) {
                flush_paragraph(&mut paragraph, &mut blocks);
                if !heading.is_empty() {
                    blocks.push(Block::Heading {
                        level,
                        text: heading,
                    });
                }
                continue;
            }

            paragraph.push(line);
        }
        flush_paragraph(&mut paragraph, &mut blocks);

        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Title of the article: its first heading, if any.
    pub fn title(&self) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Heading { text, .. } => Some(text.as_str()),
            Block::Paragraph(_) => None,
        })
    }
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if lines.is_empty() {
        return;
    }

    let text = strip_emphasis(&lines.join(" "));
    lines.clear();

    if !text.is_empty() {
        blocks.push(Block::Paragraph(text));
    }
}

fn parse_heading(line: &str) -> Option<(u8, String)> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) {
        let rest = &line[hashes..];
        if rest.is_empty() || rest.starts_with(' ') {
            let text = rest.trim().trim_end_matches('#').trim();
            return Some((hashes as u8, strip_emphasis(text)));
        }
    }

    let inner = line.strip_prefix("**")?.strip_suffix("**")?;
    if inner.contains("**") {
        return None;
    }
    Some((2, inner.trim().to_string()))
}

fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace("__", "").trim().to_string()
}
