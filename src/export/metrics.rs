//! Glyph advance widths for the built-in Helvetica faces
//!
//! Widths are in 1/1000 em, taken from the Adobe core font AFM files.

/// Printable ASCII (0x20..=0x7E), Helvetica.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Printable ASCII (0x20..=0x7E), Helvetica-Bold.
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

/// Anything without a known width counts as a full em.
const FALLBACK_WIDTH: u16 = 1000;

/// Advance width of one character, in 1/1000 em.
pub fn char_width(c: char, bold: bool) -> u16 {
    let table = if bold {
        &HELVETICA_BOLD_ASCII
    } else {
        &HELVETICA_ASCII
    };

    if (' '..='~').contains(&c) {
        return table[c as usize - 0x20];
    }

    if let Some(base) = base_letter(c) {
        return table[base as usize - 0x20];
    }

    match (c, bold) {
        ('\u{2018}' | '\u{2019}' | '\u{201A}', false) => 222,
        ('\u{2018}' | '\u{2019}' | '\u{201A}', true) => 278,
        ('\u{201C}' | '\u{201D}' | '\u{201E}', false) => 333,
        ('\u{201C}' | '\u{201D}' | '\u{201E}', true) => 500,
        ('\u{2013}' | '\u{20AC}' | '\u{2020}' | '\u{2021}' | '\u{0192}', _) => 556,
        ('\u{2022}', _) => 350,
        ('\u{2039}' | '\u{203A}' | '\u{02C6}' | '\u{02DC}', _) => 333,
        ('\u{00A0}', _) => 278,
        ('\u{00AB}' | '\u{00BB}', _) => 556,
        ('\u{00A9}' | '\u{00AE}', _) => 737,
        ('\u{00B0}', _) => 400,
        ('\u{00B7}', _) => 278,
        ('\u{00D7}' | '\u{00F7}', _) => 584,
        ('\u{00EC}'..='\u{00EF}', _) => 278,
        ('\u{00DF}' | '\u{00F8}', _) => 611,
        ('\u{00E6}', _) => 889,
        ('\u{0153}', _) => 944,
        _ => FALLBACK_WIDTH,
    }
}

/// Summed advance width of a string, in 1/1000 em.
pub fn text_width(text: &str, bold: bool) -> u32 {
    text.chars().map(|c| u32::from(char_width(c, bold))).sum()
}

// Accented Latin letters share the advance width of their base letter.
fn base_letter(c: char) -> Option<char> {
    let base = match c {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ð' => 'D',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' | 'Ÿ' => 'Y',
        'Þ' => 'P',
        'Š' => 'S',
        'Ž' => 'Z',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ð' | 'ò'..='ö' => 'o',
        'ñ' => 'n',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'þ' => 'p',
        'š' => 's',
        'ž' => 'z',
        _ => return None,
    };
    Some(base)
}
