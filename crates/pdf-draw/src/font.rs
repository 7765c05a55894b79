//! Standard font metrics and WinAnsi text encoding
//!
//! The documents only use the built-in Helvetica family, so no font
//! embedding takes place. Widths are the AFM metrics of the standard
//! 14 fonts, in 1/1000 em units.

/// Helvetica glyph advances for the printable ASCII range (0x20-0x7E)
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30-0x3F
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50-0x5F
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60-0x6F
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70-0x7E
];

/// Helvetica-Bold glyph advances for the printable ASCII range (0x20-0x7E)
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30-0x3F
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50-0x5F
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60-0x6F
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70-0x7E
];

/// The built-in Helvetica variants used by the composer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl Font {
    /// PDF BaseFont name for the font dictionary
    pub fn base_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    /// Measure a string at the given size, in points
    pub fn text_width(&self, text: &str, size: f32) -> f64 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f64 * size as f64 / 1000.0
    }

    fn ascii_widths(&self) -> &'static [u16; 95] {
        // The oblique variant shares the upright metrics
        match self {
            Font::Helvetica | Font::HelveticaOblique => &HELVETICA_WIDTHS,
            Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Glyph advance in 1/1000 em units
    ///
    /// Accented Latin-1 letters carry the metric of their base glyph,
    /// except the dotted-i forms which widen to 278. Characters outside
    /// the covered set fall back to an average lowercase width.
    fn char_width(&self, c: char) -> u16 {
        let table = self.ascii_widths();
        match c {
            ' '..='~' => table[c as usize - 0x20],
            'ì' | 'í' | 'î' | 'ï' => 278,
            'Æ' => 1000,
            'æ' => 889,
            'Ø' => 778,
            'ø' => 611,
            'ß' => 611,
            '°' => 400,
            '«' | '»' => 556,
            '€' => 556,
            '–' => 556,
            '—' => 1000,
            _ => match strip_accent(c) {
                Some(base) => table[base as usize - 0x20],
                None => 556,
            },
        }
    }
}

/// Map an accented Latin-1 letter to its unaccented ASCII base
fn strip_accent(c: char) -> Option<char> {
    Some(match c {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ñ' => 'n',
        'ò'..='ö' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    })
}

/// Encode text as WinAnsi (CP1252) bytes
///
/// Latin-1 characters map directly; the CP1252 specials in 0x80-0x9F
/// are translated explicitly. Anything else becomes a question mark.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => c as u8,
        _ => match c {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => b'?',
        },
    }
}

/// Encode text as a hex string literal for a Tj operator (e.g. "<4EB02031>")
pub fn encode_text_hex(text: &str) -> String {
    let bytes = encode_win_ansi(text);
    let mut hex = String::with_capacity(bytes.len() * 2 + 2);
    hex.push('<');
    for b in bytes {
        hex.push_str(&format!("{b:02X}"));
    }
    hex.push('>');
    hex
}
