use lopdf::{dictionary, Dictionary};

/// The standard Type1 fonts the generator draws with. Neither is embedded;
/// every conforming viewer ships them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

// AFM advance widths for the printable ASCII range (0x20..=0x7E), in
// thousandths of an em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const FALLBACK_WIDTH: u16 = 556;

impl Font {
    pub const ALL: [Font; 2] = [Font::Helvetica, Font::HelveticaBold];

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Key under `/Resources /Font` that content streams select with `Tf`.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
        }
    }

    pub fn ascent(self) -> f32 {
        718.0
    }

    pub fn descent(self) -> f32 {
        -207.0
    }

    /// Height of one line of text, ascender to descender.
    pub fn line_height(self, size: f32) -> f32 {
        (self.ascent() - self.descent()) * size / 1000.0
    }

    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let widths = match self {
            Font::Helvetica => &HELVETICA_WIDTHS,
            Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        let units: u32 = text
            .chars()
            .map(|c| match c as u32 {
                code @ 0x20..=0x7E => widths[(code - 0x20) as usize] as u32,
                _ => FALLBACK_WIDTH as u32,
            })
            .sum();
        units as f32 * size / 1000.0
    }

    pub fn dictionary(self) -> Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => self.base_font(),
            "Encoding" => "WinAnsiEncoding",
        }
    }
}

/// Encode text for a WinAnsi font; anything outside Latin-1 becomes `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if (c as u32) <= 255 { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        // "Page 1": P=667 a=556 g=556 e=556 space=278 1=556
        let w = Font::Helvetica.text_width("Page 1", 1000.0);
        assert_eq!(w, 3169.0);
        assert_eq!(Font::Helvetica.text_width("", 12.0), 0.0);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = Font::Helvetica.text_width("TABLE OF CONTENTS", 14.0);
        let bold = Font::HelveticaBold.text_width("TABLE OF CONTENTS", 14.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_line_height() {
        assert_eq!(Font::Helvetica.line_height(1000.0), 925.0);
    }

    #[test]
    fn test_win_ansi() {
        assert_eq!(to_win_ansi("Café"), b"Caf\xe9".to_vec());
        assert_eq!(to_win_ansi("a→b"), b"a?b".to_vec());
    }
}
