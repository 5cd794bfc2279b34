//! WinAnsiEncoding (Windows-1252) for the standard Helvetica font.
//!
//! The standard 14 fonts only know single-byte encodings. Latin-1 maps to itself; the
//! 0x80–0x9F block carries the typographic extras (quotes, dashes, euro). Tabs and
//! carriage returns are printed as spaces. Anything else cannot be drawn.

/// Encodes `text` to WinAnsi bytes, or returns the first character that has no code.
pub fn encode_win_ansi(text: &str) -> Result<Vec<u8>, char> {
    text.chars().map(|c| win_ansi_byte(c).ok_or(c)).collect()
}

fn win_ansi_byte(c: char) -> Option<u8> {
    match c {
        '\t' | '\r' => Some(b' '),
        ' '..='~' => Some(c as u8),
        '\u{A0}'..='\u{FF}' => Some(c as u32 as u8),
        '€' => Some(0x80),
        '‚' => Some(0x82),
        'ƒ' => Some(0x83),
        '„' => Some(0x84),
        '…' => Some(0x85),
        '†' => Some(0x86),
        '‡' => Some(0x87),
        'ˆ' => Some(0x88),
        '‰' => Some(0x89),
        'Š' => Some(0x8A),
        '‹' => Some(0x8B),
        'Œ' => Some(0x8C),
        'Ž' => Some(0x8E),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        '˜' => Some(0x98),
        '™' => Some(0x99),
        'š' => Some(0x9A),
        '›' => Some(0x9B),
        'œ' => Some(0x9C),
        'ž' => Some(0x9E),
        'Ÿ' => Some(0x9F),
        _ => None,
    }
}
