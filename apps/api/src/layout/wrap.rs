//! Line breaking strategies.
//!
//! A [`LineBreaker`] turns one logical line (no `\n`) into the sub-lines that are placed
//! on the page. Widths are counted in characters, not glyph widths.
//!
//! - [`FixedWidth`]: hard chunks of `width` characters. Words straddling a chunk
//!   boundary are cut mid-word. This is the default and matches the PDFs produced so far.
//!   Stray line terminators (`\r`, U+2028, U+2029) end a chunk and are dropped.
//! - [`WordWrap`]: greedy word wrap that only cuts a word when it is longer than a line.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::geometry::DEFAULT_WRAP_WIDTH;

/// Splits one logical line into placeable sub-lines.
///
/// Implementations must return at least one element (an empty line yields `[""]`) and
/// every element must be at most `width()` characters long.
pub trait LineBreaker: Send + Sync {
    fn break_line(&self, line: &str) -> Vec<String>;

    fn width(&self) -> usize;
}

// ────────────────────────────────────────────────────────────────────────────
// Strategy selection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapStrategy {
    #[default]
    Fixed,
    Word,
}

impl WrapStrategy {
    pub fn breaker(self, width: usize) -> Box<dyn LineBreaker> {
        match self {
            WrapStrategy::Fixed => Box::new(FixedWidth::new(width)),
            WrapStrategy::Word => Box::new(WordWrap::new(width)),
        }
    }
}

impl std::str::FromStr for WrapStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(WrapStrategy::Fixed),
            "word" => Ok(WrapStrategy::Word),
            other => Err(format!("unknown wrap strategy '{other}' (expected fixed|word)")),
        }
    }
}

impl fmt::Display for WrapStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrapStrategy::Fixed => f.write_str("fixed"),
            WrapStrategy::Word => f.write_str("word"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fixed-width chunking
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidth {
    width: usize,
}

impl FixedWidth {
    /// A zero width is clamped to 1 so chunking always makes progress.
    pub fn new(width: usize) -> Self {
        FixedWidth {
            width: width.max(1),
        }
    }
}

impl Default for FixedWidth {
    fn default() -> Self {
        FixedWidth::new(DEFAULT_WRAP_WIDTH)
    }
}

impl LineBreaker for FixedWidth {
    fn break_line(&self, line: &str) -> Vec<String> {
        let chunks: Vec<String> = line
            .split(is_line_terminator)
            .filter(|segment| !segment.is_empty())
            .flat_map(|segment| chunk_chars(segment, self.width))
            .collect();

        // A line made only of terminators is kept as-is.
        if chunks.is_empty() {
            vec![line.to_string()]
        } else {
            chunks
        }
    }

    fn width(&self) -> usize {
        self.width
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\r' | '\u{2028}' | '\u{2029}')
}

/// Cuts `s` into consecutive pieces of at most `width` chars. `""` → `[""]`.
fn chunk_chars(s: &str, width: usize) -> Vec<String> {
    if s.is_empty() {
        return vec![String::new()];
    }

    let mut chunks = Vec::with_capacity(s.len() / width + 1);
    let mut current = String::with_capacity(width);
    let mut count = 0usize;

    for c in s.chars() {
        if count == width {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(c);
        count += 1;
    }
    chunks.push(current);
    chunks
}

// ────────────────────────────────────────────────────────────────────────────
// Greedy word wrap
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordWrap {
    width: usize,
}

impl WordWrap {
    pub fn new(width: usize) -> Self {
        WordWrap {
            width: width.max(1),
        }
    }
}

impl Default for WordWrap {
    fn default() -> Self {
        WordWrap::new(DEFAULT_WRAP_WIDTH)
    }
}

impl LineBreaker for WordWrap {
    fn break_line(&self, line: &str) -> Vec<String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return vec![String::new()];
        }

        let max = self.width;
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in words {
            let word_len = word.chars().count();

            // Words that can never fit are hard-split; the tail continues the line.
            if word_len > max {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = chunk_chars(word, max);
                let tail = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                current_len = tail.chars().count();
                current = tail;
                continue;
            }

            let needed = if current_len == 0 {
                word_len
            } else {
                current_len + 1 + word_len
            };

            if needed > max {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            } else {
                if current_len > 0 {
                    current.push(' ');
                }
                current.push_str(word);
                current_len = needed;
            }
        }
        lines.push(current);
        lines
    }

    fn width(&self) -> usize {
        self.width
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
