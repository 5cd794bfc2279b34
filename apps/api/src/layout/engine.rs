//! Text flow — places wrapped lines onto pages.
//!
//! # Placement rule
//! A cursor `y` starts at `height - margin` on the first page. For every wrapped sub-line:
//! if `y < margin` a new page is opened and `y` is reset; the line is placed at
//! `(margin, y)` and `y` drops by `line_height`. Empty logical lines are placed too and
//! therefore consume one line of vertical space.
//!
//! The walk is a fold over the wrapped sub-lines with [`Cursor`] as the accumulator, so
//! no state outlives a single call.

use serde::{Deserialize, Serialize};

use crate::layout::geometry::PageGeometry;
use crate::layout::wrap::{FixedWidth, LineBreaker};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// A single line of text at absolute page coordinates (origin bottom-left).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutLine {
    /// Already trimmed of surrounding whitespace.
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub page_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub index: usize,
    pub lines: Vec<LayoutLine>,
}

impl Page {
    fn new(index: usize) -> Self {
        Page {
            index,
            lines: Vec::new(),
        }
    }
}

/// Ordered pages ready for serialization. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    /// All placed lines in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &LayoutLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `text` with the default 90-character fixed-width breaker.
pub fn layout(text: &str, geometry: &PageGeometry) -> Document {
    layout_with(text, geometry, &FixedWidth::default())
}

/// Lays out `text` using the supplied line breaker.
pub fn layout_with(text: &str, geometry: &PageGeometry, breaker: &dyn LineBreaker) -> Document {
    let cursor = text
        .split('\n')
        .flat_map(|line| breaker.break_line(line))
        .fold(Cursor::start(geometry), |cursor, chunk| {
            cursor.place(&chunk, geometry)
        });

    Document {
        geometry: *geometry,
        pages: cursor.pages,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Accumulator
// ────────────────────────────────────────────────────────────────────────────

struct Cursor {
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn start(geometry: &PageGeometry) -> Self {
        Cursor {
            pages: vec![Page::new(0)],
            y: geometry.top_baseline(),
        }
    }

    fn place(mut self, chunk: &str, geometry: &PageGeometry) -> Self {
        if self.y < geometry.margin {
            self.pages.push(Page::new(self.pages.len()));
            self.y = geometry.top_baseline();
        }

        let page_index = self.pages.len() - 1;
        let line = LayoutLine {
            text: chunk.trim().to_string(),
            x: geometry.margin,
            y: self.y,
            page_index,
        };
        self.pages[page_index].lines.push(line);
        self.y -= geometry.line_height;
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::DEFAULT_WRAP_WIDTH;
    use crate::layout::wrap::WordWrap;
    use proptest::prelude::*;

    fn a4() -> PageGeometry {
        PageGeometry::A4
    }

    #[test]
    fn test_empty_text_yields_one_page_with_one_blank_line() {
        let doc = layout("", &a4());
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.pages[0].lines[0].text, "");
        assert_eq!(doc.pages[0].lines[0].y, 792.0);
    }

    #[test]
    fn test_single_char() {
        let doc = layout("a", &a4());
        assert_eq!(doc.page_count(), 1);
        let line = &doc.pages[0].lines[0];
        assert_eq!((line.text.as_str(), line.x, line.y), ("a", 50.0, 792.0));
    }

    #[test]
    fn test_blank_lines_consume_vertical_space() {
        let doc = layout("um\n\ndois", &a4());
        let ys: Vec<f32> = doc.lines().map(|l| l.y).collect();
        assert_eq!(ys, vec![792.0, 774.0, 756.0]);
        assert_eq!(doc.pages[0].lines[1].text, "");
    }

    #[test]
    fn test_lines_trimmed_after_wrapping() {
        // The second chunk starts with a space that only trimming removes.
        let text = format!("{} resto  ", "a".repeat(90));
        let doc = layout(&text, &a4());
        let full = "a".repeat(90);
        let texts: Vec<&str> = doc.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec![full.as_str(), "resto"]);
    }

    #[test]
    fn test_page_break_after_42_lines() {
        let text = vec!["linha"; 43].join("\n");
        let doc = layout(&text, &a4());
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].lines.len(), 42);
        assert_eq!(doc.pages[0].lines.last().map(|l| l.y), Some(54.0));
        assert_eq!(doc.pages[1].lines[0].y, 792.0);
        assert_eq!(doc.pages[1].lines[0].page_index, 1);
    }

    #[test]
    fn test_long_run_without_whitespace_wraps_at_90() {
        let text = format!("O contratado prestará os serviços de\n{}", "z".repeat(300));
        let doc = layout(&text, &a4());
        let lens: Vec<usize> = doc.lines().map(|l| l.text.chars().count()).collect();
        assert_eq!(lens[1..], [90, 90, 90, 30]);
    }

    #[test]
    fn test_word_wrap_breaker_plugs_in() {
        let text = "palavra ".repeat(30);
        let doc = layout_with(&text, &a4(), &WordWrap::default());
        assert!(doc.lines().all(|l| !l.text.starts_with("alavra")));
        assert!(doc.line_count() >= 3);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let text = "Cláusula 1ª - Objeto\n\n".repeat(40);
        assert_eq!(layout(&text, &a4()), layout(&text, &a4()));
    }

    #[test]
    fn test_page_indices_match_page_position() {
        let text = vec!["x"; 200].join("\n");
        let doc = layout(&text, &a4());
        for (i, page) in doc.pages.iter().enumerate() {
            assert_eq!(page.index, i);
            assert!(page.lines.iter().all(|l| l.page_index == i));
        }
    }

    proptest! {
        /// Any input terminates with at least one page and every line inside the margins.
        #[test]
        fn layout_is_total_and_respects_margins(text in "[a-zç \n]{0,6000}") {
            let g = a4();
            let doc = layout(&text, &g);
            prop_assert!(doc.page_count() >= 1);
            for line in doc.lines() {
                prop_assert!(line.y >= g.margin);
                prop_assert!(line.y <= g.top_baseline());
                prop_assert!(line.text.chars().count() <= DEFAULT_WRAP_WIDTH);
            }
        }

        /// Each page's baselines span at most the printable band; all but the last page are full.
        #[test]
        fn pages_fill_the_printable_band(text in "[a-z \n]{0,8000}") {
            let g = a4();
            let doc = layout(&text, &g);
            let last = doc.page_count() - 1;
            for page in &doc.pages {
                prop_assert!(!page.lines.is_empty());
                let span = page.lines[0].y - page.lines[page.lines.len() - 1].y;
                prop_assert!(span <= g.usable_height());
                prop_assert!(page.lines.len() <= g.lines_per_page());
                if page.index < last {
                    prop_assert_eq!(page.lines.len(), g.lines_per_page());
                }
            }
        }

        /// One placed line per wrapped chunk, in order.
        #[test]
        fn line_count_matches_wrapped_chunks(text in "[a-z \n]{0,3000}") {
            let breaker = FixedWidth::default();
            let expected: usize = text.split('\n').map(|l| breaker.break_line(l).len()).sum();
            prop_assert_eq!(layout(&text, &a4()).line_count(), expected);
        }
    }
}
