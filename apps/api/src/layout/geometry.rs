//! Page geometry for the contract PDF.
//!
//! All values are in PDF user-space units (1/72 inch). The default is an A4 page
//! (595 × 842) with a 50-unit margin on every side, 12-unit Helvetica and an
//! 18-unit baseline pitch.

use serde::{Deserialize, Serialize};

use crate::layout::LayoutError;

/// Maximum number of characters a wrapped line may hold.
pub const DEFAULT_WRAP_WIDTH: usize = 90;

// ────────────────────────────────────────────────────────────────────────────
// PageGeometry
// ────────────────────────────────────────────────────────────────────────────

/// Layout parameters shared by every page of a document.
///
/// Invariant (checked by [`PageGeometry::new`]): the printable band
/// `height - 2 * margin` holds at least one `line_height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub line_height: f32,
}

impl PageGeometry {
    /// A4 portrait, 50pt margins, 12pt font on an 18pt pitch.
    pub const A4: PageGeometry = PageGeometry {
        width: 595.0,
        height: 842.0,
        margin: 50.0,
        font_size: 12.0,
        line_height: 18.0,
    };

    /// Builds a geometry, rejecting configurations that cannot hold a single line.
    pub fn new(
        width: f32,
        height: f32,
        margin: f32,
        font_size: f32,
        line_height: f32,
    ) -> Result<Self, LayoutError> {
        let geometry = PageGeometry {
            width,
            height,
            margin,
            font_size,
            line_height,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Checks the geometry invariant.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let values = [
            self.width,
            self.height,
            self.margin,
            self.font_size,
            self.line_height,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(LayoutError::InvalidGeometry(
                "all dimensions must be finite".to_string(),
            ));
        }
        if self.margin < 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "margin must not be negative (got {})",
                self.margin
            )));
        }
        if self.font_size <= 0.0 || self.line_height <= 0.0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "font size and line height must be positive (got {} / {})",
                self.font_size, self.line_height
            )));
        }
        if self.usable_height() < self.line_height {
            return Err(LayoutError::InvalidGeometry(format!(
                "usable height {} is smaller than line height {}",
                self.usable_height(),
                self.line_height
            )));
        }
        Ok(())
    }

    /// Vertical space between the top and bottom margins.
    pub fn usable_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// Baseline of the first line on a fresh page.
    pub fn top_baseline(&self) -> f32 {
        self.height - self.margin
    }

    /// Number of lines that fit on one page under the placement rule
    /// (a line is placed while the cursor is at or above the bottom margin).
    pub fn lines_per_page(&self) -> usize {
        ((self.top_baseline() - self.margin) / self.line_height).floor() as usize + 1
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::A4
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
