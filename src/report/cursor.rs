//! Top-down write position shared by the layout helpers. `y` grows down
//! the page in millimetres from the top edge.

use crate::config::PageSetup;

/// Vertical write position within the current page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub y: f32,
    pub margin: f32,
    pub page_width: f32,
    pub page_height: f32,
    pub line_height: f32,
}

impl Cursor {
    pub fn new(page: &PageSetup) -> Self {
        Self {
            y: page.margin_mm,
            margin: page.margin_mm,
            page_width: page.width_mm,
            page_height: page.height_mm,
            line_height: page.line_height_mm,
        }
    }

    pub fn reset(&mut self) {
        self.y = self.margin;
    }

    pub fn advance(&mut self, mm: f32) {
        self.y += mm;
    }

    /// True when the cursor sits inside the bottom `reserve` of the page.
    pub fn past(&self, reserve: f32) -> bool {
        self.y > self.page_height - reserve
    }

    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    pub fn right_edge(&self) -> f32 {
        self.page_width - self.margin
    }
}
