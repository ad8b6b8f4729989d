//! The page-flow engine shared by every report kind.
//!
//! A `Layout` owns one in-progress [`ReportDocument`] and its [`Cursor`].
//! Reports call the section/table/bullet helpers in order and finish with
//! [`Layout::stamp_footers`], which needs the final page count.

use tracing::debug;

use crate::config::ReportConfig;

use super::cursor::Cursor;
use super::document::{FontStyle, Primitive, ReportDocument};
use super::format::{truncate_cell, wrap_text};
use super::metrics::centered_x;

pub const SECTION_TITLE_SIZE: f32 = 14.0;
pub const TABLE_FONT_SIZE: f32 = 9.0;
pub const BODY_FONT_SIZE: f32 = 10.0;
pub const FOOTER_FONT_SIZE: f32 = 8.0;

const SECTION_TITLE_GAP: f32 = 10.0;
const SECTION_RULE_GAP: f32 = 8.0;
const CELL_PADDING: f32 = 2.0;
const FOOTER_RULE_OFFSET: f32 = 15.0;
const FOOTER_TEXT_OFFSET: f32 = 8.0;
const BULLET: &str = "• ";
const BULLET_INDENT: f32 = 5.0;

pub struct Layout<'a> {
    config: &'a ReportConfig,
    doc: ReportDocument,
    cursor: Cursor,
}

impl<'a> Layout<'a> {
    pub fn new(config: &'a ReportConfig, title: &str) -> Self {
        Self {
            config,
            doc: ReportDocument::new(title, &config.page),
            cursor: Cursor::new(&config.page),
        }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn advance(&mut self, mm: f32) {
        self.cursor.advance(mm);
    }

    pub fn line_height(&self) -> f32 {
        self.cursor.line_height
    }

    /// Height of one table row.
    pub fn row_height(&self) -> f32 {
        self.cursor.line_height + 2.0
    }

    pub fn row_reserve(&self) -> f32 {
        self.config.row_reserve_mm
    }

    pub fn margin(&self) -> f32 {
        self.cursor.margin
    }

    pub fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    pub fn add_page(&mut self) {
        self.doc.add_page();
        self.cursor.reset();
        debug!(page = self.doc.page_count(), "Page break");
    }

    /// Breaks the page when the cursor is inside the bottom `reserve`.
    pub fn ensure_space(&mut self, reserve: f32) {
        if self.cursor.past(reserve) {
            self.add_page();
        }
    }

    /// Writes a text run at the cursor without advancing it.
    pub fn text(&mut self, text: impl Into<String>, x: f32, size: f32, style: FontStyle) {
        self.doc.push(Primitive::Text {
            x,
            y: self.cursor.y,
            size,
            style,
            text: text.into(),
        });
    }

    /// Writes a horizontally centred text run at the cursor.
    pub fn centered_text(&mut self, text: &str, size: f32, style: FontStyle) {
        let x = centered_x(text, size, style, self.cursor.page_width);
        self.text(text, x, size, style);
    }

    /// Full-width rule between the margins at the cursor.
    pub fn rule(&mut self) {
        let y = self.cursor.y;
        self.doc.push(Primitive::Line {
            x1: self.cursor.margin,
            y1: y,
            x2: self.cursor.right_edge(),
            y2: y,
        });
    }

    /// Bold title, rule, then room for body content.
    pub fn section_header(&mut self, title: &str) {
        self.ensure_space(self.config.header_reserve_mm);
        let x = self.cursor.margin;
        self.text(title, x, SECTION_TITLE_SIZE, FontStyle::Bold);
        self.cursor.advance(SECTION_TITLE_GAP);
        self.rule();
        self.cursor.advance(SECTION_RULE_GAP);
    }

    /// One-line "nothing to show" message in place of a section body.
    pub fn placeholder(&mut self, message: &str) {
        let x = self.cursor.margin;
        self.text(message, x, BODY_FONT_SIZE, FontStyle::Normal);
        self.cursor.advance(self.cursor.line_height);
    }

    /// Renders `rows` as a bordered grid of equal-width columns. Row 0 is
    /// the header and is drawn bold. The row reserve is checked before every
    /// row, so a long table flows across pages; the header is not repeated.
    pub fn table(&mut self, rows: &[Vec<String>]) {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return;
        }
        let column_width = self.cursor.content_width() / columns as f32;
        let row_height = self.row_height();

        for (row_index, row) in rows.iter().enumerate() {
            self.ensure_space(self.config.row_reserve_mm);
            let style = if row_index == 0 { FontStyle::Bold } else { FontStyle::Normal };
            let top = self.cursor.y;
            let baseline = top + self.cursor.line_height - 1.0;

            for (col_index, cell) in row.iter().enumerate() {
                let x = self.cursor.margin + col_index as f32 * column_width;
                self.doc.push(Primitive::Rect {
                    x,
                    y: top,
                    width: column_width,
                    height: row_height,
                });
                self.doc.push(Primitive::Text {
                    x: x + CELL_PADDING,
                    y: baseline,
                    size: TABLE_FONT_SIZE,
                    style,
                    text: truncate_cell(cell),
                });
            }
            self.cursor.advance(row_height);
        }
    }

    /// Bulleted, word-wrapped list. Continuation lines hang under the text.
    pub fn bullets(&mut self, items: &[String]) {
        let margin = self.cursor.margin;
        let wrap_width = self.cursor.content_width() - BULLET_INDENT;

        for item in items {
            let lines = wrap_text(item, wrap_width, BODY_FONT_SIZE, FontStyle::Normal);
            for (i, line) in lines.into_iter().enumerate() {
                self.ensure_space(self.config.row_reserve_mm);
                if i == 0 {
                    self.text(format!("{BULLET}{line}"), margin, BODY_FONT_SIZE, FontStyle::Normal);
                } else {
                    self.text(line, margin + BULLET_INDENT, BODY_FONT_SIZE, FontStyle::Normal);
                }
                self.cursor.advance(self.cursor.line_height);
            }
        }
    }

    /// Second pass over every page: bottom rule plus the
    /// `Page i of N | Generated by … | date` line.
    pub fn stamp_footers(&mut self, date: &str) {
        let total = self.doc.page_count();
        let page_height = self.cursor.page_height;
        let margin = self.cursor.margin;
        let rule_y = page_height - margin - FOOTER_RULE_OFFSET;
        let text_y = page_height - FOOTER_TEXT_OFFSET;

        for index in 0..total {
            let text = format!(
                "Page {} of {} | Generated by {} | {}",
                index + 1,
                total,
                self.config.system_name,
                date
            );
            let x = centered_x(&text, FOOTER_FONT_SIZE, FontStyle::Normal, self.cursor.page_width);
            self.doc.push_to(
                index,
                Primitive::Line {
                    x1: margin,
                    y1: rule_y,
                    x2: self.cursor.right_edge(),
                    y2: rule_y,
                },
            );
            self.doc.push_to(
                index,
                Primitive::Text {
                    x,
                    y: text_y,
                    size: FOOTER_FONT_SIZE,
                    style: FontStyle::Normal,
                    text,
                },
            );
        }
    }

    pub fn finish(self) -> ReportDocument {
        self.doc
    }
}
