//! # Layout Engine
//!
//! Measures a [`Document`](crate::doc::Document) onto a continuous vertical
//! canvas, then cuts the canvas into A4 pages.
//!
//! ## Coordinate Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Continuous canvas                 Pages (after paginate)               │
//! │                                                                         │
//! │  y = 0 ──► ┌──────────┐            page 0: canvas y ∈ [0, B)            │
//! │            │ title    │            page 1: canvas y ∈ [B, 2B)           │
//! │            │ parties  │            ...                                  │
//! │            │ items... │            where B = usable band height         │
//! │            │ items... │                                                 │
//! │            │ totals   │            page_count = ceil(H / B)             │
//! │  y = H ──► └──────────┘                                                 │
//! │                                                                         │
//! │  Every element lands on exactly one page; the page-local y is the       │
//! │  canvas y shifted up by page_index × B. Concatenating pages in order    │
//! │  reproduces the canvas exactly - no gaps, no duplicates.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Text metrics are deliberately approximate (average glyph width): the
//! layout only needs to be deterministic and readable, not typographically
//! exact. The same input document always yields byte-identical geometry.

use crate::doc::{Align, Block, Column, Document, Table, TextStyle};

// =============================================================================
// Page Geometry Constants
// =============================================================================

/// A4 width.
pub const PAGE_WIDTH_MM: f32 = 210.0;

/// A4 height.
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Uniform page margin on all four sides.
pub const MARGIN_MM: f32 = 12.0;

/// Horizontal space available to content.
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

/// Usable vertical band per page. The continuous canvas is cut into slices
/// of exactly this height.
pub const PAGE_BAND_MM: f32 = PAGE_HEIGHT_MM - 2.0 * MARGIN_MM;

/// Vertical advance per text line, in mm per point of font size.
const LINE_FACTOR: f32 = 0.5;

/// Estimated glyph advance, in mm per point of font size. Helvetica averages
/// about half an em per glyph.
const GLYPH_FACTOR: f32 = 0.21;

/// Inner cell padding for table columns.
const CELL_PAD_MM: f32 = 1.2;

// =============================================================================
// Measured Elements
// =============================================================================

/// One positioned primitive on the canvas. `y` runs downward from the canvas
/// top; the PDF backend converts to bottom-up page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x_mm: f32,
        /// Top of the line box, measured from the canvas top.
        y_mm: f32,
        text: String,
        style: TextStyle,
    },
    Line {
        x1_mm: f32,
        y_mm: f32,
        x2_mm: f32,
    },
}

impl Element {
    /// Canvas y of the element's top edge, used for page assignment.
    pub fn top_mm(&self) -> f32 {
        match self {
            Element::Text { y_mm, .. } => *y_mm,
            Element::Line { y_mm, .. } => *y_mm,
        }
    }

    fn shifted(&self, dy: f32) -> Element {
        let mut out = self.clone();
        match &mut out {
            Element::Text { y_mm, .. } => *y_mm -= dy,
            Element::Line { y_mm, .. } => *y_mm -= dy,
        }
        out
    }
}

/// A fully measured document on the continuous canvas.
#[derive(Debug, Clone)]
pub struct Layout {
    pub elements: Vec<Element>,
    /// Total canvas height actually used.
    pub content_height_mm: f32,
}

/// One output page; element y values are page-local, within `[0, PAGE_BAND_MM)`.
#[derive(Debug, Clone)]
pub struct Page {
    pub elements: Vec<Element>,
}

// =============================================================================
// Text Metrics
// =============================================================================

/// Vertical advance for one line in the given style.
pub fn line_height_mm(style: TextStyle) -> f32 {
    style.size_pt * LINE_FACTOR
}

/// Estimated rendered width of a string.
pub fn text_width_mm(text: &str, style: TextStyle) -> f32 {
    text.chars().count() as f32 * style.size_pt * GLYPH_FACTOR
}

/// Greedy word wrap into lines no wider than `max_width_mm`.
///
/// A single word longer than the budget is emitted on its own line rather
/// than split mid-word; it will overhang slightly, which beats producing an
/// unreadable break inside an HSN code or container number.
pub fn wrap_text(text: &str, max_width_mm: f32, style: TextStyle) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if text_width_mm(&candidate, style) <= max_width_mm || current.is_empty() {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

// =============================================================================
// Layout Walk
// =============================================================================

/// Measures every block onto the continuous canvas.
pub fn lay_out(doc: &Document) -> Layout {
    let mut walker = Walker {
        elements: Vec::new(),
        y: 0.0,
    };

    for block in &doc.blocks {
        walker.place_block(block);
    }

    Layout {
        elements: walker.elements,
        content_height_mm: walker.y,
    }
}

struct Walker {
    elements: Vec<Element>,
    y: f32,
}

impl Walker {
    fn text(&mut self, x_mm: f32, y_mm: f32, text: &str, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        self.elements.push(Element::Text {
            x_mm,
            y_mm,
            text: text.to_string(),
            style,
        });
    }

    fn rule(&mut self, y_mm: f32) {
        self.elements.push(Element::Line {
            x1_mm: MARGIN_MM,
            y_mm,
            x2_mm: MARGIN_MM + CONTENT_WIDTH_MM,
        });
    }

    fn place_block(&mut self, block: &Block) {
        match block {
            Block::Title(text) => self.place_title(text),
            Block::Heading(text) => self.place_heading(text),
            Block::KeyValues(rows) => self.place_key_values(rows),
            Block::Columns(columns) => self.place_columns(columns),
            Block::Table(table) => self.place_table(table),
            Block::Paragraph(text) => self.place_wrapped(text, TextStyle::BODY),
            Block::FinePrint(text) => self.place_wrapped(text, TextStyle::SMALL),
            Block::Rule => {
                self.rule(self.y);
                self.y += 2.0;
            }
            Block::Spacer(gap) => self.y += gap,
            Block::Signature { firm } => self.place_signature(firm),
        }
    }

    fn place_title(&mut self, text: &str) {
        let style = TextStyle::TITLE;
        let x = (PAGE_WIDTH_MM - text_width_mm(text, style)) / 2.0;
        self.text(x, self.y, text, style);
        self.y += line_height_mm(style) + 2.0;
    }

    fn place_heading(&mut self, text: &str) {
        let style = TextStyle::HEADING;
        self.text(MARGIN_MM, self.y, text, style);
        let rule_y = self.y + line_height_mm(style);
        self.rule(rule_y);
        self.y = rule_y + 2.0;
    }

    fn place_key_values(&mut self, rows: &[(String, String)]) {
        let label_width = 62.0;
        for (label, value) in rows {
            self.text(MARGIN_MM, self.y, label, TextStyle::HEADING);
            self.text(MARGIN_MM + label_width, self.y, value, TextStyle::BODY);
            self.y += line_height_mm(TextStyle::BODY) + 0.8;
        }
    }

    fn place_columns(&mut self, columns: &[Column]) {
        if columns.is_empty() {
            return;
        }

        let col_width = CONTENT_WIDTH_MM / columns.len() as f32;
        let text_budget = col_width - 2.0 * CELL_PAD_MM;
        let body_lh = line_height_mm(TextStyle::BODY) + 0.6;
        let heading_lh = line_height_mm(TextStyle::HEADING) + 1.0;
        let mut max_height: f32 = 0.0;

        for (index, column) in columns.iter().enumerate() {
            let x = MARGIN_MM + index as f32 * col_width + CELL_PAD_MM;
            let mut cursor = self.y;

            if !column.heading.is_empty() {
                self.text(x, cursor, &column.heading, TextStyle::HEADING);
                cursor += heading_lh;
            }

            for line in &column.lines {
                for wrapped in wrap_text(line, text_budget, TextStyle::BODY) {
                    self.text(x, cursor, &wrapped, TextStyle::BODY);
                    cursor += body_lh;
                }
            }

            max_height = max_height.max(cursor - self.y);
        }

        self.y += max_height + 1.5;
    }

    fn place_table(&mut self, table: &Table) {
        let heading_lh = line_height_mm(TextStyle::HEADING) + 1.0;
        let body_lh = line_height_mm(TextStyle::BODY) + 0.6;

        // Header row.
        self.rule(self.y);
        self.y += 1.2;
        for (spec, x) in table.columns.iter().zip(column_origins(table)) {
            let tx = aligned_x(&spec.heading, TextStyle::HEADING, x, spec.width_mm, spec.align);
            self.text(tx, self.y, &spec.heading, TextStyle::HEADING);
        }
        self.y += heading_lh;
        self.rule(self.y);
        self.y += 1.2;

        // Data rows.
        for row in &table.rows {
            let mut row_height: f32 = body_lh;

            for ((spec, x), cell) in table.columns.iter().zip(column_origins(table)).zip(row) {
                let budget = spec.width_mm - 2.0 * CELL_PAD_MM;
                let lines = if spec.wrap {
                    wrap_text(cell, budget, TextStyle::BODY)
                } else {
                    vec![cell.clone()]
                };

                let mut cursor = self.y;
                for line in &lines {
                    let tx = aligned_x(line, TextStyle::BODY, x, spec.width_mm, spec.align);
                    self.text(tx, cursor, line, TextStyle::BODY);
                    cursor += body_lh;
                }

                row_height = row_height.max(cursor - self.y);
            }

            self.y += row_height + 0.6;
        }

        self.rule(self.y);
        self.y += 2.0;
    }

    fn place_wrapped(&mut self, text: &str, style: TextStyle) {
        for line in wrap_text(text, CONTENT_WIDTH_MM, style) {
            self.text(MARGIN_MM, self.y, &line, style);
            self.y += line_height_mm(style) + 0.6;
        }
        self.y += 0.8;
    }

    fn place_signature(&mut self, firm: &str) {
        let style = TextStyle::HEADING;
        let line_width = 64.0;
        let right = MARGIN_MM + CONTENT_WIDTH_MM;

        self.text(right - text_width_mm(firm, style), self.y, firm, style);
        self.y += line_height_mm(style) + 14.0;

        self.elements.push(Element::Line {
            x1_mm: right - line_width,
            y_mm: self.y,
            x2_mm: right,
        });
        self.y += 1.5;

        let caption = "Authorised Signatory";
        self.text(
            right - text_width_mm(caption, TextStyle::BODY),
            self.y,
            caption,
            TextStyle::BODY,
        );
        self.y += line_height_mm(TextStyle::BODY);
    }
}

/// Left edge of each table column, margin-relative plus padding.
fn column_origins(table: &Table) -> Vec<f32> {
    let mut origins = Vec::with_capacity(table.columns.len());
    let mut x = MARGIN_MM;
    for spec in &table.columns {
        origins.push(x);
        x += spec.width_mm;
    }
    origins
}

fn aligned_x(text: &str, style: TextStyle, col_x: f32, col_width: f32, align: Align) -> f32 {
    let width = text_width_mm(text, style);
    match align {
        Align::Left => col_x + CELL_PAD_MM,
        Align::Right => col_x + col_width - CELL_PAD_MM - width,
        Align::Center => col_x + (col_width - width) / 2.0,
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Number of pages a canvas of the given height needs: `ceil(H / B)`, with a
/// minimum of one page for an empty canvas.
pub fn page_count_for_height(content_height_mm: f32) -> usize {
    if content_height_mm <= 0.0 {
        return 1;
    }
    (content_height_mm / PAGE_BAND_MM).ceil() as usize
}

/// Cuts the continuous canvas into pages. Each element is assigned to the
/// page its top edge falls in and shifted into page-local coordinates.
pub fn paginate(layout: &Layout) -> Vec<Page> {
    let count = page_count_for_height(layout.content_height_mm);
    let mut pages: Vec<Page> = (0..count)
        .map(|_| Page {
            elements: Vec::new(),
        })
        .collect();

    for element in &layout.elements {
        let index = ((element.top_mm() / PAGE_BAND_MM) as usize).min(count - 1);
        let dy = index as f32 * PAGE_BAND_MM;
        pages[index].elements.push(element.shifted(dy));
    }

    pages
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{Block, Document};

    fn doc_with_paragraphs(n: usize) -> Document {
        Document {
            title: "test".to_string(),
            blocks: (0..n)
                .map(|i| Block::Paragraph(format!("paragraph number {i}")))
                .collect(),
        }
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text(
            "polyester knitted fabric in assorted colours packed in bales",
            40.0,
            TextStyle::BODY,
        );
        assert!(lines.len() > 1);
        for line in &lines {
            // Every multi-word line stays within budget.
            if line.contains(' ') {
                assert!(text_width_mm(line, TextStyle::BODY) <= 40.0);
            }
        }
    }

    #[test]
    fn test_wrap_empty_gives_one_blank_line() {
        assert_eq!(wrap_text("", 50.0, TextStyle::BODY), vec![String::new()]);
    }

    #[test]
    fn test_wrap_oversized_word_not_split() {
        let lines = wrap_text("MSKU1234567890123456789012345678", 10.0, TextStyle::BODY);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_page_count_formula() {
        assert_eq!(page_count_for_height(0.0), 1);
        assert_eq!(page_count_for_height(PAGE_BAND_MM - 1.0), 1);
        assert_eq!(page_count_for_height(PAGE_BAND_MM), 1);
        assert_eq!(page_count_for_height(PAGE_BAND_MM + 0.1), 2);
        assert_eq!(page_count_for_height(PAGE_BAND_MM * 3.0 + 5.0), 4);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let doc = doc_with_paragraphs(20);
        let a = lay_out(&doc);
        let b = lay_out(&doc);
        assert_eq!(a.elements, b.elements);
        assert_eq!(a.content_height_mm, b.content_height_mm);
    }

    #[test]
    fn test_paginate_preserves_every_element() {
        // Enough paragraphs to spill over several pages.
        let doc = doc_with_paragraphs(400);
        let layout = lay_out(&doc);
        let pages = paginate(&layout);

        assert!(pages.len() > 1);
        assert_eq!(
            pages.len(),
            page_count_for_height(layout.content_height_mm)
        );

        let total: usize = pages.iter().map(|p| p.elements.len()).sum();
        assert_eq!(total, layout.elements.len());

        // Shifting each element back by its page offset reproduces the canvas.
        let mut reconstructed = Vec::new();
        for (index, page) in pages.iter().enumerate() {
            let dy = index as f32 * PAGE_BAND_MM;
            for element in &page.elements {
                assert!(element.top_mm() >= 0.0);
                assert!(element.top_mm() < PAGE_BAND_MM + f32::EPSILON);
                reconstructed.push(element.shifted(-dy));
            }
        }
        assert_eq!(reconstructed, layout.elements);
    }

    #[test]
    fn test_single_page_for_small_doc() {
        let doc = doc_with_paragraphs(3);
        let layout = lay_out(&doc);
        let pages = paginate(&layout);
        assert_eq!(pages.len(), 1);
    }
}
