//! # Typed Document Tree
//!
//! The template produces a [`Document`] made of typed blocks; the layout
//! engine measures those blocks onto a continuous canvas. No markup strings,
//! no HTML - malformed output is unrepresentable by construction.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Document                                                               │
//! │  ├── Title        "TAX INVOICE"                                         │
//! │  ├── Columns      exporter │ consignee │ invoice meta                   │
//! │  ├── KeyValues    export details (port, vessel, destination, ...)       │
//! │  ├── Table        item lines (sr / description / qty / rate / amount)   │
//! │  ├── KeyValues    totals                                                │
//! │  ├── Paragraph    amount in words                                       │
//! │  └── Signature    authorised signatory footer                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Text Styles
// =============================================================================

/// Horizontal alignment within a column or cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// Font size + weight for a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_pt: f32,
    pub bold: bool,
}

impl TextStyle {
    /// Document title ("TAX INVOICE").
    pub const TITLE: TextStyle = TextStyle {
        size_pt: 16.0,
        bold: true,
    };

    /// Section headings ("EXPORTER", "CONSIGNEE", ...).
    pub const HEADING: TextStyle = TextStyle {
        size_pt: 10.0,
        bold: true,
    };

    /// Regular body text.
    pub const BODY: TextStyle = TextStyle {
        size_pt: 9.0,
        bold: false,
    };

    /// Fine print (bank details, declarations).
    pub const SMALL: TextStyle = TextStyle {
        size_pt: 8.0,
        bold: false,
    };
}

// =============================================================================
// Blocks
// =============================================================================

/// One vertical slice of the invoice. Blocks stack top to bottom.
#[derive(Debug, Clone)]
pub enum Block {
    /// Centered document title.
    Title(String),

    /// Bold section heading with a rule underneath.
    Heading(String),

    /// Label/value rows in two columns.
    KeyValues(Vec<(String, String)>),

    /// Side-by-side columns of equal width, each with its own heading.
    Columns(Vec<Column>),

    /// The item lines table.
    Table(Table),

    /// Body text, word-wrapped to the content width.
    Paragraph(String),

    /// Fine-print text, word-wrapped to the content width.
    FinePrint(String),

    /// Full-width horizontal rule.
    Rule,

    /// Fixed vertical gap in millimetres.
    Spacer(f32),

    /// Signature footer: firm name over a signing line.
    Signature { firm: String },
}

/// One column inside a [`Block::Columns`] group.
#[derive(Debug, Clone)]
pub struct Column {
    pub heading: String,
    pub lines: Vec<String>,
}

// =============================================================================
// Tables
// =============================================================================

/// Column definition for the items table.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub heading: String,
    pub width_mm: f32,
    pub align: Align,
    /// Whether cell text wraps onto extra lines (description column) or is
    /// kept to a single line (numeric columns).
    pub wrap: bool,
}

/// A simple grid: one header row, then data rows.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Vec<String>>,
}

/// A complete invoice document, ready for layout.
#[derive(Debug, Clone)]
pub struct Document {
    /// PDF metadata title.
    pub title: String,
    pub blocks: Vec<Block>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_are_distinct() {
        assert!(TextStyle::TITLE.size_pt > TextStyle::HEADING.size_pt);
        assert!(TextStyle::HEADING.size_pt > TextStyle::SMALL.size_pt);
        assert!(TextStyle::TITLE.bold);
        assert!(!TextStyle::BODY.bold);
    }
}
