//! # PDF Backend
//!
//! Emits measured pages through `printpdf` using the builtin Helvetica faces,
//! so no font files ship with the application. This module is the only place
//! that knows the output is PDF; everything upstream works on the typed
//! document tree and measured elements.

use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, Point};
use tracing::debug;

use exim_core::types::SalesTransaction;

use crate::error::{RenderError, RenderResult};
use crate::layout::{lay_out, paginate, Element, Page, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::template::{build_invoice_document, ResolvedParties};

/// One point in millimetres.
const PT_MM: f32 = 0.3528;

/// A finished render: the complete PDF byte buffer plus the file name the
/// artifact should be stored under. Nothing is written to disk here.
#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Renders the invoice for a computed transaction. All-or-nothing: on any
/// failure no bytes are returned.
pub fn render_invoice(
    txn: &SalesTransaction,
    parties: &ResolvedParties,
) -> RenderResult<RenderedInvoice> {
    let document = build_invoice_document(txn, parties);
    let layout = lay_out(&document);
    let pages = paginate(&layout);

    debug!(
        transaction = %txn.id,
        pages = pages.len(),
        height_mm = layout.content_height_mm,
        "laying out invoice"
    );

    let bytes = emit_pdf(&document.title, &pages)?;

    Ok(RenderedInvoice {
        file_name: artifact_file_name(txn),
        page_count: pages.len(),
        bytes,
    })
}

/// File name for the rendered artifact: the invoice number when assigned,
/// otherwise the transaction id. Always ends in `.pdf`.
pub fn artifact_file_name(txn: &SalesTransaction) -> String {
    let stem = txn
        .invoice_number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(&txn.id);
    format!("{}.pdf", sanitize_file_stem(stem))
}

/// Replaces characters that are unsafe in file names. `EXP/2025/001`
/// becomes `EXP-2025-001`.
fn sanitize_file_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('-');
    if trimmed.is_empty() {
        "invoice".to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// Emission
// =============================================================================

fn emit_pdf(title: &str, pages: &[Page]) -> RenderResult<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            doc.get_page(page_index).get_layer(layer_index)
        };

        for element in &page.elements {
            match element {
                Element::Text {
                    x_mm,
                    y_mm,
                    text,
                    style,
                } => {
                    let font: &IndirectFontRef = if style.bold { &bold } else { &regular };
                    // Canvas y is top-down; PDF y is bottom-up from the page
                    // origin, measured at the text baseline.
                    let baseline = PAGE_HEIGHT_MM - MARGIN_MM - y_mm - style.size_pt * PT_MM;
                    layer.use_text(text.clone(), style.size_pt, Mm(*x_mm), Mm(baseline), font);
                }
                Element::Line { x1_mm, y_mm, x2_mm } => {
                    let y = PAGE_HEIGHT_MM - MARGIN_MM - y_mm;
                    layer.add_line(Line {
                        points: vec![
                            (Point::new(Mm(*x1_mm), Mm(y)), false),
                            (Point::new(Mm(*x2_mm), Mm(y)), false),
                        ],
                        is_closed: false,
                    });
                }
            }
        }
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| RenderError::Encode(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use exim_core::types::{Currency, TransactionStatus};

    fn minimal_transaction() -> SalesTransaction {
        SalesTransaction {
            id: "7d5a1f1e-0000-4000-8000-000000000001".into(),
            invoice_number: None,
            transaction_number: None,
            status: TransactionStatus::Draft,
            transaction_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            currency: Currency::Usd,
            company_id: "cmp-1".into(),
            debit_party_id: "dp-1".into(),
            credit_party_id: "cp-1".into(),
            broker_id: None,
            cha_id: None,
            exporter: Default::default(),
            consignee: Default::default(),
            buyer: Default::default(),
            export_details: Default::default(),
            bank_details: Default::default(),
            shipping: Default::default(),
            shipping_bill: Default::default(),
            schemes: Default::default(),
            epcg_authorizations: vec![],
            purchase_refs: vec![],
            items: vec![],
            total_amount_minor: 0,
            total_taxable_value_minor: 0,
            total_igst_amount_minor: 0,
            amount_in_words: "ZERO AND 00/100 US DOLLARS".into(),
            remarks: None,
            custom_field1: None,
            created_at: Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_file_name_from_invoice_number() {
        let mut txn = minimal_transaction();
        txn.invoice_number = Some("EXP/2025/001".into());
        assert_eq!(artifact_file_name(&txn), "EXP-2025-001.pdf");
    }

    #[test]
    fn test_file_name_falls_back_to_id() {
        let txn = minimal_transaction();
        assert_eq!(
            artifact_file_name(&txn),
            "7d5a1f1e-0000-4000-8000-000000000001.pdf"
        );
    }

    #[test]
    fn test_file_name_blank_invoice_number_falls_back() {
        let mut txn = minimal_transaction();
        txn.invoice_number = Some("   ".into());
        assert!(artifact_file_name(&txn).starts_with("7d5a1f1e"));
    }

    #[test]
    fn test_sanitize_degenerate_stem() {
        assert_eq!(sanitize_file_stem("///"), "invoice");
        assert_eq!(sanitize_file_stem("A B:C"), "A-B-C");
    }

    #[test]
    fn test_render_zero_items_single_page() {
        let txn = minimal_transaction();
        let rendered = render_invoice(&txn, &ResolvedParties::default()).unwrap();

        assert_eq!(rendered.page_count, 1);
        assert!(!rendered.bytes.is_empty());
        assert_eq!(&rendered.bytes[0..5], b"%PDF-");
    }

    #[test]
    fn test_render_many_items_multiple_pages() {
        use exim_core::types::SalesItem;

        let mut txn = minimal_transaction();
        for i in 0..80 {
            txn.items.push(SalesItem {
                item_id: format!("itm-{i}"),
                hsn_code: "620342".into(),
                description: format!("Assorted knitted garments lot {i}"),
                quantity_milli: 10_000,
                unit: "PCS".into(),
                rate_minor: 500,
                exchange_rate_e4: 830_000,
                igst_bps: 1800,
                marks: None,
                amount_minor: 50_000,
                taxable_value_minor: 4_150_000,
                igst_amount_minor: 747_000,
            });
        }

        let rendered = render_invoice(&txn, &ResolvedParties::default()).unwrap();
        assert!(rendered.page_count > 1);
        assert!(!rendered.bytes.is_empty());
    }
}
