//! # Invoice Template
//!
//! Builds the fixed-layout export invoice [`Document`] from a computed
//! [`SalesTransaction`]. The layout is not configurable: every invoice the
//! application produces has the same structure.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             TAX INVOICE                                 │
//! ├──────────────────────┬──────────────────────┬───────────────────────────┤
//! │ EXPORTER             │ CONSIGNEE            │ INVOICE                   │
//! │ name / address / GST │ name / address / TRN │ number / date / currency  │
//! ├──────────────────────┴──────────────────────┴───────────────────────────┤
//! │ EXPORT DETAILS   origin · destination · ports · vessel · terms          │
//! ├─────┬───────────────────────────────┬───────┬──────┬─────────┬──────────┤
//! │ SR  │ DESCRIPTION / HSN             │ QTY   │ UNIT │ RATE    │ AMOUNT   │
//! ├─────┴───────────────────────────────┴───────┴──────┴─────────┴──────────┤
//! │ totals · amount in words · schemes · shipping · bank · signature        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Missing optional data renders as the literal `N/A` - the document shape
//! never changes based on which fields are filled in.

use exim_core::money::{Money, Quantity};
use exim_core::types::{Broker, Cha, Company, CreditParty, DebitParty, SalesTransaction};
use exim_core::HOME_CURRENCY;

use crate::doc::{Align, Block, Column, ColumnSpec, Document, Table};

/// Placeholder for absent optional values.
const NOT_AVAILABLE: &str = "N/A";

/// Master records resolved for the transaction's reference ids. Any of them
/// may be absent (deleted upstream, unreachable API); the template falls
/// back to the transaction's own frozen sub-records and `N/A`.
#[derive(Debug, Clone, Default)]
pub struct ResolvedParties {
    pub company: Option<Company>,
    pub debit_party: Option<DebitParty>,
    pub credit_party: Option<CreditParty>,
    pub broker: Option<Broker>,
    pub cha: Option<Cha>,
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Money with western thousands grouping: `166000.00` -> `166,000.00`.
pub fn format_money(value: Money) -> String {
    let plain = value.to_string();
    let negative = plain.starts_with('-');
    let digits = plain.trim_start_matches('-');

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, "00"),
    };

    let mut grouped = String::new();
    let chars: Vec<char> = int_part.chars().collect();
    for (index, ch) in chars.iter().enumerate() {
        if index > 0 && (chars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Quantity with trailing zeros trimmed: `100.000` -> `100`, `12.575` stays.
pub fn format_quantity(value: Quantity) -> String {
    let milli = value.milli();
    let major = milli / 1000;
    let frac = (milli % 1000).unsigned_abs();

    if frac == 0 {
        return major.to_string();
    }

    let text = format!("{major}.{frac:03}");
    text.trim_end_matches('0').to_string()
}

/// Exchange rate to four decimal places: `83.0000`.
fn format_exchange_rate(e4: i64) -> String {
    format!("{}.{:04}", e4 / 10_000, (e4 % 10_000).unsigned_abs())
}

fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

fn na(value: Option<&String>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.clone(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn na_date(value: Option<chrono::NaiveDate>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), format_date)
}

// =============================================================================
// Template
// =============================================================================

/// Builds the complete invoice document tree.
pub fn build_invoice_document(txn: &SalesTransaction, parties: &ResolvedParties) -> Document {
    let mut blocks = Vec::new();

    blocks.push(Block::Title("TAX INVOICE".to_string()));
    blocks.push(Block::Rule);
    blocks.push(Block::Spacer(1.5));

    blocks.push(Block::Columns(vec![
        company_column(parties),
        debit_party_column(parties),
        credit_party_column(parties),
    ]));
    blocks.push(Block::Rule);

    blocks.push(Block::Columns(vec![
        exporter_column(txn, parties),
        consignee_column(txn),
        invoice_meta_column(txn),
    ]));
    blocks.push(Block::Rule);

    blocks.push(Block::Columns(vec![
        buyer_column(txn, parties),
        agents_column(txn, parties),
    ]));
    blocks.push(Block::Rule);
    blocks.push(Block::Spacer(1.0));

    blocks.push(Block::Heading("EXPORT DETAILS".to_string()));
    blocks.push(Block::KeyValues(export_detail_rows(txn)));
    blocks.push(Block::Spacer(2.0));

    blocks.push(Block::Table(items_table(txn)));

    blocks.push(Block::KeyValues(totals_rows(txn)));
    blocks.push(Block::Spacer(1.0));

    blocks.push(Block::Paragraph(format!(
        "Amount in words: {}",
        txn.amount_in_words
    )));
    blocks.push(Block::Spacer(2.0));

    if let Some(schemes) = scheme_declaration(txn) {
        blocks.push(Block::FinePrint(schemes));
    }

    blocks.push(Block::Heading("SHIPPING & BANK".to_string()));
    blocks.push(Block::Columns(vec![
        shipping_column(txn),
        bank_column(txn),
    ]));
    blocks.push(Block::Spacer(2.0));

    if let Some(remarks) = txn.remarks.as_deref().filter(|r| !r.trim().is_empty()) {
        blocks.push(Block::FinePrint(format!("Remarks: {remarks}")));
        blocks.push(Block::Spacer(1.0));
    }

    blocks.push(Block::FinePrint(
        "We declare that this invoice shows the actual price of the goods described \
         and that all particulars are true and correct."
            .to_string(),
    ));
    blocks.push(Block::Spacer(3.0));

    blocks.push(Block::Signature {
        firm: firm_name(txn, parties),
    });

    Document {
        title: document_title(txn),
        blocks,
    }
}

fn document_title(txn: &SalesTransaction) -> String {
    match txn.invoice_number.as_deref().filter(|n| !n.trim().is_empty()) {
        Some(number) => format!("Invoice {number}"),
        None => format!("Invoice draft {}", txn.id),
    }
}

fn firm_name(txn: &SalesTransaction, parties: &ResolvedParties) -> String {
    if let Some(name) = txn.exporter.name.as_deref().filter(|n| !n.trim().is_empty()) {
        return format!("For {name}");
    }
    if let Some(company) = &parties.company {
        return format!("For {}", company.name);
    }
    format!("For {NOT_AVAILABLE}")
}

// ----- party columns ---------------------------------------------------------

fn company_column(parties: &ResolvedParties) -> Column {
    let mut lines = Vec::new();

    match &parties.company {
        Some(company) => {
            lines.push(company.name.clone());
            lines.extend(company.address_lines.iter().cloned());
            lines.push(format!("GSTIN: {}", na(company.gst_no.as_ref())));
            lines.push(format!("PAN: {}", na(company.pan_no.as_ref())));
            lines.push(format!("Contact: {}", na(company.contact_no.as_ref())));
        }
        None => lines.push(NOT_AVAILABLE.to_string()),
    }

    Column {
        heading: "COMPANY".to_string(),
        lines,
    }
}

fn debit_party_column(parties: &ResolvedParties) -> Column {
    let mut lines = Vec::new();

    match &parties.debit_party {
        Some(party) => {
            lines.push(party.name.clone());
            lines.extend(party.address_lines.iter().cloned());
            lines.push(format!("GSTIN: {}", na(party.gst_no.as_ref())));
            lines.push(format!("PAN: {}", na(party.pan_no.as_ref())));
            lines.push(format!("IEC: {}", na(party.iec_no.as_ref())));
            if !party.epcg_license_nos.is_empty() {
                lines.push(format!(
                    "EPCG: {} ({})",
                    party.epcg_license_nos.join(", "),
                    na_date(party.epcg_license_date)
                ));
            }
        }
        None => lines.push(NOT_AVAILABLE.to_string()),
    }

    Column {
        heading: "DEBIT PARTY".to_string(),
        lines,
    }
}

fn credit_party_column(parties: &ResolvedParties) -> Column {
    let mut lines = Vec::new();

    match &parties.credit_party {
        Some(party) => {
            lines.push(party.name.clone());
            lines.push(na(party.address.as_ref()));
            lines.push(format!("GSTIN: {}", na(party.gst_no.as_ref())));
            lines.push(format!("Phone: {}", na(party.phone.as_ref())));
        }
        None => lines.push(NOT_AVAILABLE.to_string()),
    }

    Column {
        heading: "CREDIT PARTY".to_string(),
        lines,
    }
}

fn exporter_column(txn: &SalesTransaction, parties: &ResolvedParties) -> Column {
    let exporter = &txn.exporter;
    let mut lines = Vec::new();

    match exporter.name.as_deref().filter(|n| !n.trim().is_empty()) {
        Some(name) => lines.push(name.to_string()),
        None => lines.push(
            parties
                .company
                .as_ref()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |c| c.name.clone()),
        ),
    }

    lines.push(na(exporter.address.as_ref()));
    lines.push(format!("GSTIN: {}", na(exporter.gst_no.as_ref())));
    lines.push(format!("IEC: {}", na(exporter.iec_no.as_ref())));
    lines.push(format!(
        "State: {} ({})",
        na(exporter.state.as_ref()),
        na(exporter.state_code.as_ref())
    ));

    Column {
        heading: "EXPORTER".to_string(),
        lines,
    }
}

fn consignee_column(txn: &SalesTransaction) -> Column {
    let consignee = &txn.consignee;
    Column {
        heading: "CONSIGNEE".to_string(),
        lines: vec![
            na(consignee.name.as_ref()),
            na(consignee.address.as_ref()),
            format!("Country: {}", na(consignee.country.as_ref())),
            format!("TRN: {}", na(consignee.trn.as_ref())),
        ],
    }
}

fn invoice_meta_column(txn: &SalesTransaction) -> Column {
    Column {
        heading: "INVOICE".to_string(),
        lines: vec![
            format!("Invoice No: {}", na(txn.invoice_number.as_ref())),
            format!("Date: {}", format_date(txn.transaction_date)),
            format!("Currency: {}", txn.currency.code()),
            format!("Status: {}", txn.status.as_str().to_uppercase()),
            format!("SB No: {}", na(txn.shipping_bill.number.as_ref())),
            format!("SB Date: {}", na_date(txn.shipping_bill.date)),
        ],
    }
}

fn buyer_column(txn: &SalesTransaction, parties: &ResolvedParties) -> Column {
    let buyer = &txn.buyer;
    let name = match buyer.name.as_deref().filter(|n| !n.trim().is_empty()) {
        Some(name) => name.to_string(),
        None => parties
            .credit_party
            .as_ref()
            .map_or_else(|| NOT_AVAILABLE.to_string(), |p| p.name.clone()),
    };

    Column {
        heading: "BUYER (IF OTHER THAN CONSIGNEE)".to_string(),
        lines: vec![
            name,
            na(buyer.address.as_ref()),
            format!("Country: {}", na(buyer.country.as_ref())),
        ],
    }
}

fn agents_column(txn: &SalesTransaction, parties: &ResolvedParties) -> Column {
    let broker = parties
        .broker
        .as_ref()
        .map(|b| b.name.clone())
        .or_else(|| txn.broker_id.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let cha = parties
        .cha
        .as_ref()
        .map(|c| c.name.clone())
        .or_else(|| txn.cha_id.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Column {
        heading: "AGENTS".to_string(),
        lines: vec![format!("Broker: {broker}"), format!("CHA: {cha}")],
    }
}

// ----- detail rows -----------------------------------------------------------

fn export_detail_rows(txn: &SalesTransaction) -> Vec<(String, String)> {
    let export = &txn.export_details;
    vec![
        (
            "Country of Origin".to_string(),
            na(export.country_of_origin.as_ref()),
        ),
        (
            "Country of Destination".to_string(),
            na(export.country_of_destination.as_ref()),
        ),
        (
            "Port of Loading".to_string(),
            na(export.port_of_loading.as_ref()),
        ),
        (
            "Port of Discharge".to_string(),
            na(export.port_of_discharge.as_ref()),
        ),
        (
            "Final Destination".to_string(),
            na(export.final_destination.as_ref()),
        ),
        (
            "Vessel / Flight".to_string(),
            na(export.vessel_or_flight.as_ref()),
        ),
        (
            "Delivery Terms".to_string(),
            na(export.delivery_terms.as_ref()),
        ),
        (
            "Payment Terms".to_string(),
            na(export.payment_terms.as_ref()),
        ),
    ]
}

fn items_table(txn: &SalesTransaction) -> Table {
    let columns = vec![
        ColumnSpec {
            heading: "SR".to_string(),
            width_mm: 10.0,
            align: Align::Right,
            wrap: false,
        },
        ColumnSpec {
            heading: "DESCRIPTION / HSN".to_string(),
            width_mm: 80.0,
            align: Align::Left,
            wrap: true,
        },
        ColumnSpec {
            heading: "QTY".to_string(),
            width_mm: 20.0,
            align: Align::Right,
            wrap: false,
        },
        ColumnSpec {
            heading: "UNIT".to_string(),
            width_mm: 14.0,
            align: Align::Left,
            wrap: false,
        },
        ColumnSpec {
            heading: "RATE".to_string(),
            width_mm: 26.0,
            align: Align::Right,
            wrap: false,
        },
        ColumnSpec {
            heading: "AMOUNT".to_string(),
            width_mm: 36.0,
            align: Align::Right,
            wrap: false,
        },
    ];

    let rows = txn
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut description = item.description.clone();
            if !item.hsn_code.trim().is_empty() {
                description = format!("{description} [HSN {}]", item.hsn_code);
            }
            if let Some(marks) = item.marks.as_deref().filter(|m| !m.trim().is_empty()) {
                description = format!("{description} Marks: {marks}");
            }

            vec![
                (index + 1).to_string(),
                description,
                format_quantity(item.quantity()),
                if item.unit.trim().is_empty() {
                    NOT_AVAILABLE.to_string()
                } else {
                    item.unit.clone()
                },
                format_money(item.rate()),
                format_money(item.amount()),
            ]
        })
        .collect();

    Table { columns, rows }
}

fn totals_rows(txn: &SalesTransaction) -> Vec<(String, String)> {
    let mut rows = vec![(
        format!("Total Amount ({})", txn.currency.code()),
        format_money(txn.total_amount()),
    )];

    // Per-line exchange rates; show the rate only when it is uniform.
    if let Some(first) = txn.items.first() {
        let uniform = txn
            .items
            .iter()
            .all(|item| item.exchange_rate_e4 == first.exchange_rate_e4);
        if uniform {
            rows.push((
                "Exchange Rate".to_string(),
                format_exchange_rate(first.exchange_rate_e4),
            ));
        }
    }

    rows.push((
        format!("Total Taxable Value ({})", HOME_CURRENCY.code()),
        format_money(txn.total_taxable_value()),
    ));
    rows.push((
        format!("Total IGST ({})", HOME_CURRENCY.code()),
        format_money(txn.total_igst_amount()),
    ));
    rows
}

fn scheme_declaration(txn: &SalesTransaction) -> Option<String> {
    let flags = &txn.schemes;
    let mut claimed = Vec::new();
    if flags.drawback {
        claimed.push("DRAWBACK");
    }
    if flags.rodtep {
        claimed.push("RODTEP");
    }
    if flags.rosctl {
        claimed.push("ROSCTL");
    }
    if flags.dfia {
        claimed.push("DFIA");
    }
    if flags.epcg {
        claimed.push("EPCG");
    }

    if claimed.is_empty() && txn.epcg_authorizations.is_empty() {
        return None;
    }

    let mut text = format!(
        "Export under claim of: {}.",
        if claimed.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            claimed.join(", ")
        }
    );

    for auth in &txn.epcg_authorizations {
        text.push_str(&format!(
            " EPCG Authorization {} dated {}.",
            auth.license_no,
            na_date(auth.license_date)
        ));
    }

    Some(text)
}

fn shipping_column(txn: &SalesTransaction) -> Column {
    let shipping = &txn.shipping;
    Column {
        heading: "SHIPPING".to_string(),
        lines: vec![
            format!("No. of Cartons: {}", na(shipping.no_of_cartons.as_ref())),
            format!("Net Weight: {}", na(shipping.net_weight.as_ref())),
            format!("Gross Weight: {}", na(shipping.gross_weight.as_ref())),
            format!("Container No: {}", na(shipping.container_no.as_ref())),
            format!("Seal No: {}", na(shipping.seal_no.as_ref())),
        ],
    }
}

fn bank_column(txn: &SalesTransaction) -> Column {
    let bank = &txn.bank_details;
    Column {
        heading: "BANK DETAILS".to_string(),
        lines: vec![
            format!("Bank: {}", na(bank.bank_name.as_ref())),
            format!("A/C No: {}", na(bank.account_no.as_ref())),
            format!("IFSC: {}", na(bank.ifsc_code.as_ref())),
            format!("SWIFT: {}", na(bank.swift_code.as_ref())),
            format!("AD Code: {}", na(bank.ad_code.as_ref())),
        ],
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use exim_core::types::{Currency, SalesItem, TransactionStatus};

    fn sample_item() -> SalesItem {
        SalesItem {
            item_id: "itm-1".into(),
            hsn_code: "620342".into(),
            description: "Cotton trousers".into(),
            quantity_milli: 100_000,
            unit: "PCS".into(),
            rate_minor: 1_000,
            exchange_rate_e4: 830_000,
            igst_bps: 1800,
            marks: None,
            amount_minor: 100_000,
            taxable_value_minor: 8_300_000,
            igst_amount_minor: 1_494_000,
        }
    }

    fn sample_transaction() -> SalesTransaction {
        SalesTransaction {
            id: "7d5a1f1e-0000-4000-8000-000000000001".into(),
            invoice_number: Some("EXP/2025/001".into()),
            transaction_number: Some("TXN-001".into()),
            status: TransactionStatus::Completed,
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
            items: vec![sample_item()],
            total_amount_minor: 100_000,
            total_taxable_value_minor: 8_300_000,
            total_igst_amount_minor: 1_494_000,
            amount_in_words: "ONE THOUSAND AND 00/100 US DOLLARS".into(),
            remarks: None,
            custom_field1: None,
            created_at: Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap(),
        }
    }

    fn all_text(doc: &Document) -> String {
        let mut out = String::new();
        for block in &doc.blocks {
            match block {
                Block::Title(t) | Block::Heading(t) | Block::Paragraph(t) | Block::FinePrint(t) => {
                    out.push_str(t);
                    out.push('\n');
                }
                Block::KeyValues(rows) => {
                    for (k, v) in rows {
                        out.push_str(&format!("{k} {v}\n"));
                    }
                }
                Block::Columns(cols) => {
                    for col in cols {
                        out.push_str(&col.heading);
                        out.push('\n');
                        for line in &col.lines {
                            out.push_str(line);
                            out.push('\n');
                        }
                    }
                }
                Block::Table(table) => {
                    for row in &table.rows {
                        out.push_str(&row.join(" "));
                        out.push('\n');
                    }
                }
                Block::Signature { firm } => {
                    out.push_str(firm);
                    out.push('\n');
                }
                Block::Rule | Block::Spacer(_) => {}
            }
        }
        out
    }

    #[test]
    fn test_format_money_grouping() {
        assert_eq!(format_money(Money::from_minor(16_600_000)), "166,000.00");
        assert_eq!(format_money(Money::from_minor(100_000)), "1,000.00");
        assert_eq!(format_money(Money::from_minor(99)), "0.99");
        assert_eq!(format_money(Money::from_minor(-123_456)), "-1,234.56");
    }

    #[test]
    fn test_format_quantity_trims_zeros() {
        assert_eq!(format_quantity(Quantity::from_milli(100_000)), "100");
        assert_eq!(format_quantity(Quantity::from_milli(12_575)), "12.575");
        assert_eq!(format_quantity(Quantity::from_milli(4_200)), "4.2");
    }

    #[test]
    fn test_missing_optionals_render_as_na() {
        let txn = sample_transaction();
        let doc = build_invoice_document(&txn, &ResolvedParties::default());
        let text = all_text(&doc);

        // Empty sub-records but the structure is intact.
        assert!(text.contains("TAX INVOICE"));
        assert!(text.contains("EXPORTER"));
        assert!(text.contains("GSTIN: N/A"));
        assert!(text.contains("Port of Loading N/A"));
        assert!(text.contains("Bank: N/A"));
    }

    #[test]
    fn test_totals_and_words_present() {
        let txn = sample_transaction();
        let doc = build_invoice_document(&txn, &ResolvedParties::default());
        let text = all_text(&doc);

        assert!(text.contains("Total Amount (USD) 1,000.00"));
        assert!(text.contains("Total Taxable Value (INR) 83,000.00"));
        assert!(text.contains("Total IGST (INR) 14,940.00"));
        assert!(text.contains("Exchange Rate 83.0000"));
        assert!(text.contains("ONE THOUSAND AND 00/100 US DOLLARS"));
    }

    #[test]
    fn test_item_rows_in_order() {
        let mut txn = sample_transaction();
        let mut second = sample_item();
        second.description = "Denim jackets".into();
        txn.items.push(second);

        let doc = build_invoice_document(&txn, &ResolvedParties::default());
        let table = doc
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "1");
        assert_eq!(table.rows[1][0], "2");
        assert!(table.rows[0][1].contains("Cotton trousers"));
        assert!(table.rows[0][1].contains("HSN 620342"));
        assert!(table.rows[1][1].contains("Denim jackets"));
    }

    #[test]
    fn test_debit_party_block_rendered() {
        let txn = sample_transaction();
        let parties = ResolvedParties {
            debit_party: Some(DebitParty {
                id: "dp-1".into(),
                name: "Sunrise Impex".into(),
                address_lines: vec!["12 Ring Road, Surat".into()],
                iec_no: Some("0312345678".into()),
                epcg_license_nos: vec!["0330051234".into()],
                ..Default::default()
            }),
            ..Default::default()
        };

        let doc = build_invoice_document(&txn, &parties);
        let text = all_text(&doc);
        assert!(text.contains("DEBIT PARTY"));
        assert!(text.contains("Sunrise Impex"));
        assert!(text.contains("12 Ring Road, Surat"));
        assert!(text.contains("IEC: 0312345678"));
        assert!(text.contains("EPCG: 0330051234"));
    }

    #[test]
    fn test_party_block_always_present() {
        // Unresolved masters still produce all three party columns.
        let doc = build_invoice_document(&sample_transaction(), &ResolvedParties::default());
        let text = all_text(&doc);
        assert!(text.contains("COMPANY"));
        assert!(text.contains("DEBIT PARTY"));
        assert!(text.contains("CREDIT PARTY"));
    }

    #[test]
    fn test_resolved_company_fills_exporter_name() {
        let txn = sample_transaction();
        let parties = ResolvedParties {
            company: Some(Company {
                id: "cmp-1".into(),
                name: "Global Textiles Exports".into(),
                ..Default::default()
            }),
            ..Default::default()
        };
        let doc = build_invoice_document(&txn, &parties);
        let text = all_text(&doc);
        assert!(text.contains("Global Textiles Exports"));
        assert!(text.contains("For Global Textiles Exports"));
    }

    #[test]
    fn test_mixed_exchange_rates_hide_summary_rate() {
        let mut txn = sample_transaction();
        let mut second = sample_item();
        second.exchange_rate_e4 = 840_000;
        txn.items.push(second);

        let doc = build_invoice_document(&txn, &ResolvedParties::default());
        let text = all_text(&doc);
        assert!(!text.contains("Exchange Rate 83.0000"));
    }

    #[test]
    fn test_zero_items_still_builds() {
        let mut txn = sample_transaction();
        txn.items.clear();
        txn.total_amount_minor = 0;
        txn.amount_in_words = "ZERO AND 00/100 US DOLLARS".into();

        let doc = build_invoice_document(&txn, &ResolvedParties::default());
        let table = doc
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .unwrap();
        assert!(table.rows.is_empty());

        let text = all_text(&doc);
        assert!(text.contains("Total Amount (USD) 0.00"));
    }

    #[test]
    fn test_scheme_declaration() {
        let mut txn = sample_transaction();
        txn.schemes.drawback = true;
        txn.schemes.rodtep = true;

        let doc = build_invoice_document(&txn, &ResolvedParties::default());
        let text = all_text(&doc);
        assert!(text.contains("Export under claim of: DRAWBACK, RODTEP."));
    }
}
