//! # Domain Types
//!
//! Core domain types used throughout Exim Desk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌───────────────────┐    ┌─────────────────┐   ┌──────────────────┐   │
//! │  │ SalesTransaction  │    │    SalesItem    │   │  Master records  │   │
//! │  │ ───────────────── │    │ ─────────────── │   │ ──────────────── │   │
//! │  │ id (UUID)         │1──n│ item_id (ref)   │   │ Company          │   │
//! │  │ invoice_number    │    │ hsn_code        │   │ DebitParty       │   │
//! │  │ status            │    │ quantity (3dp)  │   │ CreditParty      │   │
//! │  │ currency          │    │ rate (2dp)      │   │ ItemMaster       │   │
//! │  │ totals (derived)  │    │ derived figures │   │ Broker / Cha     │   │
//! │  └───────────────────┘    └─────────────────┘   └──────────────────┘   │
//! │                                                                         │
//! │  Sub-records (no identity of their own, live inside the transaction):  │
//! │  ExporterDetails, ConsigneeDetails, BuyerDetails, ExportDetails,       │
//! │  BankDetails, ShippingDetails, ShippingBill, SchemeFlags,              │
//! │  EpcgAuthorization, PurchaseDetailRef                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! The transaction has:
//! - `id`: UUID v4 - client-generated, immutable, used for references
//! - `invoice_number` / `transaction_number`: assigned by the upstream
//!   persistence layer once the draft is saved, never computed here
//!
//! ## Derived Fields Are Never Inputs
//! `amount`, `taxable_value`, `igst_amount` on each line and every
//! transaction-level total are recomputed from the raw inputs by the
//! computation engine. Deserialized values are overwritten on recompute.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{ExchangeRate, Money, Quantity, TaxRate};

// =============================================================================
// Currency
// =============================================================================

/// Transaction currency. The home currency (taxable values, IGST) is INR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Default)]
#[ts(export)]
pub enum Currency {
    #[default]
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    /// ISO 4217 code, as the upstream API spells it.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }

    /// Uppercase spelling used by the amount-in-words block.
    pub const fn words(&self) -> &'static str {
        match self {
            Currency::Inr => "INDIAN RUPEES",
            Currency::Usd => "US DOLLARS",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "INR" => Some(Currency::Inr),
            "USD" => Some(Currency::Usd),
            _ => None,
        }
    }
}

// =============================================================================
// Transaction Status
// =============================================================================

/// The lifecycle status of a sales transaction.
///
/// ## Lifecycle
/// ```text
/// Draft ──(persisted, invoice number assigned)──► Completed ──► Cancelled
/// ```
/// The computation engine behaves identically for every status; deletion is
/// a hard upstream delete and is not modeled as a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Transaction is being edited; may have zero or partial items.
    Draft,
    /// Persisted upstream with a server-assigned invoice number.
    Completed,
    /// Cancelled after completion.
    Cancelled,
}

impl TransactionStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Draft => "draft",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Draft
    }
}

// =============================================================================
// Sales Item
// =============================================================================

/// Raw, user-editable line input as it arrives from the form or upstream
/// JSON. Numbers are f64 here and nowhere else; the computation engine
/// validates and converts them exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesItemDraft {
    /// Item master reference.
    pub item_id: String,

    /// HSN classification code (frozen copy from the item master).
    #[serde(default)]
    pub hsn_code: String,

    /// Line description shown on the invoice.
    #[serde(default)]
    pub description: String,

    /// Quantity in the unit below. Non-negative.
    pub quantity: f64,

    /// Unit label (PCS, CTN, KGS, ...).
    #[serde(default)]
    pub unit: String,

    /// Rate per unit in the transaction currency. Non-negative.
    pub rate: f64,

    /// Home-currency conversion rate for this line. Strictly positive.
    pub exchange_rate: f64,

    /// IGST percentage, 0-100.
    pub igst_rate: f64,

    /// Free-text marks & numbers.
    #[serde(default)]
    pub marks: Option<String>,
}

/// A computed invoice line. Insertion order is document line order.
///
/// ## Snapshot Semantics
/// `hsn_code`, `description` and `unit` are frozen copies taken when the
/// item was picked from the master; later master edits do not rewrite
/// historic invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesItem {
    /// Item master reference.
    pub item_id: String,

    /// HSN classification code (frozen).
    pub hsn_code: String,

    /// Line description (frozen).
    pub description: String,

    /// Quantity in thousandths.
    pub quantity_milli: i64,

    /// Unit label (frozen).
    pub unit: String,

    /// Rate per unit in minor currency units.
    pub rate_minor: i64,

    /// Exchange rate in ten-thousandths.
    pub exchange_rate_e4: i64,

    /// IGST rate in basis points.
    pub igst_bps: u32,

    /// Free-text marks & numbers.
    pub marks: Option<String>,

    /// Derived: `quantity × rate`, transaction currency, minor units.
    pub amount_minor: i64,

    /// Derived: `amount × exchange_rate`, home currency, minor units.
    pub taxable_value_minor: i64,

    /// Derived: `taxable_value × igst_rate / 100`, minor units.
    pub igst_amount_minor: i64,
}

impl SalesItem {
    /// Returns the quantity as a typed value.
    #[inline]
    pub fn quantity(&self) -> Quantity {
        Quantity::from_milli(self.quantity_milli)
    }

    /// Returns the rate as a typed value.
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_minor(self.rate_minor)
    }

    /// Returns the exchange rate as a typed value.
    #[inline]
    pub fn exchange_rate(&self) -> ExchangeRate {
        ExchangeRate::from_e4(self.exchange_rate_e4)
    }

    /// Returns the IGST rate as a typed value.
    #[inline]
    pub fn igst_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.igst_bps)
    }

    /// Returns the derived line amount.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_minor(self.amount_minor)
    }

    /// Returns the derived taxable value (home currency).
    #[inline]
    pub fn taxable_value(&self) -> Money {
        Money::from_minor(self.taxable_value_minor)
    }

    /// Returns the derived IGST amount (home currency).
    #[inline]
    pub fn igst_amount(&self) -> Money {
        Money::from_minor(self.igst_amount_minor)
    }
}

// =============================================================================
// Transaction Sub-Records
// =============================================================================
// Flat string/date bundles with no identity or lifecycle of their own.
// Every field is optional: the document renderer substitutes "N/A".

/// Exporter block printed top-left on the invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExporterDetails {
    pub name: Option<String>,
    pub address: Option<String>,
    pub gst_no: Option<String>,
    pub iec_no: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
}

/// Consignee block (ship-to party abroad).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConsigneeDetails {
    pub name: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    /// Tax registration number in the destination country.
    pub trn: Option<String>,
}

/// Buyer block, when the buyer differs from the consignee.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BuyerDetails {
    pub name: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
}

/// Export logistics: origin, destination, ports, delivery/payment terms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExportDetails {
    pub country_of_origin: Option<String>,
    pub country_of_destination: Option<String>,
    pub port_of_loading: Option<String>,
    pub port_of_discharge: Option<String>,
    pub final_destination: Option<String>,
    pub vessel_or_flight: Option<String>,
    /// Incoterms (FOB, CIF, ...).
    pub delivery_terms: Option<String>,
    pub payment_terms: Option<String>,
}

/// Exporter bank details for remittance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub bank_name: Option<String>,
    pub account_no: Option<String>,
    pub ifsc_code: Option<String>,
    pub swift_code: Option<String>,
    pub ad_code: Option<String>,
}

/// Packing summary printed near the foot of the invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub no_of_cartons: Option<String>,
    pub net_weight: Option<String>,
    pub gross_weight: Option<String>,
    pub container_no: Option<String>,
    pub seal_no: Option<String>,
}

/// Customs shipping-bill reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingBill {
    pub number: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Export-incentive scheme toggles declared on the invoice.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SchemeFlags {
    pub drawback: bool,
    pub rodtep: bool,
    pub rosctl: bool,
    pub dfia: bool,
    pub epcg: bool,
}

/// One EPCG authorization attached to the transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EpcgAuthorization {
    pub license_no: String,
    pub license_date: Option<NaiveDate>,
}

/// Cross-reference to a purchase backing this export (supplier + license +
/// bill numbers/dates), tracked for compliance reporting.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDetailRef {
    pub supplier_name: Option<String>,
    pub license_no: Option<String>,
    pub bill_no: Option<String>,
    pub bill_date: Option<NaiveDate>,
}

// =============================================================================
// Sales Transaction
// =============================================================================

/// The central entity: one export sales transaction / invoice.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesTransaction {
    /// Client-generated UUID v4.
    pub id: String,

    /// Assigned by the upstream persistence layer; never computed here.
    pub invoice_number: Option<String>,

    /// Assigned by the upstream persistence layer; never computed here.
    pub transaction_number: Option<String>,

    pub status: TransactionStatus,

    pub transaction_date: NaiveDate,

    pub currency: Currency,

    // ----- references, resolved via the master-data API -----
    pub company_id: String,
    pub debit_party_id: String,
    pub credit_party_id: String,
    pub broker_id: Option<String>,
    pub cha_id: Option<String>,

    // ----- structured sub-records -----
    #[serde(default)]
    pub exporter: ExporterDetails,
    #[serde(default)]
    pub consignee: ConsigneeDetails,
    #[serde(default)]
    pub buyer: BuyerDetails,
    #[serde(default)]
    pub export_details: ExportDetails,
    #[serde(default)]
    pub bank_details: BankDetails,
    #[serde(default)]
    pub shipping: ShippingDetails,
    #[serde(default)]
    pub shipping_bill: ShippingBill,
    #[serde(default)]
    pub schemes: SchemeFlags,
    #[serde(default)]
    pub epcg_authorizations: Vec<EpcgAuthorization>,
    #[serde(default)]
    pub purchase_refs: Vec<PurchaseDetailRef>,

    // ----- line items (order = document line numbering) -----
    #[serde(default)]
    pub items: Vec<SalesItem>,

    // ----- derived aggregates, recomputed from `items` -----
    /// Sum of line amounts, transaction currency, minor units.
    pub total_amount_minor: i64,
    /// Sum of line taxable values, home currency, minor units.
    pub total_taxable_value_minor: i64,
    /// Sum of line IGST amounts, home currency, minor units.
    pub total_igst_amount_minor: i64,
    /// Uppercase English spelling of `total_amount`.
    pub amount_in_words: String,

    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub custom_field1: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl SalesTransaction {
    /// Returns the derived total amount (transaction currency).
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_minor(self.total_amount_minor)
    }

    /// Returns the derived total taxable value (home currency).
    #[inline]
    pub fn total_taxable_value(&self) -> Money {
        Money::from_minor(self.total_taxable_value_minor)
    }

    /// Returns the derived total IGST amount (home currency).
    #[inline]
    pub fn total_igst_amount(&self) -> Money {
        Money::from_minor(self.total_igst_amount_minor)
    }
}

// =============================================================================
// Master Records (normalized shapes)
// =============================================================================
// The upstream API returns these with inconsistent field names (`_id` vs
// `id`, `companyName` vs `name`). exim-client resolves the fallbacks once;
// the core only ever sees these normalized records.

/// The exporting company (seller-side firm).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub firm_id: Option<String>,
    pub name: String,
    pub address_lines: Vec<String>,
    pub pin_code: Option<String>,
    pub gst_no: Option<String>,
    pub pan_no: Option<String>,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
}

/// Seller-side legal entity named on the export documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DebitParty {
    pub id: String,
    pub name: String,
    pub address_lines: Vec<String>,
    pub pin_code: Option<String>,
    pub gst_no: Option<String>,
    pub pan_no: Option<String>,
    pub iec_no: Option<String>,
    pub epcg_license_nos: Vec<String>,
    pub epcg_license_date: Option<NaiveDate>,
    pub is_active: bool,
}

/// Foreign buyer/importer (counterparty).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreditParty {
    pub id: String,
    pub name: String,
    pub party_type: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gst_no: Option<String>,
    pub pan_no: Option<String>,
    pub credit_limit_minor: Option<i64>,
    pub current_balance_minor: Option<i64>,
    pub is_active: bool,
}

/// Goods master record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemMaster {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub hsn_code: Option<String>,
    pub unit: Option<String>,
    pub current_stock: Option<f64>,
    pub selling_price: Option<f64>,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Broker referenced on the transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Broker {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub commission_rate: Option<f64>,
    pub is_active: bool,
}

/// Customs House Agent referenced on the transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cha {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub license_number: Option<String>,
    pub is_active: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
