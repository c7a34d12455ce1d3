//! # Transaction Form Transitions
//!
//! The sales form as an immutable value advanced by pure transitions.
//!
//! ## Why Not Setters?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Form State Transitions                               │
//! │                                                                         │
//! │  UI Action                FormEvent                 New Form Value      │
//! │  ─────────                ─────────                 ──────────────      │
//! │  Pick company ──────────► SetCompany(id) ─────────► form' (cloned)     │
//! │  Type quantity ─────────► SetItemQuantity{i, v} ──► form'              │
//! │  Click add item ────────► AddItem ────────────────► form'              │
//! │  Click remove ──────────► RemoveItem(i) ──────────► form'              │
//! │                                                                         │
//! │  After EVERY transition the caller runs form.compute():                │
//! │  derived totals come from the engine, never from event handlers.       │
//! │                                                                         │
//! │  apply() NEVER mutates its input and NEVER fails: out-of-range item    │
//! │  indices are ignored, invalid numbers are stored raw and reported by   │
//! │  compute() with the exact field + line so the UI can highlight it.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::compute::{compute_draft, Totals};
use crate::error::{CoreResult, ValidationError, ValidationResult};
use crate::validation::{validate_hsn_code, validate_party_name};
use crate::types::{
    BankDetails, BuyerDetails, ConsigneeDetails, Currency, EpcgAuthorization, ExportDetails,
    ExporterDetails, PurchaseDetailRef, SalesItem, SalesItemDraft, SalesTransaction, SchemeFlags,
    ShippingBill, ShippingDetails, TransactionStatus,
};

// =============================================================================
// Form Value
// =============================================================================

/// The raw, user-editable state of the sales transaction form.
///
/// Reference ids are plain strings with `""` meaning "not selected", the
/// way the select inputs report them. Structured sub-records are edited
/// block-wise.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    pub company_id: String,
    pub debit_party_id: String,
    pub credit_party_id: String,
    pub broker_id: String,
    pub cha_id: String,
    /// ISO date string as the date input reports it.
    pub transaction_date: String,
    pub currency: Currency,
    pub remarks: String,
    pub custom_field1: String,
    pub exporter: ExporterDetails,
    pub consignee: ConsigneeDetails,
    pub buyer: BuyerDetails,
    pub export_details: ExportDetails,
    pub bank_details: BankDetails,
    pub shipping: ShippingDetails,
    pub shipping_bill: ShippingBill,
    pub schemes: SchemeFlags,
    pub epcg_authorizations: Vec<EpcgAuthorization>,
    pub purchase_refs: Vec<PurchaseDetailRef>,
    pub items: Vec<SalesItemDraft>,
}

impl TransactionForm {
    /// A fresh form: one empty line, INR, today left to the caller.
    pub fn new(transaction_date: impl Into<String>) -> Self {
        TransactionForm {
            company_id: String::new(),
            debit_party_id: String::new(),
            credit_party_id: String::new(),
            broker_id: String::new(),
            cha_id: String::new(),
            transaction_date: transaction_date.into(),
            currency: Currency::Inr,
            remarks: String::new(),
            custom_field1: String::new(),
            exporter: ExporterDetails::default(),
            consignee: ConsigneeDetails::default(),
            buyer: BuyerDetails::default(),
            export_details: ExportDetails::default(),
            bank_details: BankDetails::default(),
            shipping: ShippingDetails::default(),
            shipping_bill: ShippingBill::default(),
            schemes: SchemeFlags::default(),
            epcg_authorizations: Vec::new(),
            purchase_refs: Vec::new(),
            items: vec![SalesItemDraft::default()],
        }
    }
}

// =============================================================================
// Form Events
// =============================================================================

/// One user-visible edit, keyed by the field it touches.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", tag = "type", content = "payload")]
pub enum FormEvent {
    SetCompany(String),
    SetDebitParty(String),
    SetCreditParty(String),
    SetBroker(String),
    SetCha(String),
    SetTransactionDate(String),
    SetCurrency(Currency),
    SetRemarks(String),
    SetCustomField1(String),
    SetExporter(ExporterDetails),
    SetConsignee(ConsigneeDetails),
    SetBuyer(BuyerDetails),
    SetExportDetails(ExportDetails),
    SetBankDetails(BankDetails),
    SetShipping(ShippingDetails),
    SetShippingBill(ShippingBill),
    SetSchemes(SchemeFlags),
    SetEpcgAuthorizations(Vec<EpcgAuthorization>),
    SetPurchaseRefs(Vec<PurchaseDetailRef>),
    /// Appends an empty line at the end.
    AddItem,
    /// Removes the line at the index; out of range is a no-op.
    RemoveItem(usize),
    /// Item-master pick: freezes HSN code and unit onto the line.
    SetItemRef {
        index: usize,
        item_id: String,
        hsn_code: String,
        unit: String,
    },
    SetItemDescription { index: usize, value: String },
    SetItemQuantity { index: usize, value: f64 },
    SetItemRate { index: usize, value: f64 },
    SetItemExchangeRate { index: usize, value: f64 },
    SetItemIgstRate { index: usize, value: f64 },
    SetItemMarks { index: usize, value: String },
}

// =============================================================================
// Transitions
// =============================================================================

impl TransactionForm {
    /// Applies one event, returning the next form value.
    ///
    /// Pure: `self` is untouched. Events addressing a missing item index
    /// leave the form unchanged.
    #[must_use]
    pub fn apply(&self, event: FormEvent) -> TransactionForm {
        let mut next = self.clone();
        match event {
            FormEvent::SetCompany(id) => next.company_id = id,
            FormEvent::SetDebitParty(id) => next.debit_party_id = id,
            FormEvent::SetCreditParty(id) => next.credit_party_id = id,
            FormEvent::SetBroker(id) => next.broker_id = id,
            FormEvent::SetCha(id) => next.cha_id = id,
            FormEvent::SetTransactionDate(date) => next.transaction_date = date,
            FormEvent::SetCurrency(currency) => next.currency = currency,
            FormEvent::SetRemarks(text) => next.remarks = text,
            FormEvent::SetCustomField1(text) => next.custom_field1 = text,
            FormEvent::SetExporter(block) => next.exporter = block,
            FormEvent::SetConsignee(block) => next.consignee = block,
            FormEvent::SetBuyer(block) => next.buyer = block,
            FormEvent::SetExportDetails(block) => next.export_details = block,
            FormEvent::SetBankDetails(block) => next.bank_details = block,
            FormEvent::SetShipping(block) => next.shipping = block,
            FormEvent::SetShippingBill(block) => next.shipping_bill = block,
            FormEvent::SetSchemes(flags) => next.schemes = flags,
            FormEvent::SetEpcgAuthorizations(list) => next.epcg_authorizations = list,
            FormEvent::SetPurchaseRefs(list) => next.purchase_refs = list,
            FormEvent::AddItem => {
                // The line cap is a transition rule like out-of-range
                // indices: at the limit the event is a no-op.
                if next.items.len() < crate::MAX_INVOICE_ITEMS {
                    next.items.push(SalesItemDraft::default());
                }
            }
            FormEvent::RemoveItem(index) => {
                if index < next.items.len() {
                    next.items.remove(index);
                }
            }
            FormEvent::SetItemRef {
                index,
                item_id,
                hsn_code,
                unit,
            } => {
                if let Some(item) = next.items.get_mut(index) {
                    item.item_id = item_id;
                    item.hsn_code = hsn_code;
                    item.unit = unit;
                }
            }
            FormEvent::SetItemDescription { index, value } => {
                if let Some(item) = next.items.get_mut(index) {
                    item.description = value;
                }
            }
            FormEvent::SetItemQuantity { index, value } => {
                if let Some(item) = next.items.get_mut(index) {
                    item.quantity = value;
                }
            }
            FormEvent::SetItemRate { index, value } => {
                if let Some(item) = next.items.get_mut(index) {
                    item.rate = value;
                }
            }
            FormEvent::SetItemExchangeRate { index, value } => {
                if let Some(item) = next.items.get_mut(index) {
                    item.exchange_rate = value;
                }
            }
            FormEvent::SetItemIgstRate { index, value } => {
                if let Some(item) = next.items.get_mut(index) {
                    item.igst_rate = value;
                }
            }
            FormEvent::SetItemMarks { index, value } => {
                if let Some(item) = next.items.get_mut(index) {
                    item.marks = if value.is_empty() { None } else { Some(value) };
                }
            }
        }
        next
    }

    /// Runs the computation engine on the current raw lines.
    ///
    /// Called after every transition; the error names the exact field and
    /// line, never a partially computed result.
    pub fn compute(&self) -> CoreResult<(Vec<SalesItem>, Totals, String)> {
        compute_draft(&self.items, self.currency)
    }

    /// Checks the form is complete enough to persist.
    ///
    /// Drafts may have zero or partial items; a transaction headed for the
    /// upstream API must have its references, a parseable date and at
    /// least one item.
    pub fn validate_complete(&self) -> ValidationResult<()> {
        required(&self.company_id, "companyId")?;
        required(&self.debit_party_id, "debitPartyId")?;
        required(&self.credit_party_id, "creditPartyId")?;
        parse_date(&self.transaction_date)?;
        if self.items.is_empty() {
            return Err(crate::error::ComputationError::NoItems.into());
        }
        if self.items.len() > crate::MAX_INVOICE_ITEMS {
            return Err(ValidationError::InvalidFormat {
                field: "items".to_string(),
                reason: format!("at most {} lines per invoice", crate::MAX_INVOICE_ITEMS),
            });
        }
        for item in &self.items {
            // HSN is optional on a draft line but must be well-formed when
            // present; persisted invoices carry it onto customs documents.
            if !item.hsn_code.trim().is_empty() {
                validate_hsn_code(&item.hsn_code)?;
            }
        }
        if let Some(name) = self.exporter.name.as_deref().filter(|n| !n.trim().is_empty()) {
            validate_party_name(name)?;
        }
        if let Some(name) = self.consignee.name.as_deref().filter(|n| !n.trim().is_empty()) {
            validate_party_name(name)?;
        }
        Ok(())
    }

    /// Builds a persistable draft transaction from the form.
    ///
    /// Pure: the caller supplies identity and clock. Derived figures come
    /// from the engine; the invoice number stays unassigned (upstream's
    /// job).
    pub fn build_transaction(
        &self,
        id: String,
        now: DateTime<Utc>,
    ) -> ValidationResult<SalesTransaction> {
        self.validate_complete()?;
        let (items, totals, words) = self.compute()?;
        let transaction_date = parse_date(&self.transaction_date)?;

        Ok(SalesTransaction {
            id,
            invoice_number: None,
            transaction_number: None,
            status: TransactionStatus::Draft,
            transaction_date,
            currency: self.currency,
            company_id: self.company_id.clone(),
            debit_party_id: self.debit_party_id.clone(),
            credit_party_id: self.credit_party_id.clone(),
            broker_id: non_empty(&self.broker_id),
            cha_id: non_empty(&self.cha_id),
            exporter: self.exporter.clone(),
            consignee: self.consignee.clone(),
            buyer: self.buyer.clone(),
            export_details: self.export_details.clone(),
            bank_details: self.bank_details.clone(),
            shipping: self.shipping.clone(),
            shipping_bill: self.shipping_bill.clone(),
            schemes: self.schemes,
            epcg_authorizations: self.epcg_authorizations.clone(),
            purchase_refs: self.purchase_refs.clone(),
            items,
            total_amount_minor: totals.total_amount.minor(),
            total_taxable_value_minor: totals.total_taxable_value.minor(),
            total_igst_amount_minor: totals.total_igst_amount.minor(),
            amount_in_words: words,
            remarks: non_empty(&self.remarks),
            custom_field1: non_empty(&self.custom_field1),
            created_at: now,
            updated_at: now,
        })
    }
}

fn required(value: &str, field: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::Required {
            field: field.to_string(),
        })
    } else {
        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_date(value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "transactionDate".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ComputationError, ItemField};

    fn filled_form() -> TransactionForm {
        let form = TransactionForm::new("2025-04-01");
        let form = form.apply(FormEvent::SetCompany("c-1".into()));
        let form = form.apply(FormEvent::SetDebitParty("d-1".into()));
        let form = form.apply(FormEvent::SetCreditParty("cr-1".into()));
        let form = form.apply(FormEvent::SetCurrency(Currency::Usd));
        let form = form.apply(FormEvent::SetItemRef {
            index: 0,
            item_id: "itm-1".into(),
            hsn_code: "620342".into(),
            unit: "PCS".into(),
        });
        let form = form.apply(FormEvent::SetItemQuantity { index: 0, value: 100.0 });
        let form = form.apply(FormEvent::SetItemRate { index: 0, value: 10.0 });
        let form = form.apply(FormEvent::SetItemExchangeRate { index: 0, value: 83.0 });
        form.apply(FormEvent::SetItemIgstRate { index: 0, value: 18.0 })
    }

    #[test]
    fn test_apply_is_pure() {
        let before = TransactionForm::new("2025-04-01");
        let after = before.apply(FormEvent::SetCompany("c-1".into()));

        assert_eq!(before.company_id, "");
        assert_eq!(after.company_id, "c-1");
        assert_eq!(before.items.len(), after.items.len());
    }

    #[test]
    fn test_add_and_remove_items() {
        let form = TransactionForm::new("2025-04-01");
        assert_eq!(form.items.len(), 1);

        let form = form.apply(FormEvent::AddItem);
        assert_eq!(form.items.len(), 2);

        let form = form.apply(FormEvent::RemoveItem(0));
        assert_eq!(form.items.len(), 1);

        // Out-of-range remove is a no-op.
        let form = form.apply(FormEvent::RemoveItem(9));
        assert_eq!(form.items.len(), 1);
    }

    #[test]
    fn test_out_of_range_item_edit_is_a_noop() {
        let form = TransactionForm::new("2025-04-01");
        let next = form.apply(FormEvent::SetItemQuantity { index: 5, value: 1.0 });
        assert_eq!(next.items[0].quantity, 0.0);
    }

    #[test]
    fn test_compute_after_transition_reports_exact_line() {
        let form = filled_form()
            .apply(FormEvent::AddItem)
            .apply(FormEvent::SetItemQuantity { index: 1, value: -2.0 })
            .apply(FormEvent::SetItemExchangeRate { index: 1, value: 83.0 });

        let err = form.compute().unwrap_err();
        assert!(matches!(
            err,
            ComputationError::Negative {
                field: ItemField::Quantity,
                item: 1
            }
        ));
    }

    #[test]
    fn test_build_transaction_from_complete_form() {
        let txn = filled_form()
            .build_transaction("t-1".into(), Utc::now())
            .unwrap();

        assert_eq!(txn.status, TransactionStatus::Draft);
        assert!(txn.invoice_number.is_none());
        assert_eq!(txn.total_amount_minor, 100_000);
        assert_eq!(txn.total_taxable_value_minor, 8_300_000);
        assert_eq!(txn.total_igst_amount_minor, 1_494_000);
        assert_eq!(txn.amount_in_words, "ONE THOUSAND AND 00/100 US DOLLARS");
        assert!(txn.broker_id.is_none());
    }

    #[test]
    fn test_incomplete_form_is_rejected() {
        let form = TransactionForm::new("2025-04-01");
        let err = form.build_transaction("t-1".into(), Utc::now()).unwrap_err();
        assert!(matches!(err, ValidationError::Required { .. }));

        let form = filled_form().apply(FormEvent::RemoveItem(0));
        let err = form.build_transaction("t-1".into(), Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Computation(ComputationError::NoItems)
        ));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let form = filled_form().apply(FormEvent::SetTransactionDate("01/04/2025".into()));
        let err = form.build_transaction("t-1".into(), Utc::now()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_add_item_stops_at_line_cap() {
        let mut form = TransactionForm::new("2025-04-01");
        for _ in 0..crate::MAX_INVOICE_ITEMS + 10 {
            form = form.apply(FormEvent::AddItem);
        }
        assert_eq!(form.items.len(), crate::MAX_INVOICE_ITEMS);

        // Removing a line makes room again.
        let form = form.apply(FormEvent::RemoveItem(0)).apply(FormEvent::AddItem);
        assert_eq!(form.items.len(), crate::MAX_INVOICE_ITEMS);
    }

    #[test]
    fn test_malformed_hsn_code_blocks_completion() {
        let form = filled_form().apply(FormEvent::SetItemRef {
            index: 0,
            item_id: "itm-1".into(),
            hsn_code: "62A3".into(),
            unit: "PCS".into(),
        });
        let err = form.build_transaction("t-1".into(), Utc::now()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));

        // A blank HSN stays allowed on a draft line.
        let form = filled_form().apply(FormEvent::SetItemRef {
            index: 0,
            item_id: "itm-1".into(),
            hsn_code: String::new(),
            unit: "PCS".into(),
        });
        assert!(form.validate_complete().is_ok());
    }

    #[test]
    fn test_overlong_exporter_name_blocks_completion() {
        let mut form = filled_form();
        form = form.apply(FormEvent::SetExporter(ExporterDetails {
            name: Some("A".repeat(201)),
            ..Default::default()
        }));
        let err = form.build_transaction("t-1".into(), Utc::now()).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { .. }));
    }
}
