//! # Invoice Computation Engine
//!
//! Derives every monetary and textual figure of a sales transaction from
//! its raw inputs. Pure functions of their inputs — no I/O, no hidden
//! state, no partial success.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Computation Pipeline                                │
//! │                                                                         │
//! │  SalesItemDraft (raw f64 from form / upstream JSON)                    │
//! │        │                                                                │
//! │        ▼  validate: finite, sign, range — NEVER clamp                  │
//! │  fixed-point inputs (Quantity, Money, ExchangeRate, TaxRate)           │
//! │        │                                                                │
//! │        ▼  amount = quantity × rate                                     │
//! │        ▼  taxable_value = amount × exchange_rate                       │
//! │        ▼  igst_amount = taxable_value × igst_rate / 100                │
//! │  SalesItem (derived figures rounded half-up to 2 dp, per line)         │
//! │        │                                                                │
//! │        ▼  integer sums of rounded lines (order-independent)            │
//! │  Totals { total_amount, total_taxable_value, total_igst_amount }       │
//! │        │                                                                │
//! │        ▼  amount_in_words(total_amount, currency)                      │
//! │  SalesTransaction with every derived field filled in                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## All-Or-Nothing
//! A single invalid line fails the whole computation with the field and
//! item index in the error, so the form can highlight the exact input.
//! Recomputation is idempotent: same inputs, same figures, every time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ComputationError, CoreResult, ItemField};
use crate::money::{ExchangeRate, Money, Quantity, TaxRate};
use crate::types::{Currency, SalesItem, SalesItemDraft, SalesTransaction};
use crate::words::amount_in_words;

// =============================================================================
// Boundary Conversion (f64 → fixed point)
// =============================================================================

/// Converts a raw f64 into a fixed-point integer at the given scale.
///
/// This is the ONLY place raw floating-point input is accepted. Validation
/// rejects rather than clamps: NaN, infinities and negatives are data-entry
/// errors the user has to fix.
fn fixed_from_f64(value: f64, scale: f64, field: ItemField, item: usize) -> CoreResult<i64> {
    if !value.is_finite() {
        return Err(ComputationError::NotFinite { field, item });
    }
    if value < 0.0 {
        return Err(ComputationError::Negative { field, item });
    }

    let scaled = (value * scale).round();
    if scaled >= i64::MAX as f64 {
        return Err(ComputationError::OutOfRange { field, item });
    }

    Ok(scaled as i64)
}

/// Validates and converts a raw IGST percentage into basis points.
fn igst_bps_from_pct(value: f64, item: usize) -> CoreResult<TaxRate> {
    if !value.is_finite() {
        return Err(ComputationError::NotFinite {
            field: ItemField::IgstRate,
            item,
        });
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(ComputationError::IgstRateOutOfRange { item });
    }
    Ok(TaxRate::from_bps((value * 100.0).round() as u32))
}

/// Validates and converts a raw exchange rate (must be strictly positive).
fn exchange_rate_from_f64(value: f64, item: usize) -> CoreResult<ExchangeRate> {
    if !value.is_finite() {
        return Err(ComputationError::NotFinite {
            field: ItemField::ExchangeRate,
            item,
        });
    }
    if value <= 0.0 {
        return Err(ComputationError::ExchangeRateNotPositive { item });
    }
    let e4 = fixed_from_f64(value, 10_000.0, ItemField::ExchangeRate, item)?;
    // A tiny positive rate can round to zero at 4 dp; that is still unusable.
    if e4 == 0 {
        return Err(ComputationError::ExchangeRateNotPositive { item });
    }
    Ok(ExchangeRate::from_e4(e4))
}

// =============================================================================
// Line Operations
// =============================================================================

/// Computes a line amount: `amount = quantity × rate`.
///
/// Inputs must be non-negative; the result is non-negative and rounded
/// half-up to 2 decimal places.
pub fn compute_line_amount(quantity: Quantity, rate: Money) -> CoreResult<Money> {
    if quantity.milli() < 0 {
        return Err(ComputationError::Negative {
            field: ItemField::Quantity,
            item: 0,
        });
    }
    if rate.is_negative() {
        return Err(ComputationError::Negative {
            field: ItemField::Rate,
            item: 0,
        });
    }
    quantity.times_rate(rate)
}

/// Computes the home-currency figures for a line:
/// `taxable_value = amount × exchange_rate`;
/// `igst_amount = taxable_value × igst_rate / 100`.
pub fn compute_line_tax(
    amount: Money,
    exchange_rate: ExchangeRate,
    igst_rate: TaxRate,
) -> CoreResult<(Money, Money)> {
    if exchange_rate.e4() <= 0 {
        return Err(ComputationError::ExchangeRateNotPositive { item: 0 });
    }
    if igst_rate.bps() > 10_000 {
        return Err(ComputationError::IgstRateOutOfRange { item: 0 });
    }
    let taxable_value = amount.convert(exchange_rate)?;
    let igst_amount = taxable_value.calculate_tax(igst_rate)?;
    Ok((taxable_value, igst_amount))
}

/// Validates one raw line and computes its derived figures.
///
/// `index` is the zero-based position in the transaction, carried into any
/// error so the UI can highlight the offending line.
pub fn compute_item(index: usize, draft: &SalesItemDraft) -> CoreResult<SalesItem> {
    let quantity = Quantity::from_milli(fixed_from_f64(
        draft.quantity,
        1_000.0,
        ItemField::Quantity,
        index,
    )?);
    let rate = Money::from_minor(fixed_from_f64(
        draft.rate,
        100.0,
        ItemField::Rate,
        index,
    )?);
    let exchange_rate = exchange_rate_from_f64(draft.exchange_rate, index)?;
    let igst_rate = igst_bps_from_pct(draft.igst_rate, index)?;

    let amount = compute_line_amount(quantity, rate).map_err(|e| e.at_item(index))?;
    let (taxable_value, igst_amount) =
        compute_line_tax(amount, exchange_rate, igst_rate).map_err(|e| e.at_item(index))?;

    Ok(SalesItem {
        item_id: draft.item_id.clone(),
        hsn_code: draft.hsn_code.clone(),
        description: draft.description.clone(),
        quantity_milli: quantity.milli(),
        unit: draft.unit.clone(),
        rate_minor: rate.minor(),
        exchange_rate_e4: exchange_rate.e4(),
        igst_bps: igst_rate.bps(),
        marks: draft.marks.clone(),
        amount_minor: amount.minor(),
        taxable_value_minor: taxable_value.minor(),
        igst_amount_minor: igst_amount.minor(),
    })
}

/// Computes all lines, failing on the first invalid one.
pub fn compute_items(drafts: &[SalesItemDraft]) -> CoreResult<Vec<SalesItem>> {
    drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| compute_item(index, draft))
        .collect()
}

// =============================================================================
// Totals
// =============================================================================

/// Transaction-level derived aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Default)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of line amounts, transaction currency.
    pub total_amount: Money,
    /// Sum of line taxable values, home currency.
    pub total_taxable_value: Money,
    /// Sum of line IGST amounts, home currency.
    pub total_igst_amount: Money,
}

/// Sums the already-rounded per-line values.
///
/// Because every line figure is an integer in minor units, the result is
/// identical for any permutation of `items`.
pub fn compute_totals(items: &[SalesItem]) -> CoreResult<Totals> {
    let mut totals = Totals::default();
    for (index, item) in items.iter().enumerate() {
        totals.total_amount = totals
            .total_amount
            .checked_add(item.amount())
            .ok_or(ComputationError::Overflow {
                field: ItemField::Amount,
                item: index,
            })?;
        totals.total_taxable_value = totals
            .total_taxable_value
            .checked_add(item.taxable_value())
            .ok_or(ComputationError::Overflow {
                field: ItemField::TaxableValue,
                item: index,
            })?;
        totals.total_igst_amount = totals
            .total_igst_amount
            .checked_add(item.igst_amount())
            .ok_or(ComputationError::Overflow {
                field: ItemField::IgstAmount,
                item: index,
            })?;
    }
    Ok(totals)
}

// =============================================================================
// Whole-Transaction Recompute
// =============================================================================

/// Recomputes every derived figure on a transaction in place.
///
/// All line figures are re-derived from the stored fixed-point inputs, the
/// totals from the lines, and the amount-in-words from the total. This is
/// the single write path for derived fields: deserialized values are
/// overwritten, never trusted.
///
/// ## Idempotence
/// Calling this twice on the same transaction leaves it bit-identical to
/// calling it once.
pub fn compute_transaction(txn: &mut SalesTransaction) -> CoreResult<()> {
    for (index, item) in txn.items.iter_mut().enumerate() {
        let amount =
            compute_line_amount(item.quantity(), item.rate()).map_err(|e| e.at_item(index))?;
        let (taxable_value, igst_amount) =
            compute_line_tax(amount, item.exchange_rate(), item.igst_rate())
                .map_err(|e| e.at_item(index))?;

        item.amount_minor = amount.minor();
        item.taxable_value_minor = taxable_value.minor();
        item.igst_amount_minor = igst_amount.minor();
    }

    let totals = compute_totals(&txn.items)?;
    txn.total_amount_minor = totals.total_amount.minor();
    txn.total_taxable_value_minor = totals.total_taxable_value.minor();
    txn.total_igst_amount_minor = totals.total_igst_amount.minor();
    txn.amount_in_words = amount_in_words(totals.total_amount, txn.currency)?;

    Ok(())
}

/// Computes totals and words for a draft's raw lines in one pass.
///
/// Convenience for the form layer: applied after every transition.
pub fn compute_draft(
    drafts: &[SalesItemDraft],
    currency: Currency,
) -> CoreResult<(Vec<SalesItem>, Totals, String)> {
    let items = compute_items(drafts)?;
    let totals = compute_totals(&items)?;
    let words = amount_in_words(totals.total_amount, currency)?;
    Ok((items, totals, words))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(quantity: f64, rate: f64, exchange_rate: f64, igst_rate: f64) -> SalesItemDraft {
        SalesItemDraft {
            item_id: "itm-1".into(),
            hsn_code: "620342".into(),
            description: "Cotton trousers".into(),
            quantity,
            unit: "PCS".into(),
            rate,
            exchange_rate,
            igst_rate,
            marks: None,
        }
    }

    /// The end-to-end scenario from the acceptance checklist: two lines at
    /// fx 83 and IGST 18 %.
    #[test]
    fn test_reference_transaction() {
        let drafts = vec![draft(100.0, 10.0, 83.0, 18.0), draft(50.0, 20.0, 83.0, 18.0)];
        let (items, totals, words) = compute_draft(&drafts, Currency::Usd).unwrap();

        assert_eq!(items[0].amount().minor(), 100_000); // 1000.00
        assert_eq!(items[1].amount().minor(), 100_000); // 1000.00
        assert_eq!(items[0].taxable_value().minor(), 8_300_000); // 83000.00
        assert_eq!(items[1].taxable_value().minor(), 8_300_000);
        assert_eq!(items[0].igst_amount().minor(), 1_494_000); // 14940.00
        assert_eq!(items[1].igst_amount().minor(), 1_494_000);

        assert_eq!(totals.total_amount.minor(), 200_000); // 2000.00
        assert_eq!(totals.total_taxable_value.minor(), 16_600_000); // 166000.00
        assert_eq!(totals.total_igst_amount.minor(), 2_988_000); // 29880.00

        assert_eq!(words, "TWO THOUSAND AND 00/100 US DOLLARS");
    }

    #[test]
    fn test_totals_are_order_independent() {
        let drafts = vec![
            draft(3.0, 3.33, 82.1234, 5.0),
            draft(7.5, 19.99, 83.0001, 18.0),
            draft(0.001, 0.01, 1.0, 0.0),
        ];
        let items = compute_items(&drafts).unwrap();

        let forward = compute_totals(&items).unwrap();
        let mut reversed = items.clone();
        reversed.reverse();
        let backward = compute_totals(&reversed).unwrap();

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_totals_equal_sum_of_rounded_lines() {
        let drafts = vec![draft(1.5, 0.03, 83.3333, 18.0), draft(2.5, 0.07, 83.3333, 18.0)];
        let items = compute_items(&drafts).unwrap();
        let totals = compute_totals(&items).unwrap();

        let line_sum: i64 = items.iter().map(|i| i.amount_minor).sum();
        assert_eq!(totals.total_amount.minor(), line_sum);

        let taxable_sum: i64 = items.iter().map(|i| i.taxable_value_minor).sum();
        assert_eq!(totals.total_taxable_value.minor(), taxable_sum);
    }

    #[test]
    fn test_negative_quantity_is_rejected_not_clamped() {
        let err = compute_item(3, &draft(-1.0, 10.0, 83.0, 18.0)).unwrap_err();
        assert!(matches!(
            err,
            ComputationError::Negative {
                field: ItemField::Quantity,
                item: 3
            }
        ));
    }

    #[test]
    fn test_nan_and_infinity_are_rejected() {
        let err = compute_item(0, &draft(f64::NAN, 10.0, 83.0, 18.0)).unwrap_err();
        assert!(matches!(
            err,
            ComputationError::NotFinite {
                field: ItemField::Quantity,
                ..
            }
        ));

        let err = compute_item(0, &draft(1.0, f64::INFINITY, 83.0, 18.0)).unwrap_err();
        assert!(matches!(
            err,
            ComputationError::NotFinite {
                field: ItemField::Rate,
                ..
            }
        ));
    }

    #[test]
    fn test_exchange_rate_must_be_positive() {
        let err = compute_item(1, &draft(1.0, 10.0, 0.0, 18.0)).unwrap_err();
        assert!(matches!(
            err,
            ComputationError::ExchangeRateNotPositive { item: 1 }
        ));

        let err = compute_item(1, &draft(1.0, 10.0, -83.0, 18.0)).unwrap_err();
        assert!(matches!(
            err,
            ComputationError::ExchangeRateNotPositive { item: 1 }
        ));
    }

    #[test]
    fn test_igst_rate_bounds() {
        assert!(compute_item(0, &draft(1.0, 10.0, 83.0, 0.0)).is_ok());
        assert!(compute_item(0, &draft(1.0, 10.0, 83.0, 100.0)).is_ok());

        let err = compute_item(0, &draft(1.0, 10.0, 83.0, 100.01)).unwrap_err();
        assert!(matches!(
            err,
            ComputationError::IgstRateOutOfRange { item: 0 }
        ));

        let err = compute_item(0, &draft(1.0, 10.0, 83.0, -0.01)).unwrap_err();
        assert!(matches!(
            err,
            ComputationError::IgstRateOutOfRange { item: 0 }
        ));
    }

    #[test]
    fn test_single_invalid_line_fails_the_whole_computation() {
        let drafts = vec![
            draft(1.0, 10.0, 83.0, 18.0),
            draft(2.0, f64::NAN, 83.0, 18.0),
            draft(3.0, 10.0, 83.0, 18.0),
        ];
        let err = compute_items(&drafts).unwrap_err();
        assert_eq!(err.item_index(), Some(1));
    }

    #[test]
    fn test_fractional_quantity_and_rate() {
        // 12.575 KGS × 4.20 = 52.815 → 52.82 (half-up)
        let item = compute_item(0, &draft(12.575, 4.2, 1.0, 0.0)).unwrap();
        assert_eq!(item.amount().minor(), 5_282);
        assert_eq!(item.taxable_value().minor(), 5_282);
        assert!(item.igst_amount().is_zero());
    }

    #[test]
    fn test_recompute_transaction_is_idempotent() {
        let drafts = vec![draft(100.0, 10.0, 83.0, 18.0)];
        let (items, totals, words) = compute_draft(&drafts, Currency::Usd).unwrap();

        let mut txn = SalesTransaction {
            id: "t-1".into(),
            invoice_number: None,
            transaction_number: None,
            status: Default::default(),
            transaction_date: chrono::NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            currency: Currency::Usd,
            company_id: "c-1".into(),
            debit_party_id: "d-1".into(),
            credit_party_id: "cr-1".into(),
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
            items,
            total_amount_minor: totals.total_amount.minor(),
            total_taxable_value_minor: totals.total_taxable_value.minor(),
            total_igst_amount_minor: totals.total_igst_amount.minor(),
            amount_in_words: words,
            remarks: None,
            custom_field1: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        // Poison the derived fields; recompute must restore them.
        txn.total_amount_minor = -1;
        txn.items[0].amount_minor = 42;

        compute_transaction(&mut txn).unwrap();
        let first = txn.clone();
        compute_transaction(&mut txn).unwrap();

        assert_eq!(txn.total_amount_minor, 100_000);
        assert_eq!(txn.items[0].amount_minor, 100_000);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&txn).unwrap()
        );
    }

    #[test]
    fn test_zero_items_yield_zero_totals() {
        let (items, totals, words) = compute_draft(&[], Currency::Inr).unwrap();
        assert!(items.is_empty());
        assert!(totals.total_amount.is_zero());
        assert_eq!(words, "ZERO AND 00/100 INDIAN RUPEES");
    }
}
