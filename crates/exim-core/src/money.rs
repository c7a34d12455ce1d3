//! # Money Module
//!
//! Fixed-point numeric types for invoice computation.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On an export invoice this is fatal: the per-line figures printed on   │
//! │  the document MUST add up to the printed total, to the paisa, on       │
//! │  every rerun.                                                           │
//! │                                                                         │
//! │  OUR SOLUTION: Fixed-Point Integers                                     │
//! │    Money          i64, minor units       2 dp   1050 = 10.50           │
//! │    Quantity       i64, thousandths       3 dp   1500 = 1.500           │
//! │    ExchangeRate   i64, ten-thousandths   4 dp   830000 = 83.0000       │
//! │    TaxRate        u32, basis points      2 dp   1800 = 18.00 %         │
//! │                                                                         │
//! │  Raw f64 crosses the boundary EXACTLY ONCE, with validation.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Policy
//! Every derived value (line amount, taxable value, IGST amount) is rounded
//! half-up to 2 decimal places at the point it is computed. Totals sum the
//! already-rounded per-line integers, so summation order can never change a
//! total.
//!
//! ## Usage
//! ```rust
//! use exim_core::money::{ExchangeRate, Money, Quantity, TaxRate};
//!
//! let qty = Quantity::from_milli(100_000);      // 100.000
//! let rate = Money::from_minor(1_000);          // 10.00
//! let amount = qty.times_rate(rate).unwrap();
//! assert_eq!(amount.minor(), 100_000);          // 1000.00
//!
//! let fx = ExchangeRate::from_e4(830_000);      // 83.0000
//! let taxable = amount.convert(fx).unwrap();
//! assert_eq!(taxable.minor(), 8_300_000);       // 83000.00
//!
//! let igst = taxable.calculate_tax(TaxRate::from_bps(1800)).unwrap();
//! assert_eq!(igst.minor(), 1_494_000);          // 14940.00
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::error::{ComputationError, CoreResult, ItemField};

// =============================================================================
// Rounding Helper
// =============================================================================

/// Divides `n` by `d` rounding half-up, for non-negative `n` and positive `d`.
///
/// All engine inputs are validated non-negative before reaching this point,
/// so half-up and half-away-from-zero coincide.
#[inline]
const fn div_round_half_up(n: i128, d: i128) -> i128 {
    (n + d / 2) / d
}

/// Narrows an i128 intermediate back to i64, or reports overflow.
#[inline]
fn narrow(n: i128, field: ItemField, item: usize) -> CoreResult<i64> {
    if n > i64::MAX as i128 || n < i64::MIN as i128 {
        Err(ComputationError::Overflow { field, item })
    } else {
        Ok(n as i64)
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (paise for INR, cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: room for 92 quadrillion minor units, and subtraction
///   stays closed even though invoice inputs are non-negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS, Default,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units (the smallest currency unit).
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees/dollars) portion.
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Converts this amount into home currency via an exchange rate.
    ///
    /// `taxable_value = amount × exchange_rate`, rounded half-up to 2 dp.
    ///
    /// ## Example
    /// ```rust
    /// use exim_core::money::{ExchangeRate, Money};
    ///
    /// let amount = Money::from_minor(100_000);       // 1000.00 USD
    /// let fx = ExchangeRate::from_e4(830_000);       // 83.0000 INR/USD
    /// assert_eq!(amount.convert(fx).unwrap().minor(), 8_300_000); // 83000.00 INR
    /// ```
    pub fn convert(&self, rate: ExchangeRate) -> CoreResult<Money> {
        // amount(2dp) × rate(4dp) = 6dp intermediate, scale back by 10^4
        let product = self.0 as i128 * rate.e4() as i128;
        let minor = div_round_half_up(product, 10_000);
        narrow(minor, ItemField::TaxableValue, 0).map(Money::from_minor)
    }

    /// Calculates tax at a percentage rate, rounding half-up.
    ///
    /// `igst_amount = taxable_value × rate / 100`, with the rate held in
    /// basis points: `minor × bps / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use exim_core::money::{Money, TaxRate};
    ///
    /// let taxable = Money::from_minor(8_300_000);    // 83000.00
    /// let rate = TaxRate::from_bps(1800);            // 18 %
    /// assert_eq!(taxable.calculate_tax(rate).unwrap().minor(), 1_494_000);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> CoreResult<Money> {
        let product = self.0 as i128 * rate.bps() as i128;
        let minor = div_round_half_up(product, 10_000);
        narrow(minor, ItemField::IgstAmount, 0).map(Money::from_minor)
    }

    /// Checked addition for summing line values into totals.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }
}

/// Display implementation shows money with two decimals and no symbol.
///
/// ## Note
/// Currency symbols and digit grouping are the document renderer's job;
/// this is for logs and debugging.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major_part().abs(), self.minor_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Quantity Type
// =============================================================================

/// A goods quantity in thousandths (3 decimal places).
///
/// ## Why 3 dp?
/// Export line items are quoted in PCS and CTN but also KGS and MTR, where
/// fractional quantities like 12.575 are routine. Three decimals cover the
/// shipping documents this system mirrors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS, Default,
)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from thousandths.
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    /// Returns the quantity in thousandths.
    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    /// Checks if the quantity is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Computes a line amount: `amount = quantity × rate`.
    ///
    /// Guaranteed non-negative when both inputs are non-negative; the 2 dp
    /// result is rounded half-up from the 5 dp intermediate.
    ///
    /// ## Example
    /// ```rust
    /// use exim_core::money::{Money, Quantity};
    ///
    /// let qty = Quantity::from_milli(50_000);   // 50.000
    /// let rate = Money::from_minor(2_000);      // 20.00
    /// assert_eq!(qty.times_rate(rate).unwrap().minor(), 100_000); // 1000.00
    /// ```
    pub fn times_rate(&self, rate: Money) -> CoreResult<Money> {
        // qty(3dp) × rate(2dp) = 5dp intermediate, scale back by 10^3
        let product = self.0 as i128 * rate.minor() as i128;
        let minor = div_round_half_up(product, 1_000);
        narrow(minor, ItemField::Amount, 0).map(Money::from_minor)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}", self.0 / 1_000, (self.0 % 1_000).abs())
    }
}

// =============================================================================
// Exchange Rate Type
// =============================================================================

/// A currency conversion rate in ten-thousandths (4 decimal places).
///
/// ## Why 4 dp?
/// Reference exchange rates (RBI, customs notified rates) are published to
/// four decimals, e.g. 83.2475 INR per USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExchangeRate(i64);

impl ExchangeRate {
    /// Creates an exchange rate from ten-thousandths.
    ///
    /// Construction does not validate positivity; the computation boundary
    /// does, with the item index in hand for the error.
    #[inline]
    pub const fn from_e4(e4: i64) -> Self {
        ExchangeRate(e4)
    }

    /// Returns the rate in ten-thousandths.
    #[inline]
    pub const fn e4(&self) -> i64 {
        self.0
    }

    /// Identity rate (1.0000) for same-currency transactions.
    #[inline]
    pub const fn unity() -> Self {
        ExchangeRate(10_000)
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:04}", self.0 / 10_000, (self.0 % 10_000).abs())
    }
}

// =============================================================================
// Tax Rate Type
// =============================================================================

/// A tax rate in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01 % = 1/10000. IGST 18 % = 1800 bps. Valid invoice
/// rates span 0..=10000 bps (0-100 %); the boundary enforces the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(1099);
        assert_eq!(money.minor(), 1099);
        assert_eq!(money.major_part(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_minor(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_minor(500)), "5.00");
        assert_eq!(format!("{}", Money::from_minor(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_minor(0)), "0.00");
        assert_eq!(format!("{}", Quantity::from_milli(12_575)), "12.575");
        assert_eq!(format!("{}", ExchangeRate::from_e4(832_475)), "83.2475");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!(a.checked_add(b), Some(Money::from_minor(1500)));
        assert_eq!(Money::from_minor(i64::MAX).checked_add(b), None);
    }

    #[test]
    fn test_line_amount_whole_units() {
        // 100 × 10.00 = 1000.00
        let amount = Quantity::from_milli(100_000)
            .times_rate(Money::from_minor(1_000))
            .unwrap();
        assert_eq!(amount.minor(), 100_000);
    }

    #[test]
    fn test_line_amount_rounds_half_up() {
        // 1.025 × 0.10 = 0.1025 → 0.10 (below half stays down)
        let amount = Quantity::from_milli(1_025)
            .times_rate(Money::from_minor(10))
            .unwrap();
        assert_eq!(amount.minor(), 10);

        // 0.500 × 0.01 = 0.005 → 0.01 (exact half goes up)
        let amount = Quantity::from_milli(500)
            .times_rate(Money::from_minor(1))
            .unwrap();
        assert_eq!(amount.minor(), 1);
    }

    #[test]
    fn test_convert_at_reference_rate() {
        // 1000.00 at 83.0000 = 83000.00
        let taxable = Money::from_minor(100_000)
            .convert(ExchangeRate::from_e4(830_000))
            .unwrap();
        assert_eq!(taxable.minor(), 8_300_000);

        // 1.00 at 83.2475 = 83.2475 → 83.25 (half-up on the third decimal)
        let taxable = Money::from_minor(100)
            .convert(ExchangeRate::from_e4(832_475))
            .unwrap();
        assert_eq!(taxable.minor(), 8_325);
    }

    #[test]
    fn test_tax_calculation() {
        // 83000.00 at 18 % = 14940.00
        let igst = Money::from_minor(8_300_000)
            .calculate_tax(TaxRate::from_bps(1800))
            .unwrap();
        assert_eq!(igst.minor(), 1_494_000);

        // 10.00 at 8.25 % = 0.825 → 0.83
        let tax = Money::from_minor(1_000)
            .calculate_tax(TaxRate::from_bps(825))
            .unwrap();
        assert_eq!(tax.minor(), 83);
    }

    #[test]
    fn test_zero_tax_rate() {
        let tax = Money::from_minor(123_456)
            .calculate_tax(TaxRate::zero())
            .unwrap();
        assert!(tax.is_zero());
    }

    #[test]
    fn test_unity_exchange_rate_is_identity() {
        let amount = Money::from_minor(98_765);
        assert_eq!(amount.convert(ExchangeRate::unity()).unwrap(), amount);
    }

    #[test]
    fn test_overflow_is_an_error_not_a_wrap() {
        let huge = Quantity::from_milli(i64::MAX);
        let err = huge.times_rate(Money::from_minor(i64::MAX)).unwrap_err();
        assert!(matches!(err, ComputationError::Overflow { .. }));
    }

    /// Recomputation is idempotent: deriving the same figures twice from the
    /// same inputs yields identical results.
    #[test]
    fn test_recomputation_is_idempotent() {
        let qty = Quantity::from_milli(12_575);
        let rate = Money::from_minor(999);
        let first = qty.times_rate(rate).unwrap();
        let second = qty.times_rate(rate).unwrap();
        assert_eq!(first, second);
    }
}
