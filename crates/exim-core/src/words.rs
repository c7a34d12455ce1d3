//! # Amount-In-Words Module
//!
//! Deterministic, locale-invariant English spelling of invoice totals.
//!
//! ## Output Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  amount_in_words(1234.50, USD)                                          │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  "ONE THOUSAND TWO HUNDRED THIRTY FOUR AND 50/100 US DOLLARS"           │
//! │                                                                         │
//! │  amount_in_words(0.00, INR)                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  "ZERO AND 00/100 INDIAN RUPEES"                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - Western short scale: THOUSAND / MILLION / BILLION / TRILLION
//! - Uppercase, space-separated, no hyphens ("THIRTY FOUR")
//! - Fractional part always printed as `NN/100`
//! - Supports up to 999,999,999,999,999 in the major unit
//! - Negative amounts are rejected, never spelled with a sign

use crate::error::{ComputationError, CoreResult};
use crate::money::Money;
use crate::types::Currency;

// =============================================================================
// Spelling Tables
// =============================================================================

const ONES: [&str; 20] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
    "ELEVEN", "TWELVE", "THIRTEEN", "FOURTEEN", "FIFTEEN", "SIXTEEN", "SEVENTEEN", "EIGHTEEN",
    "NINETEEN",
];

const TENS: [&str; 10] = [
    "", "", "TWENTY", "THIRTY", "FORTY", "FIFTY", "SIXTY", "SEVENTY", "EIGHTY", "NINETY",
];

/// Scale word for each group of three digits, least significant first.
const SCALES: [&str; 5] = ["", "THOUSAND", "MILLION", "BILLION", "TRILLION"];

/// Largest spellable major-unit value: 999 trillion and change.
const MAX_SPELLABLE_MAJOR: i64 = 999_999_999_999_999;

// =============================================================================
// Public API
// =============================================================================

/// Spells a monetary amount in uppercase English.
///
/// ## Example
/// ```rust
/// use exim_core::money::Money;
/// use exim_core::types::Currency;
/// use exim_core::words::amount_in_words;
///
/// let spelled = amount_in_words(Money::from_minor(123_450), Currency::Usd).unwrap();
/// assert_eq!(
///     spelled,
///     "ONE THOUSAND TWO HUNDRED THIRTY FOUR AND 50/100 US DOLLARS"
/// );
/// ```
///
/// ## Errors
/// - [`ComputationError::NegativeAmountInWords`] for negative amounts
/// - [`ComputationError::AmountTooLargeForWords`] above 999 trillion
pub fn amount_in_words(amount: Money, currency: Currency) -> CoreResult<String> {
    if amount.is_negative() {
        return Err(ComputationError::NegativeAmountInWords);
    }

    let major = amount.major_part();
    if major > MAX_SPELLABLE_MAJOR {
        return Err(ComputationError::AmountTooLargeForWords);
    }

    Ok(format!(
        "{} AND {:02}/100 {}",
        spell_integer(major),
        amount.minor_part(),
        currency.words()
    ))
}

// =============================================================================
// Spelling Internals
// =============================================================================

/// Spells a non-negative integer up to 999,999,999,999,999.
fn spell_integer(value: i64) -> String {
    if value == 0 {
        return ONES[0].to_string();
    }

    // Split into groups of three digits, least significant first.
    let mut groups: Vec<i64> = Vec::new();
    let mut rest = value;
    while rest > 0 {
        groups.push(rest % 1_000);
        rest /= 1_000;
    }

    // Spell most significant group first, skipping zero groups.
    let mut parts: Vec<String> = Vec::new();
    for (scale_index, group) in groups.iter().enumerate().rev() {
        if *group == 0 {
            continue;
        }
        let mut piece = spell_under_thousand(*group);
        if !SCALES[scale_index].is_empty() {
            piece.push(' ');
            piece.push_str(SCALES[scale_index]);
        }
        parts.push(piece);
    }

    parts.join(" ")
}

/// Spells a value in 1..=999.
fn spell_under_thousand(value: i64) -> String {
    debug_assert!((1..=999).contains(&value));

    let mut words: Vec<&str> = Vec::new();

    let hundreds = value / 100;
    let remainder = value % 100;

    if hundreds > 0 {
        words.push(ONES[hundreds as usize]);
        words.push("HUNDRED");
    }

    if remainder >= 20 {
        words.push(TENS[(remainder / 10) as usize]);
        if remainder % 10 > 0 {
            words.push(ONES[(remainder % 10) as usize]);
        }
    } else if remainder > 0 {
        words.push(ONES[remainder as usize]);
    }

    words.join(" ")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(minor: i64) -> String {
        amount_in_words(Money::from_minor(minor), Currency::Usd).unwrap()
    }

    #[test]
    fn test_zero() {
        assert_eq!(spell(0), "ZERO AND 00/100 US DOLLARS");
    }

    #[test]
    fn test_spec_example() {
        assert_eq!(
            spell(123_450),
            "ONE THOUSAND TWO HUNDRED THIRTY FOUR AND 50/100 US DOLLARS"
        );
    }

    #[test]
    fn test_fraction_only() {
        assert_eq!(spell(7), "ZERO AND 07/100 US DOLLARS");
        assert_eq!(spell(50), "ZERO AND 50/100 US DOLLARS");
    }

    #[test]
    fn test_teens_and_tens() {
        assert_eq!(spell(1_100), "ELEVEN AND 00/100 US DOLLARS");
        assert_eq!(spell(1_500), "FIFTEEN AND 00/100 US DOLLARS");
        assert_eq!(spell(2_000), "TWENTY AND 00/100 US DOLLARS");
        assert_eq!(spell(2_100), "TWENTY ONE AND 00/100 US DOLLARS");
        assert_eq!(spell(9_900), "NINETY NINE AND 00/100 US DOLLARS");
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(spell(10_000), "ONE HUNDRED AND 00/100 US DOLLARS");
        assert_eq!(spell(10_500), "ONE HUNDRED FIVE AND 00/100 US DOLLARS");
        assert_eq!(
            spell(99_999),
            "NINE HUNDRED NINETY NINE AND 99/100 US DOLLARS"
        );
    }

    #[test]
    fn test_zero_groups_are_skipped() {
        // 1,000,001 -> no stray "THOUSAND" for the empty middle group
        assert_eq!(
            spell(100_000_100),
            "ONE MILLION ONE AND 00/100 US DOLLARS"
        );
    }

    #[test]
    fn test_large_scales() {
        // 1,000,000,000,000.00 = one trillion
        assert_eq!(
            spell(100_000_000_000_000),
            "ONE TRILLION AND 00/100 US DOLLARS"
        );
        // 12,345,678,901,234.56
        assert_eq!(
            spell(1_234_567_890_123_456),
            "TWELVE TRILLION THREE HUNDRED FORTY FIVE BILLION SIX HUNDRED \
             SEVENTY EIGHT MILLION NINE HUNDRED ONE THOUSAND TWO HUNDRED \
             THIRTY FOUR AND 56/100 US DOLLARS"
        );
    }

    #[test]
    fn test_home_currency_words() {
        let spelled = amount_in_words(Money::from_minor(16_600_000), Currency::Inr).unwrap();
        assert_eq!(
            spelled,
            "ONE HUNDRED SIXTY SIX THOUSAND AND 00/100 INDIAN RUPEES"
        );
    }

    #[test]
    fn test_negative_is_rejected() {
        let err = amount_in_words(Money::from_minor(-1), Currency::Usd).unwrap_err();
        assert!(matches!(err, ComputationError::NegativeAmountInWords));
    }

    #[test]
    fn test_spelling_is_deterministic() {
        assert_eq!(spell(8_675_309), spell(8_675_309));
    }
}
