//! # Error Types
//!
//! Domain-specific error types for exim-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  exim-core errors (this file)                                          │
//! │  ├── ComputationError - Invalid numeric input to the engine            │
//! │  └── ValidationError  - Field-level input validation failures          │
//! │                                                                         │
//! │  exim-render errors (separate crate)                                   │
//! │  └── RenderError      - Layout / PDF emission failures                 │
//! │                                                                         │
//! │  exim-client errors (separate crate)                                   │
//! │  └── ClientError      - Upstream REST API failures                     │
//! │                                                                         │
//! │  Desk app errors (in app)                                              │
//! │  └── AppError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → ComputationError → AppError → Operator        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, item index)
//! 3. Errors are enum variants, never String
//! 4. A ComputationError is non-retryable: the user must fix the input

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Field Identifier
// =============================================================================

/// Identifies which numeric input of a sales item is invalid.
///
/// ## Why an enum?
/// The form highlights the exact offending input. A stringly-typed field
/// name would let the UI and the engine drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Quantity,
    Rate,
    ExchangeRate,
    IgstRate,
    Amount,
    TaxableValue,
    IgstAmount,
}

impl ItemField {
    /// The label shown in error messages (matches the form's field labels).
    pub fn label(&self) -> &'static str {
        match self {
            ItemField::Quantity => "quantity",
            ItemField::Rate => "rate",
            ItemField::ExchangeRate => "exchange rate",
            ItemField::IgstRate => "IGST rate",
            ItemField::Amount => "amount",
            ItemField::TaxableValue => "taxable value",
            ItemField::IgstAmount => "IGST amount",
        }
    }
}

impl std::fmt::Display for ItemField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Computation Error
// =============================================================================

/// Invalid numeric input to the invoice computation engine.
///
/// Every variant that concerns a line item carries the zero-based item
/// index so the UI can highlight the exact line. Computation is
/// all-or-nothing: the first invalid line fails the whole transaction.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ComputationError {
    /// Input is NaN or infinite.
    ///
    /// ## When This Occurs
    /// - The form field was parsed from garbage input
    /// - Upstream JSON carried `null`-ish sentinel values
    #[error("item {item}: {field} is not a finite number")]
    NotFinite { field: ItemField, item: usize },

    /// Input is negative where only zero or positive values are allowed.
    ///
    /// Never silently clamped: a negative quantity on an export invoice is
    /// a data-entry mistake, not a refund.
    #[error("item {item}: {field} must not be negative")]
    Negative { field: ItemField, item: usize },

    /// Exchange rate must be strictly positive (home-currency conversion).
    #[error("item {item}: exchange rate must be greater than zero")]
    ExchangeRateNotPositive { item: usize },

    /// IGST rate is outside the valid percentage range.
    #[error("item {item}: IGST rate must be between 0 and 100")]
    IgstRateOutOfRange { item: usize },

    /// Input magnitude exceeds what the fixed-point representation holds.
    #[error("item {item}: {field} is too large to represent")]
    OutOfRange { field: ItemField, item: usize },

    /// An intermediate product or sum overflowed.
    ///
    /// With i128 intermediates this needs astronomically large inputs, but
    /// the engine still refuses to emit a wrapped figure.
    #[error("item {item}: {field} overflows during computation")]
    Overflow { field: ItemField, item: usize },

    /// A negative amount cannot be spelled in words.
    #[error("amount in words: amount must not be negative")]
    NegativeAmountInWords,

    /// Amount exceeds the spelling table (over 999 trillion).
    #[error("amount in words: amount is too large to spell")]
    AmountTooLargeForWords,

    /// A transaction must have at least one item to be completed.
    #[error("transaction must contain at least one item")]
    NoItems,
}

impl ComputationError {
    /// Rewrites the item index on a line-scoped error.
    ///
    /// The fixed-point ops on `Money`/`Quantity` have no item context, so
    /// the engine re-anchors their errors to the line being computed.
    pub fn at_item(self, index: usize) -> Self {
        match self {
            ComputationError::NotFinite { field, .. } => {
                ComputationError::NotFinite { field, item: index }
            }
            ComputationError::Negative { field, .. } => {
                ComputationError::Negative { field, item: index }
            }
            ComputationError::ExchangeRateNotPositive { .. } => {
                ComputationError::ExchangeRateNotPositive { item: index }
            }
            ComputationError::IgstRateOutOfRange { .. } => {
                ComputationError::IgstRateOutOfRange { item: index }
            }
            ComputationError::OutOfRange { field, .. } => {
                ComputationError::OutOfRange { field, item: index }
            }
            ComputationError::Overflow { field, .. } => {
                ComputationError::Overflow { field, item: index }
            }
            other => other,
        }
    }

    /// The zero-based index of the offending item, when the error is
    /// line-scoped.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            ComputationError::NotFinite { item, .. }
            | ComputationError::Negative { item, .. }
            | ComputationError::ExchangeRateNotPositive { item }
            | ComputationError::IgstRateOutOfRange { item }
            | ComputationError::OutOfRange { item, .. }
            | ComputationError::Overflow { item, .. } => Some(*item),
            _ => None,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for non-numeric fields.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation before business logic runs.
#[derive(Debug, Clone, Error, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. HSN code with letters, malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Wraps a computation error discovered during completeness checks.
    #[error("computation failed: {0}")]
    Computation(#[from] ComputationError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with ComputationError.
pub type CoreResult<T> = Result<T, ComputationError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ComputationError::Negative {
            field: ItemField::Quantity,
            item: 2,
        };
        assert_eq!(err.to_string(), "item 2: quantity must not be negative");

        let err = ComputationError::IgstRateOutOfRange { item: 0 };
        assert_eq!(
            err.to_string(),
            "item 0: IGST rate must be between 0 and 100"
        );
    }

    #[test]
    fn test_item_index_extraction() {
        let err = ComputationError::NotFinite {
            field: ItemField::Rate,
            item: 7,
        };
        assert_eq!(err.item_index(), Some(7));

        assert_eq!(ComputationError::NoItems.item_index(), None);
        assert_eq!(
            ComputationError::NegativeAmountInWords.item_index(),
            None
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "companyId".to_string(),
        };
        assert_eq!(err.to_string(), "companyId is required");
    }

    #[test]
    fn test_computation_converts_to_validation_error() {
        let comp = ComputationError::NoItems;
        let val: ValidationError = comp.into();
        assert!(matches!(val, ValidationError::Computation(_)));
    }
}
