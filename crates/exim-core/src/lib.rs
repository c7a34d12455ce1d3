//! # exim-core: Pure Business Logic for Exim Desk
//!
//! This crate is the **heart** of Exim Desk. It contains all invoice
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Exim Desk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Frontend (TypeScript SPA)                       │   │
//! │  │    Masters UI ──► Sales Form ──► Totals ──► Invoice PDF        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ exim-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  compute  │  │   words   │  │   │
//! │  │   │Transaction│  │   Money   │  │  engine   │  │ spelling  │  │   │
//! │  │   │ SalesItem │  │  TaxRate  │  │  totals   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │   form    │  │validation │                                 │   │
//! │  │   │ reducer   │  │   rules   │                                 │   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO FILESYSTEM • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │        ┌───────────────────────┴──────────────────────┐               │
//! │        ▼                                              ▼               │
//! │  ┌───────────────┐                           ┌────────────────┐       │
//! │  │  exim-render  │                           │  exim-client   │       │
//! │  │  PDF invoice  │                           │  upstream REST │       │
//! │  └───────────────┘                           └────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (SalesTransaction, SalesItem, masters, ...)
//! - [`money`] - Fixed-point numeric types (no floating point downstream!)
//! - [`compute`] - The invoice computation engine
//! - [`words`] - Amount-in-words spelling
//! - [`form`] - Pure reducer-style form transitions
//! - [`error`] - Domain error types
//! - [`validation`] - Field format rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic - same input = same output
//! 2. **No I/O**: network, file system and clock access are FORBIDDEN here
//! 3. **Fixed-Point Numbers**: raw f64 is validated and converted exactly once
//! 4. **Explicit Errors**: all errors are typed, field-identified and item-indexed
//!
//! ## Example Usage
//!
//! ```rust
//! use exim_core::compute::{compute_items, compute_totals};
//! use exim_core::types::SalesItemDraft;
//!
//! let drafts = vec![SalesItemDraft {
//!     item_id: "itm-1".into(),
//!     quantity: 100.0,
//!     rate: 10.0,
//!     exchange_rate: 83.0,
//!     igst_rate: 18.0,
//!     ..Default::default()
//! }];
//!
//! let items = compute_items(&drafts).unwrap();
//! let totals = compute_totals(&items).unwrap();
//!
//! // 100 × 10.00 = 1000.00; at fx 83 that is 83000.00 taxable
//! assert_eq!(totals.total_amount.minor(), 100_000);
//! assert_eq!(totals.total_taxable_value.minor(), 8_300_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod compute;
pub mod error;
pub mod form;
pub mod money;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use exim_core::Money` instead of
// `use exim_core::money::Money`

pub use compute::{compute_transaction, Totals};
pub use error::{ComputationError, CoreResult, ItemField, ValidationError};
pub use form::{FormEvent, TransactionForm};
pub use money::{ExchangeRate, Money, Quantity, TaxRate};
pub use types::*;
pub use words::amount_in_words;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed on a single invoice.
///
/// ## Business Reason
/// Keeps documents reviewable and rules out runaway forms. Configurable
/// per tenant in future versions.
pub const MAX_INVOICE_ITEMS: usize = 100;

/// The home currency every taxable value and IGST amount is stated in.
pub const HOME_CURRENCY: Currency = Currency::Inr;
