//! # exim-client: Upstream REST API Client
//!
//! Typed async client for the Exim Desk upstream API.
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  exim-client                                                            │
//! │                                                                         │
//! │  envelope      { success, data, message?, pagination? } on every call   │
//! │  client        base URL + bearer token + verbs (GET/POST/PUT/DELETE)    │
//! │  masters       /company /debit-party /credit-party /item /broker /cha   │
//! │                raw spellings (_id, companyName, partyName, ...) are     │
//! │                normalized HERE, exactly once                            │
//! │  transactions  /sales-transactions CRUD                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Derived invoice figures fetched from the server are never trusted: run
//! [`exim_core::compute::compute_transaction`] on every fetched record.

pub mod client;
pub mod envelope;
pub mod error;
pub mod masters;
pub mod transactions;

pub use client::{ApiClient, ListParams};
pub use envelope::{ApiEnvelope, PageOf, Pagination};
pub use error::{ClientError, ClientResult};
pub use masters::{fetch_masters, MasterBundle};
