//! # exim-render: Invoice Document Renderer
//!
//! Turns one computed [`SalesTransaction`](exim_core::types::SalesTransaction)
//! into a paginated, fixed-layout export invoice PDF.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SalesTransaction + ResolvedParties                                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  template  ──► Document (typed block tree, no markup strings)           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  layout    ──► continuous canvas ──► pages (ceil(H / B))                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  pdf       ──► RenderedInvoice { file_name, bytes, page_count }         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - **Deterministic**: the same transaction always yields identical geometry
//! - **All-or-nothing**: a failed render returns [`RenderError`], never a
//!   partial document
//! - **Pure until the backend**: template and layout do no I/O and are unit
//!   tested without printpdf

pub mod doc;
pub mod error;
pub mod layout;
pub mod pdf;
pub mod template;

pub use error::{RenderError, RenderResult};
pub use pdf::{artifact_file_name, render_invoice, RenderedInvoice};
pub use template::ResolvedParties;
