//! Command handlers, one module per surface.

pub mod invoice;
pub mod masters;
pub mod transaction;
