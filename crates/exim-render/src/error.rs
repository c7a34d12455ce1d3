//! # Render Error Types
//!
//! Rendering is all-or-nothing: callers receive either a complete PDF byte
//! buffer or a [`RenderError`]. No partial documents ever leave this crate.

use thiserror::Error;

/// Errors that can occur while producing an invoice PDF.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The PDF backend rejected the document while assembling pages.
    #[error("failed to assemble PDF document: {0}")]
    Pdf(String),

    /// The finished document could not be serialized into bytes.
    #[error("failed to encode PDF bytes: {0}")]
    Encode(String),
}

/// Result alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RenderError::Pdf("bad page".to_string());
        assert!(err.to_string().contains("assemble"));

        let err = RenderError::Encode("buffer".to_string());
        assert!(err.to_string().contains("encode"));
    }
}
