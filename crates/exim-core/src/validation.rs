//! # Validation Module
//!
//! Input validation utilities for Exim Desk.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + computation engine (Rust)                      │
//! │  ├── Field format rules (HSN shape, name lengths)                      │
//! │  └── Numeric validation lives in compute.rs (finite, sign, range)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Upstream API                                                 │
//! │  └── Persistence-side constraints (unique invoice numbers, auth)       │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// String Validators
// =============================================================================

/// Validates an HSN classification code.
///
/// ## Rules
/// - Must not be empty
/// - Must be 4, 6 or 8 digits (the chapter/heading/tariff-item levels the
///   customs schedule uses)
///
/// ## Example
/// ```rust
/// use exim_core::validation::validate_hsn_code;
///
/// assert!(validate_hsn_code("6203").is_ok());
/// assert!(validate_hsn_code("62034200").is_ok());
/// assert!(validate_hsn_code("62A3").is_err());
/// assert!(validate_hsn_code("").is_err());
/// ```
pub fn validate_hsn_code(hsn: &str) -> ValidationResult<()> {
    let hsn = hsn.trim();

    if hsn.is_empty() {
        return Err(ValidationError::Required {
            field: "hsnCode".to_string(),
        });
    }

    if !hsn.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "hsnCode".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if !matches!(hsn.len(), 4 | 6 | 8) {
        return Err(ValidationError::InvalidFormat {
            field: "hsnCode".to_string(),
            reason: "must be 4, 6 or 8 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a party/company display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_party_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a list-endpoint search query.
///
/// ## Rules
/// - Can be empty (returns default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsn_code_lengths() {
        assert!(validate_hsn_code("6203").is_ok());
        assert!(validate_hsn_code("620342").is_ok());
        assert!(validate_hsn_code("62034200").is_ok());

        assert!(validate_hsn_code("62").is_err());
        assert!(validate_hsn_code("62034").is_err());
        assert!(validate_hsn_code("620342001").is_err());
    }

    #[test]
    fn test_hsn_code_digits_only() {
        assert!(validate_hsn_code("62O3").is_err()); // letter O, not zero
        assert!(validate_hsn_code(" 6203 ").is_ok()); // trimmed
        assert!(validate_hsn_code("").is_err());
    }

    #[test]
    fn test_party_name() {
        assert!(validate_party_name("Global Textiles FZE").is_ok());
        assert!(validate_party_name("").is_err());
        assert!(validate_party_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_search_query() {
        assert_eq!(validate_search_query("  cotton ").unwrap(), "cotton");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }
}
