//! # Response Envelope
//!
//! Every upstream endpoint wraps its payload in the same envelope:
//!
//! ```json
//! { "success": true, "data": ..., "message": "...", "pagination": { ... } }
//! ```
//!
//! The pagination block is spelled inconsistently across endpoints
//! (`currentPage` vs `page`, `itemsPerPage` vs `limit`); serde aliases fold
//! both spellings into one struct so callers never see the difference.

use serde::Deserialize;

/// The standard response wrapper.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    /// Missing `data` decodes as `None` for any `T`; no Default bound.
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination metadata for list endpoints.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default = "default_page", alias = "currentPage", alias = "page")]
    pub current_page: u32,
    #[serde(default = "default_limit", alias = "itemsPerPage", alias = "limit")]
    pub items_per_page: u32,
    #[serde(default, alias = "totalItems", alias = "total")]
    pub total_items: u64,
    #[serde(default, alias = "totalPages")]
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

/// A decoded list page: items plus whatever pagination the server sent.
#[derive(Debug)]
pub struct PageOf<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_data() {
        let env: ApiEnvelope<Vec<i32>> =
            serde_json::from_str(r#"{"success": true, "data": [1, 2, 3]}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.data.unwrap(), vec![1, 2, 3]);
        assert!(env.pagination.is_none());
    }

    #[test]
    fn test_envelope_failure_with_message() {
        let env: ApiEnvelope<Vec<i32>> =
            serde_json::from_str(r#"{"success": false, "message": "not found"}"#).unwrap();
        assert!(!env.success);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("not found"));
    }

    #[test]
    fn test_envelope_payload_needs_no_default_impl() {
        // Payload types are plain DTOs; the envelope must decode for any of
        // them, including ones without a Default impl.
        #[derive(Deserialize)]
        struct Payload {
            #[allow(dead_code)]
            id: String,
        }

        let env: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"success": false, "message": "gone"}"#).unwrap();
        assert!(env.data.is_none());

        let env: ApiEnvelope<Payload> =
            serde_json::from_str(r#"{"success": true, "data": {"id": "x-1"}}"#).unwrap();
        assert_eq!(env.data.unwrap().id, "x-1");
    }

    #[test]
    fn test_pagination_long_spelling() {
        let p: Pagination = serde_json::from_str(
            r#"{"currentPage": 2, "itemsPerPage": 25, "totalItems": 120, "totalPages": 5}"#,
        )
        .unwrap();
        assert_eq!(p.current_page, 2);
        assert_eq!(p.items_per_page, 25);
        assert_eq!(p.total_items, 120);
        assert_eq!(p.total_pages, 5);
    }

    #[test]
    fn test_pagination_short_spelling() {
        let p: Pagination =
            serde_json::from_str(r#"{"page": 3, "limit": 50, "total": 151}"#).unwrap();
        assert_eq!(p.current_page, 3);
        assert_eq!(p.items_per_page, 50);
        assert_eq!(p.total_items, 151);
        assert_eq!(p.total_pages, 0); // absent, defaulted
    }

    #[test]
    fn test_pagination_defaults_when_empty() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.current_page, 1);
        assert_eq!(p.items_per_page, 10);
    }
}
