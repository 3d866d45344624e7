//! Server-side pagination envelope.
//!
//! Mirrors the primary API's page response shape
//! (`{content, totalPages, totalElements, number, first, last}`).

use serde::{Deserialize, Serialize};

/// One page of a paginated listing, exactly as the server returns it.
///
/// The client never re-sorts or merges pages; a page is replaced wholesale
/// on refetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// 0-based page index.
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }
}

/// Pagination request parameters.
///
/// Defaults differ per resource: notices list 10 per page, suggestions 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index.
    pub page: u32,
    /// Number of items per page, positive.
    pub size: u32,
}

impl PageRequest {
    pub const DEFAULT_NOTICE_SIZE: u32 = 10;
    pub const DEFAULT_SUGGESTION_SIZE: u32 = 5;

    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// First page with the notice-list default size.
    pub fn notices() -> Self {
        Self::new(0, Self::DEFAULT_NOTICE_SIZE)
    }

    /// First page with the suggestion-list default size.
    pub fn suggestions() -> Self {
        Self::new(0, Self::DEFAULT_SUGGESTION_SIZE)
    }

    /// Query string pairs for the gateway (`page`, `size`).
    pub fn query(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_NOTICE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_spring_envelope() {
        let json = r#"{
            "content": [1, 2, 3],
            "number": 0,
            "size": 10,
            "totalPages": 2,
            "totalElements": 13,
            "first": true,
            "last": false
        }"#;

        let page: Page<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(page.len(), 3);
        assert_eq!(page.total_pages, 2);
        assert!(page.first);
        assert!(!page.last);
    }

    #[test]
    fn test_page_invariants_hold_on_server_data() {
        let json = r#"{
            "content": [1, 2, 3, 4, 5],
            "number": 1,
            "size": 5,
            "totalPages": 3,
            "totalElements": 13,
            "first": false,
            "last": false
        }"#;

        let page: Page<i64> = serde_json::from_str(json).unwrap();
        assert!(page.len() as u32 <= page.size);
        assert!(page.number < page.total_pages);
    }

    #[test]
    fn test_page_request_query_pairs() {
        let req = PageRequest::suggestions();
        assert_eq!(
            req.query(),
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let json = r#"{
            "content": [],
            "number": 0,
            "size": 10,
            "totalPages": 0,
            "totalElements": 0,
            "first": true,
            "last": true,
            "pageable": {"offset": 0},
            "sort": {"sorted": false}
        }"#;

        let page: Page<i64> = serde_json::from_str(json).unwrap();
        assert!(page.is_empty());
    }
}
