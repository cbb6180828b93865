//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// Page metadata derived from the page, page size, and total match count.
///
/// Never stored: it is recomputed for every request, including requests
/// served from cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Pagination {
    /// The current page number (1-indexed).
    pub page: u32,
    /// The number of items per page.
    pub limit: u32,
    /// The total number of matching items across all pages.
    pub total: u64,
    /// Whether a page exists after this one.
    #[serde(rename = "next_page")]
    pub has_next: bool,
    /// Whether a page exists before this one.
    #[serde(rename = "prev_page")]
    pub has_previous: bool,
}

impl Pagination {
    /// Computes page metadata.
    #[must_use]
    pub const fn new(page: u32, limit: u32, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            has_next: (page as u64) * (limit as u64) < total,
            has_previous: page > 1,
        }
    }

    /// Returns the total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(self.limit as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let pagination = Pagination::new(2, 10, 25);
        assert!(pagination.has_next);
        assert!(pagination.has_previous);
        assert_eq!(pagination.total_pages(), 3);
    }

    #[test]
    fn test_single_page() {
        let pagination = Pagination::new(1, 10, 5);
        assert!(!pagination.has_next);
        assert!(!pagination.has_previous);
    }

    #[test]
    fn test_last_page_exact_fit() {
        let pagination = Pagination::new(3, 10, 30);
        assert!(!pagination.has_next);
        assert!(pagination.has_previous);
    }

    #[test]
    fn test_first_page_with_more() {
        let pagination = Pagination::new(1, 10, 11);
        assert!(pagination.has_next);
        assert!(!pagination.has_previous);
    }

    #[test]
    fn test_page_beyond_total() {
        let pagination = Pagination::new(9, 10, 25);
        assert!(!pagination.has_next);
        assert!(pagination.has_previous);
    }

    #[test]
    fn test_empty_result() {
        let pagination = Pagination::new(1, 10, 0);
        assert!(!pagination.has_next);
        assert!(!pagination.has_previous);
        assert_eq!(pagination.total_pages(), 0);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(Pagination::new(2, 10, 25)).unwrap();
        assert_eq!(json["next_page"], true);
        assert_eq!(json["prev_page"], true);
        assert_eq!(json["total"], 25);
    }
}
