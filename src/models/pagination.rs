//! Pagination types

use serde::{Deserialize, Serialize};

/// Maximum items per page
const MAX_PER_PAGE: u32 = 100;

/// Default items per page
const DEFAULT_PER_PAGE: u32 = 20;

/// Pagination parameters
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (max 100)
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination with validation.
    ///
    /// - Page is clamped to minimum of 1
    /// - Per page is clamped to 1..=100
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Calculate SQL OFFSET value.
    ///
    /// Widened before multiplying so u32::MAX pages can't overflow.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.per_page as u64
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results plus the total count across all pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    /// Calculate total number of pages.
    pub fn total_pages(&self) -> u32 {
        if self.total == 0 {
            1
        } else {
            ((self.total as u32 + self.per_page - 1) / self.per_page).max(1)
        }
    }

    /// Check if there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Check if there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1, 20).offset(), 0);
        assert_eq!(Pagination::new(2, 20).offset(), 20);
        assert_eq!(Pagination::new(4, 25).offset(), 75);
    }

    #[test]
    fn offset_survives_huge_page_numbers() {
        let p = Pagination::new(u32::MAX, 100);
        assert_eq!(p.offset(), (u32::MAX as u64 - 1) * 100);
    }

    #[test]
    fn clamps_page_and_per_page() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 1);

        let p = Pagination::new(1, 999);
        assert_eq!(p.per_page, 100);
    }

    #[test]
    fn defaults_match_listing_contract() {
        let p = Pagination::default();
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 20);
    }

    #[test]
    fn total_pages_and_navigation() {
        let page = |page, total| Paginated::<()> {
            items: vec![],
            total,
            page,
            per_page: 10,
        };

        assert_eq!(page(1, 0).total_pages(), 1);
        assert_eq!(page(1, 25).total_pages(), 3);
        assert_eq!(page(1, 100).total_pages(), 10);

        assert!(page(1, 30).has_next());
        assert!(!page(1, 30).has_prev());
        assert!(page(2, 30).has_next());
        assert!(page(2, 30).has_prev());
        assert!(!page(3, 30).has_next());
        assert!(page(3, 30).has_prev());
    }
}
