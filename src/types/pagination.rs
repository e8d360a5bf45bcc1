//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::ReportRow;

/// Pagination query parameters (DRY - reusable across all list endpoints)
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationParams {
    /// 1-based page number
    #[serde(default = "default_page")]
    #[param(example = 1)]
    pub page: u64,
    /// Page size, capped at 100
    #[serde(default = "default_per_page")]
    #[param(example = 15)]
    pub per_page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Page number, treating 0 as the first page
    pub fn page(&self) -> u64 {
        self.page.max(1)
    }

    /// Rows to skip; saturates at `i64::MAX` so huge page numbers land
    /// past the last row instead of overflowing.
    pub fn offset(&self) -> u64 {
        (self.page() - 1)
            .saturating_mul(self.limit())
            .min(i64::MAX as u64)
    }

    /// Get limit capped at maximum; 0 falls back to the default
    pub fn limit(&self) -> u64 {
        match self.per_page {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        }
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper (DRY - reusable for all list responses)
#[derive(Debug, Serialize, ToSchema)]
#[aliases(PaginatedReportRows = Paginated<ReportRow>)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if per_page > 0 {
            total.div_ceil(per_page)
        } else {
            0
        };

        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: u64, per_page: u64) -> PaginationParams {
        PaginationParams { page, per_page }
    }

    #[test]
    fn offset_and_limit() {
        assert_eq!(params(1, 15).offset(), 0);
        assert_eq!(params(3, 15).offset(), 30);
        assert_eq!(params(2, 500).limit(), MAX_PAGE_SIZE);
        assert_eq!(params(2, 500).offset(), MAX_PAGE_SIZE);
        assert_eq!(params(u64::MAX, 15).offset(), i64::MAX as u64);
        assert_eq!(params(u64::MAX / 10, 100).offset(), i64::MAX as u64);
    }

    #[test]
    fn zero_values_fall_back() {
        assert_eq!(params(0, 0).page(), 1);
        assert_eq!(params(0, 0).limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(params(0, 10).offset(), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Paginated<u8> = Paginated::new(vec![], 1, 15, 31);
        assert_eq!(page.meta.total_pages, 3);

        let empty: Paginated<u8> = Paginated::new(vec![], 1, 15, 0);
        assert_eq!(empty.meta.total_pages, 0);
    }
}
