//! # Pagination
//!
//! Page/offset math for listing queries and the paginated results container.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// Represents pagination parameters for listing queries
#[derive(Debug, Clone)]
pub struct Pagination {
    pub current_page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination for a 1-indexed page number; page 0 is treated as 1
    pub fn new(current_page: u32, per_page: u32) -> Self {
        Self {
            current_page: current_page.max(1),
            per_page,
        }
    }

    /// Row offset for the current page: 0 for page 1, else `per_page × (page − 1)`
    pub fn offset(&self) -> u32 {
        if self.current_page == 1 {
            0
        } else {
            self.per_page * (self.current_page - 1)
        }
    }

    /// Convert to a `LIMIT offset, count` SQL suffix
    pub fn to_sql(&self) -> String {
        format!(" LIMIT {}, {}", self.offset(), self.per_page)
    }

    /// Calculate total pages given a total count
    pub fn total_pages(&self, total_count: u64) -> u64 {
        if self.per_page == 0 {
            return 1;
        }
        (total_count + u64::from(self.per_page) - 1) / u64::from(self.per_page)
    }

    /// Check if there's a next page
    pub fn has_next_page(&self, total_count: u64) -> bool {
        u64::from(self.offset()) + u64::from(self.per_page) < total_count
    }

    /// Check if there's a previous page
    pub fn has_previous_page(&self) -> bool {
        self.offset() > 0
    }
}

/// One fetched page of rows plus counting metadata
#[derive(Debug, Clone)]
pub struct ListingResults {
    pub rows: Vec<Value>,
    pub total: u64,
    pub per_page: u32,
    pub current_page: u32,
    /// Base URL the page was fetched for, usable to build page links
    pub path: String,
}

impl ListingResults {
    /// Number of rows on this page
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn total_pages(&self) -> u64 {
        Pagination::new(self.current_page, self.per_page).total_pages(self.total)
    }

    pub fn has_next_page(&self) -> bool {
        Pagination::new(self.current_page, self.per_page).has_next_page(self.total)
    }

    /// Decode the page's rows into a caller type
    pub fn hydrate<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.rows
            .iter()
            .map(|row| serde_json::from_value(row.clone()).map_err(Into::into))
            .collect()
    }
}
