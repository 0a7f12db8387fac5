//! This module defines the common functionality for paging data.

/// The config that controls how list endpoints page their data.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The page size to default to when not specified in a request.
    pub default_limit: u64,
    /// The largest page size a request may ask for.
    pub max_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_limit: 10,
            max_limit: 100,
        }
    }
}

/// A resolved page request with defaults applied and the limit clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The one-based page number.
    pub page: u64,
    /// The number of records per page.
    pub limit: u64,
}

impl PageRequest {
    /// The number of records to skip before this page starts.
    ///
    /// Saturates instead of overflowing, so an absurdly large requested page
    /// yields an empty page rather than a panic.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl PaginationConfig {
    /// Apply defaults and clamp the requested page size.
    ///
    /// The page number is forced to be at least one and the limit is clamped
    /// to `1..=max_limit` regardless of the requested value.
    pub fn resolve(&self, page: Option<u64>, limit: Option<u64>) -> PageRequest {
        PageRequest {
            page: page.unwrap_or(self.default_page).max(1),
            limit: limit.unwrap_or(self.default_limit).clamp(1, self.max_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PageRequest, PaginationConfig};

    #[test]
    fn resolve_applies_defaults() {
        let config = PaginationConfig::default();

        let got = config.resolve(None, None);

        assert_eq!(got, PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn resolve_clamps_limit_to_max() {
        let config = PaginationConfig::default();

        let got = config.resolve(Some(2), Some(500));

        assert_eq!(got, PageRequest { page: 2, limit: 100 });
    }

    #[test]
    fn resolve_forces_minimum_page_and_limit() {
        let config = PaginationConfig::default();

        let got = config.resolve(Some(0), Some(0));

        assert_eq!(got, PageRequest { page: 1, limit: 1 });
    }

    #[test]
    fn offset_skips_previous_pages() {
        let page_request = PageRequest { page: 3, limit: 10 };

        assert_eq!(page_request.offset(), 20);
    }

    #[test]
    fn offset_saturates_for_huge_page_numbers() {
        let page_request = PageRequest {
            page: u64::MAX,
            limit: 100,
        };

        assert_eq!(page_request.offset(), u64::MAX);
    }
}
