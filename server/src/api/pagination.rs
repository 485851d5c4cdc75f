use super::error::ApiError;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 6;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageParams {
    /// 1-based page number (default: 1)
    pub page: Option<i64>,
    /// Items per page (default: 6, max: 100)
    pub limit: Option<i64>,
}

/// Resolved LIMIT/OFFSET for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl PageParams {
    pub fn resolve(&self) -> Result<Page, ApiError> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(ApiError::BadRequest("Invalid page".to_string()));
        }
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| ApiError::BadRequest("Invalid page".to_string()))?;
        Ok(Page { limit, offset })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMetadata {
    /// Total number of items available
    pub total: i64,
    /// Number of items requested (limit)
    pub limit: i64,
    /// Number of items skipped (offset)
    pub offset: i64,
}

impl PaginationMetadata {
    pub fn new(page: Page, total: i64) -> Self {
        PaginationMetadata {
            total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageParams::default().resolve().unwrap();
        assert_eq!(page, Page { limit: 6, offset: 0 });
    }

    #[test]
    fn test_page_to_offset() {
        let params = PageParams {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(params.resolve().unwrap(), Page { limit: 10, offset: 20 });
    }

    #[test]
    fn test_limit_clamped() {
        let params = PageParams {
            page: None,
            limit: Some(5000),
        };
        assert_eq!(params.resolve().unwrap().limit, MAX_LIMIT);

        let params = PageParams {
            page: None,
            limit: Some(0),
        };
        assert_eq!(params.resolve().unwrap().limit, 1);
    }

    #[test]
    fn test_invalid_page() {
        let params = PageParams {
            page: Some(0),
            limit: None,
        };
        assert!(params.resolve().is_err());

        let params = PageParams {
            page: Some(i64::MAX),
            limit: Some(100),
        };
        assert!(params.resolve().is_err());
    }
}
