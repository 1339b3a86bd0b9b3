use serde::{Deserialize, Serialize};

/// Query for one page of a collection (`GET /api/{collection}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Page index, 0-based
    pub page: usize,
    pub page_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl ListQuery {
    pub const DEFAULT_PAGE_SIZE: usize = 20;

    pub fn first_page() -> Self {
        Self {
            page: 0,
            page_size: Self::DEFAULT_PAGE_SIZE,
            filter: None,
        }
    }

    pub fn page(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        self.filter = if filter.trim().is_empty() { None } else { Some(filter) };
        self
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::first_page()
    }
}

/// One page of a collection plus the total item count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub count: usize,
}

impl<T> ListResponse<T> {
    pub fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.count.div_ceil(page_size)
    }
}

/// Body returned by `POST /api/{collection}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    pub id: String,
}

/// Error body the API returns alongside non-2xx statuses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let page: ListResponse<u8> = ListResponse {
            items: vec![],
            count: 41,
        };
        assert_eq!(page.total_pages(20), 3);
        assert_eq!(page.total_pages(0), 0);
    }

    #[test]
    fn test_blank_filter_is_dropped() {
        assert_eq!(ListQuery::first_page().with_filter("  ").filter, None);
        assert_eq!(
            ListQuery::first_page().with_filter("acme").filter.as_deref(),
            Some("acme")
        );
    }
}
