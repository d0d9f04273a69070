//! Paginated list responses.
//!
//! Query parameters are extracted into [`PaginationParams`]; the list itself
//! is paged by [`club_core::view::Paginator`], and every response carries
//! the page window the UI renders under the table.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use club_core::view::{generate_window, PageEntry, Paginator};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Maximum allowed page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Pagination parameters extracted from the query string.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PaginationParams {
    /// Page number (1-indexed). Out-of-range pages are clamped.
    #[serde(default = "default_page")]
    pub page: usize,

    /// Number of items per page. Falls back to the server default when absent.
    pub page_size: Option<usize>,
}

fn default_page() -> usize {
    1
}

impl PaginationParams {
    /// Page size to use, given the server-wide default.
    pub fn page_size_or(&self, default: usize) -> usize {
        self.page_size.unwrap_or(default).max(1)
    }

    pub fn validate(&mut self) -> Result<(), PaginationError> {
        if self.page == 0 {
            self.page = 1;
        }

        match self.page_size {
            Some(0) => Err(PaginationError::ZeroPageSize),
            Some(size) if size > MAX_PAGE_SIZE => Err(PaginationError::PageSizeTooLarge {
                requested: size,
                max: MAX_PAGE_SIZE,
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PaginationParams
where
    S: Send + Sync,
{
    type Rejection = PaginationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(mut params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|_| PaginationError::InvalidParams)?;

        params.validate()?;
        Ok(params)
    }
}

/// Information about the current page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub per_page: usize,
    /// Items left after filtering.
    pub total_count: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// 1-based index of the first item shown ("showing 11 to 20 of 25").
    pub first_item: usize,
    pub last_item: usize,
    /// Page buttons to render, with `"..."` for gaps.
    pub window: Vec<PageEntry>,
}

impl PageInfo {
    pub fn from_paginator<T>(paginator: &Paginator<T>) -> Self {
        Self {
            current_page: paginator.current_page(),
            total_pages: paginator.total_pages(),
            per_page: paginator.items_per_page(),
            total_count: paginator.total_items(),
            has_previous: paginator.has_previous(),
            has_next: paginator.has_next(),
            first_item: paginator.first_item_index(),
            last_item: paginator.last_item_index(),
            window: generate_window(paginator.current_page(), paginator.total_pages()),
        }
    }
}

/// Navigation links for paginated responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginationLinks {
    pub first: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    pub last: String,

    pub self_link: String,
}

impl PaginationLinks {
    /// `base_url` may already carry a query string (search, sort...).
    pub fn new(base_url: &str, page_info: &PageInfo) -> Self {
        let base_url = base_url.trim_end_matches(['?', '&']);
        let separator = if base_url.contains('?') { '&' } else { '?' };
        let link = |page: usize| {
            format!(
                "{}{}page={}&page_size={}",
                base_url, separator, page, page_info.per_page
            )
        };

        Self {
            first: link(1),
            prev: page_info
                .has_previous
                .then(|| link(page_info.current_page - 1)),
            next: page_info.has_next.then(|| link(page_info.current_page + 1)),
            last: link(page_info.total_pages.max(1)),
            self_link: link(page_info.current_page),
        }
    }
}

/// Request path plus every query pair except `page` and `page_size`.
pub fn link_base(uri: &Uri) -> String {
    let kept: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            !pair.is_empty() && key != "page" && key != "page_size"
        })
        .collect();

    if kept.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), kept.join("&"))
    }
}

/// A paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,

    pub page_info: PageInfo,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PaginationLinks>,
}

impl<T> PaginatedResponse<T> {
    /// Takes the current page out of `paginator`.
    pub fn from_paginator(paginator: Paginator<T>, base_url: Option<&str>) -> Self {
        let page_info = PageInfo::from_paginator(&paginator);
        let links = base_url.map(|url| PaginationLinks::new(url, &page_info));

        Self {
            data: paginator.into_paged_items(),
            page_info,
            links,
        }
    }
}

impl<T: Serialize> IntoResponse for PaginatedResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Pagination-related errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Invalid pagination parameters.
    #[error("Invalid pagination parameters")]
    InvalidParams,

    /// Page size of zero.
    #[error("Page size must be at least 1")]
    ZeroPageSize,

    /// Page size exceeds maximum allowed.
    #[error("Page size {requested} exceeds maximum of {max}")]
    PageSizeTooLarge { requested: usize, max: usize },
}

impl IntoResponse for PaginationError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": "Bad request",
            "details": self.to_string(),
        });
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_params() {
        let mut params = PaginationParams { page: 1, page_size: Some(500) };
        assert!(matches!(
            params.validate(),
            Err(PaginationError::PageSizeTooLarge { requested: 500, .. })
        ));

        let mut params = PaginationParams { page: 0, page_size: None };
        params.validate().unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size_or(10), 10);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(PaginationError::ZeroPageSize.to_string(), "Page size must be at least 1");
        assert_eq!(
            PaginationError::PageSizeTooLarge { requested: 500, max: 100 }.to_string(),
            "Page size 500 exceeds maximum of 100"
        );
        assert_eq!(
            PaginationError::InvalidParams.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_response_from_paginator() {
        let mut paginator = Paginator::new((1..=25).collect::<Vec<u32>>()).with_items_per_page(10);
        paginator.go_to_page(3);

        let response = PaginatedResponse::from_paginator(paginator, Some("/players?search=a"));
        assert_eq!(response.data, vec![21, 22, 23, 24, 25]);
        assert_eq!(response.page_info.first_item, 21);
        assert_eq!(response.page_info.last_item, 25);
        assert_eq!(
            response.page_info.window,
            vec![PageEntry::Page(1), PageEntry::Page(2), PageEntry::Page(3)]
        );

        let links = response.links.unwrap();
        assert_eq!(links.first, "/players?search=a&page=1&page_size=10");
        assert_eq!(links.prev.as_deref(), Some("/players?search=a&page=2&page_size=10"));
        assert_eq!(links.next, None);
    }

    #[test]
    fn test_link_base_drops_page_params() {
        let uri: Uri = "/api/v1/players?page=3&search=ana&page_size=5&active=true"
            .parse()
            .unwrap();
        assert_eq!(link_base(&uri), "/api/v1/players?search=ana&active=true");

        let uri: Uri = "/api/v1/fines?page=2".parse().unwrap();
        assert_eq!(link_base(&uri), "/api/v1/fines");
    }

    #[test]
    fn test_empty_list_links() {
        let paginator: Paginator<u32> = Paginator::new(Vec::new());
        let response = PaginatedResponse::from_paginator(paginator, Some("/fines"));
        assert!(response.page_info.window.is_empty());
        assert_eq!(response.links.unwrap().last, "/fines?page=1&page_size=10");
    }
}
