//! Response helpers: paginated lists, list query options and CSV files.

pub mod csv;
pub mod pagination;
pub mod query;

pub use csv::{CsvFile, CsvRecord};
pub use pagination::{link_base, PageInfo, PaginatedResponse, PaginationError, PaginationLinks, PaginationParams};
pub use query::ListQuery;

use axum::http::Uri;
use club_core::view::{search_filter, Paginator, Searchable, SortSpec, Sortable};

use crate::error::ApiResult;

/// Sort, search and page `items` for a list endpoint.
///
/// Links point back at `uri` with its other query parameters kept. Unknown
/// sort fields are rejected with a validation error.
pub fn paginate<T>(
    mut items: Vec<T>,
    query: &ListQuery,
    params: &PaginationParams,
    default_page_size: usize,
    default_sort: Option<SortSpec>,
    uri: &Uri,
) -> ApiResult<PaginatedResponse<T>>
where
    T: Searchable + Sortable + 'static,
{
    if let Some(spec) = query.sort_spec(default_sort) {
        spec.sort(&mut items)?;
    }

    let mut paginator = Paginator::new(items)
        .with_items_per_page(params.page_size_or(default_page_size))
        .with_filter(search_filter::<T>)
        .with_search_term(query.search_term());
    paginator.set_current_page(params.page);

    tracing::debug!(
        path = uri.path(),
        page = paginator.current_page(),
        total = paginator.total_items(),
        "listing"
    );

    Ok(PaginatedResponse::from_paginator(
        paginator,
        Some(&link_base(uri)),
    ))
}
