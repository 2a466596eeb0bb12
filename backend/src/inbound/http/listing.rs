//! Pagination glue shared by the list endpoints.

use actix_web::HttpRequest;
use pagination::{PageLinks, PageRequest, PageSummary, PaginationError, PaginatorSummary};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Error;

use super::ApiResult;
use super::state::HttpState;

/// `page` query parameter: a positive number or `last`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Requested page; defaults to the first.
    #[param(example = "2")]
    pub page: Option<String>,
}

/// Paginator totals.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatorBody {
    pub count: usize,
    pub per_page: usize,
    pub num_pages: usize,
}

impl From<PaginatorSummary> for PaginatorBody {
    fn from(summary: PaginatorSummary) -> Self {
        Self {
            count: summary.count,
            per_page: summary.per_page,
            num_pages: summary.num_pages,
        }
    }
}

/// Position of the current page and links to its neighbours.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageBody {
    pub number: usize,
    pub num_pages: usize,
    /// Rendered as `<Page n of m>`.
    #[schema(example = "<Page 1 of 2>")]
    pub label: String,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<usize>,
    pub previous_page_number: Option<usize>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl PageBody {
    fn new(summary: PageSummary, links: PageLinks) -> Self {
        Self {
            number: summary.number,
            num_pages: summary.num_pages,
            label: summary.label,
            has_next: summary.has_next,
            has_previous: summary.has_previous,
            next_page_number: summary.next_page_number,
            previous_page_number: summary.previous_page_number,
            next: links.next,
            previous: links.previous,
        }
    }
}

/// Pagination context shared by every listing response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListingMeta {
    pub paginator: PaginatorBody,
    pub page_obj: PageBody,
    pub is_paginated: bool,
}

fn map_pagination_error(error: PaginationError) -> Error {
    Error::not_found(format!("Invalid page: {error}"))
}

/// Cut `items` down to the page named in the query.
///
/// Malformed or out-of-range page numbers are reported as not found.
pub(crate) fn paginate<T>(
    state: &HttpState,
    req: &HttpRequest,
    query: &PageQuery,
    items: Vec<T>,
) -> ApiResult<(Vec<T>, ListingMeta)> {
    let request = PageRequest::parse(query.page.as_deref()).map_err(map_pagination_error)?;
    let page = state
        .paginator
        .paginate(items, request)
        .map_err(map_pagination_error)?;
    let meta = ListingMeta {
        paginator: page.paginator_summary().into(),
        page_obj: PageBody::new(page.summary(), page.links(&req.full_url())),
        is_paginated: page.is_paginated(),
    };
    Ok((page.into_items(), meta))
}
