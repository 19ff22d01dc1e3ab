//! Paper listing
//!
//! GET /api/papers: filtered, searched, paginated catalog slice

use axum::{extract::State, Json};
use tracing::debug;

use super::params::{parse_int_param, FilterParams, QueryParams};
use crate::error::ApiResult;
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::query::{self, ListRequest, PaperPage};
use crate::AppState;

/// Query parameters for the listing endpoint
#[derive(Debug, Default)]
pub struct PapersQuery {
    /// Page number (1-indexed)
    pub page: Option<String>,
    /// Results per page, clamped to [1, 100]
    pub page_size: Option<String>,
    /// Case-insensitive text matched against name and subject
    pub search: Option<String>,
    pub filters: FilterParams,
}

impl PapersQuery {
    pub fn from_query(params: &QueryParams) -> Self {
        Self {
            page: params.get("page").map(str::to_string),
            page_size: params.get("pageSize").map(str::to_string),
            search: params.get("search").map(str::to_string),
            filters: FilterParams::from_query(params),
        }
    }

    pub fn to_request(&self) -> ListRequest {
        ListRequest {
            page: parse_int_param(self.page.as_deref(), 1),
            page_size: parse_int_param(self.page_size.as_deref(), DEFAULT_PAGE_SIZE),
            search: self.search.clone(),
            filters: self.filters.to_filters(),
        }
    }
}

/// GET /api/papers
pub async fn list_papers(
    State(state): State<AppState>,
    params: QueryParams,
) -> ApiResult<Json<PaperPage>> {
    let request = PapersQuery::from_query(&params).to_request();
    let papers = state.store.papers().await?;
    debug!(papers = papers.len(), filters = ?request.filters, "Filtering papers");

    Ok(Json(query::list_papers(&papers, &request)))
}
