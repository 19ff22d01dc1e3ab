//! Cascading filter options
//!
//! GET /api/filter-options?level=...: distinct values of one dimension among
//! papers matching the other dimensions' selections
//! GET /api/filter-options/all: every dimension over the whole catalog

use axum::{extract::State, Json};
use papers_common::Level;
use serde::Serialize;
use tracing::debug;

use super::params::{FilterParams, QueryParams};
use crate::error::{ApiError, ApiResult};
use crate::query::{self, AllFilterOptions};
use crate::AppState;

/// Query parameters for the filter-options endpoint
#[derive(Debug, Default)]
pub struct FilterOptionsQuery {
    /// One of year, programme, term, semester, branch
    pub level: Option<String>,
    pub filters: FilterParams,
}

impl FilterOptionsQuery {
    pub fn from_query(params: &QueryParams) -> Self {
        Self {
            level: params.get("level").map(str::to_string),
            filters: FilterParams::from_query(params),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FilterOptionsResponse {
    pub options: Vec<String>,
}

/// GET /api/filter-options
pub async fn get_filter_options(
    State(state): State<AppState>,
    params: QueryParams,
) -> ApiResult<Json<FilterOptionsResponse>> {
    let params = FilterOptionsQuery::from_query(&params);
    let level: Level = params
        .level
        .as_deref()
        .ok_or(ApiError::InvalidLevel)?
        .parse()
        .map_err(|_| ApiError::InvalidLevel)?;

    let filters = params.filters.to_filters();
    let papers = state.store.papers().await?;
    let options = query::filter_options(&papers, level, &filters);
    debug!(%level, count = options.len(), "Computed filter options");

    Ok(Json(FilterOptionsResponse { options }))
}

/// GET /api/filter-options/all
pub async fn get_all_filter_options(
    State(state): State<AppState>,
) -> ApiResult<Json<AllFilterOptions>> {
    let papers = state.store.papers().await?;
    Ok(Json(query::all_filter_options(&papers)))
}
