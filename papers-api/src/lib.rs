//! papers-api library - exam paper catalog browsing service
//!
//! Serves a cached, derived view of the scraped paper catalog through two
//! read-only query endpoints: paged listings and cascading filter options.

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod pagination;
pub mod query;
pub mod store;

pub use error::{ApiError, ApiResult};
pub use store::PaperStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Process-wide paper cache
    pub store: Arc<PaperStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: PaperStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build application router
///
/// Catalog responses are computed per request and marked `no-store`.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let catalog = Router::new()
        .route("/api/papers", get(api::list_papers))
        .route("/api/filter-options", get(api::get_filter_options))
        .route("/api/filter-options/all", get(api::get_all_filter_options))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    let public = Router::new()
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    Router::new()
        .merge(catalog)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
