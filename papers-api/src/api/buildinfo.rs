//! Build information API endpoint
//!
//! GET /api/buildinfo: build identification plus the catalog settings the
//! store was started with.

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::AppState;

pub const SERVICE_NAME: &str = "papers-api";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_HASH: &str = env!("GIT_HASH");
pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
pub const BUILD_PROFILE: &str = env!("BUILD_PROFILE");

/// One-line build identification, e.g. `papers-api v0.1.0 [1a2b3c4d] built ... (release)`
pub fn build_id() -> String {
    format!(
        "{} v{} [{}] built {} ({})",
        SERVICE_NAME, VERSION, GIT_HASH, BUILD_TIMESTAMP, BUILD_PROFILE
    )
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
    /// Catalog file the store reads
    pub data_file: String,
    pub cache_ttl_secs: u64,
}

/// GET /api/buildinfo
pub async fn get_build_info(State(state): State<AppState>) -> Json<BuildInfo> {
    Json(BuildInfo {
        service: SERVICE_NAME,
        version: VERSION,
        git_hash: GIT_HASH,
        build_timestamp: BUILD_TIMESTAMP,
        build_profile: BUILD_PROFILE,
        data_file: state.store.data_file().display().to_string(),
        cache_ttl_secs: state.store.ttl().as_secs(),
    })
}
