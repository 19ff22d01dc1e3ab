//! HTTP API handlers for papers-api

pub mod buildinfo;
pub mod filter_options;
pub mod health;
pub mod papers;
pub mod params;

pub use buildinfo::get_build_info;
pub use filter_options::{get_all_filter_options, get_filter_options};
pub use health::health_routes;
pub use papers::list_papers;
