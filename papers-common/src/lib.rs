//! # Papers Common Library
//!
//! Shared code for the exam-paper catalog service:
//! - Paper data model and filter selections
//! - Metadata derivation from scraped path segments and filenames
//! - Branch normalization rule table
//! - Sort-order heuristics for terms, semesters and programmes
//! - Catalog loading from the scraped JSON file
//! - Configuration loading

pub mod branch;
pub mod catalog;
pub mod config;
pub mod error;
pub mod metadata;
pub mod models;
pub mod ranking;

pub use error::{Error, Result};
pub use models::{Filters, Level, Paper, RawRecord, Selection};
