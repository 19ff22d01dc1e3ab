//! Catalog loading
//!
//! Reads the scraped JSON array, screens out non-paper entries, derives
//! metadata for the rest, assigns sequential ids and sorts the result into
//! canonical order. Input problems (missing file, bad JSON, wrong shape)
//! degrade to an empty catalog; they are logged, never returned as errors.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::metadata::derive_metadata;
use crate::models::{Paper, RawRecord};
use crate::{Error, Result};
use crate::ranking::compare_papers;

/// URL fragments (URL-encoded, case-sensitive) of non-paper documents
pub const IGNORED_URL_PATTERNS: &[&str] = &[
    "/Publication%20List",
    "/Policy%20Rules",
    "/Plagarisim",
    "/Membership/",
    "/Open%20Access/",
    "Certificate%20format",
];

/// Lower-case name keywords of non-paper documents
pub const IGNORED_NAME_KEYWORDS: &[&str] = &[
    "policy",
    "publication",
    "membership",
    "plagiarism",
    "certificate",
    "rules",
    "regulations",
    "guidelines",
    "format",
    "sop",
];

/// Why a raw record was not turned into a paper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Entry is not an object of the expected shape
    Malformed,
    /// URL missing or matching an ignored pattern
    Url,
    /// Name contains an ignored keyword
    NameKeyword,
    /// Name missing, blank or just ".pdf"
    Unnamed,
    /// Fewer than two path segments
    Path,
    /// Metadata derivation rejected the record
    Metadata,
}

/// Per-load counters, logged after every load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub raw: usize,
    pub added: usize,
    pub skipped_malformed: usize,
    pub skipped_url: usize,
    pub skipped_name_keyword: usize,
    pub skipped_unnamed: usize,
    pub skipped_path: usize,
    pub skipped_metadata: usize,
}

impl LoadStats {
    fn record_skip(&mut self, reason: SkipReason) {
        let counter = match reason {
            SkipReason::Malformed => &mut self.skipped_malformed,
            SkipReason::Url => &mut self.skipped_url,
            SkipReason::NameKeyword => &mut self.skipped_name_keyword,
            SkipReason::Unnamed => &mut self.skipped_unnamed,
            SkipReason::Path => &mut self.skipped_path,
            SkipReason::Metadata => &mut self.skipped_metadata,
        };
        *counter += 1;
    }

    pub fn skipped(&self) -> usize {
        self.skipped_malformed
            + self.skipped_url
            + self.skipped_name_keyword
            + self.skipped_unnamed
            + self.skipped_path
            + self.skipped_metadata
    }
}

/// Sorted papers plus the statistics of the pass that produced them
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub papers: Vec<Paper>,
    pub stats: LoadStats,
}

/// Load the catalog file at `path`
pub fn load_catalog(path: &Path) -> Catalog {
    info!("Reading paper data from {}", path.display());

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error!("Data file not found: {}", path.display());
            return Catalog::default();
        }
        Err(e) => {
            error!("Failed to read data file {}: {}", path.display(), e);
            return Catalog::default();
        }
    };

    parse_catalog(&contents)
}

/// Parse the JSON text of a catalog file
pub fn parse_catalog(contents: &str) -> Catalog {
    let entries = match decode_entries(contents) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Error parsing paper data: {}", e);
            return Catalog::default();
        }
    };

    if entries.is_empty() {
        warn!("Paper data file is empty");
        return Catalog::default();
    }

    build_catalog(entries)
}

/// Top-level JSON array of the catalog file, entries left undecoded
fn decode_entries(contents: &str) -> Result<Vec<Value>> {
    match serde_json::from_str(contents)? {
        Value::Array(entries) => Ok(entries),
        _ => Err(Error::InvalidInput(
            "paper data is not a JSON array".to_string(),
        )),
    }
}

/// Screen, derive, number and sort raw JSON entries
pub fn build_catalog(entries: Vec<Value>) -> Catalog {
    let mut stats = LoadStats {
        raw: entries.len(),
        ..LoadStats::default()
    };
    let mut papers = Vec::with_capacity(entries.len());

    for entry in entries {
        let outcome = serde_json::from_value::<RawRecord>(entry)
            .map_err(|_| SkipReason::Malformed)
            .and_then(|record| paper_from_record(record, papers.len() + 1));

        match outcome {
            Ok(paper) => papers.push(paper),
            Err(reason) => stats.record_skip(reason),
        }
    }

    stats.added = papers.len();
    info!(
        raw = stats.raw,
        added = stats.added,
        "Processed paper entries"
    );
    info!(
        url = stats.skipped_url,
        name_keyword = stats.skipped_name_keyword,
        unnamed = stats.skipped_unnamed,
        path = stats.skipped_path,
        metadata = stats.skipped_metadata,
        malformed = stats.skipped_malformed,
        "Skipped entry counts"
    );

    papers.sort_by(compare_papers);
    debug!("Sorted {} papers into canonical order", papers.len());

    Catalog { papers, stats }
}

/// Apply the screening rules in order and derive a paper with id `paper-{seq}`
pub fn paper_from_record(
    record: RawRecord,
    seq: usize,
) -> std::result::Result<Paper, SkipReason> {
    let url = match record.url {
        Some(url) if !url.is_empty() && !has_ignored_url(&url) => url,
        _ => return Err(SkipReason::Url),
    };

    let name = record.name.unwrap_or_default();
    if has_ignored_keyword(&name) {
        return Err(SkipReason::NameKeyword);
    }

    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == ".pdf" {
        return Err(SkipReason::Unnamed);
    }

    let path = match record.path {
        Some(path) if path.len() >= 2 => path,
        _ => return Err(SkipReason::Path),
    };

    let derived = derive_metadata(&path, &name).ok_or(SkipReason::Metadata)?;

    Ok(Paper {
        id: format!("paper-{}", seq),
        path,
        url,
        name: derived.name,
        year: derived.year,
        term: derived.term,
        programme: derived.programme,
        semester: derived.semester,
        branch: derived.branch,
        subject: derived.subject,
    })
}

fn has_ignored_url(url: &str) -> bool {
    IGNORED_URL_PATTERNS.iter().any(|p| url.contains(p))
}

fn has_ignored_keyword(name: &str) -> bool {
    let lower = name.to_lowercase();
    IGNORED_NAME_KEYWORDS.iter().any(|k| lower.contains(k))
}
