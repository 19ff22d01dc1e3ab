//! Catalog data model
//!
//! `RawRecord` is one entry of the scraped JSON file. `Paper` is the derived,
//! immutable view served to clients. `Selection`, `Level` and `Filters` carry
//! the equality filters of the query endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Wire value that clients send to mean "no filter"
pub const ALL_SENTINEL: &str = "all";

/// One scraped file entry as it appears in the input JSON
///
/// Every field is optional so that a single damaged entry is skipped by the
/// loader instead of failing the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub path: Option<Vec<String>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Derived exam paper record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// Sequential identifier (`paper-N`), unique within one load
    pub id: String,
    /// Raw path segments, kept for traceability
    pub path: Vec<String>,
    pub url: String,
    /// Cleaned display title
    pub name: String,
    /// Four-digit year
    pub year: String,
    pub term: String,
    pub programme: Option<String>,
    /// `"<Roman> Sem"`, numeral in I..VIII
    pub semester: Option<String>,
    pub branch: Option<String>,
    pub subject: Option<String>,
}

impl Paper {
    /// Value of the given filter dimension, if present
    pub fn field(&self, level: Level) -> Option<&str> {
        match level {
            Level::Year => Some(self.year.as_str()),
            Level::Programme => self.programme.as_deref(),
            Level::Term => Some(self.term.as_str()),
            Level::Semester => self.semester.as_deref(),
            Level::Branch => self.branch.as_deref(),
        }
    }
}

/// Filter dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Year,
    Programme,
    Term,
    Semester,
    Branch,
}

impl Level {
    /// All dimensions in filter application order
    pub const ALL: [Level; 5] = [
        Level::Year,
        Level::Programme,
        Level::Term,
        Level::Semester,
        Level::Branch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Year => "year",
            Level::Programme => "programme",
            Level::Term => "term",
            Level::Semester => "semester",
            Level::Branch => "branch",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(Level::Year),
            "programme" => Ok(Level::Programme),
            "term" => Ok(Level::Term),
            "semester" => Ok(Level::Semester),
            "branch" => Ok(Level::Branch),
            other => Err(Error::InvalidInput(format!("unknown level: {}", other))),
        }
    }
}

/// Equality filter on one dimension
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// No constraint
    #[default]
    Any,
    /// Field must equal this value exactly
    Only(String),
}

impl Selection {
    /// Interpret a wire parameter: absent, empty and `"all"` mean no filter
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            None => Selection::Any,
            Some(v) if v.is_empty() || v == ALL_SENTINEL => Selection::Any,
            Some(v) => Selection::Only(v.to_string()),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Selection::Any)
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::Any => true,
            Selection::Only(wanted) => value == Some(wanted.as_str()),
        }
    }
}

/// The five equality filters shared by both query operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub year: Selection,
    pub programme: Selection,
    pub term: Selection,
    pub semester: Selection,
    pub branch: Selection,
}

impl Filters {
    pub fn get(&self, level: Level) -> &Selection {
        match level {
            Level::Year => &self.year,
            Level::Programme => &self.programme,
            Level::Term => &self.term,
            Level::Semester => &self.semester,
            Level::Branch => &self.branch,
        }
    }

    pub fn set(&mut self, level: Level, selection: Selection) {
        let slot = match level {
            Level::Year => &mut self.year,
            Level::Programme => &mut self.programme,
            Level::Term => &mut self.term,
            Level::Semester => &mut self.semester,
            Level::Branch => &mut self.branch,
        };
        *slot = selection;
    }

    /// Builder-style variant of [`Filters::set`]
    pub fn with(mut self, level: Level, value: &str) -> Self {
        self.set(level, Selection::from_param(Some(value)));
        self
    }

    /// True when every active filter matches the paper
    pub fn matches(&self, paper: &Paper) -> bool {
        Level::ALL
            .iter()
            .all(|&level| self.get(level).matches(paper.field(level)))
    }

    /// Like [`Filters::matches`] but ignoring the filter on `skip`
    pub fn matches_except(&self, paper: &Paper, skip: Level) -> bool {
        Level::ALL
            .iter()
            .filter(|&&level| level != skip)
            .all(|&level| self.get(level).matches(paper.field(level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper() -> Paper {
        Paper {
            id: "paper-1".to_string(),
            path: vec!["2023".to_string(), "May/June".to_string()],
            url: "http://x/a.pdf".to_string(),
            name: "Data Structures".to_string(),
            year: "2023".to_string(),
            term: "May/June".to_string(),
            programme: Some("B.Tech".to_string()),
            semester: None,
            branch: Some("CSE".to_string()),
            subject: None,
        }
    }

    #[test]
    fn test_selection_sentinels_mean_any() {
        assert_eq!(Selection::from_param(None), Selection::Any);
        assert_eq!(Selection::from_param(Some("")), Selection::Any);
        assert_eq!(Selection::from_param(Some("all")), Selection::Any);
        assert_eq!(
            Selection::from_param(Some("All")),
            Selection::Only("All".to_string())
        );
    }

    #[test]
    fn test_selection_only_requires_present_value() {
        let sel = Selection::Only("III Sem".to_string());
        assert!(sel.matches(Some("III Sem")));
        assert!(!sel.matches(Some("IV Sem")));
        assert!(!sel.matches(None));
        assert!(Selection::Any.matches(None));
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("branch".parse::<Level>().unwrap(), Level::Branch);
        assert!("Branch".parse::<Level>().is_err());
        assert!("name".parse::<Level>().is_err());
        for level in Level::ALL {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
        }
    }

    #[test]
    fn test_filters_matches_except_skips_own_level() {
        let p = paper();
        let filters = Filters::default()
            .with(Level::Year, "2023")
            .with(Level::Branch, "ECE");

        assert!(!filters.matches(&p));
        assert!(filters.matches_except(&p, Level::Branch));
        assert!(!filters.matches_except(&p, Level::Year));
    }
}
