//! Query-string parameters shared by the catalog endpoints
//!
//! Parameters are read first-value-wins: a key repeated in the query string
//! keeps its first occurrence and the rest are ignored.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use papers_common::{Filters, Selection};

/// First value of each query-string key
#[derive(Debug, Clone, Default)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut values = HashMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            values.entry(key).or_insert(value);
        }
        Self(values)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn owned(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(Self::from_pairs(pairs))
    }
}

/// The five equality filters as sent on the wire
///
/// Absent, empty and `"all"` all mean "no filter".
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
    pub year: Option<String>,
    pub programme: Option<String>,
    pub term: Option<String>,
    pub semester: Option<String>,
    pub branch: Option<String>,
}

impl FilterParams {
    pub fn from_query(params: &QueryParams) -> Self {
        Self {
            year: params.owned("year"),
            programme: params.owned("programme"),
            term: params.owned("term"),
            semester: params.owned("semester"),
            branch: params.owned("branch"),
        }
    }

    pub fn to_filters(&self) -> Filters {
        Filters {
            year: Selection::from_param(self.year.as_deref()),
            programme: Selection::from_param(self.programme.as_deref()),
            term: Selection::from_param(self.term.as_deref()),
            semester: Selection::from_param(self.semester.as_deref()),
            branch: Selection::from_param(self.branch.as_deref()),
        }
    }
}

/// Leading integer of a parameter, or `default` when absent or unparsable
pub fn parse_int_param(value: Option<&str>, default: i64) -> i64 {
    let Some(value) = value.map(str::trim) else {
        return default;
    };
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(value.len(), |(i, _)| i);
    value[..end].parse().unwrap_or(default)
}
