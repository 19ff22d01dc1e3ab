//! Query service over a catalog snapshot
//!
//! Both operations read the canonical-ordered collection and never reorder
//! or mutate it.

use std::collections::BTreeSet;

use papers_common::models::ALL_SENTINEL;
use papers_common::ranking::compare_options;
use papers_common::{Filters, Level, Paper};
use serde::Serialize;
use tracing::debug;

use crate::pagination::{calculate_pagination, DEFAULT_PAGE_SIZE};

/// Parameters of the listing operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub page: i64,
    pub page_size: i64,
    /// Case-insensitive substring matched against name or subject
    pub search: Option<String>,
    pub filters: Filters,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            filters: Filters::default(),
        }
    }
}

/// One page of listing results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperPage {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub results: Vec<Paper>,
}

/// Options for every dimension, computed over the whole catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllFilterOptions {
    pub years: Vec<String>,
    pub programmes: Vec<String>,
    pub terms: Vec<String>,
    pub semesters: Vec<String>,
    pub branches: Vec<String>,
}

/// Filter, search and paginate
pub fn list_papers(papers: &[Paper], request: &ListRequest) -> PaperPage {
    let needle = request
        .search
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let filtered: Vec<&Paper> = papers
        .iter()
        .filter(|p| request.filters.matches(p))
        .filter(|p| needle.as_deref().map_or(true, |n| matches_search(p, n)))
        .collect();

    let total = filtered.len();
    let p = calculate_pagination(total, request.page, request.page_size);
    let results: Vec<Paper> = filtered[p.range(total)].iter().map(|&paper| paper.clone()).collect();

    debug!(
        total,
        page = p.page,
        page_size = p.page_size,
        returned = results.len(),
        "Listed papers"
    );

    PaperPage {
        total,
        page: p.page,
        page_size: p.page_size,
        total_pages: p.total_pages,
        results,
    }
}

fn matches_search(paper: &Paper, needle: &str) -> bool {
    paper.name.to_lowercase().contains(needle)
        || paper
            .subject
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains(needle))
}

/// Distinct values of `level` among papers matching every other filter
///
/// The filter on `level` itself is ignored so that an open dropdown still
/// lists its siblings. Empty values and the `"all"` sentinel are never
/// returned.
pub fn filter_options(papers: &[Paper], level: Level, filters: &Filters) -> Vec<String> {
    let distinct: BTreeSet<&str> = papers
        .iter()
        .filter(|p| filters.matches_except(p, level))
        .filter_map(|p| p.field(level))
        .filter(|v| !v.is_empty() && *v != ALL_SENTINEL)
        .collect();

    let mut options: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    options.sort_by(|a, b| compare_options(level, a, b));
    options
}

/// Initial dropdown contents for all five dimensions
pub fn all_filter_options(papers: &[Paper]) -> AllFilterOptions {
    let none = Filters::default();
    AllFilterOptions {
        years: filter_options(papers, Level::Year, &none),
        programmes: filter_options(papers, Level::Programme, &none),
        terms: filter_options(papers, Level::Term, &none),
        semesters: filter_options(papers, Level::Semester, &none),
        branches: filter_options(papers, Level::Branch, &none),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papers_common::ranking::compare_papers;

    #[allow(clippy::too_many_arguments)]
    fn paper(
        id: &str,
        year: &str,
        term: &str,
        programme: Option<&str>,
        semester: Option<&str>,
        branch: Option<&str>,
        name: &str,
        subject: Option<&str>,
    ) -> Paper {
        Paper {
            id: id.to_string(),
            path: vec![year.to_string(), term.to_string()],
            url: format!("http://x/{}.pdf", id),
            name: name.to_string(),
            year: year.to_string(),
            term: term.to_string(),
            programme: programme.map(str::to_string),
            semester: semester.map(str::to_string),
            branch: branch.map(str::to_string),
            subject: subject.map(str::to_string),
        }
    }

    fn sample() -> Vec<Paper> {
        let mut papers = vec![
            paper("paper-1", "2023", "May/June", Some("B.Tech"), Some("III Sem"), Some("CSE"), "Data Structures (CS301)", Some("Data Structures")),
            paper("paper-2", "2023", "May/June", Some("B.Tech"), Some("V Sem"), Some("ECE"), "Signals (EC501)", Some("Signals")),
            paper("paper-3", "2023", "Dec/Jan", Some("M.Tech"), None, Some("Mech"), "Thermodynamics", None),
            paper("paper-4", "2022", "May/June", Some("M.Tech"), Some("I Sem"), Some("CSE"), "Compilers (CS701)", Some("Compilers")),
            paper("paper-5", "2022", "Mid Sem", None, None, None, "Workshop Practice", None),
            paper("paper-6", "2021", "all", Some("B.Tech"), Some("III Sem"), Some("Civil"), "Surveying", None),
        ];
        papers.sort_by(compare_papers);
        papers
    }

    #[test]
    fn test_list_without_filters_keeps_canonical_order() {
        let papers = sample();
        let page = list_papers(&papers, &ListRequest::default());
        assert_eq!(page.total, 6);
        assert_eq!(page.total_pages, 1);
        let ids: Vec<&str> = page.results.iter().map(|p| p.id.as_str()).collect();
        let expected: Vec<&str> = papers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_list_filters_are_anded() {
        let papers = sample();
        let request = ListRequest {
            filters: Filters::default()
                .with(Level::Year, "2023")
                .with(Level::Programme, "B.Tech"),
            ..ListRequest::default()
        };
        let page = list_papers(&papers, &request);
        assert_eq!(page.total, 2);
        assert!(page.results.iter().all(|p| p.year == "2023"));
    }

    #[test]
    fn test_list_all_sentinel_is_no_filter() {
        let papers = sample();
        let request = ListRequest {
            filters: Filters::default().with(Level::Branch, "all"),
            ..ListRequest::default()
        };
        assert_eq!(list_papers(&papers, &request).total, 6);
    }

    #[test]
    fn test_search_matches_name_or_subject() {
        let papers = sample();
        let request = ListRequest {
            search: Some("COMPIL".to_string()),
            ..ListRequest::default()
        };
        let page = list_papers(&papers, &request);
        assert_eq!(page.total, 1);
        assert_eq!(page.results[0].id, "paper-4");

        let request = ListRequest {
            search: Some("cs".to_string()),
            ..ListRequest::default()
        };
        assert_eq!(list_papers(&papers, &request).total, 2);
    }

    #[test]
    fn test_pagination_properties() {
        let papers = sample();
        for page_size in 1..=7 {
            let request = ListRequest {
                page_size,
                ..ListRequest::default()
            };
            let page = list_papers(&papers, &request);
            assert_eq!(page.total_pages, page.total.div_ceil(page.page_size));
            assert!(page.results.len() <= page.page_size);
        }

        let request = ListRequest {
            page: 4,
            page_size: 2,
            ..ListRequest::default()
        };
        let page = list_papers(&papers, &request);
        assert_eq!(page.total, 6);
        assert_eq!(page.total_pages, 3);
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_filter_options_ignore_own_level() {
        let papers = sample();
        let filters = Filters::default()
            .with(Level::Programme, "M.Tech")
            .with(Level::Branch, "CSE");

        let branches = filter_options(&papers, Level::Branch, &filters);
        assert_eq!(branches, vec!["CSE", "Mech"]);

        let years = filter_options(&papers, Level::Year, &filters);
        assert_eq!(years, vec!["2022"]);
    }

    #[test]
    fn test_filter_options_sorted_distinct_without_sentinel() {
        let papers = sample();
        let none = Filters::default();

        assert_eq!(
            filter_options(&papers, Level::Year, &none),
            vec!["2023", "2022", "2021"]
        );
        assert_eq!(
            filter_options(&papers, Level::Term, &none),
            vec!["May/June", "Mid Sem", "Dec/Jan"]
        );
        assert_eq!(
            filter_options(&papers, Level::Semester, &none),
            vec!["I Sem", "III Sem", "V Sem"]
        );
        assert_eq!(
            filter_options(&papers, Level::Programme, &none),
            vec!["B.Tech", "M.Tech"]
        );
    }

    #[test]
    fn test_all_filter_options() {
        let papers = sample();
        let all = all_filter_options(&papers);
        assert_eq!(all.years, vec!["2023", "2022", "2021"]);
        assert_eq!(all.branches, vec!["CSE", "Civil", "ECE", "Mech"]);
        assert!(!all.terms.iter().any(|t| t == "all"));
    }
}
