//! Sort-order heuristics
//!
//! Each rank function maps a value to an integer (lower sorts first); ties
//! are broken by plain string comparison. Absent values rank 99. The same
//! functions drive the catalog sort and the filter-option sort.

use std::cmp::Ordering;

use crate::models::{Level, Paper};

/// Rank for an absent value
pub const RANK_MISSING: u32 = 99;
/// Semester that does not start with a Roman numeral I..VIII
pub const RANK_UNPARSED_SEMESTER: u32 = 98;
/// Programme that is neither B.Tech nor M.Tech
pub const RANK_OTHER_PROGRAMME: u32 = 50;

/// Term rules: first rule whose keywords appear (case-insensitive) wins
const TERM_RULES: &[(&[&str], u32)] = &[
    (&["may", "jun", "jul", "apr"], 1),
    (&["mid"], 2),
    (&["dec", "nov", "jan", "feb"], 3),
];
const RANK_OTHER_TERM: u32 = 4;

/// Programme rules, matched against the upper-cased value
const PROGRAMME_RULES: &[(&str, u32)] = &[("B.TECH", 1), ("M.TECH", 2)];

/// Roman numerals accepted as a semester prefix, longest first
const SEMESTER_NUMERALS: &[&str] = &["VIII", "VII", "VI", "V", "IV", "III", "II", "I"];

pub fn term_rank(term: Option<&str>) -> u32 {
    let Some(term) = term.filter(|t| !t.is_empty()) else {
        return RANK_MISSING;
    };
    let lower = term.to_lowercase();
    TERM_RULES
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| lower.contains(k)))
        .map(|(_, rank)| *rank)
        .unwrap_or(RANK_OTHER_TERM)
}

pub fn programme_rank(programme: Option<&str>) -> u32 {
    let Some(programme) = programme.filter(|p| !p.is_empty()) else {
        return RANK_MISSING;
    };
    let upper = programme.to_uppercase();
    PROGRAMME_RULES
        .iter()
        .find(|(key, _)| upper.contains(key))
        .map(|(_, rank)| *rank)
        .unwrap_or(RANK_OTHER_PROGRAMME)
}

pub fn semester_rank(semester: Option<&str>) -> u32 {
    let Some(semester) = semester.filter(|s| !s.is_empty()) else {
        return RANK_MISSING;
    };
    let upper = semester.to_uppercase();
    leading_numeral(&upper)
        .map(roman_value)
        .filter(|v| (1..=8).contains(v))
        .unwrap_or(RANK_UNPARSED_SEMESTER)
}

/// Longest Roman numeral prefix (I..VIII) that ends at a word boundary
fn leading_numeral(upper: &str) -> Option<&str> {
    SEMESTER_NUMERALS.iter().copied().find(|numeral| {
        upper.strip_prefix(numeral).is_some_and(|rest| {
            rest.chars()
                .next()
                .map_or(true, |c| !(c.is_ascii_alphanumeric() || c == '_'))
        })
    })
}

/// Subtractive Roman numeral evaluation over I, V and X
fn roman_value(numeral: &str) -> u32 {
    let mut total: i64 = 0;
    let mut prev = 0;
    for c in numeral.chars().rev() {
        let value = match c {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            _ => continue,
        };
        if value < prev {
            total -= value;
        } else {
            total += value;
        }
        prev = value;
    }
    total.max(0) as u32
}

/// Rank first, then string order
fn by_rank(a: &str, b: &str, rank: fn(Option<&str>) -> u32) -> Ordering {
    rank(Some(a)).cmp(&rank(Some(b))).then_with(|| a.cmp(b))
}

/// Rank first, then present values in string order before absent ones
fn by_rank_optional(a: Option<&str>, b: Option<&str>, rank: fn(Option<&str>) -> u32) -> Ordering {
    rank(a).cmp(&rank(b)).then_with(|| present_first(a, b))
}

fn present_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Canonical catalog order
///
/// Year descending, then term, programme and semester by rank, then branch
/// (present before absent), then name.
pub fn compare_papers(a: &Paper, b: &Paper) -> Ordering {
    b.year
        .cmp(&a.year)
        .then_with(|| by_rank(&a.term, &b.term, term_rank))
        .then_with(|| {
            by_rank_optional(a.programme.as_deref(), b.programme.as_deref(), programme_rank)
        })
        .then_with(|| {
            by_rank_optional(a.semester.as_deref(), b.semester.as_deref(), semester_rank)
        })
        .then_with(|| present_first(a.branch.as_deref(), b.branch.as_deref()))
        .then_with(|| a.name.cmp(&b.name))
}

/// Order of distinct option values for one filter dimension
pub fn compare_options(level: Level, a: &str, b: &str) -> Ordering {
    match level {
        Level::Year => compare_years_desc(a, b),
        Level::Programme => by_rank(a, b, programme_rank),
        Level::Term => by_rank(a, b, term_rank),
        Level::Semester => by_rank(a, b, semester_rank),
        Level::Branch => a.cmp(b),
    }
}

/// Numeric descending; unparsable years after numeric ones
fn compare_years_desc(a: &str, b: &str) -> Ordering {
    match (a.parse::<u32>(), b.parse::<u32>()) {
        (Ok(x), Ok(y)) => y.cmp(&x).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
