//! Metadata derivation from scraped path segments and filenames
//!
//! Path segments follow a loose hierarchy: `year / term / [programme] /
//! [semester] / [branch...]`. The filename carries the subject, usually
//! followed by a course code in parentheses, plus exam-type boilerplate that
//! is stripped for display.
//!
//! The subject rejection rules (code-only, "rcs", three characters or fewer)
//! are tuned to the scraped corpus rather than being general rules.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::branch::normalize_branch;

static SEMESTER_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(VIII|VII|VI|V|IV|III|II|I)\s*Sem\b").expect("valid semester regex")
});

static EXAM_BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(mid sem|midterm|end sem|endterm|final|sessional|make up|makeup|quiz|test|exam|paper)\b",
    )
    .expect("valid boilerplate regex")
});

static PDF_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.pdf$").expect("valid suffix regex"));

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("valid space regex"));

static BRACKETED_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[(\[]\s*[A-Z]{2,}[-\s]?\d{3,}\s*[)\]]").expect("valid course code regex")
});

static SQUARE_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").expect("valid regex"));
static PAREN_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*\)").expect("valid regex"));
static TRAILING_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_]+$").expect("valid regex"));
static STRAY_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[()\[\]]").expect("valid regex"));

static CODE_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Z]{2,}[-\s]?\d{3,}\s*)+$").expect("valid course code regex")
});

/// Filenames that reduce to this are not subjects
const GENERIC_SUBJECTS: &[&str] = &["rcs"];
const MIN_SUBJECT_CHARS: usize = 4;
const MIN_TERM_CHARS: usize = 3;

/// Structured fields derived from one raw record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedMetadata {
    pub year: String,
    pub term: String,
    pub name: String,
    pub programme: Option<String>,
    pub semester: Option<String>,
    pub branch: Option<String>,
    pub subject: Option<String>,
}

/// Derive metadata from path segments and the raw filename
///
/// Returns `None` when the record is unusable: fewer than two segments, a
/// first segment that is not a four-digit year, a term under three
/// characters, or a name that is empty once boilerplate is stripped.
pub fn derive_metadata(segments: &[String], raw_name: &str) -> Option<DerivedMetadata> {
    if segments.len() < 2 {
        return None;
    }

    let year = segments[0].as_str();
    if !is_four_digit_year(year) {
        return None;
    }

    let term = collapse_spaces(&segments[1]);
    if term.chars().count() < MIN_TERM_CHARS {
        return None;
    }

    let hierarchy = classify_segments(&segments[2..]);

    let name = clean_name(raw_name)?;
    let subject = extract_subject(&name);

    Some(DerivedMetadata {
        year: year.to_string(),
        term,
        name,
        programme: hierarchy.programme,
        semester: hierarchy.semester,
        branch: hierarchy.branch,
        subject,
    })
}

fn is_four_digit_year(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Replace runs of two or more whitespace characters with one space, then trim
pub fn collapse_spaces(s: &str) -> String {
    MULTI_SPACE.replace_all(s, " ").trim().to_string()
}

/// Programme, semester and branch found below the term segment
#[derive(Debug, Default, PartialEq, Eq)]
struct Hierarchy {
    programme: Option<String>,
    semester: Option<String>,
    branch: Option<String>,
}

fn classify_segments(segments: &[String]) -> Hierarchy {
    let mut semester: Option<String> = None;
    let mut programme: Option<&'static str> = None;
    let mut candidates: Vec<&str> = Vec::new();

    for segment in segments {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        if semester.is_none() {
            if let Some(caps) = SEMESTER_SEGMENT.captures(segment) {
                semester = Some(format!("{} Sem", caps[1].to_uppercase()));
                continue;
            }
        }

        let lower = segment.to_lowercase();
        if lower.contains("m.tech") || lower.contains("m tech") {
            if programme.is_none() {
                programme = Some("M.Tech");
            }
            continue;
        }
        if lower.contains("b.tech") || lower.contains("b tech") {
            if programme.is_none() {
                programme = Some("B.Tech");
            }
            continue;
        }

        candidates.push(segment);
    }

    if programme.is_none() && semester.is_some() {
        programme = Some("B.Tech");
    }

    Hierarchy {
        programme: programme.map(str::to_string),
        semester,
        branch: resolve_branch(&candidates),
    }
}

/// Pick the branch from the non-programme, non-semester segments
///
/// The last candidate wins. A raw "CSE" is kept verbatim. When the last
/// candidate normalizes to nothing or to "Sem" (sub-section folders listed
/// after the department), the second-to-last candidate is used instead.
fn resolve_branch(candidates: &[&str]) -> Option<String> {
    let (&last, rest) = candidates.split_last()?;

    let mut branch = if last.eq_ignore_ascii_case("CSE") {
        Some("CSE".to_string())
    } else {
        normalize_branch(last)
    };

    let degenerate = branch
        .as_deref()
        .map_or(true, |b| b.eq_ignore_ascii_case("SEM"));
    if degenerate {
        if let Some(&previous) = rest.last() {
            if let Some(fallback) = normalize_branch(previous) {
                if branch.as_deref() != Some(fallback.as_str()) {
                    branch = Some(fallback);
                }
            }
        }
    }

    branch
}

/// Strip exam-type words and the `.pdf` suffix, collapse whitespace
pub fn clean_name(raw_name: &str) -> Option<String> {
    let without_boilerplate = EXAM_BOILERPLATE.replace_all(raw_name, "");
    let without_suffix = PDF_SUFFIX.replace(&without_boilerplate, "");
    let cleaned = collapse_spaces(without_suffix.trim());
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Best-effort subject: the part of `name` before the bracketed course code
/// (or, when there is none, before the first bracket), with bracketed content
/// and trailing dashes removed
pub fn extract_subject(name: &str) -> Option<String> {
    let separator = BRACKETED_CODE
        .find(name)
        .map(|m| m.start())
        .or_else(|| name.find(|c| c == '(' || c == '['));

    let head = match separator {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };

    let candidate = SQUARE_GROUP.replace_all(head.trim(), "");
    let candidate = PAREN_GROUP.replace_all(&candidate, "");
    let candidate = TRAILING_DASHES.replace(&candidate, "");
    let candidate = MULTI_SPACE.replace_all(&candidate, " ");
    let candidate = STRAY_BRACKETS.replace_all(&candidate, "");
    let candidate = candidate.trim();

    let rejected = candidate.is_empty()
        || CODE_ONLY.is_match(candidate)
        || GENERIC_SUBJECTS
            .iter()
            .any(|g| candidate.eq_ignore_ascii_case(g))
        || candidate.chars().count() < MIN_SUBJECT_CHARS
        || candidate.to_lowercase() == name.to_lowercase();

    if rejected {
        None
    } else {
        Some(candidate.to_string())
    }
}
