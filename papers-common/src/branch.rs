//! Branch name normalization
//!
//! Path segments name departments in many spellings ("Computer Science &
//! Engg", "CSE", "Mechanical Engineering"). `normalize_branch` maps them to
//! one canonical label using an ordered rule table:
//!
//! 1. Keyword rules, first match wins (`BRANCH_RULES`)
//! 2. Canonical short forms, so normalizing a normalized value is a no-op
//! 3. Known long names, compared with the " engg"/" engineering" suffix removed
//! 4. Title-case of each space/hyphen separated word

/// One keyword rule: every `all_of` keyword present, no `none_of` keyword present
#[derive(Debug, Clone, Copy)]
pub struct BranchRule {
    pub all_of: &'static [&'static str],
    pub none_of: &'static [&'static str],
    pub canonical: &'static str,
}

impl BranchRule {
    const fn new(all_of: &'static [&'static str], canonical: &'static str) -> Self {
        Self {
            all_of,
            none_of: &[],
            canonical,
        }
    }

    const fn excluding(mut self, none_of: &'static [&'static str]) -> Self {
        self.none_of = none_of;
        self
    }

    /// `lower` must already be lower-cased and trimmed
    pub fn matches(&self, lower: &str) -> bool {
        self.all_of.iter().all(|k| lower.contains(k))
            && !self.none_of.iter().any(|k| lower.contains(k))
    }
}

/// Keyword rules in priority order. Order matters: "electrical & electronics"
/// must hit EEE before the ECE rule sees "electronic", and "mechatronics"
/// must not be caught by the Mech rule.
pub const BRANCH_RULES: &[BranchRule] = &[
    BranchRule::new(&["electrical", "electronic"], "EEE"),
    BranchRule::new(&["electronic", "communication"], "ECE"),
    BranchRule::new(&["computer", "science"], "CSE"),
    BranchRule::new(&["information", "tech"], "IT"),
    BranchRule::new(&["mech"], "Mech").excluding(&["mechatronic"]),
    BranchRule::new(&["aero"], "Aero"),
    BranchRule::new(&["civil"], "Civil"),
    BranchRule::new(&["chem"], "Chemical"),
    BranchRule::new(&["bio", "tech"], "Biotech"),
    BranchRule::new(&["mechatronic"], "Mechatronics"),
    BranchRule::new(&["industr", "prod"], "Industrial & Production Engg"),
    BranchRule::new(&["architec"], "Architecture Engg"),
    BranchRule::new(&["automobile"], "Automobile Engg"),
    BranchRule::new(
        &["instrumentation", "control"],
        "Instrumentation & Control Engg",
    ),
    BranchRule::new(&["print", "media"], "Printing & Media Engg"),
];

/// Short codes that no keyword rule produces from themselves
pub const CANONICAL_SHORT_FORMS: &[&str] = &["CSE", "ECE", "EEE", "IT"];

/// Long department names recognised verbatim (case-insensitive)
pub const KNOWN_BRANCHES: &[&str] = &[
    "Aeronautical",
    "Automobile",
    "Biomedical",
    "Biotechnology",
    "Chemical",
    "Civil",
    "Computer & Communication",
    "Computer Science",
    "Electrical & Electronics",
    "Electronics & Communication",
    "Industrial & Production",
    "Information Technology",
    "Instrumentation & Control",
    "Mechanical",
    "Mechatronics",
    "Printing & Media",
];

/// Normalize a raw branch segment to its canonical label
///
/// Returns `None` for empty or whitespace-only input.
pub fn normalize_branch(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();

    if let Some(rule) = BRANCH_RULES.iter().find(|r| r.matches(&lower)) {
        return Some(rule.canonical.to_string());
    }

    if let Some(short) = CANONICAL_SHORT_FORMS
        .iter()
        .find(|s| s.eq_ignore_ascii_case(trimmed))
    {
        return Some(short.to_string());
    }

    let stripped = lower.replace(" engineering", "").replace(" engg", "");
    if let Some(known) = KNOWN_BRANCHES
        .iter()
        .find(|k| k.to_lowercase() == stripped)
    {
        return Some(known.to_string());
    }

    let titled = title_case(trimmed);
    if titled.is_empty() {
        None
    } else {
        Some(titled)
    }
}

fn title_case(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> Option<String> {
        normalize_branch(s)
    }

    #[test]
    fn test_keyword_rules_in_priority_order() {
        assert_eq!(norm("Electrical & Electronics Engg").as_deref(), Some("EEE"));
        assert_eq!(norm("Electronics & Communication").as_deref(), Some("ECE"));
        assert_eq!(norm("Computer Science & Engineering").as_deref(), Some("CSE"));
        assert_eq!(norm("Information Technology").as_deref(), Some("IT"));
        assert_eq!(norm("Mechanical Engineering").as_deref(), Some("Mech"));
        assert_eq!(norm("Aeronautical").as_deref(), Some("Aero"));
        assert_eq!(norm("CIVIL").as_deref(), Some("Civil"));
        assert_eq!(norm("Chemical Engg").as_deref(), Some("Chemical"));
        assert_eq!(norm("Biotechnology").as_deref(), Some("Biotech"));
        assert_eq!(norm("Mechatronics").as_deref(), Some("Mechatronics"));
        assert_eq!(
            norm("Industrial and Production").as_deref(),
            Some("Industrial & Production Engg")
        );
        assert_eq!(norm("Architecture").as_deref(), Some("Architecture Engg"));
        assert_eq!(norm("Automobile").as_deref(), Some("Automobile Engg"));
        assert_eq!(
            norm("Instrumentation and Control Engineering").as_deref(),
            Some("Instrumentation & Control Engg")
        );
        assert_eq!(
            norm("Printing & Media").as_deref(),
            Some("Printing & Media Engg")
        );
    }

    #[test]
    fn test_mech_rule_skips_mechatronics() {
        let rule = BRANCH_RULES
            .iter()
            .find(|r| r.canonical == "Mech")
            .unwrap();
        assert!(rule.matches("mechanical"));
        assert!(!rule.matches("mechatronics"));
    }

    #[test]
    fn test_known_branch_table() {
        assert_eq!(norm("biomedical engg").as_deref(), Some("Biomedical"));
        assert_eq!(
            norm("computer & communication engineering").as_deref(),
            Some("Computer & Communication")
        );
    }

    #[test]
    fn test_title_case_fallback() {
        assert_eq!(norm("physics").as_deref(), Some("Physics"));
        assert_eq!(norm("HUMANITIES-and  social").as_deref(), Some("Humanities And Social"));
        assert_eq!(norm("sem").as_deref(), Some("Sem"));
        // empty words from leading or doubled separators are dropped
        assert_eq!(norm("-abc").as_deref(), Some("Abc"));
        assert_eq!(norm("data--science").as_deref(), Some("Data Science"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(norm(""), None);
        assert_eq!(norm("   "), None);
        assert_eq!(norm("-"), None);
    }

    #[test]
    fn test_idempotent_on_canonical_outputs() {
        let inputs = [
            "Computer Science",
            "cse",
            "Electronics and Communication",
            "Electrical and Electronics",
            "Information Technology",
            "Mechanical",
            "Aeronautical",
            "Civil Engineering",
            "Chemical",
            "Biotechnology",
            "Mechatronics",
            "Industrial & Production",
            "Architecture",
            "Automobile",
            "Instrumentation & Control",
            "Printing & Media",
            "Biomedical",
            "Computer & Communication",
            "Physics",
        ];
        for input in inputs {
            let once = norm(input).unwrap();
            let twice = norm(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }
}
