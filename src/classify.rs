use crate::model::AddressType;

const PO_BOX_PATTERNS: &[&str] = &["po box", "p.o. box", "p o box", "post office box"];

/// Matched as plain substrings, so "suites" or "stem" count as commercial too.
const COMMERCIAL_KEYWORDS: &[&str] = &["suite", "ste", "floor", "building", "office", "plaza", "center", "mall"];

struct Rule {
    patterns: &'static [&'static str],
    outcome: AddressType,
}

impl Rule {
    fn matches(&self, street: &str) -> bool {
        self.patterns.iter().any(|pattern| street.contains(pattern))
    }
}

/// evaluated top-down, the first matching rule wins
const RULES: &[Rule] = &[
    Rule { patterns: PO_BOX_PATTERNS, outcome: AddressType::PoBox },
    Rule { patterns: COMMERCIAL_KEYWORDS, outcome: AddressType::Commercial },
];

/// Classify a street line. Case-insensitive; anything unmatched is residential.
pub fn classify(street: &str) -> AddressType {
    let street = street.to_lowercase();
    RULES.iter()
        .find(|rule| rule.matches(&street))
        .map(|rule| rule.outcome)
        .unwrap_or(AddressType::Residential)
}
