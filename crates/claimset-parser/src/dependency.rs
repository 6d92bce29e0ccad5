//! Dependency resolution: which earlier claims a claim body refers to

use crate::config::ParserConfig;
use claimset_domain::ClaimNumber;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// "claim 1", "claims 1, 2 or 3", "claim 1 or claim 2", "claims 1 to 4"
    static ref REFERENCE_PATTERN: Regex = Regex::new(
        r"(?xi)
        \bclaims?\s*\d+
        (?:
            (?:
                \s*,\s*(?:(?:or|and)\s+)?
              | \s+(?:or|and|to|through)\s+
              | \s*[-–]\s*
            )
            (?:claims?\s*)?
            \d+
        )*"
    )
    .unwrap();

    /// Multiple dependency on every earlier claim
    static ref ANY_PRECEDING_PATTERN: Regex = Regex::new(
        r"(?i)\bany\s+(?:one\s+)?of\s+the\s+(?:foregoing|previous|preceding)\s+claims\b|\bany\s+(?:foregoing|previous|preceding)\s+claim\b"
    )
    .unwrap();

    static ref NUMBER: Regex = Regex::new(r"\d+").unwrap();

    /// Separator text that turns two numbers into an inclusive range
    static ref RANGE_SEPARATOR: Regex = Regex::new(r"(?i)[-–]|\bto\b|\bthrough\b").unwrap();
}

/// Determine the claims a body depends on, in order of first mention
///
/// `preceding` holds the numbers of the claims parsed before this one, in
/// ascending order. "any of the foregoing claims" wins over any explicit list
/// and yields those of them below `number`. Explicit references are returned
/// as written; whether they resolve is decided when the claim set is linked.
pub fn resolve_dependencies(
    number: ClaimNumber,
    body: &str,
    preceding: &[ClaimNumber],
    config: &ParserConfig,
) -> Vec<ClaimNumber> {
    if refers_to_all_preceding(body) {
        return preceding.iter().copied().filter(|p| *p < number).collect();
    }

    let mut depends_on = Vec::new();
    for span in REFERENCE_PATTERN.find_iter(body) {
        for reference in references_in(span.as_str(), config) {
            if !depends_on.contains(&reference) {
                depends_on.push(reference);
            }
        }
    }
    depends_on
}

/// True for "any of the foregoing claims" and its variants
pub fn refers_to_all_preceding(body: &str) -> bool {
    ANY_PRECEDING_PATTERN.is_match(body)
}

/// Numbers inside one matched reference span, ranges expanded
fn references_in(span: &str, config: &ParserConfig) -> Vec<ClaimNumber> {
    let mut references = Vec::new();
    let mut previous: Option<(ClaimNumber, usize)> = None;

    for m in NUMBER.find_iter(span) {
        let Ok(value) = m.as_str().parse::<ClaimNumber>() else {
            continue;
        };

        if let Some((start, prev_end)) = previous {
            let separator = &span[prev_end..m.start()];
            let is_range = RANGE_SEPARATOR.is_match(separator);
            if is_range && config.expand_reference_ranges && value > start && value - start <= config.max_range_span {
                references.extend(start + 1..value);
            }
        }

        references.push(value);
        previous = Some((value, m.end()));
    }

    references
}
