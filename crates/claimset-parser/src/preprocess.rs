//! Removal of the boilerplate line that precedes the first claim

use tracing::debug;

/// Openers that start a preamble line ("What is claimed is:")
const PREAMBLE_OPENERS: &[&str] = &[
    "i claim",
    "we claim",
    "i we claim",
    "what is claimed",
    "what i claim",
    "what we claim",
    "it is claimed",
    "the invention claimed is",
    "having thus described",
];

/// Lines that are a preamble only when they consist of nothing else
const PREAMBLE_LINES: &[&str] = &["claims", "claim", "the claims", "patent claims"];

/// Strip a single leading preamble line, if the first non-blank line is one
///
/// Never fails: text without a recognizable preamble is returned unchanged.
pub fn strip_preamble(text: &str) -> &str {
    let trimmed = text.trim_start();
    let (first_line, rest) = match trimmed.split_once('\n') {
        Some((line, rest)) => (line, rest),
        None => (trimmed, ""),
    };

    if is_preamble(first_line) {
        debug!("Stripping claim preamble: {:?}", first_line.trim());
        rest
    } else {
        text
    }
}

/// True if a line reads like a claims preamble
///
/// Matching ignores case, punctuation and spacing. A line holding digits is
/// never a preamble since it may already contain the first claim.
pub fn is_preamble(line: &str) -> bool {
    if line.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let normalized = normalize(line);
    if normalized.is_empty() {
        return false;
    }

    PREAMBLE_LINES.contains(&normalized.as_str())
        || PREAMBLE_OPENERS.iter().any(|opener| starts_with_words(&normalized, opener))
}

/// Lowercase, punctuation replaced by spaces, whitespace runs collapsed
fn normalize(line: &str) -> String {
    line.chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn starts_with_words(normalized: &str, opener: &str) -> bool {
    match normalized.strip_prefix(opener) {
        Some(rest) => rest.is_empty() || rest.starts_with(' '),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_preambles() {
        assert!(is_preamble("What is claimed is:"));
        assert!(is_preamble("I claim:"));
        assert!(is_preamble("We Claim"));
        assert!(is_preamble("CLAIMS"));
        assert!(is_preamble("  What   is  claimed  as new and desired to be secured by Letters Patent is:"));
        assert!(is_preamble("I/We claim:"));
        assert!(is_preamble("Claims."));
    }

    #[test]
    fn test_not_preamble() {
        assert!(!is_preamble("1. A widget comprising:"));
        assert!(!is_preamble("What is claimed is: 1. A widget"));
        assert!(!is_preamble("Claimsmanship is an art"));
        assert!(!is_preamble("A claim holder comprising a clip"));
        assert!(!is_preamble(""));
        assert!(!is_preamble("  :  "));
    }

    #[test]
    fn test_strip_removes_only_first_line() {
        let text = "What is claimed is:\n1. A widget.\n2. The widget of claim 1.";
        assert_eq!(strip_preamble(text), "1. A widget.\n2. The widget of claim 1.");
    }

    #[test]
    fn test_strip_skips_leading_blank_lines() {
        let text = "\n\n  I claim:\n1. A widget.";
        assert_eq!(strip_preamble(text), "1. A widget.");
    }

    #[test]
    fn test_strip_passes_through_without_preamble() {
        let text = "1. A widget.\n2. The widget of claim 1.";
        assert_eq!(strip_preamble(text), text);
    }

    #[test]
    fn test_strip_preamble_only_text() {
        assert_eq!(strip_preamble("What is claimed is:"), "");
    }
}
