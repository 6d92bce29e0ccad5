//! Segmentation of a claim-set block into one chunk per claim
//!
//! The segmenter is a small state machine:
//!
//! ```text
//! ScanningPreamble --marker--> AtMarker --body found--> InBody --range done--> AtMarker | Done
//! ```
//!
//! Marker candidates come from a single regex; whether a candidate really
//! opens a claim is decided by the named predicates below, each of which is
//! tested on its own.

use crate::error::ClaimParseError;
use claimset_domain::{ClaimNumber, ReissueMarkup};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::{debug, warn};

lazy_static! {
    /// Claim number candidate: optional reissue prefix, number or range, `.` or `)`
    static ref MARKER_PATTERN: Regex = Regex::new(
        r"(?P<reissue>\.Iadd\.|\.\[)?(?P<start>\d+)(?:[ \t]*(?:[-–]|to)[ \t]*(?P<end>\d+))?[ \t]*[.)]"
    )
    .unwrap();
}

/// A recognized claim-number marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Marker {
    /// Byte offset where the marker starts
    start: usize,
    /// Byte offset just past the marker
    end: usize,
    first: ClaimNumber,
    last: ClaimNumber,
    markup: Option<ReissueMarkup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    /// Nothing emitted yet; text before the first marker is residual preamble
    ScanningPreamble,
    /// Positioned on a marker whose body extent is not yet known
    AtMarker(Marker),
    /// Emitting one segment per number of `marker`'s range
    InBody {
        marker: Marker,
        body_end: usize,
        cursor: u64,
        next: Option<Marker>,
    },
    Done,
}

/// Lazy, restartable iterator over per-claim segments of a claim-set block
///
/// Each item is `"{n}. {body}"`, prefixed with the reissue markup when the
/// marker carried one. Cloning the iterator restarts from the same position.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    max_range_span: u32,
    state: LexState,
}

impl<'a> Segments<'a> {
    /// Create a segmenter over `text`
    pub fn new(text: &'a str, max_range_span: u32) -> Self {
        Self {
            text,
            max_range_span,
            state: LexState::ScanningPreamble,
        }
    }

    fn find_marker(&self, from: usize, previous: Option<ClaimNumber>) -> Option<Marker> {
        let mut pos = from;
        while pos <= self.text.len() {
            let caps = MARKER_PATTERN.captures_at(self.text, pos)?;
            let whole = caps.get(0)?;
            if let Some(marker) = self.accept_candidate(&caps, previous) {
                return Some(marker);
            }
            // Candidates start on an ASCII byte, so +1 stays on a char boundary
            pos = whole.start() + 1;
        }
        None
    }

    fn accept_candidate(&self, caps: &Captures<'_>, previous: Option<ClaimNumber>) -> Option<Marker> {
        let whole = caps.get(0)?;
        let markup = caps.name("reissue").map(|m| {
            if m.as_str() == ".Iadd." {
                ReissueMarkup::Added
            } else {
                ReissueMarkup::Bracketed
            }
        });
        let first: ClaimNumber = caps.name("start")?.as_str().parse().ok()?;
        let last: ClaimNumber = match caps.name("end") {
            Some(end) => end.as_str().parse().ok()?,
            None => first,
        };

        if !has_clean_left_edge(self.text, whole.start()) {
            return None;
        }
        if !is_valid_range(first, last, self.max_range_span) {
            if caps.name("end").is_some() {
                warn!("Ignoring claim range marker {:?}", whole.as_str());
            }
            return None;
        }

        let line_start = is_line_start(self.text, whole.start());
        let accepted = if markup.is_some() || line_start {
            opens_claim_body(self.text, whole.end(), false)
                && continues_sequence(first, previous, true)
        } else {
            follows_clause_end(self.text, whole.start())
                && opens_claim_body(self.text, whole.end(), true)
                && continues_sequence(first, previous, false)
        };

        accepted.then_some(Marker {
            start: whole.start(),
            end: whole.end(),
            first,
            last,
            markup,
        })
    }

    fn segment_text(&self, marker: &Marker, body_end: usize, number: ClaimNumber) -> String {
        let body = strip_reissue_closers(self.text[marker.end..body_end].trim());
        let prefix = match marker.markup {
            Some(ReissueMarkup::Added) => ".Iadd.",
            Some(ReissueMarkup::Bracketed) => ".[",
            None => "",
        };
        format!("{}{}. {}", prefix, number, body)
    }
}

impl Iterator for Segments<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            match self.state {
                LexState::ScanningPreamble => match self.find_marker(0, None) {
                    Some(marker) => {
                        if marker.start > 0 {
                            debug!("Discarding {} bytes before the first claim marker", marker.start);
                        }
                        self.state = LexState::AtMarker(marker);
                    }
                    None => self.state = LexState::Done,
                },
                LexState::AtMarker(marker) => {
                    let next = self.find_marker(marker.end, Some(marker.last));
                    let body_end = next.map_or(self.text.len(), |n| n.start);
                    self.state = LexState::InBody {
                        marker,
                        body_end,
                        cursor: u64::from(marker.first),
                        next,
                    };
                }
                LexState::InBody {
                    marker,
                    body_end,
                    cursor,
                    next,
                } => {
                    if cursor <= u64::from(marker.last) {
                        self.state = LexState::InBody {
                            marker,
                            body_end,
                            cursor: cursor + 1,
                            next,
                        };
                        // cursor lies within marker.first..=marker.last
                        let number = cursor as ClaimNumber;
                        return Some(self.segment_text(&marker, body_end, number));
                    }
                    self.state = match next {
                        Some(next) => LexState::AtMarker(next),
                        None => LexState::Done,
                    };
                }
                LexState::Done => return None,
            }
        }
    }
}

/// Split a claim-set block into per-claim segments
///
/// Fails with [`ClaimParseError::MalformedClaimSet`] when no claim marker is
/// found anywhere in the text.
pub fn segment(text: &str, max_range_span: u32) -> Result<Vec<String>, ClaimParseError> {
    let segments: Vec<String> = Segments::new(text, max_range_span).collect();
    if segments.is_empty() {
        return Err(ClaimParseError::malformed("no claim number marker found"));
    }
    debug!("Segmented claim set into {} claims", segments.len());
    Ok(segments)
}

/// The candidate starts the text or follows whitespace
pub(crate) fn has_clean_left_edge(text: &str, pos: usize) -> bool {
    text[..pos].chars().next_back().map_or(true, char::is_whitespace)
}

/// Only whitespace precedes `pos` on its line
pub(crate) fn is_line_start(text: &str, pos: usize) -> bool {
    let line_begin = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    text[line_begin..pos].trim().is_empty()
}

/// The last non-space character before `pos` ends a sentence or clause
///
/// A period closing an abbreviation such as "Fig." does not count.
pub(crate) fn follows_clause_end(text: &str, pos: usize) -> bool {
    let before = text[..pos].trim_end();
    match before.chars().next_back() {
        Some('.') => !ends_with_abbreviation(before),
        Some(';' | ':' | ')' | ']') => true,
        _ => false,
    }
}

/// Abbreviations that are usually followed by a number
const ABBREVIATIONS: &[&str] = &[
    "fig.", "figs.", "no.", "nos.", "pat.", "ref.", "ex.", "sec.", "vol.", "approx.", "e.g.", "i.e.",
];

fn ends_with_abbreviation(text: &str) -> bool {
    let word = text
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(['(', '[']);
    ABBREVIATIONS.iter().any(|a| word.eq_ignore_ascii_case(a))
}

/// The marker ending at `end` is followed by whitespace or the end of text
///
/// With `strict`, the body must also open like a sentence: an uppercase
/// letter, `(` or `[`.
pub(crate) fn opens_claim_body(text: &str, end: usize, strict: bool) -> bool {
    let rest = &text[end..];
    let Some(first) = rest.chars().next() else {
        return true;
    };
    if !first.is_whitespace() {
        return false;
    }
    if !strict {
        return true;
    }
    match rest.trim_start().chars().next() {
        Some(c) => c.is_uppercase() || c == '(' || c == '[',
        None => true,
    }
}

/// Claim numbers only move forward
///
/// Loose markers (line starts, reissue markup) may skip numbers; markers
/// found mid-line must be exactly the next number.
pub(crate) fn continues_sequence(first: ClaimNumber, previous: Option<ClaimNumber>, loose: bool) -> bool {
    match previous {
        None => loose || first == 1,
        Some(prev) if loose => first > prev,
        Some(prev) => prev.checked_add(1) == Some(first),
    }
}

/// A (possibly single-number) range that can be expanded
pub(crate) fn is_valid_range(first: ClaimNumber, last: ClaimNumber, max_span: u32) -> bool {
    first > 0 && last >= first && last - first < max_span
}

/// Remove reissue closing tags from a claim body
pub(crate) fn strip_reissue_closers(body: &str) -> String {
    let body = body.replace(".Iaddend.", "");
    let body = body.trim_end();
    let body = match body.strip_suffix(".].") {
        Some(stripped) => format!("{}.", stripped),
        None => match body.strip_suffix("].") {
            Some(stripped) => format!("{}.", stripped),
            None => body.to_string(),
        },
    };
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPAN: u32 = 200;

    #[test]
    fn test_one_segment_per_line() {
        let text = "1. A widget.\n2. The widget of claim 1.\n3. The widget of claim 2.";
        let segments = segment(text, SPAN).unwrap();
        assert_eq!(
            segments,
            vec!["1. A widget.", "2. The widget of claim 1.", "3. The widget of claim 2."]
        );
    }

    #[test]
    fn test_cancelled_range_expands() {
        let text = "5-7. (Canceled)\n8. A widget as in claim 1, further painted red.";
        let segments = segment(text, SPAN).unwrap();
        assert_eq!(
            segments,
            vec![
                "5. (Canceled)",
                "6. (Canceled)",
                "7. (Canceled)",
                "8. A widget as in claim 1, further painted red."
            ]
        );
    }

    #[test]
    fn test_range_variants() {
        let segments = segment("1. A widget.\n2 - 3. (Cancelled)\n4 to 5) (Canceled)", SPAN).unwrap();
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[2], "3. (Cancelled)");
        assert_eq!(segments[4], "5. (Canceled)");
    }

    #[test]
    fn test_leading_fragment_discarded() {
        let text = "What is claimed is: 1. A widget. 2. The widget of claim 1.";
        let segments = segment(text, SPAN).unwrap();
        assert_eq!(segments, vec!["1. A widget.", "2. The widget of claim 1."]);
    }

    #[test]
    fn test_inline_numbers_are_not_markers() {
        let text = "1. A widget having a 2.5 mm frame and claim 1. Part 3. of it.\n2. The widget of claim 1.";
        let segments = segment(text, SPAN).unwrap();
        assert_eq!(segments.len(), 2);
        assert!(segments[0].contains("2.5 mm"));
        assert!(segments[0].contains("Part 3. of it."));
    }

    #[test]
    fn test_mid_line_marker_must_be_next_number() {
        let text = "1. A widget of size 5. 7. The frame. 2. The widget of claim 1.";
        let segments = segment(text, SPAN).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], "1. A widget of size 5. 7. The frame.");
    }

    #[test]
    fn test_abbreviation_does_not_end_claim() {
        let text = "1. A widget as shown in Fig. 2. The frame is steel.\n2. The widget of claim 1.";
        let segments = segment(text, SPAN).unwrap();
        assert_eq!(
            segments,
            vec!["1. A widget as shown in Fig. 2. The frame is steel.", "2. The widget of claim 1."]
        );

        let text = "1. A widget made per Pat. No. 2. The frame. 2. The widget of claim 1.";
        assert_eq!(segment(text, SPAN).unwrap().len(), 2);
    }

    #[test]
    fn test_line_start_marker_must_increase() {
        let text = "1. A widget comprising:\n1. a frame.\n2. The widget of claim 1.";
        let segments = segment(text, SPAN).unwrap();
        assert_eq!(segments.len(), 2);
        assert!(segments[0].contains("a frame."));
    }

    #[test]
    fn test_reissue_markup() {
        let text = ".[1. A widget comprising a frame.]. .Iadd.2. A widget comprising a handle. .Iaddend.";
        let segments = segment(text, SPAN).unwrap();
        assert_eq!(
            segments,
            vec![".[1. A widget comprising a frame.", ".Iadd.2. A widget comprising a handle."]
        );
    }

    #[test]
    fn test_parenthesis_numbering() {
        let segments = segment("1) A widget.\n2) The widget of claim 1.", SPAN).unwrap();
        assert_eq!(segments, vec!["1. A widget.", "2. The widget of claim 1."]);
    }

    #[test]
    fn test_no_marker_is_malformed() {
        let err = segment("See attached appendix.", SPAN).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_oversized_range_is_ignored() {
        let segments = segment("1. A widget.\n2-900000. (Canceled)", SPAN).unwrap();
        assert_eq!(segments.len(), 1);
        assert!(segments[0].contains("900000"));
    }

    #[test]
    fn test_iterator_is_lazy_and_restartable() {
        let text = "1-100. (Canceled)\n101. A widget.";
        let segments = Segments::new(text, SPAN);
        let first_two: Vec<_> = segments.clone().take(2).collect();
        assert_eq!(first_two, vec!["1. (Canceled)", "2. (Canceled)"]);
        assert_eq!(segments.count(), 101);
    }

    #[test]
    fn test_predicates() {
        assert!(has_clean_left_edge("a 1.", 2));
        assert!(!has_clean_left_edge("a1.", 1));
        assert!(has_clean_left_edge("1.", 0));

        assert!(is_line_start("x\n  2.", 4));
        assert!(!is_line_start("x 2.", 2));

        assert!(follows_clause_end("frame.  2.", 8));
        assert!(follows_clause_end("is: 1.", 4));
        assert!(!follows_clause_end("claim 2.", 6));
        assert!(!follows_clause_end("in Fig. 2.", 8));
        assert!(!follows_clause_end("(FIG. 2.", 6));
        assert!(!follows_clause_end("Nos. 3.", 5));
        assert!(follows_clause_end("a figure. 2.", 10));

        assert!(opens_claim_body("1. A", 2, true));
        assert!(!opens_claim_body("1. a", 2, true));
        assert!(opens_claim_body("1. a", 2, false));
        assert!(!opens_claim_body("1.5", 2, false));
        assert!(opens_claim_body("1.", 2, true));

        assert!(continues_sequence(4, None, true));
        assert!(!continues_sequence(4, None, false));
        assert!(continues_sequence(1, None, false));
        assert!(continues_sequence(9, Some(3), true));
        assert!(!continues_sequence(3, Some(3), true));
        assert!(continues_sequence(4, Some(3), false));
        assert!(!continues_sequence(5, Some(3), false));

        assert!(is_valid_range(6, 8, 10));
        assert!(!is_valid_range(8, 6, 10));
        assert!(!is_valid_range(0, 0, 10));
        assert!(!is_valid_range(1, 20, 10));
    }

    #[test]
    fn test_strip_reissue_closers() {
        assert_eq!(strip_reissue_closers("A widget.]."), "A widget.");
        assert_eq!(strip_reissue_closers("A widget. .Iaddend."), "A widget.");
        assert_eq!(strip_reissue_closers("A widget."), "A widget.");
    }
}
