//! Claim number extraction from a single marker + body segment

use crate::error::ClaimParseError;
use crate::segment::strip_reissue_closers;
use claimset_domain::{ClaimNumber, ClaimStatus, ReissueMarkup};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Leading claim number or range, then `.` or `)` and whitespace
    static ref NUMBER_PATTERN: Regex = Regex::new(
        r"^\s*(?P<reissue>\.Iadd\.|\.\[)?(?P<number>\d+)(?:[ \t]*(?:[-–]|to)[ \t]*(?P<end>\d+)[ \t]*)?[.)](?:\s+|$)"
    )
    .unwrap();

    /// Bodies that are nothing but a cancellation placeholder
    static ref CANCELLED_PATTERN: Regex = Regex::new(
        r"(?i)^[(\[]?\s*(?:canceled|cancelled|deleted)\s*[)\]]?\s*\.?$"
    )
    .unwrap();
}

/// A segment split into its number and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedClaim {
    /// Claim number
    pub number: ClaimNumber,
    /// Body text with the marker removed
    pub body: String,
    /// Cancelled placeholder or active claim
    pub status: ClaimStatus,
    /// Reissue markup carried by the marker
    pub markup: Option<ReissueMarkup>,
}

/// A leading marker covering `first..=last`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LeadingMarker<'a> {
    pub first: ClaimNumber,
    pub last: ClaimNumber,
    pub markup: Option<ReissueMarkup>,
    /// Text after the marker
    pub rest: &'a str,
}

/// Split a leading number or range marker ("2-4.", "5 to 7)") off `text`
pub(crate) fn split_marker(text: &str) -> Option<LeadingMarker<'_>> {
    let caps = NUMBER_PATTERN.captures(text)?;
    let first = caps.name("number")?.as_str().parse().ok()?;
    let last = match caps.name("end") {
        Some(end) => end.as_str().parse().ok()?,
        None => first,
    };
    let markup = caps.name("reissue").map(|m| match m.as_str() {
        ".Iadd." => ReissueMarkup::Added,
        _ => ReissueMarkup::Bracketed,
    });
    Some(LeadingMarker {
        first,
        last,
        markup,
        rest: &text[caps.get(0)?.end()..],
    })
}

/// Split a leading claim-number marker off `text`
///
/// Returns `None` when the text does not start with a single-number marker.
pub fn split_number(text: &str) -> Option<(ClaimNumber, Option<ReissueMarkup>, &str)> {
    let marker = split_marker(text)?;
    (marker.first == marker.last).then_some((marker.first, marker.markup, marker.rest))
}

/// Extract number, body and status from one segment
pub fn extract_claim(segment: &str) -> Result<ExtractedClaim, ClaimParseError> {
    let (number, markup, rest) = split_number(segment).ok_or_else(|| {
        ClaimParseError::malformed(format!("segment has no leading claim number: {:?}", preview(segment)))
    })?;
    build(number, markup, rest)
}

/// Build an extracted claim from an already known number and body
pub(crate) fn build(
    number: ClaimNumber,
    markup: Option<ReissueMarkup>,
    body: &str,
) -> Result<ExtractedClaim, ClaimParseError> {
    let body = if markup.is_some() {
        strip_reissue_closers(body)
    } else {
        body.trim().to_string()
    };
    if body.is_empty() {
        return Err(ClaimParseError::malformed(format!("claim {} has no text", number)));
    }

    Ok(ExtractedClaim {
        number,
        status: classify_status(&body),
        body,
        markup,
    })
}

/// Cancelled when the whole body is a cancellation placeholder
pub fn classify_status(body: &str) -> ClaimStatus {
    if CANCELLED_PATTERN.is_match(body.trim()) {
        ClaimStatus::Cancelled
    } else {
        ClaimStatus::Active
    }
}

fn preview(text: &str) -> String {
    text.chars().take(40).collect()
}
