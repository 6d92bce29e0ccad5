//! Claim parser entry points
//!
//! Two adapters feed the shared extraction → tokenizing → dependency →
//! linking stages: raw claim-set blocks go through preamble stripping and
//! segmentation first, pre-segmented claims skip segmentation.

use crate::config::ParserConfig;
use crate::dependency::resolve_dependencies;
use crate::error::ClaimParseError;
use crate::extract::{self, extract_claim, split_marker, ExtractedClaim};
use crate::graph::link_claims;
use crate::limitations::{decapitalize_leading_word, tokenize, tokenize_fragments};
use crate::preprocess::strip_preamble;
use crate::segment::{is_valid_range, strip_reissue_closers, Segments};
use crate::types::{BatchMetadata, BatchReport, DocumentOutcome};
use claimset_domain::{Claim, ClaimInput, ClaimNumber, ClaimSet, ClaimText, ClaimTextSource, ReissueMarkup};
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Parses patent claim text into linked claim sets
///
/// The parser holds only its configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct ClaimParser {
    config: ParserConfig,
}

impl ClaimParser {
    /// Create a parser, rejecting invalid configuration
    pub fn new(config: ParserConfig) -> Result<Self, ClaimParseError> {
        config.validate().map_err(ClaimParseError::Config)?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a raw claim-set block
    pub fn parse(&self, text: &str) -> Result<ClaimSet, ClaimParseError> {
        let claims = self.iter_raw(text)?.collect::<Result<Vec<_>, _>>()?;
        let set = link_claims(claims);
        info!(
            "Parsed {} claims ({} independent, {} anomalies)",
            set.len(),
            set.independent_claims().count(),
            set.anomalies().len()
        );
        Ok(set)
    }

    /// Lazily parse a raw claim-set block, one claim at a time
    ///
    /// Claims come out without reverse edges, since those need the whole set.
    /// Cloning the iterator restarts from the same position.
    pub fn iter_raw<'a>(&'a self, text: &'a str) -> Result<ClaimIter<'a>, ClaimParseError> {
        self.check_length(text)?;
        debug!("Parsing raw claim block, text length {}", text.len());

        let cleaned = if self.config.strip_preamble {
            strip_preamble(text)
        } else {
            text
        };

        Ok(ClaimIter {
            parser: self,
            segments: Segments::new(cleaned, self.config.max_range_span),
            preceding: Vec::new(),
            emitted: false,
            finished: false,
        })
    }

    /// Parse claims already delimited by an upstream document parser
    ///
    /// Items without a leading number take the next number in sequence. An
    /// item marked with a range such as `2-4.` yields one claim per number. A
    /// first item that is only a preamble is skipped.
    pub fn parse_segmented<I, C>(&self, items: I) -> Result<ClaimSet, ClaimParseError>
    where
        I: IntoIterator<Item = C>,
        C: Into<ClaimInput>,
    {
        let inputs: Vec<ClaimInput> = items
            .into_iter()
            .map(Into::into)
            .filter(|input: &ClaimInput| !input.is_blank())
            .collect();

        let total_len: usize = inputs
            .iter()
            .flat_map(|input| input.fragments.iter())
            .map(String::len)
            .sum();
        if total_len > self.config.max_text_length {
            return Err(ClaimParseError::TextTooLong(total_len, self.config.max_text_length));
        }
        debug!("Parsing {} pre-segmented claims", inputs.len());

        let mut claims: Vec<Claim> = Vec::with_capacity(inputs.len());
        let mut preceding: Vec<ClaimNumber> = Vec::with_capacity(inputs.len());
        let mut next_number: ClaimNumber = 1;

        for input in &inputs {
            let Some(entry) = self.segmented_entry(input, next_number, claims.is_empty())? else {
                continue;
            };

            if let Some(previous) = preceding.last() {
                if entry.first <= *previous {
                    return Err(ClaimParseError::malformed(format!(
                        "claim {} follows claim {}; numbers must increase",
                        entry.first, previous
                    )));
                }
            }

            for number in entry.first..=entry.last {
                claims.push(self.segmented_claim(&entry, number, &preceding)?);
                preceding.push(number);
            }
            next_number = entry.last.checked_add(1).ok_or_else(|| {
                ClaimParseError::malformed(format!("claim number {} is too large", entry.last))
            })?;
        }

        if claims.is_empty() {
            return Err(ClaimParseError::malformed("pre-segmented input holds no claims"));
        }

        let set = link_claims(claims);
        info!(
            "Parsed {} pre-segmented claims ({} anomalies)",
            set.len(),
            set.anomalies().len()
        );
        Ok(set)
    }

    /// Parse whatever claim text a document source provides
    pub fn parse_source<S>(&self, source: &S) -> Result<ClaimSet, ClaimParseError>
    where
        S: ClaimTextSource,
        S::Error: Display,
    {
        let text = source
            .claim_text()
            .map_err(|e| ClaimParseError::Source(e.to_string()))?;

        match text {
            ClaimText::Raw(text) => self.parse(&text),
            ClaimText::Segmented(items) => self.parse_segmented(items),
        }
    }

    /// Parse many documents, isolating failures per document
    pub fn parse_batch<'s, S, I>(&self, sources: I) -> BatchReport
    where
        S: ClaimTextSource + 's,
        S::Error: Display,
        I: IntoIterator<Item = &'s S>,
    {
        let start = Instant::now();

        let documents: Vec<DocumentOutcome> = sources
            .into_iter()
            .map(|source| {
                let result = self.parse_source(source);
                if let Err(e) = &result {
                    warn!("Document '{}' failed to parse: {}", source.document_id(), e);
                }
                DocumentOutcome {
                    document_id: source.document_id().to_string(),
                    result,
                }
            })
            .collect();

        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let metadata = BatchMetadata::from_outcomes(&documents, elapsed_ms);
        info!(
            "Batch parsed {} documents, {} failed",
            metadata.total_documents, metadata.failed_documents
        );

        BatchReport { documents, metadata }
    }

    fn check_length(&self, text: &str) -> Result<(), ClaimParseError> {
        if text.len() > self.config.max_text_length {
            return Err(ClaimParseError::TextTooLong(text.len(), self.config.max_text_length));
        }
        Ok(())
    }

    /// Number one pre-segmented item
    ///
    /// The item's own marker wins, possibly covering a range of numbers; an
    /// unmarked item takes `next_number`. Returns `None` when the item held
    /// nothing but a preamble.
    fn segmented_entry<'i>(
        &self,
        input: &'i ClaimInput,
        next_number: ClaimNumber,
        leading: bool,
    ) -> Result<Option<SegmentedEntry<'i>>, ClaimParseError> {
        let mut fragments: Vec<&str> = input
            .fragments
            .iter()
            .map(String::as_str)
            .filter(|f| !f.trim().is_empty())
            .collect();

        if leading && self.config.strip_preamble {
            if let Some(lead) = fragments.first_mut() {
                *lead = strip_preamble(*lead);
            }
            if fragments.first().is_some_and(|f| f.trim().is_empty()) {
                fragments.remove(0);
            }
        }
        let Some(lead) = fragments.first_mut() else {
            debug!("Skipping preamble-only claim entry");
            return Ok(None);
        };

        let (first, last, markup) = match split_marker(*lead) {
            Some(marker) => {
                *lead = marker.rest;
                (marker.first, marker.last, marker.markup)
            }
            None => (next_number, next_number, None),
        };
        if first == 0 {
            return Err(ClaimParseError::malformed("claim number 0 is not a positive integer"));
        }
        if !is_valid_range(first, last, self.config.max_range_span) {
            return Err(ClaimParseError::malformed(format!("invalid claim range {}-{}", first, last)));
        }
        if last > first {
            debug!("Expanding claim range {}-{}", first, last);
        }

        Ok(Some(SegmentedEntry {
            first,
            last,
            markup,
            fragments,
        }))
    }

    /// Build claim `number` of a numbered pre-segmented item
    fn segmented_claim(
        &self,
        entry: &SegmentedEntry<'_>,
        number: ClaimNumber,
        preceding: &[ClaimNumber],
    ) -> Result<Claim, ClaimParseError> {
        let extracted = extract::build(number, entry.markup, &entry.fragments.join(" "))?;
        let limitations = if entry.fragments.len() > 1 {
            let mut owned: Vec<String> = entry.fragments.iter().map(|f| f.to_string()).collect();
            if entry.markup.is_some() {
                if let Some(last) = owned.last_mut() {
                    *last = strip_reissue_closers(last);
                }
            }
            tokenize_fragments(&owned)
        } else {
            tokenize(&extracted.body)
        };
        Ok(self.build_claim(extracted, limitations, preceding))
    }

    /// Shared stages after extraction: limitations and dependencies
    fn build_claim(
        &self,
        extracted: ExtractedClaim,
        mut limitations: Vec<String>,
        preceding: &[ClaimNumber],
    ) -> Claim {
        if !self.config.preserve_case {
            decapitalize_leading_word(&mut limitations);
        }
        let depends_on = resolve_dependencies(extracted.number, &extracted.body, preceding, &self.config);

        Claim::new(extracted.number, limitations, depends_on)
            .with_status(extracted.status)
            .with_markup(extracted.markup)
    }
}

/// A pre-segmented item after numbering, covering `first..=last`
#[derive(Debug)]
struct SegmentedEntry<'i> {
    first: ClaimNumber,
    last: ClaimNumber,
    markup: Option<ReissueMarkup>,
    fragments: Vec<&'i str>,
}

/// Lazy iterator over the claims of a raw block, without reverse edges
///
/// Yields a single `MalformedClaimSet` error when the block holds no claim
/// marker, and stops after the first error.
#[derive(Debug, Clone)]
pub struct ClaimIter<'a> {
    parser: &'a ClaimParser,
    segments: Segments<'a>,
    /// Numbers already yielded, ascending
    preceding: Vec<ClaimNumber>,
    emitted: bool,
    finished: bool,
}

impl Iterator for ClaimIter<'_> {
    type Item = Result<Claim, ClaimParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let Some(segment) = self.segments.next() else {
            self.finished = true;
            if self.emitted {
                return None;
            }
            return Some(Err(ClaimParseError::malformed("no claim number marker found")));
        };
        self.emitted = true;

        let result = extract_claim(&segment).map(|extracted| {
            let limitations = tokenize(&extracted.body);
            self.parser.build_claim(extracted, limitations, &self.preceding)
        });
        match &result {
            Ok(claim) => self.preceding.push(claim.number),
            Err(_) => self.finished = true,
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimset_domain::ClaimStatus;

    #[test]
    fn test_parser_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClaimParser>();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ParserConfig {
            max_text_length: 0,
            ..ParserConfig::default()
        };
        assert!(matches!(ClaimParser::new(config), Err(ClaimParseError::Config(_))));
    }

    #[test]
    fn test_text_too_long() {
        let parser = ClaimParser::new(ParserConfig {
            max_text_length: 10,
            ..ParserConfig::default()
        })
        .unwrap();
        let err = parser.parse("1. A widget comprising a frame.").unwrap_err();
        assert!(matches!(err, ClaimParseError::TextTooLong(_, 10)));
    }

    #[test]
    fn test_preamble_stripped() {
        let parser = ClaimParser::default();
        let set = parser.parse("What is claimed is:\n1. A widget.\n2. The widget of claim 1.").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().limitations, vec!["a widget."]);
    }

    #[test]
    fn test_preserve_case() {
        let parser = ClaimParser::new(ParserConfig {
            preserve_case: true,
            ..ParserConfig::default()
        })
        .unwrap();
        let set = parser.parse("1. A widget.").unwrap();
        assert_eq!(set.get(1).unwrap().limitations, vec!["A widget."]);
    }

    #[test]
    fn test_lazy_iteration_stops_early() {
        let parser = ClaimParser::default();
        let text = "1. A widget.\n2. The widget of claim 1.\n3. The widget of claim 2.";
        let first: Vec<Claim> = parser
            .iter_raw(text)
            .unwrap()
            .take(1)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].number, 1);

        let all = parser.iter_raw(text).unwrap();
        assert_eq!(all.clone().count(), 3);
        assert!(all.map(|c| c.unwrap()).all(|c| c.dependent_claims.is_empty()));
    }

    #[test]
    fn test_lazy_iteration_reports_malformed_once() {
        let parser = ClaimParser::default();
        let mut iter = parser.iter_raw("See attached appendix.").unwrap();
        assert!(iter.next().unwrap().unwrap_err().is_malformed());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_segmented_with_numbers() {
        let parser = ClaimParser::default();
        let set = parser
            .parse_segmented(vec!["1. A widget.", "2. The widget of claim 1."])
            .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(2).unwrap().depends_on, vec![1]);
        assert!(set.get(1).unwrap().dependent_claims.contains(&2));
    }

    #[test]
    fn test_segmented_counter_numbering() {
        let parser = ClaimParser::default();
        let set = parser
            .parse_segmented(vec![
                "What is claimed is:",
                "A widget.",
                "The widget of claim 1.",
                "5. A gadget.",
                "The gadget of claim 5.",
            ])
            .unwrap();
        let numbers: Vec<_> = set.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2, 5, 6]);
        assert_eq!(set.get(6).unwrap().depends_on, vec![5]);
    }

    #[test]
    fn test_segmented_cancelled_range() {
        let parser = ClaimParser::default();
        let set = parser
            .parse_segmented(vec!["1. A widget.", "2-4. (Canceled)", "5. The widget of claim 1."])
            .unwrap();
        let numbers: Vec<_> = set.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        for number in 2..=4 {
            let claim = set.get(number).unwrap();
            assert_eq!(claim.status, ClaimStatus::Cancelled);
            assert_eq!(claim.body(), "(Canceled)");
        }
        assert_eq!(set.get(5).unwrap().depends_on, vec![1]);
    }

    #[test]
    fn test_segmented_range_continues_counter() {
        let parser = ClaimParser::default();
        let set = parser
            .parse_segmented(vec!["1. A widget.", "2 to 3) (Cancelled)", "The widget of claim 1."])
            .unwrap();
        let numbers: Vec<_> = set.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_segmented_bad_range_is_malformed() {
        let parser = ClaimParser::default();
        assert!(parser
            .parse_segmented(vec!["1. A widget.", "4-2. (Canceled)"])
            .unwrap_err()
            .is_malformed());
        assert!(parser
            .parse_segmented(vec!["1. A widget.", "2-900. (Canceled)"])
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn test_claim_zero_is_malformed() {
        let parser = ClaimParser::default();
        let err = parser.parse_segmented(vec!["0. A widget."]).unwrap_err();
        assert!(err.to_string().contains("claim number 0"));
        assert!(parser.parse_segmented(vec!["0-2. (Canceled)"]).unwrap_err().is_malformed());
        assert!(parser.parse("0. A widget.").unwrap_err().is_malformed());
    }

    #[test]
    fn test_any_preceding_is_bounded_by_present_claims() {
        let parser = ClaimParser::default();
        let set = parser
            .parse("1. A widget.\n20000000. The widget of any of the preceding claims.")
            .unwrap();
        assert_eq!(set.get(20_000_000).unwrap().depends_on, vec![1]);
        assert!(!set.has_anomalies());

        let set = parser
            .parse_segmented(vec!["1. A widget.", "4000000000. The widget of any preceding claim."])
            .unwrap();
        assert_eq!(set.get(4_000_000_000).unwrap().depends_on, vec![1]);
    }

    #[test]
    fn test_segmented_fragments_stitch_and() {
        let parser = ClaimParser::default();
        let set = parser
            .parse_segmented(vec![ClaimInput::fragments([
                "1. A widget comprising:",
                "a frame;",
                "and a handle attached to the frame.",
            ])])
            .unwrap();
        assert_eq!(
            set.get(1).unwrap().limitations,
            vec!["a widget comprising:", "a frame; and", "a handle attached to the frame."]
        );
    }

    #[test]
    fn test_segmented_out_of_order_is_malformed() {
        let parser = ClaimParser::default();
        let err = parser
            .parse_segmented(vec!["2. A widget.", "1. A gadget."])
            .unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_segmented_empty_is_malformed() {
        let parser = ClaimParser::default();
        let items: Vec<&str> = vec!["What is claimed is:", "   "];
        assert!(parser.parse_segmented(items).unwrap_err().is_malformed());
    }

    #[test]
    fn test_segmented_reissue_and_cancelled() {
        let parser = ClaimParser::default();
        let set = parser
            .parse_segmented(vec![".[1. A widget.].", "2. (Canceled)", ".Iadd.3. A gadget. .Iaddend."])
            .unwrap();
        assert_eq!(set.get(1).unwrap().markup, Some(ReissueMarkup::Bracketed));
        assert_eq!(set.get(1).unwrap().limitations, vec!["a widget."]);
        assert_eq!(set.get(2).unwrap().status, ClaimStatus::Cancelled);
        assert_eq!(set.get(3).unwrap().markup, Some(ReissueMarkup::Added));
        assert_eq!(set.get(3).unwrap().limitations, vec!["a gadget."]);
    }
}
