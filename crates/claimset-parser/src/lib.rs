//! Claimset Parser
//!
//! Turns the claims section of a patent document into a linked claim set.
//!
//! # Overview
//!
//! Claim text arrives either as one raw block ("What is claimed is: 1. A
//! widget ...") or already split into per-claim strings by a structural
//! document parser. Both feed the same stages and produce a
//! [`ClaimSet`] whose claims carry their limitations, the earlier claims they
//! depend on, and the later claims that depend on them.
//!
//! # Architecture
//!
//! ```text
//! raw block ─→ Preprocessor → Segmenter ─┐
//!                                         ├→ Extractor → Tokenizer → Dependencies → Linking → ClaimSet
//! pre-segmented claims ─→ Numbering ─────┘
//! ```
//!
//! # Key Features
//!
//! - **Preamble stripping**: "I claim:", "What is claimed is:" and friends
//! - **Range and reissue markers**: `5-7. (Canceled)`, `.Iadd.12. ... .Iaddend.`
//! - **Dependency resolution**: "claim 1 or claim 2", "claims 1 to 4",
//!   "any of the foregoing claims"
//! - **Referential anomalies**: forward, self and missing references are kept
//!   and reported instead of failing the parse
//! - **Batch processing**: per-document outcomes over any [`ClaimTextSource`]
//!
//! # Example Usage
//!
//! ```
//! use claimset_parser::{ClaimParser, ParserConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let parser = ClaimParser::new(ParserConfig::default())?;
//!
//! let set = parser.parse(
//!     "What is claimed is:\n\
//!      1. A widget comprising: a frame; and a handle attached to the frame.\n\
//!      2. The widget of claim 1, wherein the handle is metal.",
//! )?;
//!
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.get(2).map(|c| c.depends_on.clone()), Some(vec![1]));
//! assert!(set.get(1).is_some_and(|c| c.dependent_claims.contains(&2)));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod config;
mod dependency;
mod error;
mod extract;
mod graph;
mod limitations;
mod parser;
mod preprocess;
mod segment;
mod types;


pub use config::ParserConfig;
pub use dependency::{refers_to_all_preceding, resolve_dependencies};
pub use error::ClaimParseError;
pub use extract::{classify_status, extract_claim, split_number, ExtractedClaim};
pub use graph::link_claims;
pub use limitations::{
    decapitalize_leading_word, normalize_whitespace, stitch_fragments, tokenize, tokenize_fragments,
};
pub use parser::{ClaimIter, ClaimParser};
pub use preprocess::{is_preamble, strip_preamble};
pub use segment::{segment, Segments};
pub use types::{BatchMetadata, BatchReport, DocumentOutcome};

pub use claimset_domain::{
    AnomalyKind, Claim, ClaimInput, ClaimNumber, ClaimSet, ClaimStatus, ClaimText, ClaimTextSource,
    ReferentialAnomaly, ReissueMarkup,
};

/// Result type alias for parser operations
pub type Result<T> = std::result::Result<T, ClaimParseError>;
