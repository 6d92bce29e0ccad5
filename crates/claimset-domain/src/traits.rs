//! Trait definitions for external interactions
//!
//! Document retrieval and XML/HTML extraction live outside this workspace.
//! Those layers hand claim text to the parser through [`ClaimTextSource`].

/// One pre-segmented claim as delivered by an upstream document parser
///
/// Most sources deliver one string per claim. Structural parsers that split
/// a claim into its limitation elements deliver several fragments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClaimInput {
    /// Ordered fragments of the claim; the first usually carries the number
    pub fragments: Vec<String>,
}

impl ClaimInput {
    /// A claim delivered as a single string
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            fragments: vec![text.into()],
        }
    }

    /// A claim delivered as ordered limitation fragments
    pub fn fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// True if every fragment is blank
    pub fn is_blank(&self) -> bool {
        self.fragments.iter().all(|f| f.trim().is_empty())
    }
}

impl From<String> for ClaimInput {
    fn from(text: String) -> Self {
        Self::single(text)
    }
}

impl From<&str> for ClaimInput {
    fn from(text: &str) -> Self {
        Self::single(text)
    }
}

impl From<Vec<String>> for ClaimInput {
    fn from(fragments: Vec<String>) -> Self {
        Self { fragments }
    }
}

impl From<Vec<&str>> for ClaimInput {
    fn from(fragments: Vec<&str>) -> Self {
        Self::fragments(fragments)
    }
}

/// Claim-section text in one of the two accepted shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimText {
    /// The whole claim section as one block
    Raw(String),

    /// Claims already delimited by the document format
    Segmented(Vec<ClaimInput>),
}

/// Trait for anything that can hand over a document's claim text
///
/// Implemented by the document-fetching layers (office API clients, XML
/// readers). The parser never performs I/O itself.
pub trait ClaimTextSource {
    /// Error type for retrieval or extraction
    type Error;

    /// Identifier used in batch reports (publication number, file path)
    fn document_id(&self) -> &str;

    /// Produce the claim text
    fn claim_text(&self) -> Result<ClaimText, Self::Error>;
}
