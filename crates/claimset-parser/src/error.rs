//! Error types for the claim parser

use thiserror::Error;

/// Errors that can occur while parsing a claim set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimParseError {
    /// No claim set can be recovered from the input
    #[error("Malformed claim set: {reason}")]
    MalformedClaimSet {
        /// What was wrong with the input
        reason: String,
    },

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The claim text source failed to deliver text
    #[error("Source error: {0}")]
    Source(String),
}

impl ClaimParseError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ClaimParseError::MalformedClaimSet {
            reason: reason.into(),
        }
    }

    /// True for the fatal "no claim set here" case
    pub fn is_malformed(&self) -> bool {
        matches!(self, ClaimParseError::MalformedClaimSet { .. })
    }
}

impl From<toml::de::Error> for ClaimParseError {
    fn from(e: toml::de::Error) -> Self {
        ClaimParseError::Config(e.to_string())
    }
}
