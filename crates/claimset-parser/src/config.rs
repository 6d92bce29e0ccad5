//! Configuration for the claim parser

use crate::error::ClaimParseError;
use serde::{Deserialize, Serialize};

/// Configuration for the claim parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Remove a leading "What is claimed is:" style line
    pub strip_preamble: bool,

    /// Keep the capital on the first word of each claim body
    pub preserve_case: bool,

    /// Expand "claims 1 to 3" into every number of the range
    pub expand_reference_ranges: bool,

    /// Largest claim-number range ("6-8.") accepted as a marker, and
    /// largest reference range expanded
    pub max_range_span: u32,

    /// Maximum input text length (characters)
    pub max_text_length: usize,
}

impl ParserConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.max_range_span == 0 {
            return Err("max_range_span must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strip_preamble: true,
            preserve_case: false,
            expand_reference_ranges: true,
            max_range_span: 200,
            max_text_length: 1_000_000,
        }
    }
}

impl ParserConfig {
    /// Strict preset: literal text, no reference range expansion, small ranges
    pub fn strict() -> Self {
        Self {
            strip_preamble: true,
            preserve_case: true,
            expand_reference_ranges: false,
            max_range_span: 50,
            max_text_length: 250_000,
        }
    }

    /// Lenient preset: accepts very large documents and wide cancelled ranges
    pub fn lenient() -> Self {
        Self {
            strip_preamble: true,
            preserve_case: false,
            expand_reference_ranges: true,
            max_range_span: 1_000,
            max_text_length: 10_000_000,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ClaimParseError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate().map_err(ClaimParseError::Config)?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ClaimParseError> {
        toml::to_string_pretty(self)
            .map_err(|e| ClaimParseError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}
