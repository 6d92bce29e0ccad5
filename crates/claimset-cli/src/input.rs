//! Reading claim text from files and stdin.

use crate::error::{CliError, Result};
use claimset_domain::{ClaimInput, ClaimText, ClaimTextSource};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};

/// One pre-segmented claim in JSON input: a string or a list of fragments.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SegmentedItem {
    Text(String),
    Fragments(Vec<String>),
}

impl From<SegmentedItem> for ClaimInput {
    fn from(item: SegmentedItem) -> Self {
        match item {
            SegmentedItem::Text(text) => ClaimInput::single(text),
            SegmentedItem::Fragments(fragments) => ClaimInput::fragments(fragments),
        }
    }
}

/// Read a file, or stdin when the path is absent or "-".
pub fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        Some(path) => Ok(fs::read_to_string(path)?),
    }
}

/// Decode a JSON array of pre-segmented claims.
pub fn decode_segmented(json: &str) -> Result<Vec<ClaimInput>> {
    let items: Vec<SegmentedItem> = serde_json::from_str(json)?;
    if items.is_empty() {
        return Err(CliError::InvalidInput("No claims provided".to_string()));
    }
    Ok(items.into_iter().map(Into::into).collect())
}

/// Turn input text into parser input.
pub fn claim_text(contents: String, segmented: bool) -> Result<ClaimText> {
    if segmented {
        Ok(ClaimText::Segmented(decode_segmented(&contents)?))
    } else {
        Ok(ClaimText::Raw(contents))
    }
}

/// A claim text file, identified by its path.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: String,
    segmented: bool,
}

impl FileSource {
    /// Create a source for `path`.
    pub fn new(path: impl Into<String>, segmented: bool) -> Self {
        Self {
            path: path.into(),
            segmented,
        }
    }
}

impl ClaimTextSource for FileSource {
    type Error = CliError;

    fn document_id(&self) -> &str {
        &self.path
    }

    fn claim_text(&self) -> Result<ClaimText> {
        claim_text(fs::read_to_string(&self.path)?, self.segmented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_decode_segmented() {
        let inputs = decode_segmented(r#"["1. A widget.", ["A gadget comprising:", "a base."]]"#).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0], ClaimInput::single("1. A widget."));
        assert_eq!(inputs[1].fragments, vec!["A gadget comprising:", "a base."]);
    }

    #[test]
    fn test_decode_segmented_rejects_empty() {
        assert!(matches!(decode_segmented("[]"), Err(CliError::InvalidInput(_))));
        assert!(matches!(decode_segmented("{}"), Err(CliError::Serialization(_))));
    }

    #[test]
    fn test_file_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("claims.txt");
        fs::write(&path, "1. A widget.").unwrap();

        let source = FileSource::new(path.to_string_lossy(), false);
        assert!(source.document_id().ends_with("claims.txt"));
        assert_eq!(source.claim_text().unwrap(), ClaimText::Raw("1. A widget.".to_string()));

        let missing = FileSource::new(dir.path().join("absent.txt").to_string_lossy(), false);
        assert!(matches!(missing.claim_text(), Err(CliError::Io(_))));
    }
}
