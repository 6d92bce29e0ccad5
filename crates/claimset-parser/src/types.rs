//! Result types for batch parsing

use crate::error::ClaimParseError;
use claimset_domain::ClaimSet;

/// Outcome of parsing one document in a batch
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    /// Identifier reported by the source
    pub document_id: String,

    /// The parsed claim set, or why this document failed
    pub result: Result<ClaimSet, ClaimParseError>,
}

impl DocumentOutcome {
    /// True if the document parsed
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Number of claims parsed (0 on failure)
    pub fn claim_count(&self) -> usize {
        self.result.as_ref().map_or(0, ClaimSet::len)
    }

    /// Number of referential anomalies (0 on failure)
    pub fn anomaly_count(&self) -> usize {
        self.result.as_ref().map_or(0, |set| set.anomalies().len())
    }
}

/// Result of a batch parse
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One outcome per input document, in input order
    pub documents: Vec<DocumentOutcome>,

    /// Totals over the batch
    pub metadata: BatchMetadata,
}

impl BatchReport {
    /// Documents that parsed
    pub fn succeeded(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.documents.iter().filter(|d| d.is_ok())
    }

    /// Documents that failed
    pub fn failed(&self) -> impl Iterator<Item = &DocumentOutcome> {
        self.documents.iter().filter(|d| !d.is_ok())
    }
}

/// Totals over a batch parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchMetadata {
    /// Documents submitted
    pub total_documents: usize,

    /// Documents that failed to parse
    pub failed_documents: usize,

    /// Claims parsed across all successful documents
    pub total_claims: usize,

    /// Referential anomalies across all successful documents
    pub total_anomalies: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl BatchMetadata {
    pub(crate) fn from_outcomes(documents: &[DocumentOutcome], processing_time_ms: u64) -> Self {
        Self {
            total_documents: documents.len(),
            failed_documents: documents.iter().filter(|d| !d.is_ok()).count(),
            total_claims: documents.iter().map(DocumentOutcome::claim_count).sum(),
            total_anomalies: documents.iter().map(DocumentOutcome::anomaly_count).sum(),
            processing_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimset_domain::Claim;

    fn outcome(id: &str, result: Result<ClaimSet, ClaimParseError>) -> DocumentOutcome {
        DocumentOutcome {
            document_id: id.to_string(),
            result,
        }
    }

    #[test]
    fn test_metadata_totals() {
        let set = ClaimSet::new(vec![Claim::new(1, vec!["a widget.".into()], vec![])], vec![]);
        let documents = vec![
            outcome("US1", Ok(set)),
            outcome("US2", Err(ClaimParseError::malformed("no claim number marker found"))),
        ];

        let metadata = BatchMetadata::from_outcomes(&documents, 3);
        assert_eq!(metadata.total_documents, 2);
        assert_eq!(metadata.failed_documents, 1);
        assert_eq!(metadata.total_claims, 1);
        assert_eq!(metadata.total_anomalies, 0);
        assert_eq!(metadata.processing_time_ms, 3);

        let report = BatchReport { documents, metadata };
        assert_eq!(report.succeeded().count(), 1);
        assert_eq!(report.failed().next().map(|d| d.document_id.as_str()), Some("US2"));
    }
}
