//! Referential anomalies - dependency references that do not resolve

use crate::ClaimNumber;
use std::fmt;

/// Why a dependency reference could not be turned into a reverse edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnomalyKind {
    /// The claim names its own number
    SelfReference,

    /// The claim names a later claim
    ForwardReference,

    /// The claim names an earlier number that is not in the set
    MissingClaim,
}

/// A dependency reference retained in `depends_on` but left without a back-edge
///
/// Anomalies never abort a parse; they are collected on the claim set so
/// callers can flag malformed source documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferentialAnomaly {
    /// Number of the claim holding the reference
    pub claim: ClaimNumber,

    /// The referenced number as written
    pub reference: ClaimNumber,

    /// Classification
    pub kind: AnomalyKind,
}

impl ReferentialAnomaly {
    /// Classify a reference from `claim` to `reference`
    ///
    /// Returns `None` when the reference is backward and `exists` says the
    /// target is present.
    pub fn classify(claim: ClaimNumber, reference: ClaimNumber, exists: bool) -> Option<Self> {
        let kind = if reference == claim {
            AnomalyKind::SelfReference
        } else if reference > claim {
            AnomalyKind::ForwardReference
        } else if !exists {
            AnomalyKind::MissingClaim
        } else {
            return None;
        };

        Some(Self { claim, reference, kind })
    }
}

impl fmt::Display for ReferentialAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            AnomalyKind::SelfReference => "refers to itself",
            AnomalyKind::ForwardReference => "refers to a later claim",
            AnomalyKind::MissingClaim => "refers to a claim not in the set",
        };
        write!(f, "claim {} {} (claim {})", self.claim, what, self.reference)
    }
}
