//! Claimset Domain Layer
//!
//! Core data model for parsed patent claim sets. It has no external
//! dependencies and defines the records the parser produces and the trait
//! through which upstream document readers feed it.
//!
//! ## Key Concepts
//!
//! - **Claim**: one numbered paragraph, split into ordered limitations
//! - **Dependency**: a backward reference from one claim to earlier claims
//! - **Claim set**: the ordered claims with reverse edges filled in
//! - **Referential anomaly**: a reference that cannot be resolved, kept as a diagnostic
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and traversal logic only
//! - Parsing lives in `claimset-parser`; I/O lives outside the workspace

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod anomaly;
pub mod claim;
pub mod claim_set;
pub mod traits;

// Re-exports for convenience
pub use anomaly::{AnomalyKind, ReferentialAnomaly};
pub use claim::{Claim, ClaimNumber, ClaimStatus, ReissueMarkup};
pub use claim_set::ClaimSet;
pub use traits::{ClaimInput, ClaimText, ClaimTextSource};
