//! Claim module - one numbered paragraph of a patent's claim set

use std::collections::BTreeSet;
use std::fmt;

/// Claim number as printed in the claim set (1-based)
pub type ClaimNumber = u32;

/// Prosecution status of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClaimStatus {
    /// Claim carries substantive text
    #[default]
    Active,

    /// Claim number kept only as a placeholder ("(Canceled)", "(Deleted)")
    Cancelled,
}

/// Reissue-patent markup attached to a claim number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReissueMarkup {
    /// Claim added by reissue (`.Iadd.` ... `.Iaddend.`)
    Added,

    /// Claim bracketed for deletion by reissue (`.[` ... `.].`)
    Bracketed,
}

/// A single parsed patent claim
///
/// The claim text is not stored; it is rebuilt from the limitations so that
/// `"{number}. " + limitations.join("\n")` always equals [`Claim::text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    /// Claim number, unique within its claim set
    pub number: ClaimNumber,

    /// Ordered clauses of the claim body, never empty
    pub limitations: Vec<String>,

    /// Claims this claim refers back to, in order of first mention
    pub depends_on: Vec<ClaimNumber>,

    /// Later claims that refer to this one (reverse edges)
    pub dependent_claims: BTreeSet<ClaimNumber>,

    /// Active or cancelled placeholder
    pub status: ClaimStatus,

    /// Reissue markup, if the claim number carried any
    pub markup: Option<ReissueMarkup>,
}

impl Claim {
    /// Create a claim with no reverse edges
    ///
    /// # Examples
    ///
    /// ```
    /// use claimset_domain::Claim;
    ///
    /// let claim = Claim::new(2, vec!["the widget of claim 1.".to_string()], vec![1]);
    /// assert!(claim.is_dependent());
    /// assert_eq!(claim.text(), "2. the widget of claim 1.");
    /// ```
    pub fn new(number: ClaimNumber, limitations: Vec<String>, depends_on: Vec<ClaimNumber>) -> Self {
        Self {
            number,
            limitations,
            depends_on,
            dependent_claims: BTreeSet::new(),
            status: ClaimStatus::Active,
            markup: None,
        }
    }

    /// Set the prosecution status
    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the reissue markup
    pub fn with_markup(mut self, markup: Option<ReissueMarkup>) -> Self {
        self.markup = markup;
        self
    }

    /// Full claim text, `"{number}. "` followed by the limitations joined by newlines
    pub fn text(&self) -> String {
        format!("{}. {}", self.number, self.limitations.join("\n"))
    }

    /// Claim body without the number prefix
    pub fn body(&self) -> String {
        self.limitations.join("\n")
    }

    /// True when the claim refers to no other claim
    pub fn is_independent(&self) -> bool {
        self.depends_on.is_empty()
    }

    /// True when the claim refers to at least one other claim
    pub fn is_dependent(&self) -> bool {
        !self.is_independent()
    }

    /// True when the claim refers to more than one claim
    pub fn is_multiple_dependent(&self) -> bool {
        self.depends_on.len() > 1
    }

    /// True for cancelled placeholders
    pub fn is_cancelled(&self) -> bool {
        self.status == ClaimStatus::Cancelled
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
