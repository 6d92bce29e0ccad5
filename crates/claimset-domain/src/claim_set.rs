//! Claim set - the ordered, cross-linked output of one parse

use crate::{Claim, ClaimNumber, ReferentialAnomaly};
use std::collections::{BTreeMap, BTreeSet};

/// An ordered collection of claims with reverse edges and diagnostics
///
/// Claims are kept in ascending number order. Lookups by number go through
/// an index built once at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    claims: Vec<Claim>,
    index: BTreeMap<ClaimNumber, usize>,
    anomalies: Vec<ReferentialAnomaly>,
}

impl ClaimSet {
    /// Wrap already linked claims and the anomalies found while linking them
    pub fn new(claims: Vec<Claim>, anomalies: Vec<ReferentialAnomaly>) -> Self {
        let index = claims
            .iter()
            .enumerate()
            .map(|(idx, claim)| (claim.number, idx))
            .collect();

        Self {
            claims,
            index,
            anomalies,
        }
    }

    /// Look up a claim by number
    pub fn get(&self, number: ClaimNumber) -> Option<&Claim> {
        self.index.get(&number).map(|&idx| &self.claims[idx])
    }

    /// True if the set holds a claim with this number
    pub fn contains(&self, number: ClaimNumber) -> bool {
        self.index.contains_key(&number)
    }

    /// Claims in ascending number order
    pub fn iter(&self) -> std::slice::Iter<'_, Claim> {
        self.claims.iter()
    }

    /// Claims as a slice
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Number of claims, cancelled placeholders included
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// True if the set holds no claims
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Claims that refer to no other claim
    pub fn independent_claims(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter().filter(|c| c.is_independent())
    }

    /// Direct dependents of a claim, in ascending order
    pub fn dependent_claims_of(&self, number: ClaimNumber) -> Vec<&Claim> {
        self.get(number)
            .map(|claim| {
                claim
                    .dependent_claims
                    .iter()
                    .filter_map(|n| self.get(*n))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every claim reachable by following resolvable `depends_on` edges
    ///
    /// # Examples
    ///
    /// ```
    /// use claimset_domain::{Claim, ClaimSet};
    ///
    /// let mut c1 = Claim::new(1, vec!["a widget.".into()], vec![]);
    /// let mut c2 = Claim::new(2, vec!["the widget of claim 1.".into()], vec![1]);
    /// let c3 = Claim::new(3, vec!["the widget of claim 2.".into()], vec![2]);
    /// c1.dependent_claims.insert(2);
    /// c2.dependent_claims.insert(3);
    ///
    /// let set = ClaimSet::new(vec![c1, c2, c3], vec![]);
    /// assert_eq!(set.ancestors(3).into_iter().collect::<Vec<_>>(), vec![1, 2]);
    /// ```
    pub fn ancestors(&self, number: ClaimNumber) -> BTreeSet<ClaimNumber> {
        self.walk(number, |claim| claim.depends_on.clone())
    }

    /// Every claim reachable by following `dependent_claims` edges
    pub fn descendants(&self, number: ClaimNumber) -> BTreeSet<ClaimNumber> {
        self.walk(number, |claim| claim.dependent_claims.iter().copied().collect())
    }

    /// The independent claims a claim ultimately rests on
    ///
    /// An independent claim is its own root.
    pub fn root_claims(&self, number: ClaimNumber) -> BTreeSet<ClaimNumber> {
        match self.get(number) {
            Some(claim) if claim.is_independent() => BTreeSet::from([number]),
            Some(_) => self
                .ancestors(number)
                .into_iter()
                .filter(|n| self.get(*n).is_some_and(Claim::is_independent))
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// All referential anomalies, in claim order
    pub fn anomalies(&self) -> &[ReferentialAnomaly] {
        &self.anomalies
    }

    /// True if any dependency reference failed to resolve
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }

    /// Anomalies raised by one claim
    pub fn anomalies_for(&self, number: ClaimNumber) -> Vec<&ReferentialAnomaly> {
        self.anomalies.iter().filter(|a| a.claim == number).collect()
    }

    /// Consume the set and return its claims
    pub fn into_claims(self) -> Vec<Claim> {
        self.claims
    }

    fn walk<F>(&self, start: ClaimNumber, next: F) -> BTreeSet<ClaimNumber>
    where
        F: Fn(&Claim) -> Vec<ClaimNumber>,
    {
        let mut seen = BTreeSet::new();
        let mut stack = match self.get(start) {
            Some(claim) => next(claim),
            None => return seen,
        };

        while let Some(n) = stack.pop() {
            // Only resolved, distinct claims; self and forward references stop here
            if n == start || !seen.insert(n) {
                continue;
            }
            match self.get(n) {
                Some(claim) => stack.extend(next(claim)),
                None => {
                    seen.remove(&n);
                }
            }
        }

        seen
    }
}

impl<'a> IntoIterator for &'a ClaimSet {
    type Item = &'a Claim;
    type IntoIter = std::slice::Iter<'a, Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}

impl IntoIterator for ClaimSet {
    type Item = Claim;
    type IntoIter = std::vec::IntoIter<Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.into_iter()
    }
}
