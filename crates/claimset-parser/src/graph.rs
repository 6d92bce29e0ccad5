//! Linking parsed claims into a claim set with reverse edges

use claimset_domain::{Claim, ClaimNumber, ClaimSet, ReferentialAnomaly};
use std::collections::HashMap;
use tracing::warn;

/// Fill in `dependent_claims` and collect referential anomalies
///
/// Claims arrive in ascending number order, so a single pass suffices: when
/// claim `n` is visited, every claim it may legally reference is already in
/// the lookup.
pub fn link_claims(mut claims: Vec<Claim>) -> ClaimSet {
    let mut index: HashMap<ClaimNumber, usize> = HashMap::with_capacity(claims.len());
    let mut anomalies = Vec::new();
    let mut edges: Vec<(usize, ClaimNumber)> = Vec::new();

    for (position, claim) in claims.iter().enumerate() {
        for &reference in &claim.depends_on {
            let target = index.get(&reference).copied();
            match ReferentialAnomaly::classify(claim.number, reference, target.is_some()) {
                Some(anomaly) => {
                    warn!("Claim {} has an unresolved dependency: {}", claim.number, anomaly);
                    anomalies.push(anomaly);
                }
                None => edges.extend(target.map(|target| (target, claim.number))),
            }
        }

        index.insert(claim.number, position);
    }

    for (target, dependent) in edges {
        claims[target].dependent_claims.insert(dependent);
    }

    ClaimSet::new(claims, anomalies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimset_domain::AnomalyKind;
    use std::collections::BTreeSet;

    fn claim(number: ClaimNumber, depends_on: Vec<ClaimNumber>) -> Claim {
        Claim::new(number, vec![format!("claim body {}", number)], depends_on)
    }

    #[test]
    fn test_reverse_edges() {
        let set = link_claims(vec![claim(1, vec![]), claim(2, vec![1]), claim(3, vec![1, 2])]);
        assert_eq!(set.get(1).unwrap().dependent_claims, BTreeSet::from([2, 3]));
        assert_eq!(set.get(2).unwrap().dependent_claims, BTreeSet::from([3]));
        assert!(set.get(3).unwrap().dependent_claims.is_empty());
        assert!(!set.has_anomalies());
    }

    #[test]
    fn test_anomalies_get_no_back_edge() {
        let set = link_claims(vec![
            claim(1, vec![]),
            claim(2, vec![9]),
            claim(3, vec![3]),
            claim(5, vec![4, 1]),
        ]);

        assert!(set.get(1).unwrap().dependent_claims.contains(&5));
        assert_eq!(set.get(1).unwrap().dependent_claims.len(), 1);
        assert_eq!(set.get(2).unwrap().depends_on, vec![9]);

        let kinds: Vec<_> = set.anomalies().iter().map(|a| (a.claim, a.reference, a.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (2, 9, AnomalyKind::ForwardReference),
                (3, 3, AnomalyKind::SelfReference),
                (5, 4, AnomalyKind::MissingClaim),
            ]
        );
    }

    #[test]
    fn test_order_preserved() {
        let set = link_claims(vec![claim(4, vec![]), claim(7, vec![4]), claim(9, vec![])]);
        let numbers: Vec<_> = set.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![4, 7, 9]);
    }
}
