//! Similarity measures between communities and between partitions.
//!
//! | Metric | Compares | Range |
//! |--------|----------|-------|
//! | [`jaccard`] | two node sets | [0, 1] |
//! | [`nmi`] | two label vectors | [0, 1] |
//! | [`partition_nmi`] | two partitions, on shared nodes | [0, 1] |
//!
//! Jaccard drives event classification. NMI is the coarser, whole-partition
//! view: how much of one snapshot's community structure survives into the next.
//!
//! # References
//!
//! - Jaccard (1912). "The distribution of the flora in the alpine zone."
//! - Strehl & Ghosh (2002). "Cluster ensembles" (NMI)
//! - Greene, Doyle & Cunningham (2010). "Tracking the evolution of communities
//!   in dynamic social networks."

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use crate::partition::Partition;

/// Jaccard overlap of two sets: `|A ∩ B| / |A ∪ B|`.
///
/// Two empty sets score `0.0`. That is a convention (the ratio is undefined),
/// chosen so an empty community never looks like a continuation of anything.
///
/// ```rust
/// use drift::metrics::jaccard;
/// use std::collections::BTreeSet;
///
/// let a: BTreeSet<usize> = [1, 2, 3].into_iter().collect();
/// let b: BTreeSet<usize> = [1, 2, 3, 4].into_iter().collect();
/// assert_eq!(jaccard(&a, &b), 0.75);
/// ```
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Normalized Mutual Information between two labelings.
///
/// ```text
/// NMI(U, V) = 2 * I(U; V) / (H(U) + H(V))
/// ```
///
/// Labels are compared positionally. Returns `0.0` on length mismatch or empty
/// input, and `1.0` when both labelings are constant.
///
/// ```rust
/// use drift::metrics::nmi;
///
/// assert!((nmi(&[0, 0, 1, 1], &[1, 1, 0, 0]) - 1.0).abs() < 1e-12);
/// assert!(nmi(&[0, 1, 0, 1], &[0, 0, 1, 1]) < 0.5);
/// ```
pub fn nmi<L: Eq + Hash + Copy>(a: &[L], b: &[L]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let n = a.len() as f64;
    let count_a = counts(a.iter().copied());
    let count_b = counts(b.iter().copied());
    let joint = counts(a.iter().copied().zip(b.iter().copied()));

    let h_a = entropy(count_a.values().copied(), n);
    let h_b = entropy(count_b.values().copied(), n);

    let mut mi = 0.0;
    for (&(la, lb), &c) in &joint {
        let p_joint = c as f64 / n;
        let p_a = count_a[&la] as f64 / n;
        let p_b = count_b[&lb] as f64 / n;
        mi += p_joint * (p_joint / (p_a * p_b)).ln();
    }

    let denom = h_a + h_b;
    if denom > 0.0 {
        // Clamp float noise from the log sums.
        (2.0 * mi / denom).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

/// NMI between two partitions, restricted to nodes present in both.
///
/// Returns `None` when either partition is empty or they share no node.
/// Snapshots grow over time, so later partitions usually cover more nodes;
/// only the shared ones say anything about stability.
pub fn partition_nmi(before: &Partition, after: &Partition) -> Option<f64> {
    if before.is_empty() || after.is_empty() {
        return None;
    }

    let a = before.assignments();
    let b = after.assignments();

    let (labels_a, labels_b): (Vec<usize>, Vec<usize>) = a
        .iter()
        .filter_map(|(node, &ca)| b.get(node).map(|&cb| (ca, cb)))
        .unzip();

    if labels_a.is_empty() {
        return None;
    }
    Some(nmi(&labels_a, &labels_b))
}

// Helper functions

fn counts<K: Eq + Hash>(items: impl Iterator<Item = K>) -> HashMap<K, usize> {
    let mut table = HashMap::new();
    for k in items {
        *table.entry(k).or_insert(0usize) += 1;
    }
    table
}

fn entropy(counts: impl Iterator<Item = usize>, n: f64) -> f64 {
    counts
        .map(|c| {
            let p = c as f64 / n;
            if p > 0.0 {
                -p * p.ln()
            } else {
                0.0
            }
        })
        .sum()
}
