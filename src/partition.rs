//! Partitions and snapshots.
//!
//! A [`Partition`] maps each community id to the set of nodes it contains.
//! Storage is ordered (`BTreeMap` / `BTreeSet`), so iterating a partition
//! always visits communities in ascending id order. Everything downstream
//! (event ordering, tie-breaks) relies on that.

use std::collections::{BTreeMap, BTreeSet};

use crate::validate::{Severity, ValidationIssue, ValidationReport};

/// Node identifier.
pub type NodeId = usize;

/// Community identifier, local to one partition.
pub type CommunityId = usize;

/// Assignment of nodes to communities at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partition {
    communities: BTreeMap<CommunityId, BTreeSet<NodeId>>,
}

impl Partition {
    /// Create an empty partition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a label vector: node `i` belongs to community `labels[i]`.
    ///
    /// This is the output shape of [`CommunityDetection::detect`](crate::community::CommunityDetection::detect).
    pub fn from_labels(labels: &[usize]) -> Self {
        Self::from_assignments(labels.iter().copied().enumerate())
    }

    /// Build from `(node, community)` pairs.
    pub fn from_assignments<I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, CommunityId)>,
    {
        let mut communities: BTreeMap<CommunityId, BTreeSet<NodeId>> = BTreeMap::new();
        for (node, cid) in assignments {
            communities.entry(cid).or_default().insert(node);
        }
        Self { communities }
    }

    /// Insert (or replace) a community.
    pub fn insert(&mut self, id: CommunityId, nodes: BTreeSet<NodeId>) -> Option<BTreeSet<NodeId>> {
        self.communities.insert(id, nodes)
    }

    /// Node set of a community.
    pub fn get(&self, id: CommunityId) -> Option<&BTreeSet<NodeId>> {
        self.communities.get(&id)
    }

    /// Number of communities.
    pub fn len(&self) -> usize {
        self.communities.len()
    }

    /// True when the partition has no communities.
    pub fn is_empty(&self) -> bool {
        self.communities.is_empty()
    }

    /// Communities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (CommunityId, &BTreeSet<NodeId>)> {
        self.communities.iter().map(|(&id, nodes)| (id, nodes))
    }

    /// Community ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = CommunityId> + '_ {
        self.communities.keys().copied()
    }

    /// Total membership count (counts a node twice if it sits in two communities).
    pub fn node_count(&self) -> usize {
        self.communities.values().map(BTreeSet::len).sum()
    }

    /// `node -> community` view.
    ///
    /// If a node appears in several communities the largest id wins; run
    /// [`validate`](Self::validate) first when that matters.
    pub fn assignments(&self) -> BTreeMap<NodeId, CommunityId> {
        let mut out = BTreeMap::new();
        for (&cid, nodes) in &self.communities {
            for &node in nodes {
                out.insert(node, cid);
            }
        }
        out
    }

    /// `(community, size)` pairs, largest first, ties by ascending id.
    pub fn sizes(&self) -> Vec<(CommunityId, usize)> {
        let mut sizes: Vec<(CommunityId, usize)> = self
            .communities
            .iter()
            .map(|(&cid, nodes)| (cid, nodes.len()))
            .collect();
        sizes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        sizes
    }

    /// Check that communities are disjoint and non-empty.
    ///
    /// A node in more than one community is an error; an empty community is a warning.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        let mut seen: BTreeMap<NodeId, Vec<CommunityId>> = BTreeMap::new();

        for (&cid, nodes) in &self.communities {
            if nodes.is_empty() {
                report.add(
                    ValidationIssue::new(Severity::Warning, "empty community")
                        .with_communities(vec![cid]),
                );
            }
            for &node in nodes {
                seen.entry(node).or_default().push(cid);
            }
        }

        for (node, owners) in seen {
            if owners.len() > 1 {
                report.add(
                    ValidationIssue::new(Severity::Error, "node belongs to several communities")
                        .with_node(node)
                        .with_communities(owners),
                );
            }
        }
        report
    }
}

impl FromIterator<(CommunityId, BTreeSet<NodeId>)> for Partition {
    fn from_iter<I: IntoIterator<Item = (CommunityId, BTreeSet<NodeId>)>>(iter: I) -> Self {
        Self {
            communities: iter.into_iter().collect(),
        }
    }
}

/// A partition observed at time `time`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot<T> {
    /// Time index (year, epoch, sequence number).
    pub time: T,
    /// Communities at that time.
    pub partition: Partition,
}

impl<T> Snapshot<T> {
    /// Pair a time with a partition.
    pub fn new(time: T, partition: Partition) -> Self {
        Self { time, partition }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_labels_groups_nodes() {
        let p = Partition::from_labels(&[0, 0, 1, 1, 0]);
        assert_eq!(p.len(), 2);
        assert_eq!(p.get(0), Some(&[0, 1, 4].into_iter().collect()));
        assert_eq!(p.get(1), Some(&[2, 3].into_iter().collect()));
        assert_eq!(p.node_count(), 5);
    }

    #[test]
    fn test_assignments_inverts_partition() {
        let p = Partition::from_assignments([(10, 3), (11, 3), (12, 5)]);
        let a = p.assignments();
        assert_eq!(a.get(&10), Some(&3));
        assert_eq!(a.get(&12), Some(&5));
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_iteration_is_ascending_by_id() {
        let p = Partition::from_assignments([(0, 9), (1, 2), (2, 5)]);
        let ids: Vec<_> = p.ids().collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_sizes_largest_first() {
        let p = Partition::from_labels(&[2, 0, 0, 1, 1, 2]);
        assert_eq!(p.sizes(), vec![(0, 2), (1, 2), (2, 2)]);
        let p = Partition::from_labels(&[1, 1, 1, 0]);
        assert_eq!(p.sizes(), vec![(1, 3), (0, 1)]);
    }

    #[test]
    fn test_validate_flags_overlap() {
        let mut p = Partition::new();
        p.insert(0, [1, 2].into_iter().collect());
        p.insert(1, [2, 3].into_iter().collect());
        p.insert(2, BTreeSet::new());

        let report = p.validate();
        assert!(!report.is_healthy());
        assert_eq!(report.issues_at_level(Severity::Error).len(), 1);
        assert_eq!(report.issues_at_level(Severity::Warning).len(), 2);
        let err = report.issues_at_level(Severity::Error)[0];
        assert_eq!(err.node, Some(2));
        assert_eq!(err.communities, vec![0, 1]);
    }

    #[test]
    fn test_validate_summary_counts_each_severity() {
        let mut p = Partition::new();
        p.insert(0, [1, 2].into_iter().collect());
        p.insert(1, [2].into_iter().collect());
        p.insert(4, BTreeSet::new());

        let report = p.validate();
        let counts = report.counts();
        assert_eq!(counts.get(&Severity::Error), Some(&1));
        assert_eq!(counts.get(&Severity::Warning), Some(&1));
        assert!(report
            .to_string()
            .starts_with("partition report: 1 errors, 1 warnings\n"));
    }

    #[test]
    fn test_validate_disjoint_is_clean() {
        let p = Partition::from_labels(&[0, 1, 0, 1]);
        assert!(p.validate().is_clean());
    }
}
