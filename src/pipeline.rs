//! End-to-end analysis: snapshots -> partitions -> events and quality series.

use std::collections::BTreeMap;
use std::fmt::Debug;

use tracing::info;

use crate::community::{modularity, CommunityDetection, GraphSnapshot, SnapshotBuilder};
use crate::error::Result;
use crate::evolution::{classify, EventKind, Thresholds, TransitionEvent};
use crate::metrics::partition_nmi;
use crate::partition::{NodeId, Partition, Snapshot};

/// Everything one analysis run produces.
#[derive(Debug, Clone)]
pub struct EvolutionReport<T> {
    /// Partition of every snapshot, empty where the snapshot had no edges.
    pub snapshots: Vec<Snapshot<T>>,
    /// Modularity per snapshot, for snapshots with at least one edge.
    pub modularity: Vec<(T, f64)>,
    /// NMI between consecutive partitions on shared nodes, keyed by the later time.
    pub nmi: Vec<(T, f64)>,
    /// Classified transitions, in order.
    pub events: Vec<TransitionEvent<T>>,
}

impl<T> EvolutionReport<T> {
    /// Events of one kind, in order.
    pub fn events_of(&self, kind: EventKind) -> impl Iterator<Item = &TransitionEvent<T>> {
        self.events.iter().filter(move |e| e.kind() == kind)
    }

    /// Number of events per kind. Kinds that never occur are absent.
    pub fn counts_by_kind(&self) -> BTreeMap<EventKind, usize> {
        let mut counts = BTreeMap::new();
        for e in &self.events {
            *counts.entry(e.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// `(time, community count)` per snapshot.
    pub fn community_counts(&self) -> Vec<(&T, usize)> {
        self.snapshots
            .iter()
            .map(|s| (&s.time, s.partition.len()))
            .collect()
    }
}

/// Detect communities in every snapshot and classify how they evolve.
///
/// ```rust
/// use drift::{EvolutionAnalysis, EventKind};
/// use drift::community::Louvain;
///
/// let times = [(1, 1), (2, 1), (3, 1), (4, 2), (5, 2), (6, 2)];
/// let edges = [(1, 2), (2, 3), (1, 3), (4, 5), (5, 6), (4, 6)];
///
/// let report = EvolutionAnalysis::new(Louvain::new()).run_edges(times, edges).unwrap();
/// assert_eq!(report.events_of(EventKind::Birth).count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionAnalysis<D> {
    detector: D,
    thresholds: Thresholds,
}

impl<D: CommunityDetection> EvolutionAnalysis<D> {
    /// Use `detector` with default thresholds.
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            thresholds: Thresholds::default(),
        }
    }

    /// Override the event thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Build cumulative snapshots from node times and edges, then [`run`](Self::run).
    pub fn run_edges<T, I, E>(&self, node_times: I, edges: E) -> Result<EvolutionReport<T>>
    where
        T: Clone + Ord + Debug,
        I: IntoIterator<Item = (NodeId, T)>,
        E: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let snapshots = SnapshotBuilder::new(node_times).with_edges(edges).build()?;
        self.run(&snapshots)
    }

    /// Analyse prepared snapshots, assumed in ascending time order.
    pub fn run<T>(&self, graphs: &[GraphSnapshot<T>]) -> Result<EvolutionReport<T>>
    where
        T: Clone + Ord + Debug,
    {
        self.thresholds.validate()?;

        let mut snapshots = Vec::with_capacity(graphs.len());
        let mut modularity_series = Vec::new();

        for g in graphs {
            if g.is_edgeless() {
                info!(time = ?g.time, "no edges, snapshot skipped");
                snapshots.push(Snapshot::new(g.time.clone(), Partition::new()));
                continue;
            }

            let (labels, partition) = self.detector.labelled_partition(&g.graph)?;
            let q = modularity(&g.graph, &labels, self.detector.resolution())?;
            info!(
                time = ?g.time,
                nodes = g.graph.node_count(),
                communities = partition.len(),
                modularity = q,
                "detected communities"
            );

            modularity_series.push((g.time.clone(), q));
            snapshots.push(Snapshot::new(g.time.clone(), partition));
        }

        let nmi = snapshots
            .windows(2)
            .filter_map(|pair| {
                partition_nmi(&pair[0].partition, &pair[1].partition)
                    .map(|score| (pair[1].time.clone(), score))
            })
            .collect();

        let events = classify(&snapshots, &self.thresholds);
        info!(
            snapshots = snapshots.len(),
            events = events.len(),
            "evolution analysis complete"
        );

        Ok(EvolutionReport {
            snapshots,
            modularity: modularity_series,
            nmi,
            events,
        })
    }
}
