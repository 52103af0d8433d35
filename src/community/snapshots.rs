//! Cumulative graph snapshots from a timed edge list.
//!
//! Every node carries a time (publication year, join date, ...). The snapshot
//! at time `t` holds every edge whose two endpoints both have time `<= t`, so
//! snapshots only ever grow. One snapshot is produced per distinct node time.
//!
//! A node missing from the time table puts no constraint on its edges by
//! default: an edge between an untimed node and a node of time `t` shows up at
//! `t`, and an edge between two untimed nodes shows up in the first snapshot.
//! [`SnapshotBuilder::with_default_time`] and [`SnapshotBuilder::drop_untimed`]
//! change that.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Debug;

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::partition::NodeId;

/// The graph as it stood at `time`. Node weights are the original node ids.
#[derive(Debug, Clone)]
pub struct GraphSnapshot<T> {
    /// Snapshot time.
    pub time: T,
    /// Undirected, simple graph of the edges visible at `time`.
    pub graph: UnGraph<NodeId, ()>,
}

impl<T> GraphSnapshot<T> {
    /// Node ids in graph index order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.graph.node_weights().copied().collect()
    }

    /// True when no edge is visible yet.
    pub fn is_edgeless(&self) -> bool {
        self.graph.edge_count() == 0
    }
}

/// What to do with a node that has no entry in the time table.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Untimed<T> {
    Earliest,
    At(T),
    Drop,
}

/// Builds cumulative snapshots from node times and undirected edges.
///
/// Self-loops are ignored and repeated edges (in either direction) collapse
/// into one.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder<T> {
    times: HashMap<NodeId, T>,
    edges: Vec<(NodeId, NodeId)>,
    untimed: Untimed<T>,
}

impl<T: Clone + Ord + Debug> SnapshotBuilder<T> {
    /// Start from a `node -> time` table.
    pub fn new<I>(node_times: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, T)>,
    {
        Self {
            times: node_times.into_iter().collect(),
            edges: Vec::new(),
            untimed: Untimed::Earliest,
        }
    }

    /// Treat nodes without a time as having time `time`.
    ///
    /// Their edges appear in the first snapshot at or after `time`; if every
    /// snapshot is earlier, the edges are dropped.
    pub fn with_default_time(mut self, time: T) -> Self {
        self.untimed = Untimed::At(time);
        self
    }

    /// Drop every edge touching a node without a time.
    pub fn drop_untimed(mut self) -> Self {
        self.untimed = Untimed::Drop;
        self
    }

    /// Add one undirected edge.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> &mut Self {
        self.edges.push((u, v));
        self
    }

    /// Add many undirected edges.
    pub fn with_edges<I>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        self.edges.extend(edges);
        self
    }

    /// Time constraint one endpoint puts on an edge.
    ///
    /// `None` drops the edge, `Some(None)` means unconstrained.
    fn endpoint_time(&self, node: NodeId) -> Option<Option<&T>> {
        match (self.times.get(&node), &self.untimed) {
            (Some(t), _) => Some(Some(t)),
            (None, Untimed::Earliest) => Some(None),
            (None, Untimed::At(t)) => Some(Some(t)),
            (None, Untimed::Drop) => None,
        }
    }

    /// Build one snapshot per distinct node time, ascending.
    ///
    /// Times that add no edge still get a snapshot (possibly edgeless); it is
    /// the caller's choice whether to skip them.
    pub fn build(&self) -> Result<Vec<GraphSnapshot<T>>> {
        if self.times.is_empty() {
            return Err(Error::EmptyInput);
        }

        // Bucket edges by the first snapshot they are visible in.
        let mut by_time: BTreeMap<T, Vec<(NodeId, NodeId)>> =
            self.times.values().map(|t| (t.clone(), Vec::new())).collect();
        let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();
        let mut dropped = 0usize;
        let mut untimed = 0usize;

        for &(u, v) in &self.edges {
            if u == v {
                continue;
            }
            let key = (u.min(v), u.max(v));
            if !seen.insert(key) {
                continue;
            }
            let (Some(tu), Some(tv)) = (self.endpoint_time(u), self.endpoint_time(v)) else {
                dropped += 1;
                continue;
            };
            if !self.times.contains_key(&u) || !self.times.contains_key(&v) {
                untimed += 1;
            }
            let bucket = match tu.max(tv) {
                Some(t) => by_time.range_mut(t.clone()..).next(),
                None => by_time.iter_mut().next(),
            };
            match bucket {
                Some((_, edges)) => edges.push(key),
                None => dropped += 1,
            }
        }
        if untimed > 0 {
            debug!(untimed, "edges with an untimed endpoint");
        }
        if dropped > 0 {
            warn!(dropped, "edges dropped: endpoint has no usable time");
        }

        let mut graph: UnGraph<NodeId, ()> = UnGraph::new_undirected();
        let mut index: HashMap<NodeId, NodeIndex> = HashMap::new();
        let mut snapshots = Vec::with_capacity(by_time.len());

        for (time, edges) in by_time {
            for (u, v) in edges {
                let a = *index.entry(u).or_insert_with(|| graph.add_node(u));
                let b = *index.entry(v).or_insert_with(|| graph.add_node(v));
                graph.add_edge(a, b, ());
            }
            debug!(
                time = ?time,
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "built snapshot"
            );
            snapshots.push(GraphSnapshot {
                time,
                graph: graph.clone(),
            });
        }

        Ok(snapshots)
    }
}
