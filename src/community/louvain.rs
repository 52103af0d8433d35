//! Louvain algorithm for community detection.
//!
//! Fast modularity optimization through local node moves and graph aggregation.
//!
//! ## The Algorithm (Blondel et al. 2008)
//!
//! 1. **Local moving**: start with each node in its own community and move
//!    nodes to the neighboring community with the highest modularity gain
//!    until no move helps.
//! 2. **Aggregation**: contract every community into one node. Edges between
//!    communities become weighted edges, edges inside become self-loops.
//! 3. **Iterate** on the contracted graph until modularity stops improving.
//!
//! Neighbor communities are visited in ascending order and only a strictly
//! better gain replaces the current choice, so the result is a function of the
//! graph alone. Snapshot-to-snapshot comparisons depend on that.
//!
//! ## References
//!
//! Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! Journal of Statistical Mechanics: Theory and Experiment, P10008.

use super::traits::CommunityDetection;
use super::weighted::{renumber, WeightedGraph};
use crate::error::{Error, Result};
use petgraph::graph::UnGraph;
use std::collections::BTreeMap;

/// Louvain community detection algorithm.
#[derive(Debug, Clone)]
pub struct Louvain {
    /// Resolution parameter (gamma).
    resolution: f64,
    /// Maximum sweeps per level.
    max_iter: usize,
    /// Maximum levels of aggregation.
    max_levels: usize,
    /// Minimum modularity improvement to continue.
    min_modularity_gain: f64,
}

impl Louvain {
    /// Create a new Louvain detector with default settings.
    pub fn new() -> Self {
        Self {
            resolution: 1.0,
            max_iter: 100,
            max_levels: 10,
            min_modularity_gain: 1e-7,
        }
    }

    /// Set resolution parameter.
    ///
    /// Higher values produce smaller communities.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set maximum sweeps per level.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set maximum aggregation levels.
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = levels;
        self
    }

    /// Set the minimum modularity gain needed to aggregate another level.
    pub fn with_min_modularity_gain(mut self, gain: f64) -> Self {
        self.min_modularity_gain = gain;
        self
    }

    /// Phase 1 on one level. Returns (communities, improved).
    fn local_moving(&self, graph: &WeightedGraph) -> (Vec<usize>, bool) {
        let n = graph.n;
        let m = graph.total_weight();
        if m == 0.0 {
            return ((0..n).collect(), false);
        }

        let adj = graph.adjacency();
        let degrees = graph.degrees();
        let mut communities: Vec<usize> = (0..n).collect();
        let mut community_degrees = degrees.clone();
        let mut any_improved = false;

        for _ in 0..self.max_iter {
            let mut improved = false;

            for node in 0..n {
                let current = communities[node];
                let ki = degrees[node];
                community_degrees[current] -= ki;

                let mut links: BTreeMap<usize, f64> = BTreeMap::new();
                for (&neighbor, &w) in &adj[node] {
                    *links.entry(communities[neighbor]).or_insert(0.0) += w;
                }

                // Staying isolated scores 0; the old community competes like any other.
                let mut best = current;
                let mut best_gain = 0.0;
                for (&target, &ki_in) in &links {
                    let gain =
                        ki_in / m - self.resolution * community_degrees[target] * ki / (2.0 * m * m);
                    if gain > best_gain {
                        best_gain = gain;
                        best = target;
                    }
                }

                community_degrees[best] += ki;
                if best != current {
                    communities[node] = best;
                    improved = true;
                    any_improved = true;
                }
            }

            if !improved {
                break;
            }
        }

        (communities, any_improved)
    }
}

impl Default for Louvain {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetection for Louvain {
    fn detect<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>> {
        let n = graph.node_count();
        if n == 0 {
            return Err(Error::EmptyInput);
        }
        if graph.edge_count() == 0 {
            return Ok((0..n).collect());
        }

        let mut level = WeightedGraph::from_graph(graph);
        // Index of each original node in the current level.
        let mut membership: Vec<usize> = (0..n).collect();
        let mut prev_modularity = f64::NEG_INFINITY;

        for _ in 0..self.max_levels {
            let (partition, improved) = self.local_moving(&level);
            if !improved {
                break;
            }

            let q = level.modularity(&partition, self.resolution);
            if q - prev_modularity < self.min_modularity_gain {
                break;
            }
            prev_modularity = q;

            let (next, relabel) = level.aggregate(&partition);
            for m in membership.iter_mut() {
                *m = relabel[*m];
            }
            if next.n == level.n {
                break;
            }
            level = next;
        }

        renumber(&mut membership);
        Ok(membership)
    }

    fn resolution(&self) -> f64 {
        self.resolution
    }
}
