//! Label propagation for community detection.
//!
//! Very fast O(E) algorithm where nodes adopt the most common
//! label among their neighbors (Raghavan et al., 2007).

use super::traits::CommunityDetection;
use super::weighted::renumber;
use crate::error::{Error, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use rand::prelude::*;
use std::collections::BTreeMap;

/// Label propagation community detection.
///
/// Visit order is shuffled every sweep and ties between equally common
/// labels are broken at random. With a seed the whole run is reproducible.
#[derive(Debug, Clone)]
pub struct LabelPropagation {
    /// Maximum sweeps.
    max_iter: usize,
    /// Random seed.
    seed: Option<u64>,
}

impl LabelPropagation {
    /// Create a new label propagation detector.
    pub fn new() -> Self {
        Self {
            max_iter: 100,
            seed: None,
        }
    }

    /// Set maximum sweeps.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for LabelPropagation {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetection for LabelPropagation {
    fn detect<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>> {
        let n = graph.node_count();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        let mut labels: Vec<usize> = (0..n).collect();
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        let mut order: Vec<usize> = (0..n).collect();

        for _ in 0..self.max_iter {
            order.shuffle(&mut rng);
            let mut changed = false;

            for &node in &order {
                // Ordered so the candidate list, and thus the seeded pick, is stable.
                let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
                for neighbor in graph.neighbors(NodeIndex::new(node)) {
                    if neighbor.index() != node {
                        *counts.entry(labels[neighbor.index()]).or_insert(0) += 1;
                    }
                }
                let Some(&max_count) = counts.values().max() else {
                    continue;
                };

                let candidates: Vec<usize> = counts
                    .iter()
                    .filter(|&(_, &c)| c == max_count)
                    .map(|(&label, _)| label)
                    .collect();

                // Keep the current label when it is among the winners; avoids oscillation.
                if candidates.contains(&labels[node]) {
                    continue;
                }
                let new_label = if candidates.len() == 1 {
                    candidates[0]
                } else {
                    candidates[rng.random_range(0..candidates.len())]
                };

                labels[node] = new_label;
                changed = true;
            }

            if !changed {
                break;
            }
        }

        renumber(&mut labels);
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_propagation_basic() {
        // Two disconnected edges
        let graph = UnGraph::<(), ()>::from_edges(&[(0, 1), (2, 3)]);

        let lp = LabelPropagation::new().with_seed(42);
        let communities = lp.detect(&graph).unwrap();

        assert_eq!(communities[0], communities[1]);
        assert_eq!(communities[2], communities[3]);
        assert_ne!(communities[0], communities[2]);
    }

    #[test]
    fn test_label_propagation_seeded_runs_match() {
        let graph = UnGraph::<(), ()>::from_edges(&[
            (0, 1),
            (1, 2),
            (0, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (3, 5),
        ]);
        let a = LabelPropagation::new().with_seed(7).detect(&graph).unwrap();
        let b = LabelPropagation::new().with_seed(7).detect(&graph).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 6);
    }

    #[test]
    fn test_label_propagation_isolated_nodes_keep_own_label() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        graph.add_node(());
        graph.add_node(());
        let labels = LabelPropagation::new().with_seed(1).detect(&graph).unwrap();
        assert_eq!(labels, vec![0, 1]);
    }

    #[test]
    fn test_label_propagation_empty_graph() {
        let graph = UnGraph::<(), ()>::new_undirected();
        assert!(LabelPropagation::new().detect(&graph).is_err());
    }
}
