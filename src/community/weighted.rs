//! Weighted edge-list view shared by the detectors and the modularity score.

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use std::collections::{BTreeMap, HashMap};

/// Undirected weighted graph as an edge list plus self-loop weights.
///
/// Aggregation turns intra-community edges into self-loops, so both are kept.
#[derive(Debug, Clone)]
pub(crate) struct WeightedGraph {
    pub(crate) n: usize,
    /// Each undirected edge once, `i < j`.
    pub(crate) edges: Vec<(usize, usize, f64)>,
    pub(crate) self_loops: Vec<f64>,
}

impl WeightedGraph {
    /// Unit-weight view of a petgraph graph.
    pub(crate) fn from_graph<N, E>(graph: &UnGraph<N, E>) -> Self {
        let n = graph.node_count();
        let mut edges = Vec::with_capacity(graph.edge_count());
        let mut self_loops = vec![0.0; n];
        for edge in graph.edge_references() {
            let (i, j) = (edge.source().index(), edge.target().index());
            match i.cmp(&j) {
                std::cmp::Ordering::Less => edges.push((i, j, 1.0)),
                std::cmp::Ordering::Greater => edges.push((j, i, 1.0)),
                std::cmp::Ordering::Equal => self_loops[i] += 1.0,
            }
        }
        Self {
            n,
            edges,
            self_loops,
        }
    }

    /// Total edge weight `m` (self-loops included once).
    pub(crate) fn total_weight(&self) -> f64 {
        self.edges.iter().map(|(_, _, w)| w).sum::<f64>() + self.self_loops.iter().sum::<f64>()
    }

    /// Weighted degree of each node; a self-loop adds twice its weight.
    pub(crate) fn degrees(&self) -> Vec<f64> {
        let mut degrees = vec![0.0; self.n];
        for &(i, j, w) in &self.edges {
            degrees[i] += w;
            degrees[j] += w;
        }
        for (i, &sl) in self.self_loops.iter().enumerate() {
            degrees[i] += 2.0 * sl;
        }
        degrees
    }

    /// Neighbor weights per node, ordered by neighbor index.
    pub(crate) fn adjacency(&self) -> Vec<BTreeMap<usize, f64>> {
        let mut adj: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); self.n];
        for &(i, j, w) in &self.edges {
            *adj[i].entry(j).or_insert(0.0) += w;
            *adj[j].entry(i).or_insert(0.0) += w;
        }
        adj
    }

    /// Modularity of `communities` at the given resolution.
    ///
    /// ```text
    /// Q = Σ_c [ L_c / m  -  γ (d_c / 2m)² ]
    /// ```
    ///
    /// `L_c` is the weight inside community `c`, `d_c` its total degree.
    pub(crate) fn modularity(&self, communities: &[usize], resolution: f64) -> f64 {
        let m = self.total_weight();
        if m == 0.0 {
            return 0.0;
        }

        let degrees = self.degrees();
        // Ordered so the float sum is reproducible.
        let mut internal: BTreeMap<usize, f64> = BTreeMap::new();
        let mut total: BTreeMap<usize, f64> = BTreeMap::new();

        for &(i, j, w) in &self.edges {
            if communities[i] == communities[j] {
                *internal.entry(communities[i]).or_insert(0.0) += w;
            }
        }
        for (i, &sl) in self.self_loops.iter().enumerate() {
            *internal.entry(communities[i]).or_insert(0.0) += sl;
        }
        for (i, &d) in degrees.iter().enumerate() {
            *total.entry(communities[i]).or_insert(0.0) += d;
        }

        total
            .iter()
            .map(|(c, &d)| {
                let l = internal.get(c).copied().unwrap_or(0.0);
                l / m - resolution * (d / (2.0 * m)).powi(2)
            })
            .sum()
    }

    /// Contract communities into single nodes.
    ///
    /// Returns the contracted graph and, for every current node, its index in it.
    /// Contracted indices follow ascending community label.
    pub(crate) fn aggregate(&self, communities: &[usize]) -> (Self, Vec<usize>) {
        let mut unique: Vec<usize> = communities.to_vec();
        unique.sort_unstable();
        unique.dedup();
        let to_new: HashMap<usize, usize> =
            unique.iter().enumerate().map(|(new, &old)| (old, new)).collect();
        let relabel: Vec<usize> = communities.iter().map(|c| to_new[c]).collect();

        let mut self_loops = vec![0.0; unique.len()];
        for (i, &sl) in self.self_loops.iter().enumerate() {
            self_loops[relabel[i]] += sl;
        }

        let mut between: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        for &(i, j, w) in &self.edges {
            let (ci, cj) = (relabel[i], relabel[j]);
            if ci == cj {
                self_loops[ci] += w;
            } else {
                *between.entry((ci.min(cj), ci.max(cj))).or_insert(0.0) += w;
            }
        }

        let graph = Self {
            n: unique.len(),
            edges: between.into_iter().map(|((i, j), w)| (i, j, w)).collect(),
            self_loops,
        };
        (graph, relabel)
    }
}

/// Renumber labels to `0..k` in first-seen order.
pub(crate) fn renumber(labels: &mut [usize]) -> usize {
    let mut map: HashMap<usize, usize> = HashMap::new();
    let mut next = 0usize;
    for l in labels.iter_mut() {
        let id = *map.entry(*l).or_insert_with(|| {
            let cur = next;
            next += 1;
            cur
        });
        *l = id;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renumber_first_seen() {
        let mut labels = vec![7, 7, 3, 9, 3];
        assert_eq!(renumber(&mut labels), 3);
        assert_eq!(labels, vec![0, 0, 1, 2, 1]);
    }

    #[test]
    fn test_aggregate_keeps_total_weight() {
        let g = WeightedGraph {
            n: 4,
            edges: vec![(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)],
            self_loops: vec![0.0; 4],
        };
        let (agg, relabel) = g.aggregate(&[5, 5, 8, 8]);
        assert_eq!(relabel, vec![0, 0, 1, 1]);
        assert_eq!(agg.n, 2);
        assert_eq!(agg.self_loops, vec![1.0, 1.0]);
        assert_eq!(agg.edges, vec![(0, 1, 1.0)]);
        assert_eq!(agg.total_weight(), g.total_weight());
    }

    #[test]
    fn test_modularity_invariant_under_aggregation() {
        let g = WeightedGraph {
            n: 4,
            edges: vec![(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)],
            self_loops: vec![0.0; 4],
        };
        let labels = [0, 0, 1, 1];
        let (agg, _) = g.aggregate(&labels);
        let q = g.modularity(&labels, 1.0);
        let q_agg = agg.modularity(&[0, 1], 1.0);
        assert!((q - q_agg).abs() < 1e-12);
    }
}
