//! Modularity of a labeled graph.

use super::weighted::WeightedGraph;
use crate::error::{Error, Result};
use petgraph::graph::UnGraph;

/// Newman–Girvan modularity of `labels` on `graph` (unit edge weights).
///
/// ```text
/// Q = Σ_c [ L_c / m  -  γ (d_c / 2m)² ]
/// ```
///
/// `labels[i]` is the community of node index `i`. An edgeless graph scores 0.
///
/// ```rust
/// use drift::community::modularity;
/// use petgraph::graph::UnGraph;
///
/// let g = UnGraph::<(), ()>::from_edges(&[(0, 1), (2, 3)]);
/// let q = modularity(&g, &[0, 0, 1, 1], 1.0).unwrap();
/// assert!((q - 0.5).abs() < 1e-12);
/// ```
pub fn modularity<N, E>(graph: &UnGraph<N, E>, labels: &[usize], resolution: f64) -> Result<f64> {
    if labels.len() != graph.node_count() {
        return Err(Error::NodeOutOfRange {
            node: labels.len().min(graph.node_count()),
            len: graph.node_count(),
        });
    }
    if !resolution.is_finite() || resolution < 0.0 {
        return Err(Error::InvalidParameter {
            name: "resolution",
            message: "must be finite and non-negative",
        });
    }
    Ok(WeightedGraph::from_graph(graph).modularity(labels, resolution))
}
