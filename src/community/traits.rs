//! Community detection traits.

use crate::error::{Error, Result};
use crate::partition::{NodeId, Partition};
use petgraph::graph::UnGraph;

/// Trait for community detection algorithms.
pub trait CommunityDetection {
    /// Detect communities in a graph.
    ///
    /// Returns a mapping from node index to community ID.
    fn detect<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>>;

    /// Get the resolution parameter (if applicable).
    fn resolution(&self) -> f64 {
        1.0
    }

    /// Detect communities in a snapshot graph whose node weights are node ids.
    ///
    /// Graph indices are translated back to the ids carried on the nodes.
    fn partition(&self, graph: &UnGraph<NodeId, ()>) -> Result<Partition> {
        self.labelled_partition(graph).map(|(_, partition)| partition)
    }

    /// Like [`partition`](Self::partition), also returning the raw per-index labels
    /// (what [`modularity`](crate::community::modularity) takes).
    fn labelled_partition(&self, graph: &UnGraph<NodeId, ()>) -> Result<(Vec<usize>, Partition)> {
        let labels = self.detect(graph)?;
        if labels.len() != graph.node_count() {
            return Err(Error::NodeOutOfRange {
                node: labels.len().min(graph.node_count()),
                len: graph.node_count(),
            });
        }
        let partition = Partition::from_assignments(
            graph
                .node_indices()
                .map(|idx| (graph[idx], labels[idx.index()])),
        );
        Ok((labels, partition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::Louvain;

    #[test]
    fn test_partition_uses_node_ids() {
        let mut graph: UnGraph<NodeId, ()> = UnGraph::new_undirected();
        let a = graph.add_node(100);
        let b = graph.add_node(200);
        let c = graph.add_node(300);
        graph.add_edge(a, b, ());
        graph.add_edge(b, c, ());
        graph.add_edge(a, c, ());

        let p = Louvain::new().partition(&graph).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.get(0), Some(&[100, 200, 300].into_iter().collect()));
    }

    #[test]
    fn test_labelled_partition_agrees_with_labels() {
        let mut graph: UnGraph<NodeId, ()> = UnGraph::new_undirected();
        let ids = [7, 8, 9, 40, 41, 42];
        let idx: Vec<_> = ids.iter().map(|&id| graph.add_node(id)).collect();
        for (a, b) in [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)] {
            graph.add_edge(idx[a], idx[b], ());
        }

        let (labels, p) = Louvain::new().labelled_partition(&graph).unwrap();
        assert_eq!(labels.len(), 6);
        assert_eq!(p.len(), 2);
        for (i, &id) in ids.iter().enumerate() {
            assert!(p.get(labels[i]).unwrap().contains(&id));
        }
        assert_eq!(p, Louvain::new().partition(&graph).unwrap());
    }

    #[test]
    fn test_partition_of_empty_graph_fails() {
        let graph: UnGraph<NodeId, ()> = UnGraph::new_undirected();
        assert_eq!(Louvain::new().partition(&graph), Err(Error::EmptyInput));
    }
}
