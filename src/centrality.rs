//! Node centrality on snapshot graphs.
//!
//! Five measures, each returning one score per node indexed by
//! `NodeIndex::index()`:
//!
//! | Measure | Score |
//! |---------|-------|
//! | degree | `deg(v) / (n - 1)` |
//! | betweenness | shortest paths through `v`, over `(n - 1)(n - 2)` |
//! | closeness | `r / Σ d(v, u)`, scaled by `r / (n - 1)` for `r` reachable nodes |
//! | eigenvector | principal eigenvector of `A + I`, unit L2 norm |
//! | PageRank | random surfer with teleport `1 - damping` |
//!
//! Graphs are read as simple: parallel edges count once and self-loops are
//! ignored. Snapshot graphs from [`SnapshotBuilder`](crate::SnapshotBuilder)
//! are already simple.
//!
//! ```rust
//! use drift::{Centralities, CentralityMeasure};
//! use petgraph::graph::UnGraph;
//!
//! let mut g: UnGraph<usize, ()> = UnGraph::new_undirected();
//! let hub = g.add_node(10);
//! for id in [11, 12, 13] {
//!     let leaf = g.add_node(id);
//!     g.add_edge(hub, leaf, ());
//! }
//!
//! let c = Centralities::compute(&g).unwrap();
//! assert_eq!(c.top_k(CentralityMeasure::Betweenness, 1), vec![(10, 1.0)]);
//! ```

use std::collections::VecDeque;
use std::fmt;

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::error::{Error, Result};
use crate::partition::NodeId;

/// The centrality measures [`Centralities`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CentralityMeasure {
    /// Normalized degree.
    Degree,
    /// Normalized shortest-path betweenness.
    Betweenness,
    /// Closeness, scaled for disconnected graphs.
    Closeness,
    /// Eigenvector centrality.
    Eigenvector,
    /// PageRank.
    PageRank,
}

impl CentralityMeasure {
    /// Every measure, in report order.
    pub const ALL: [CentralityMeasure; 5] = [
        CentralityMeasure::Degree,
        CentralityMeasure::Betweenness,
        CentralityMeasure::Closeness,
        CentralityMeasure::Eigenvector,
        CentralityMeasure::PageRank,
    ];

    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CentralityMeasure::Degree => "Degree",
            CentralityMeasure::Betweenness => "Betweenness",
            CentralityMeasure::Closeness => "Closeness",
            CentralityMeasure::Eigenvector => "Eigenvector",
            CentralityMeasure::PageRank => "PageRank",
        }
    }
}

impl fmt::Display for CentralityMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PageRank settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    /// Probability of following an edge rather than teleporting.
    pub damping: f64,
    /// Iteration cap.
    pub max_iterations: usize,
    /// Per-node tolerance; the run stops once the L1 change drops below `n * tolerance`.
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl PageRankConfig {
    /// Reject out-of-range settings.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(Error::InvalidParameter {
                name: "damping",
                message: "must be within [0, 1]",
            });
        }
        check_iteration(self.max_iterations, self.tolerance)
    }
}

/// Eigenvector centrality settings.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EigenvectorConfig {
    /// Iteration cap.
    pub max_iterations: usize,
    /// Per-node tolerance; the run stops once the L1 change drops below `n * tolerance`.
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-6,
        }
    }
}

impl EigenvectorConfig {
    /// Reject out-of-range settings.
    pub fn validate(&self) -> Result<()> {
        check_iteration(self.max_iterations, self.tolerance)
    }
}

fn check_iteration(max_iterations: usize, tolerance: f64) -> Result<()> {
    if max_iterations == 0 {
        return Err(Error::InvalidParameter {
            name: "max_iterations",
            message: "must be > 0",
        });
    }
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "tolerance",
            message: "must be finite and > 0",
        });
    }
    Ok(())
}

/// Outcome of a power iteration.
///
/// `iterations` is the number of update steps performed and `diff_l1` the
/// last L1 change between steps.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerIteration {
    pub scores: Vec<f64>,
    pub iterations: usize,
    pub diff_l1: f64,
    pub converged: bool,
}

impl PowerIteration {
    fn empty() -> Self {
        Self {
            scores: Vec::new(),
            iterations: 0,
            diff_l1: 0.0,
            converged: true,
        }
    }

    fn into_scores(self, algorithm: &'static str) -> Result<Vec<f64>> {
        if self.converged {
            debug!(algorithm, iterations = self.iterations, "converged");
            Ok(self.scores)
        } else {
            Err(Error::NotConverged {
                algorithm,
                iterations: self.iterations,
            })
        }
    }
}

/// Sorted, deduplicated neighbor lists without self-loops.
fn simple_adjacency<N, E>(graph: &UnGraph<N, E>) -> Vec<Vec<usize>> {
    let mut adj = vec![Vec::new(); graph.node_count()];
    for e in graph.edge_references() {
        let (u, v) = (e.source().index(), e.target().index());
        if u != v {
            adj[u].push(v);
            adj[v].push(u);
        }
    }
    for list in &mut adj {
        list.sort_unstable();
        list.dedup();
    }
    adj
}

/// Degree over `n - 1`. A single node scores 1.
pub fn degree_centrality<N, E>(graph: &UnGraph<N, E>) -> Vec<f64> {
    let adj = simple_adjacency(graph);
    let n = adj.len();
    if n <= 1 {
        return vec![1.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    adj.iter().map(|nbrs| nbrs.len() as f64 * scale).collect()
}

/// Brandes betweenness, normalized by `(n - 1)(n - 2)`.
pub fn betweenness_centrality<N, E>(graph: &UnGraph<N, E>) -> Vec<f64> {
    let adj = simple_adjacency(graph);
    let n = adj.len();
    let mut bc = vec![0.0_f64; n];

    let mut stack = Vec::with_capacity(n);
    let mut queue = VecDeque::with_capacity(n);
    let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut dist = vec![usize::MAX; n];
    let mut delta = vec![0.0_f64; n];

    for s in 0..n {
        for p in &mut preds {
            p.clear();
        }
        sigma.fill(0.0);
        dist.fill(usize::MAX);
        delta.fill(0.0);

        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in &adj[v] {
                if dist[w] == usize::MAX {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != s {
                bc[w] += delta[w];
            }
        }
    }

    // Each unordered pair was counted from both ends.
    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for b in &mut bc {
            *b *= scale;
        }
    }
    bc
}

/// Closeness over the reachable part of the graph, scaled by the fraction of
/// the graph that is reachable. Isolated nodes score 0.
pub fn closeness_centrality<N, E>(graph: &UnGraph<N, E>) -> Vec<f64> {
    let adj = simple_adjacency(graph);
    let n = adj.len();
    let mut out = Vec::with_capacity(n);
    let mut dist = vec![usize::MAX; n];
    let mut queue = VecDeque::with_capacity(n);

    for s in 0..n {
        dist.fill(usize::MAX);
        dist[s] = 0;
        queue.push_back(s);
        let mut total = 0usize;
        let mut reachable = 0usize;

        while let Some(v) = queue.pop_front() {
            for &w in &adj[v] {
                if dist[w] == usize::MAX {
                    dist[w] = dist[v] + 1;
                    total += dist[w];
                    reachable += 1;
                    queue.push_back(w);
                }
            }
        }

        let score = if total > 0 && n > 1 {
            let r = reachable as f64;
            (r / total as f64) * (r / (n - 1) as f64)
        } else {
            0.0
        };
        out.push(score);
    }
    out
}

/// Eigenvector centrality by power iteration on `A + I`, with convergence reporting.
pub fn eigenvector_run<N, E>(graph: &UnGraph<N, E>, config: EigenvectorConfig) -> PowerIteration {
    let adj = simple_adjacency(graph);
    let n = adj.len();
    if n == 0 {
        return PowerIteration::empty();
    }

    let mut x = vec![1.0 / n as f64; n];
    let mut next = vec![0.0; n];
    let threshold = n as f64 * config.tolerance;

    let mut iterations = 0;
    let mut diff = f64::INFINITY;
    let mut converged = false;
    for _ in 0..config.max_iterations {
        iterations += 1;
        next.copy_from_slice(&x);
        for (v, nbrs) in adj.iter().enumerate() {
            for &w in nbrs {
                next[w] += x[v];
            }
        }
        let norm = next.iter().map(|s| s * s).sum::<f64>().sqrt();
        if norm > 0.0 {
            for s in &mut next {
                *s /= norm;
            }
        }

        diff = x.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut x, &mut next);
        if diff < threshold {
            converged = true;
            break;
        }
    }

    PowerIteration {
        scores: x,
        iterations,
        diff_l1: diff,
        converged,
    }
}

/// Checked eigenvector centrality. Fails with [`Error::NotConverged`] when the
/// iteration cap is reached first.
pub fn eigenvector_centrality<N, E>(
    graph: &UnGraph<N, E>,
    config: EigenvectorConfig,
) -> Result<Vec<f64>> {
    config.validate()?;
    eigenvector_run(graph, config).into_scores("eigenvector")
}

/// PageRank with each undirected edge followed both ways, with convergence reporting.
///
/// Isolated nodes spread their mass uniformly, so scores always sum to 1.
pub fn pagerank_run<N, E>(graph: &UnGraph<N, E>, config: PageRankConfig) -> PowerIteration {
    let adj = simple_adjacency(graph);
    let n = adj.len();
    if n == 0 {
        return PowerIteration::empty();
    }

    let n_f64 = n as f64;
    let mut x = vec![1.0 / n_f64; n];
    let mut next = vec![0.0; n];
    let teleport = (1.0 - config.damping) / n_f64;
    let threshold = n_f64 * config.tolerance;

    let mut iterations = 0;
    let mut diff = f64::INFINITY;
    let mut converged = false;
    for _ in 0..config.max_iterations {
        iterations += 1;
        let dangling: f64 = adj
            .iter()
            .zip(&x)
            .filter(|(nbrs, _)| nbrs.is_empty())
            .map(|(_, s)| s)
            .sum();
        next.fill(teleport + config.damping * dangling / n_f64);

        for (v, nbrs) in adj.iter().enumerate() {
            if nbrs.is_empty() {
                continue;
            }
            let share = config.damping * x[v] / nbrs.len() as f64;
            for &w in nbrs {
                next[w] += share;
            }
        }

        diff = x.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut x, &mut next);
        if diff < threshold {
            converged = true;
            break;
        }
    }

    PowerIteration {
        scores: x,
        iterations,
        diff_l1: diff,
        converged,
    }
}

/// Checked PageRank. Fails with [`Error::NotConverged`] when the iteration
/// cap is reached first.
pub fn pagerank<N, E>(graph: &UnGraph<N, E>, config: PageRankConfig) -> Result<Vec<f64>> {
    config.validate()?;
    pagerank_run(graph, config).into_scores("pagerank")
}

/// The `k` highest-scoring nodes as `(node id, score)`, best first.
///
/// Equal scores are ordered by ascending node id.
pub fn top_k<E>(graph: &UnGraph<NodeId, E>, scores: &[f64], k: usize) -> Result<Vec<(NodeId, f64)>> {
    if scores.len() != graph.node_count() {
        return Err(Error::NodeOutOfRange {
            node: scores.len().min(graph.node_count()),
            len: graph.node_count(),
        });
    }
    let ids: Vec<NodeId> = graph.node_weights().copied().collect();
    Ok(rank(&ids, scores, k))
}

fn rank(ids: &[NodeId], scores: &[f64], k: usize) -> Vec<(NodeId, f64)> {
    let mut ranked: Vec<(NodeId, f64)> = ids.iter().copied().zip(scores.iter().copied()).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

/// All five measures for one graph, plus the node id of every index.
#[derive(Debug, Clone, PartialEq)]
pub struct Centralities {
    /// Node id per graph index.
    pub node_ids: Vec<NodeId>,
    pub degree: Vec<f64>,
    pub betweenness: Vec<f64>,
    pub closeness: Vec<f64>,
    pub eigenvector: Vec<f64>,
    pub pagerank: Vec<f64>,
}

impl Centralities {
    /// Compute every measure with default settings.
    pub fn compute<E>(graph: &UnGraph<NodeId, E>) -> Result<Self> {
        Self::compute_with(graph, PageRankConfig::default(), EigenvectorConfig::default())
    }

    /// Compute every measure with explicit power-iteration settings.
    pub fn compute_with<E>(
        graph: &UnGraph<NodeId, E>,
        pagerank_config: PageRankConfig,
        eigenvector_config: EigenvectorConfig,
    ) -> Result<Self> {
        if graph.node_count() == 0 {
            return Err(Error::EmptyInput);
        }
        let out = Self {
            node_ids: graph.node_weights().copied().collect(),
            degree: degree_centrality(graph),
            betweenness: betweenness_centrality(graph),
            closeness: closeness_centrality(graph),
            eigenvector: eigenvector_centrality(graph, eigenvector_config)?,
            pagerank: pagerank(graph, pagerank_config)?,
        };
        debug!(nodes = out.node_ids.len(), edges = graph.edge_count(), "computed centralities");
        Ok(out)
    }

    /// Scores of one measure, indexed like `node_ids`.
    pub fn scores(&self, measure: CentralityMeasure) -> &[f64] {
        match measure {
            CentralityMeasure::Degree => &self.degree,
            CentralityMeasure::Betweenness => &self.betweenness,
            CentralityMeasure::Closeness => &self.closeness,
            CentralityMeasure::Eigenvector => &self.eigenvector,
            CentralityMeasure::PageRank => &self.pagerank,
        }
    }

    /// The `k` best nodes by `measure`; ties by ascending node id.
    pub fn top_k(&self, measure: CentralityMeasure, k: usize) -> Vec<(NodeId, f64)> {
        rank(&self.node_ids, self.scores(measure), k)
    }
}
