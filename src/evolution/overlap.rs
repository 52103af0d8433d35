//! Pairwise community overlap between two partitions.

use crate::metrics::jaccard;
use crate::partition::{CommunityId, Partition};

/// Jaccard overlap of every (source, target) community pair.
///
/// Rows follow the earlier partition, columns the later one, both in
/// ascending community id order.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapMatrix {
    sources: Vec<CommunityId>,
    targets: Vec<CommunityId>,
    /// Row-major, `sources.len() * targets.len()`.
    scores: Vec<f64>,
}

impl OverlapMatrix {
    /// Compare every community of `before` with every community of `after`.
    ///
    /// Cost is `|before| * |after|` set comparisons.
    pub fn compute(before: &Partition, after: &Partition) -> Self {
        let sources: Vec<CommunityId> = before.ids().collect();
        let targets: Vec<CommunityId> = after.ids().collect();

        let mut scores = Vec::with_capacity(sources.len() * targets.len());
        for (_, a) in before.iter() {
            for (_, b) in after.iter() {
                scores.push(jaccard(a, b));
            }
        }

        Self {
            sources,
            targets,
            scores,
        }
    }

    /// Earlier-side ids, ascending.
    pub fn sources(&self) -> &[CommunityId] {
        &self.sources
    }

    /// Later-side ids, ascending.
    pub fn targets(&self) -> &[CommunityId] {
        &self.targets
    }

    /// True when either side has no communities.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Overlap of row `i` with column `j`.
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.scores[i * self.targets.len() + j]
    }

    /// Overlap of two communities by id.
    pub fn get(&self, source: CommunityId, target: CommunityId) -> Option<f64> {
        let i = self.sources.binary_search(&source).ok()?;
        let j = self.targets.binary_search(&target).ok()?;
        Some(self.at(i, j))
    }

    /// Scores of row `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        let w = self.targets.len();
        &self.scores[i * w..(i + 1) * w]
    }

    /// Scores of column `j`.
    pub fn column(&self, j: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.sources.len()).map(move |i| self.at(i, j))
    }

    /// Best target for row `i`, with its score.
    ///
    /// Ties go to the smallest target id. `None` when there are no targets.
    pub fn best_target(&self, i: usize) -> Option<(CommunityId, f64)> {
        let mut best: Option<(CommunityId, f64)> = None;
        for (j, &score) in self.row(i).iter().enumerate() {
            // Strict `>` keeps the earliest (smallest id) on ties.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((self.targets[j], score));
            }
        }
        best
    }

    /// Highest overlap of column `j` with any source. `0.0` when there are no sources.
    pub fn best_source_score(&self, j: usize) -> f64 {
        self.column(j).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_layout() {
        let before = Partition::from_assignments([(1, 0), (2, 0), (3, 0), (4, 1), (5, 1)]);
        let after = Partition::from_assignments([(1, 0), (2, 0), (3, 0), (4, 0)]);
        let m = OverlapMatrix::compute(&before, &after);
        assert_eq!(m.sources(), &[0, 1]);
        assert_eq!(m.targets(), &[0]);
        assert_eq!(m.get(0, 0), Some(0.75));
        assert_eq!(m.get(1, 0), Some(0.2));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_best_target_tie_goes_to_smallest_id() {
        let before = Partition::from_assignments([(1, 0), (2, 0), (3, 0), (4, 0)]);
        let after = Partition::from_assignments([(1, 7), (2, 7), (3, 3), (4, 3)]);
        let m = OverlapMatrix::compute(&before, &after);
        assert_eq!(m.best_target(0), Some((3, 0.5)));
    }

    #[test]
    fn test_empty_side() {
        let before = Partition::from_assignments([(1, 0)]);
        let m = OverlapMatrix::compute(&before, &Partition::new());
        assert!(m.is_empty());
        assert_eq!(m.best_target(0), None);
    }
}
