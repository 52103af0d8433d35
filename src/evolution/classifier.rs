//! Event classification over consecutive partitions.

use std::collections::BTreeMap;
use std::fmt::Debug;

use tracing::debug;

use super::event::{Event, TransitionEvent};
use super::overlap::OverlapMatrix;
use super::thresholds::Thresholds;
use crate::error::{Error, Result};
use crate::partition::{CommunityId, Snapshot};

/// Classify every transition of an ordered snapshot sequence.
///
/// Events of transition `(t_i, t_{i+1})` all precede those of
/// `(t_{i+1}, t_{i+2})`. Within a transition they are grouped Survive, Merge,
/// Split, Death, Birth. Transitions where either side is empty emit nothing.
///
/// Snapshot order is taken as given; use [`classify_checked`] to have it verified.
///
/// ```rust
/// use drift::{classify, Event, Partition, Snapshot, Thresholds};
///
/// let snapshots = vec![
///     Snapshot::new(2010, Partition::from_assignments([(1, 0), (2, 0), (3, 0), (4, 1), (5, 1)])),
///     Snapshot::new(2011, Partition::from_assignments([(1, 0), (2, 0), (3, 0), (4, 0)])),
/// ];
/// let events = classify(&snapshots, &Thresholds::default());
/// assert_eq!(events[0].time_to, 2011);
/// assert_eq!(events[0].event, Event::Survive { source: 0, target: 0, score: 0.75 });
/// ```
pub fn classify<T: Clone + Debug>(
    snapshots: &[Snapshot<T>],
    thresholds: &Thresholds,
) -> Vec<TransitionEvent<T>> {
    snapshots
        .windows(2)
        .flat_map(|pair| transition(&pair[0], &pair[1], thresholds))
        .collect()
}

/// [`classify`], after validating thresholds and that times strictly increase.
pub fn classify_checked<T: Clone + Debug + Ord>(
    snapshots: &[Snapshot<T>],
    thresholds: &Thresholds,
) -> Result<Vec<TransitionEvent<T>>> {
    thresholds.validate()?;
    if let Some(position) = snapshots
        .windows(2)
        .position(|pair| pair[0].time >= pair[1].time)
    {
        return Err(Error::UnorderedSnapshots {
            position: position + 1,
        });
    }
    Ok(classify(snapshots, thresholds))
}

/// Events of a single transition `before -> after`, stamped with `after.time`.
pub fn transition<T: Clone + Debug>(
    before: &Snapshot<T>,
    after: &Snapshot<T>,
    thresholds: &Thresholds,
) -> Vec<TransitionEvent<T>> {
    if before.partition.is_empty() || after.partition.is_empty() {
        debug!(from = ?before.time, to = ?after.time, "empty partition, transition skipped");
        return Vec::new();
    }

    let overlaps = OverlapMatrix::compute(&before.partition, &after.partition);
    let events = events_from(&overlaps, thresholds);

    debug!(
        from = ?before.time,
        to = ?after.time,
        sources = overlaps.sources().len(),
        targets = overlaps.targets().len(),
        events = events.len(),
        "classified transition"
    );

    events
        .into_iter()
        .map(|event| TransitionEvent {
            time_to: after.time.clone(),
            event,
        })
        .collect()
}

/// Apply the five rules to a precomputed overlap matrix.
pub fn events_from(overlaps: &OverlapMatrix, thresholds: &Thresholds) -> Vec<Event> {
    let mut events = Vec::new();
    if overlaps.is_empty() {
        return events;
    }
    let sources = overlaps.sources();
    let targets = overlaps.targets();

    // Survive
    for (i, &source) in sources.iter().enumerate() {
        if let Some((target, score)) = overlaps.best_target(i) {
            if score >= thresholds.survive {
                events.push(Event::Survive {
                    source,
                    target,
                    score,
                });
            }
        }
    }

    // Merge
    for (j, &target) in targets.iter().enumerate() {
        let scores: BTreeMap<CommunityId, f64> = sources
            .iter()
            .zip(overlaps.column(j))
            .filter(|&(_, score)| score >= thresholds.merge)
            .map(|(&source, score)| (source, score))
            .collect();
        if scores.len() > 1 {
            events.push(Event::Merge {
                sources: scores.keys().copied().collect(),
                target,
                scores,
            });
        }
    }

    // Split
    for (i, &source) in sources.iter().enumerate() {
        let scores: BTreeMap<CommunityId, f64> = targets
            .iter()
            .zip(overlaps.row(i))
            .filter(|&(_, &score)| score >= thresholds.split)
            .map(|(&target, &score)| (target, score))
            .collect();
        if scores.len() > 1 {
            events.push(Event::Split {
                source,
                targets: scores.keys().copied().collect(),
                scores,
            });
        }
    }

    // Death
    for (i, &source) in sources.iter().enumerate() {
        let best = overlaps.row(i).iter().copied().fold(0.0, f64::max);
        if best < thresholds.death {
            events.push(Event::Death {
                source,
                score: best,
            });
        }
    }

    // Birth
    for (j, &target) in targets.iter().enumerate() {
        let best = overlaps.best_source_score(j);
        if best < thresholds.birth {
            events.push(Event::Birth {
                target,
                score: best,
            });
        }
    }

    events
}

/// Incremental classifier that keeps only the latest snapshot.
///
/// Feeding snapshots one at a time yields the same events, in the same
/// order, as [`classify`] over the whole sequence, while holding at most two
/// partitions in memory.
#[derive(Debug, Clone)]
pub struct Classifier<T> {
    thresholds: Thresholds,
    previous: Option<Snapshot<T>>,
    seen: usize,
}

impl<T: Clone + Debug + Ord> Classifier<T> {
    /// Create a classifier, validating the thresholds.
    pub fn new(thresholds: Thresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            previous: None,
            seen: 0,
        })
    }

    /// Thresholds in use.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Number of snapshots accepted so far.
    pub fn seen(&self) -> usize {
        self.seen
    }

    /// Accept the next snapshot and return the events of the transition it closes.
    ///
    /// The first snapshot closes no transition. A snapshot whose time does not
    /// exceed the previous one is rejected and the classifier state is unchanged.
    pub fn push(&mut self, snapshot: Snapshot<T>) -> Result<Vec<TransitionEvent<T>>> {
        let events = match &self.previous {
            Some(prev) if prev.time >= snapshot.time => {
                return Err(Error::UnorderedSnapshots {
                    position: self.seen,
                });
            }
            Some(prev) => transition(prev, &snapshot, &self.thresholds),
            None => Vec::new(),
        };
        self.previous = Some(snapshot);
        self.seen += 1;
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::EventKind;
    use std::collections::BTreeSet;

    fn snap(time: u32, groups: &[&[usize]]) -> Snapshot<u32> {
        let partition = groups
            .iter()
            .enumerate()
            .map(|(cid, nodes)| (cid, nodes.iter().copied().collect::<BTreeSet<_>>()))
            .collect();
        Snapshot::new(time, partition)
    }

    #[test]
    fn test_events_grouped_by_kind() {
        // 0 survives into 0, 1 dies, 2 is born.
        let snapshots = vec![
            snap(1, &[&[1, 2, 3], &[7, 8]]),
            snap(2, &[&[1, 2, 3], &[20, 21]]),
        ];
        let events = classify(&snapshots, &Thresholds::default());
        let kinds: Vec<EventKind> = events.iter().map(TransitionEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Survive, EventKind::Death, EventKind::Birth]
        );
    }

    #[test]
    fn test_transitions_in_input_order() {
        let snapshots = vec![
            snap(1, &[&[1, 2]]),
            snap(2, &[&[1, 2]]),
            snap(3, &[&[1, 2]]),
        ];
        let events = classify(&snapshots, &Thresholds::default());
        let times: Vec<u32> = events.iter().map(|e| e.time_to).collect();
        assert_eq!(times, vec![2, 3]);
    }

    #[test]
    fn test_empty_partition_skips_both_adjacent_transitions() {
        let snapshots = vec![snap(1, &[&[1, 2]]), snap(2, &[]), snap(3, &[&[1, 2]])];
        assert!(classify(&snapshots, &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_single_snapshot_yields_nothing() {
        assert!(classify(&[snap(1, &[&[1]])], &Thresholds::default()).is_empty());
        assert!(classify::<u32>(&[], &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_survive_and_merge_reported_together() {
        // Both sources overlap the target at 0.5: one survives into it and both merge.
        let snapshots = vec![snap(1, &[&[1, 2], &[3, 4]]), snap(2, &[&[1, 2, 3, 4]])];
        let events = classify(&snapshots, &Thresholds::default());
        let kinds: Vec<EventKind> = events.iter().map(TransitionEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Survive, EventKind::Survive, EventKind::Merge]
        );
    }

    #[test]
    fn test_checked_rejects_unordered_times() {
        let snapshots = vec![snap(3, &[&[1]]), snap(2, &[&[1]])];
        let err = classify_checked(&snapshots, &Thresholds::default()).unwrap_err();
        assert_eq!(err, Error::UnorderedSnapshots { position: 1 });
    }

    #[test]
    fn test_checked_rejects_bad_thresholds() {
        let snapshots = vec![snap(1, &[&[1]]), snap(2, &[&[1]])];
        let result = classify_checked(&snapshots, &Thresholds::new().with_death(2.0));
        assert!(matches!(
            result,
            Err(Error::InvalidParameter { name: "death", .. })
        ));
    }

    #[test]
    fn test_streaming_rejects_stale_snapshot_and_keeps_state() {
        let mut c = Classifier::new(Thresholds::default()).unwrap();
        assert!(c.push(snap(1, &[&[1, 2]])).unwrap().is_empty());
        assert!(c.push(snap(1, &[&[1, 2]])).is_err());
        assert_eq!(c.seen(), 1);
        let events = c.push(snap(2, &[&[1, 2]])).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::Survive);
    }
}
