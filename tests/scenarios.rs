use drift::{classify, Event, EventKind, Partition, Snapshot, Thresholds, TransitionEvent};
use std::collections::BTreeSet;

fn partition(groups: &[(usize, &[usize])]) -> Partition {
    groups
        .iter()
        .map(|&(cid, nodes)| (cid, nodes.iter().copied().collect::<BTreeSet<_>>()))
        .collect()
}

fn run(before: Partition, after: Partition) -> Vec<TransitionEvent<u32>> {
    let snapshots = vec![Snapshot::new(0, before), Snapshot::new(1, after)];
    classify(&snapshots, &Thresholds::default())
}

fn kinds(events: &[TransitionEvent<u32>]) -> Vec<EventKind> {
    events.iter().map(TransitionEvent::kind).collect()
}

#[test]
fn growth_survives_and_boundary_overlap_is_not_death() {
    let events = run(
        partition(&[(0, &[1, 2, 3]), (1, &[4, 5])]),
        partition(&[(0, &[1, 2, 3, 4])]),
    );

    assert_eq!(
        events[0].event,
        Event::Survive {
            source: 0,
            target: 0,
            score: 0.75,
        }
    );
    // Community 1 peaks at exactly 0.2; death needs strictly less.
    assert!(!events
        .iter()
        .any(|e| matches!(e.event, Event::Death { source: 1, .. })));
    assert_eq!(kinds(&events), vec![EventKind::Survive]);
}

#[test]
fn two_halves_merge() {
    let events = run(
        partition(&[(0, &[1, 2]), (1, &[3, 4])]),
        partition(&[(0, &[1, 2, 3, 4])]),
    );

    let merge = events
        .iter()
        .find(|e| e.kind() == EventKind::Merge)
        .expect("merge event");
    assert_eq!(
        merge.event,
        Event::Merge {
            sources: vec![0, 1],
            target: 0,
            scores: [(0, 0.5), (1, 0.5)].into_iter().collect(),
        }
    );
}

#[test]
fn one_community_splits() {
    let events = run(
        partition(&[(0, &[1, 2, 3, 4])]),
        partition(&[(0, &[1, 2]), (1, &[3, 4])]),
    );

    let split = events
        .iter()
        .find(|e| e.kind() == EventKind::Split)
        .expect("split event");
    assert_eq!(
        split.event,
        Event::Split {
            source: 0,
            targets: vec![0, 1],
            scores: [(0, 0.5), (1, 0.5)].into_iter().collect(),
        }
    );
    // Both targets tie at 0.5; survival goes to the smaller id.
    assert_eq!(
        events[0].event,
        Event::Survive {
            source: 0,
            target: 0,
            score: 0.5,
        }
    );
}

#[test]
fn unrelated_community_is_born() {
    let events = run(
        partition(&[(0, &[1, 2])]),
        partition(&[(0, &[1, 2]), (1, &[9, 10])]),
    );

    assert_eq!(kinds(&events), vec![EventKind::Survive, EventKind::Birth]);
    assert_eq!(
        events[1].event,
        Event::Birth {
            target: 1,
            score: 0.0,
        }
    );
}

#[test]
fn vanished_community_dies() {
    let events = run(
        partition(&[(0, &[1, 2]), (1, &[5, 6, 7])]),
        partition(&[(0, &[1, 2])]),
    );
    assert_eq!(
        events.last().map(|e| &e.event),
        Some(&Event::Death {
            source: 1,
            score: 0.0,
        })
    );
}

#[test]
fn empty_side_emits_nothing() {
    let some = partition(&[(0, &[1, 2])]);
    assert!(run(Partition::new(), some.clone()).is_empty());
    assert!(run(some, Partition::new()).is_empty());
}

#[test]
fn events_carry_later_time() {
    let snapshots = vec![
        Snapshot::new(2008, partition(&[(0, &[1, 2])])),
        Snapshot::new(2009, partition(&[(0, &[1, 2, 3])])),
        Snapshot::new(2010, partition(&[(0, &[1, 2, 3]), (1, &[8, 9])])),
    ];
    let events = classify(&snapshots, &Thresholds::default());
    let stamped: Vec<(u32, EventKind)> = events.iter().map(|e| (e.time_to, e.kind())).collect();
    assert_eq!(
        stamped,
        vec![
            (2009, EventKind::Survive),
            (2010, EventKind::Survive),
            (2010, EventKind::Birth),
        ]
    );
}

#[test]
fn custom_thresholds_change_outcome() {
    let before = partition(&[(0, &[1, 2, 3]), (1, &[4, 5])]);
    let after = partition(&[(0, &[1, 2, 3, 4])]);
    let snapshots = vec![Snapshot::new(0u32, before), Snapshot::new(1, after)];

    let strict = Thresholds::new().with_survive(0.8).with_death(0.25);
    let events = classify(&snapshots, &strict);
    assert_eq!(
        events,
        vec![TransitionEvent {
            time_to: 1,
            event: Event::Death {
                source: 1,
                score: 0.2,
            },
        }]
    );
}
