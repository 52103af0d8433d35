use drift::{classify, jaccard, Classifier, Partition, Snapshot, Thresholds};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn node_set() -> impl Strategy<Value = BTreeSet<usize>> {
    proptest::collection::btree_set(0usize..40, 0..20)
}

// Disjoint partition: every node in 0..n gets a label in 0..k.
fn partition() -> impl Strategy<Value = Partition> {
    (1usize..30, 1usize..6).prop_flat_map(|(n, k)| {
        proptest::collection::vec(0..k, n).prop_map(|labels| Partition::from_labels(&labels))
    })
}

fn snapshots() -> impl Strategy<Value = Vec<Snapshot<u32>>> {
    proptest::collection::vec(partition(), 0..5).prop_map(|parts| {
        parts
            .into_iter()
            .enumerate()
            .map(|(t, p)| Snapshot::new(t as u32, p))
            .collect()
    })
}

proptest! {
    #[test]
    fn jaccard_is_symmetric_and_bounded(a in node_set(), b in node_set()) {
        let ab = jaccard(&a, &b);
        prop_assert_eq!(ab, jaccard(&b, &a));
        prop_assert!((0.0..=1.0).contains(&ab), "out of range: {ab}");
    }

    #[test]
    fn jaccard_of_set_with_itself(a in node_set()) {
        let expected = if a.is_empty() { 0.0 } else { 1.0 };
        prop_assert_eq!(jaccard(&a, &a), expected);
    }

    #[test]
    fn classification_is_idempotent(snaps in snapshots()) {
        let thresholds = Thresholds::default();
        prop_assert_eq!(classify(&snaps, &thresholds), classify(&snaps, &thresholds));
    }

    #[test]
    fn streaming_matches_batch(snaps in snapshots()) {
        let thresholds = Thresholds::default();
        let batch = classify(&snaps, &thresholds);

        let mut classifier = Classifier::new(thresholds).unwrap();
        let mut streamed = Vec::new();
        for s in snaps {
            streamed.extend(classifier.push(s).unwrap());
        }
        prop_assert_eq!(batch, streamed);
    }

    #[test]
    fn scores_stay_within_unit_interval(snaps in snapshots()) {
        for e in classify(&snaps, &Thresholds::default()) {
            match e.event.detail() {
                drift::evolution::Detail::Score(s) => prop_assert!((0.0..=1.0).contains(&s)),
                drift::evolution::Detail::PerCommunity(scores) => {
                    prop_assert!(scores.len() > 1);
                    prop_assert!(scores.values().all(|s| (0.0..=1.0).contains(s)));
                }
            }
        }
    }
}

#[test]
fn empty_snapshot_list_yields_nothing() {
    assert!(classify::<u32>(&[], &Thresholds::default()).is_empty());
}

#[cfg(feature = "community")]
mod centrality {
    use drift::centrality::{
        betweenness_centrality, closeness_centrality, degree_centrality, pagerank, PageRankConfig,
    };
    use petgraph::graph::UnGraph;
    use proptest::prelude::*;

    fn graph() -> impl Strategy<Value = UnGraph<usize, ()>> {
        (1usize..12).prop_flat_map(|n| {
            proptest::collection::vec((0..n, 0..n), 0..30).prop_map(move |edges| {
                let mut g = UnGraph::new_undirected();
                let idx: Vec<_> = (0..n).map(|i| g.add_node(i)).collect();
                for (u, v) in edges {
                    g.add_edge(idx[u], idx[v], ());
                }
                g
            })
        })
    }

    fn unit(scores: &[f64]) -> bool {
        scores.iter().all(|&s| (-1e-12..=1.0 + 1e-9).contains(&s))
    }

    proptest! {
        #[test]
        fn pagerank_is_a_distribution(g in graph()) {
            let pr = pagerank(&g, PageRankConfig::default()).unwrap();
            prop_assert_eq!(pr.len(), g.node_count());
            let total: f64 = pr.iter().sum();
            prop_assert!((total - 1.0).abs() < 1e-9, "sum={}", total);
            prop_assert!(unit(&pr));
        }

        #[test]
        fn path_measures_are_normalized(g in graph()) {
            prop_assert!(unit(&degree_centrality(&g)));
            prop_assert!(unit(&betweenness_centrality(&g)));
            prop_assert!(unit(&closeness_centrality(&g)));
        }
    }
}
