use drift::community::Louvain;
use drift::{
    Centralities, CentralityMeasure, EventKind, EvolutionAnalysis, SnapshotBuilder, Thresholds,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=drift=debug shows every snapshot and transition.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A toy citation graph. Papers carry a publication year; an edge is
    // visible once both endpoints are published.
    //
    // 2018: two groups {1,2,3} and {4,5,6}
    // 2019: the groups get bridged densely and fuse
    // 2020: a new group {10,11,12} appears, disconnected from the rest
    let years = [
        (1, 2018),
        (2, 2018),
        (3, 2018),
        (4, 2018),
        (5, 2018),
        (6, 2018),
        (7, 2019),
        (8, 2019),
        (10, 2020),
        (11, 2020),
        (12, 2020),
    ];
    let edges = [
        (1, 2),
        (2, 3),
        (1, 3),
        (4, 5),
        (5, 6),
        (4, 6),
        (7, 1),
        (7, 2),
        (7, 4),
        (7, 5),
        (8, 3),
        (8, 6),
        (8, 7),
        (10, 11),
        (11, 12),
        (10, 12),
    ];

    let snapshots = SnapshotBuilder::new(years).with_edges(edges).build()?;
    let analysis = EvolutionAnalysis::new(Louvain::new()).with_thresholds(Thresholds::default());
    let report = analysis.run(&snapshots)?;

    println!("year\tcommunities");
    for (year, count) in report.community_counts() {
        println!("{year}\t{count}");
    }

    println!("\nyear\tmodularity");
    for (year, q) in &report.modularity {
        println!("{year}\t{q:.3}");
    }

    println!("\nyear_to\tnmi");
    for (year, score) in &report.nmi {
        println!("{year}\t{score:.3}");
    }

    println!("\nyear\tevent\tsource\ttarget\tscore");
    for event in &report.events {
        println!("{event}");
    }

    for kind in EventKind::ALL {
        println!("{kind}: {}", report.events_of(kind).count());
    }

    if let Some(last) = snapshots.last() {
        let centrality = Centralities::compute(&last.graph)?;
        for measure in CentralityMeasure::ALL {
            println!("\n=== top 3 by {measure} ({}) ===", last.time);
            for (rank, (node, score)) in centrality.top_k(measure, 3).into_iter().enumerate() {
                println!("{:2}. paper {node:<4} {score:.6}", rank + 1);
            }
        }
    }

    Ok(())
}
