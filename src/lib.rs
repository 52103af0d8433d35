//! # drift
//!
//! Community evolution across graph snapshots: which communities survive,
//! merge, split, die or are born between consecutive points in time.
//!
//! The core, [`evolution`], is a pure function over partitions and has no
//! graph dependency. Building snapshots from a timed edge list, detecting
//! their communities and ranking nodes by [`centrality`] is opt-in via the
//! `community` feature (on by default).
//!
//! ```rust
//! use drift::{classify, Event, Partition, Snapshot, Thresholds};
//!
//! let snapshots = vec![
//!     Snapshot::new(2019, Partition::from_assignments([(1, 0), (2, 0), (3, 1), (4, 1)])),
//!     Snapshot::new(2020, Partition::from_assignments([(1, 0), (2, 0), (3, 0), (4, 0)])),
//! ];
//!
//! let events = classify(&snapshots, &Thresholds::default());
//! assert!(events.iter().any(|e| matches!(e.event, Event::Merge { .. })));
//! ```

#[cfg(feature = "community")]
pub mod centrality;
#[cfg(feature = "community")]
pub mod community;
/// Error types used across `drift`.
pub mod error;
pub mod evolution;
pub mod metrics;
pub mod partition;
#[cfg(feature = "community")]
pub mod pipeline;
pub mod validate;

pub use error::{Error, Result};
pub use evolution::{
    classify, classify_checked, Classifier, Event, EventKind, OverlapMatrix, Thresholds,
    TransitionEvent,
};
pub use metrics::{jaccard, nmi, partition_nmi};
pub use partition::{CommunityId, NodeId, Partition, Snapshot};
pub use validate::{Severity, ValidationIssue, ValidationReport};

#[cfg(feature = "community")]
pub use centrality::{
    Centralities, CentralityMeasure, EigenvectorConfig, PageRankConfig, PowerIteration,
};
#[cfg(feature = "community")]
pub use community::{
    modularity, CommunityDetection, GraphSnapshot, LabelPropagation, Louvain, SnapshotBuilder,
};
#[cfg(feature = "community")]
pub use pipeline::{EvolutionAnalysis, EvolutionReport};
