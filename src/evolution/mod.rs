//! Community evolution between consecutive snapshots.
//!
//! Given partitions `P_0, P_1, ..., P_n` observed at increasing times, every
//! consecutive pair `(P_i, P_{i+1})` is compared through the Jaccard overlap
//! of each source community `A ∈ P_i` with each target community `B ∈ P_{i+1}`.
//! Five rules then read off the relations:
//!
//! ```text
//! Survive  A -> B*     B* = argmax_B J(A,B),  J(A,B*) >= θ_survive
//! Merge    {A..} -> B  |{A : J(A,B) >= θ_merge}| > 1
//! Split    A -> {B..}  |{B : J(A,B) >= θ_split}| > 1
//! Death    A           max_B J(A,B) <  θ_death
//! Birth    B           max_A J(A,B) <  θ_birth
//! ```
//!
//! The rules are independent: one pair can both survive and take part in a
//! merge, and every satisfied relation is reported. Ties in `argmax` go to the
//! smallest target id.
//!
//! ## Limitations
//!
//! Partitions are trusted to be disjoint. Overlapping communities are not
//! rejected here; they produce meaningless scores. See
//! [`Partition::validate`](crate::Partition::validate).
//!
//! ## References
//!
//! - Greene, Doyle & Cunningham (2010). "Tracking the evolution of communities
//!   in dynamic social networks." ASONAM.
//! - Palla, Barabási & Vicsek (2007). "Quantifying social group evolution." Nature.

mod classifier;
mod event;
mod overlap;
mod thresholds;

pub use classifier::{classify, classify_checked, events_from, transition, Classifier};
pub use event::{Detail, Event, EventKind, TransitionEvent};
pub use overlap::OverlapMatrix;
pub use thresholds::Thresholds;
