//! Transition events.

use std::collections::BTreeMap;
use std::fmt;

use crate::partition::CommunityId;

/// The five relations the classifier reports.
///
/// Ordering matches the order events are emitted within one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A community continues into its best match.
    Survive,
    /// Several communities flow into one.
    Merge,
    /// One community flows into several.
    Split,
    /// A community has no adequate successor.
    Death,
    /// A community has no adequate predecessor.
    Birth,
}

impl EventKind {
    /// Every kind, in emission order.
    pub const ALL: [EventKind; 5] = [
        EventKind::Survive,
        EventKind::Merge,
        EventKind::Split,
        EventKind::Death,
        EventKind::Birth,
    ];

    /// Display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Survive => "Survive",
            EventKind::Merge => "Merge",
            EventKind::Split => "Split",
            EventKind::Death => "Death",
            EventKind::Birth => "Birth",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified relation between two consecutive partitions.
///
/// Source ids refer to the earlier partition, target ids to the later one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// `source` continues as `target`.
    Survive {
        /// Earlier community.
        source: CommunityId,
        /// Its best-matching later community.
        target: CommunityId,
        /// Jaccard overlap of the two.
        score: f64,
    },
    /// `sources` (two or more) merge into `target`.
    Merge {
        /// Earlier communities, ascending.
        sources: Vec<CommunityId>,
        /// Later community.
        target: CommunityId,
        /// Overlap of each source with `target`.
        scores: BTreeMap<CommunityId, f64>,
    },
    /// `source` splits into `targets` (two or more).
    Split {
        /// Earlier community.
        source: CommunityId,
        /// Later communities, ascending.
        targets: Vec<CommunityId>,
        /// Overlap of `source` with each target.
        scores: BTreeMap<CommunityId, f64>,
    },
    /// `source` has no successor above the death threshold.
    Death {
        /// Earlier community.
        source: CommunityId,
        /// Best overlap it had with any later community.
        score: f64,
    },
    /// `target` has no predecessor above the birth threshold.
    Birth {
        /// Later community.
        target: CommunityId,
        /// Best overlap it had with any earlier community.
        score: f64,
    },
}

/// Payload of an event, as a single score or per-community scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Detail<'a> {
    /// Survive, Death and Birth carry one score.
    Score(f64),
    /// Merge and Split carry one score per member.
    PerCommunity(&'a BTreeMap<CommunityId, f64>),
}

impl Event {
    /// Kind tag.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Survive { .. } => EventKind::Survive,
            Event::Merge { .. } => EventKind::Merge,
            Event::Split { .. } => EventKind::Split,
            Event::Death { .. } => EventKind::Death,
            Event::Birth { .. } => EventKind::Birth,
        }
    }

    /// Earlier-side communities. Empty for births.
    pub fn sources(&self) -> Vec<CommunityId> {
        match self {
            Event::Survive { source, .. }
            | Event::Split { source, .. }
            | Event::Death { source, .. } => vec![*source],
            Event::Merge { sources, .. } => sources.clone(),
            Event::Birth { .. } => Vec::new(),
        }
    }

    /// Later-side communities. Empty for deaths.
    pub fn targets(&self) -> Vec<CommunityId> {
        match self {
            Event::Survive { target, .. }
            | Event::Merge { target, .. }
            | Event::Birth { target, .. } => vec![*target],
            Event::Split { targets, .. } => targets.clone(),
            Event::Death { .. } => Vec::new(),
        }
    }

    /// Score payload.
    pub fn detail(&self) -> Detail<'_> {
        match self {
            Event::Survive { score, .. } | Event::Death { score, .. } | Event::Birth { score, .. } => {
                Detail::Score(*score)
            }
            Event::Merge { scores, .. } | Event::Split { scores, .. } => Detail::PerCommunity(scores),
        }
    }
}

/// An event together with the time of the later snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionEvent<T> {
    /// Time of the later snapshot of the transition.
    pub time_to: T,
    /// What happened.
    pub event: Event,
}

impl<T> TransitionEvent<T> {
    /// Kind tag of the wrapped event.
    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }

    /// See [`Event::sources`].
    pub fn sources(&self) -> Vec<CommunityId> {
        self.event.sources()
    }

    /// See [`Event::targets`].
    pub fn targets(&self) -> Vec<CommunityId> {
        self.event.targets()
    }

    /// See [`Event::detail`].
    pub fn detail(&self) -> Detail<'_> {
        self.event.detail()
    }
}

fn write_ids(f: &mut fmt::Formatter<'_>, ids: &[CommunityId]) -> fmt::Result {
    match ids {
        [] => f.write_str("-"),
        [one] => write!(f, "{one}"),
        many => {
            let parts: Vec<String> = many.iter().map(|c| c.to_string()).collect();
            write!(f, "({})", parts.join(", "))
        }
    }
}

impl fmt::Display for Detail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detail::Score(s) => write!(f, "{s:.3}"),
            Detail::PerCommunity(scores) => {
                let parts: Vec<String> = scores.iter().map(|(c, s)| format!("{c}: {s:.3}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t", self.kind())?;
        write_ids(f, &self.sources())?;
        f.write_str("\t")?;
        write_ids(f, &self.targets())?;
        write!(f, "\t{}", self.detail())
    }
}

/// One tab-separated row: `time_to  kind  source  target  detail`.
impl<T: fmt::Display> fmt::Display for TransitionEvent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.time_to, self.event)
    }
}
