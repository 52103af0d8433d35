//! Partition validation.
//!
//! The classifier trusts its input: communities inside one partition are
//! assumed disjoint. Upstream detectors occasionally break that (overlapping
//! exports, stale label maps), and the result is silently odd overlap scores.
//! [`Partition::validate`](crate::Partition::validate) makes the check explicit
//! for callers that want it.
//!
//! # Example
//!
//! ```rust
//! use drift::Partition;
//!
//! let mut p = Partition::new();
//! p.insert(0, [1, 2, 3].into_iter().collect());
//! p.insert(1, [3, 4].into_iter().collect());
//!
//! let report = p.validate();
//! assert!(!report.is_healthy());
//! for issue in &report.issues {
//!     eprintln!("{issue}");
//! }
//! ```

use std::collections::HashMap;

use crate::partition::{CommunityId, NodeId};

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Something unusual but harmless to the classifier.
    Warning,
    /// Breaks the disjointness the classifier assumes.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single issue found while validating a partition.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    /// Severity of the issue.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Node involved, if any.
    pub node: Option<NodeId>,
    /// Communities involved.
    pub communities: Vec<CommunityId>,
}

impl ValidationIssue {
    /// Create a new validation issue.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            node: None,
            communities: Vec::new(),
        }
    }

    /// Attach the node this issue is about.
    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    /// Attach the communities this issue is about.
    pub fn with_communities(mut self, communities: Vec<CommunityId>) -> Self {
        self.communities = communities;
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)?;
        if let Some(node) = self.node {
            write!(f, " (node {node})")?;
        }
        if !self.communities.is_empty() {
            write!(f, " - communities {:?}", self.communities)?;
        }
        Ok(())
    }
}

/// Report from a partition validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// All issues found.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// True when there are no errors.
    pub fn is_healthy(&self) -> bool {
        !self.issues.iter().any(|i| i.severity >= Severity::Error)
    }

    /// True when there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues of a given severity or higher.
    pub fn issues_at_level(&self, min_severity: Severity) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity >= min_severity)
            .collect()
    }

    /// Count issues by severity.
    pub fn counts(&self) -> HashMap<Severity, usize> {
        let mut counts = HashMap::new();
        for issue in &self.issues {
            *counts.entry(issue.severity).or_default() += 1;
        }
        counts
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_clean() {
            return write!(f, "partition valid: no issues found");
        }

        let counts = self.counts();
        let parts: Vec<String> = [(Severity::Error, "errors"), (Severity::Warning, "warnings")]
        .iter()
        .filter_map(|(sev, name)| counts.get(sev).map(|c| format!("{c} {name}")))
        .collect();

        writeln!(f, "partition report: {}", parts.join(", "))?;
        for issue in &self.issues {
            writeln!(f, "  {issue}")?;
        }
        Ok(())
    }
}
