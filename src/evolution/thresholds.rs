//! Classification thresholds.

use crate::error::{Error, Result};

/// Overlap thresholds for each event kind.
///
/// Survive, merge and split are inclusive lower bounds (`score >= threshold`).
/// Birth and death are exclusive upper bounds on the best overlap
/// (`max < threshold`), so a community whose best match scores exactly the
/// death threshold is *not* dead.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thresholds {
    /// Minimum overlap for a community to survive into its best match.
    pub survive: f64,
    /// Minimum overlap for a source to count towards a merge.
    pub merge: f64,
    /// Minimum overlap for a target to count towards a split.
    pub split: f64,
    /// A target is born when its best overlap is below this.
    pub birth: f64,
    /// A source dies when its best overlap is below this.
    pub death: f64,
}

impl Thresholds {
    /// Defaults: `0.5` for survive/merge/split, `0.2` for birth/death.
    pub fn new() -> Self {
        Self {
            survive: 0.5,
            merge: 0.5,
            split: 0.5,
            birth: 0.2,
            death: 0.2,
        }
    }

    /// Set the survive threshold.
    pub fn with_survive(mut self, survive: f64) -> Self {
        self.survive = survive;
        self
    }

    /// Set the merge threshold.
    pub fn with_merge(mut self, merge: f64) -> Self {
        self.merge = merge;
        self
    }

    /// Set the split threshold.
    pub fn with_split(mut self, split: f64) -> Self {
        self.split = split;
        self
    }

    /// Set the birth threshold.
    pub fn with_birth(mut self, birth: f64) -> Self {
        self.birth = birth;
        self
    }

    /// Set the death threshold.
    pub fn with_death(mut self, death: f64) -> Self {
        self.death = death;
        self
    }

    /// Check every threshold lies in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("survive", self.survive),
            ("merge", self.merge),
            ("split", self.split),
            ("birth", self.birth),
            ("death", self.death),
        ];
        for (name, value) in fields {
            // NaN fails the range check too.
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidParameter {
                    name,
                    message: "threshold must be within [0, 1]",
                });
            }
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = Thresholds::default();
        assert_eq!((t.survive, t.merge, t.split), (0.5, 0.5, 0.5));
        assert_eq!((t.birth, t.death), (0.2, 0.2));
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let t = Thresholds::new().with_survive(0.3).with_death(0.05);
        assert_eq!(t.survive, 0.3);
        assert_eq!(t.death, 0.05);
        assert_eq!(t.merge, 0.5);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let err = Thresholds::new().with_split(1.5).validate().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidParameter {
                name: "split",
                message: "threshold must be within [0, 1]",
            }
        );
        assert!(Thresholds::new().with_birth(-0.1).validate().is_err());
        assert!(Thresholds::new().with_merge(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let t = Thresholds::new().with_survive(0.0).with_merge(1.0);
        assert!(t.validate().is_ok());
    }
}
