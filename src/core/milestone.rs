//! One-shot achievement flags with edge-triggered notifications.
//!
//! A milestone flips from unreached to reached exactly once per tracker.
//! Only that first flip reports [`MilestoneOutcome::FirstTime`]; later
//! marks of the same milestone report `Repeat` so callers never celebrate
//! twice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PamojaError, Result};

/// Result of marking a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneOutcome {
    /// The flag just went false→true; notify the user.
    FirstTime,
    /// The flag was already set; stay quiet.
    Repeat,
}

impl MilestoneOutcome {
    pub fn is_first_time(&self) -> bool {
        matches!(self, MilestoneOutcome::FirstTime)
    }
}

/// A registered milestone and when it was first reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub name: String,
    pub reached_at: Option<DateTime<Utc>>,
}

impl Milestone {
    fn new(name: String) -> Self {
        Self {
            name,
            reached_at: None,
        }
    }

    pub fn is_reached(&self) -> bool {
        self.reached_at.is_some()
    }
}

/// Set of monotonic milestone flags, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneTracker {
    milestones: Vec<Milestone>,
}

impl MilestoneTracker {
    /// Register the given milestone names, all unreached.
    ///
    /// Empty or duplicate names are configuration errors.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut milestones: Vec<Milestone> = Vec::new();
        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(PamojaError::config("milestone names must not be empty"));
            }
            if milestones.iter().any(|m| m.name == name) {
                return Err(PamojaError::config(format!(
                    "milestone '{}' registered twice",
                    name
                )));
            }
            milestones.push(Milestone::new(name));
        }

        if milestones.is_empty() {
            return Err(PamojaError::config("a tracker needs at least one milestone"));
        }

        Ok(Self { milestones })
    }

    /// Mark `name` reached, reporting whether this was the first time.
    pub fn mark_if_first(&mut self, name: &str) -> Result<MilestoneOutcome> {
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.name == name)
            .ok_or_else(|| PamojaError::not_found("milestone", name))?;

        if milestone.is_reached() {
            return Ok(MilestoneOutcome::Repeat);
        }

        milestone.reached_at = Some(Utc::now());
        tracing::info!(milestone = name, "milestone reached");
        Ok(MilestoneOutcome::FirstTime)
    }

    /// Whether `name` has been reached. Unknown names are unreached.
    pub fn is_reached(&self, name: &str) -> bool {
        self.milestones
            .iter()
            .any(|m| m.name == name && m.is_reached())
    }

    /// True iff every registered milestone has been reached.
    pub fn all_complete(&self) -> bool {
        self.milestones.iter().all(Milestone::is_reached)
    }

    /// Names of reached milestones, in registration order.
    pub fn reached(&self) -> Vec<&str> {
        self.milestones
            .iter()
            .filter(|m| m.is_reached())
            .map(|m| m.name.as_str())
            .collect()
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson_tracker() -> MilestoneTracker {
        MilestoneTracker::new(["reflected", "practiced", "talked"]).unwrap()
    }

    #[test]
    fn test_new_tracker_has_nothing_reached() {
        let tracker = lesson_tracker();
        assert!(tracker.reached().is_empty());
        assert!(!tracker.all_complete());
    }

    #[test]
    fn test_mark_twice_is_first_then_repeat() {
        let mut tracker = lesson_tracker();

        assert_eq!(
            tracker.mark_if_first("reflected").unwrap(),
            MilestoneOutcome::FirstTime
        );
        assert!(tracker.is_reached("reflected"));

        assert_eq!(
            tracker.mark_if_first("reflected").unwrap(),
            MilestoneOutcome::Repeat
        );
        assert!(tracker.is_reached("reflected"));
    }

    #[test]
    fn test_repeat_keeps_first_timestamp() {
        let mut tracker = lesson_tracker();
        tracker.mark_if_first("talked").unwrap();
        let first = tracker.milestones()[2].reached_at;
        tracker.mark_if_first("talked").unwrap();
        assert_eq!(tracker.milestones()[2].reached_at, first);
    }

    #[test]
    fn test_all_complete_only_when_every_flag_set() {
        let mut tracker = lesson_tracker();
        tracker.mark_if_first("reflected").unwrap();
        tracker.mark_if_first("practiced").unwrap();
        assert!(!tracker.all_complete());

        tracker.mark_if_first("talked").unwrap();
        assert!(tracker.all_complete());
        assert_eq!(tracker.reached(), vec!["reflected", "practiced", "talked"]);
    }

    #[test]
    fn test_unknown_milestone_is_not_found() {
        let mut tracker = lesson_tracker();
        let result = tracker.mark_if_first("meditated");
        assert!(matches!(result, Err(PamojaError::NotFound { .. })));
        assert!(!tracker.is_reached("meditated"));
    }

    #[test]
    fn test_duplicate_and_empty_names_rejected() {
        assert!(MilestoneTracker::new(["a", "a"]).is_err());
        assert!(MilestoneTracker::new([" "]).is_err());
        assert!(MilestoneTracker::new(Vec::<String>::new()).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Property: flags never go back to false, and exactly one
            // FirstTime is reported per milestone no matter the mark order.
            #[test]
            fn prop_first_time_reported_once(marks in proptest::collection::vec(0usize..3, 0..40)) {
                let names = ["reflected", "practiced", "talked"];
                let mut tracker = MilestoneTracker::new(names).unwrap();
                let mut first_times = [0u32; 3];
                let mut seen = [false; 3];

                for i in marks {
                    let outcome = tracker.mark_if_first(names[i]).unwrap();
                    if outcome.is_first_time() {
                        first_times[i] += 1;
                    }
                    seen[i] = true;
                    for (j, name) in names.iter().enumerate() {
                        prop_assert_eq!(tracker.is_reached(name), seen[j]);
                    }
                }

                for (j, count) in first_times.iter().enumerate() {
                    prop_assert_eq!(*count, u32::from(seen[j]));
                }
                prop_assert_eq!(tracker.all_complete(), seen.iter().all(|s| *s));
            }
        }
    }
}
