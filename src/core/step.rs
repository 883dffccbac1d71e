//! Step definitions and the ordered sequence they form.

use serde::{Deserialize, Serialize};

use crate::core::gate::AdvancePolicy;
use crate::error::{PamojaError, Result};

/// One step of a guided flow.
///
/// Immutable once the sequence is built. Insertion order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Position in the sequence (assigned by [`StepSequence::new`]).
    pub index: usize,
    /// Short heading, e.g. "things you can see".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Prompt text shown for the step.
    pub prompt: String,
    /// Placeholder for the free-text box.
    #[serde(default)]
    pub placeholder: String,
    /// Minimum trimmed length of the answer (0 = optional step).
    pub min_length: usize,
    /// Step-specific rejection message, overriding the flow's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_message: Option<String>,
}

impl StepDefinition {
    /// Create a required step with the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            index: 0,
            label: None,
            prompt: prompt.into(),
            placeholder: String::new(),
            min_length: 1,
            rejection_message: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Mark the step as optional (any answer advances).
    pub fn optional(self) -> Self {
        self.with_min_length(0)
    }

    pub fn with_rejection_message(mut self, message: impl Into<String>) -> Self {
        self.rejection_message = Some(message.into());
        self
    }

    pub(crate) fn at_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// The advance policy derived from `min_length`.
    pub fn policy(&self) -> AdvancePolicy {
        AdvancePolicy::from_min_length(self.min_length)
    }
}

/// What sits at a given position of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentStep<'a> {
    /// An active step.
    Step(&'a StepDefinition),
    /// Terminal pseudo-step past the last definition.
    Complete,
}

impl<'a> CurrentStep<'a> {
    /// The step definition, if not at the terminal marker.
    pub fn step(&self) -> Option<&'a StepDefinition> {
        match self {
            CurrentStep::Step(step) => Some(step),
            CurrentStep::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, CurrentStep::Complete)
    }
}

/// Ordered, fixed-length list of step definitions.
///
/// Positions run from `0` to `len()`, where `len()` is the terminal
/// "completed" position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSequence {
    steps: Vec<StepDefinition>,
}

impl StepSequence {
    /// Build a sequence, assigning indices in insertion order.
    ///
    /// An empty list is a configuration error.
    pub fn new(steps: impl IntoIterator<Item = StepDefinition>) -> Result<Self> {
        let steps: Vec<StepDefinition> = steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| step.at_index(i))
            .collect();

        if steps.is_empty() {
            return Err(PamojaError::config("a step sequence needs at least one step"));
        }

        Ok(Self { steps })
    }

    /// Number of steps (also the index of the terminal position).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the last real step.
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// What sits at `index`. Anything at or past the end is `Complete`.
    pub fn at(&self, index: usize) -> CurrentStep<'_> {
        match self.steps.get(index) {
            Some(step) => CurrentStep::Step(step),
            None => CurrentStep::Complete,
        }
    }

    pub fn get(&self, index: usize) -> Option<&StepDefinition> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepDefinition> {
        self.steps.iter()
    }

    /// Position after `index`, saturating at the terminal position.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1).min(self.len())
    }

    /// Position before `index`, saturating at the first step.
    pub fn previous_index(&self, index: usize) -> usize {
        index.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(n: usize) -> StepSequence {
        StepSequence::new((0..n).map(|i| StepDefinition::new(format!("prompt {i}")))).unwrap()
    }

    #[test]
    fn test_empty_sequence_is_config_error() {
        let result = StepSequence::new(Vec::new());
        assert!(matches!(result, Err(PamojaError::Config { .. })));
    }

    #[test]
    fn test_indices_follow_insertion_order() {
        let seq = StepSequence::new(vec![
            StepDefinition::new("see").at_index(9),
            StepDefinition::new("touch"),
            StepDefinition::new("hear"),
        ])
        .unwrap();

        let indices: Vec<usize> = seq.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(seq.get(1).unwrap().prompt, "touch");
    }

    #[test]
    fn test_at_terminal_position_is_complete() {
        let seq = sequence(3);
        assert!(seq.at(2).step().is_some());
        assert!(seq.at(3).is_complete());
        assert!(seq.at(7).is_complete());
    }

    #[test]
    fn test_navigation_saturates() {
        let seq = sequence(2);
        assert_eq!(seq.next_index(0), 1);
        assert_eq!(seq.next_index(1), 2);
        assert_eq!(seq.next_index(2), 2);
        assert_eq!(seq.previous_index(0), 0);
        assert_eq!(seq.previous_index(2), 1);
        assert_eq!(seq.last_index(), 1);
    }

    #[test]
    fn test_step_builders() {
        let step = StepDefinition::new("What helped?")
            .with_label("today")
            .with_placeholder("Your gentle reflection...")
            .optional();

        assert_eq!(step.label.as_deref(), Some("today"));
        assert_eq!(step.placeholder, "Your gentle reflection...");
        assert_eq!(step.policy(), AdvancePolicy::Always);
        assert_eq!(StepDefinition::new("x").policy(), AdvancePolicy::NonEmpty);
    }
}
