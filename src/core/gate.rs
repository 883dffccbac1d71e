//! Completion gate for guided reflection flows.
//!
//! The gate decides whether the text entered at a step is enough to move
//! on. It never mutates anything: a denied advance is reported back as a
//! [`Rejection`] carrying the message the user should see.

use serde::{Deserialize, Serialize};

use crate::core::step::StepDefinition;

/// Default message shown when a required step is left empty.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Please share a few words before continuing.";

/// Policy deciding whether a step's answer allows advancing.
///
/// Lengths are counted in characters after trimming surrounding
/// whitespace. Stored answers are never trimmed, only measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdvancePolicy {
    /// Trimmed text must not be empty.
    #[default]
    NonEmpty,
    /// Trimmed text must be at least this many characters.
    MinChars(usize),
    /// Optional step, any text (including none) is accepted.
    Always,
}

impl AdvancePolicy {
    /// Build the policy matching a step's configured minimum length.
    ///
    /// `0` marks an optional step, `1` is the plain non-empty rule.
    pub fn from_min_length(min_length: usize) -> Self {
        match min_length {
            0 => AdvancePolicy::Always,
            1 => AdvancePolicy::NonEmpty,
            n => AdvancePolicy::MinChars(n),
        }
    }

    /// Check whether `text` satisfies this policy.
    pub fn allows(&self, text: &str) -> bool {
        let len = text.trim().chars().count();
        match self {
            AdvancePolicy::NonEmpty => len > 0,
            AdvancePolicy::MinChars(min) => len >= *min,
            AdvancePolicy::Always => true,
        }
    }
}

/// A denied advance, with the message to surface to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Index of the step that refused to advance, if the gate guarded a step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_index: Option<usize>,
    /// User-facing message ("a few more words" or equivalent).
    pub message: String,
}

impl Rejection {
    /// Create a rejection that is not tied to a particular step.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            step_index: None,
            message: message.into(),
        }
    }

    /// Attach the index of the step that was guarded.
    pub fn at_step(mut self, index: usize) -> Self {
        self.step_index = Some(index);
        self
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Gate evaluated before every advance of a flow.
///
/// The policy lives on each [`StepDefinition`]; the gate supplies the
/// flow-wide rejection message used when a step has none of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionGate {
    default_message: String,
}

impl CompletionGate {
    /// Create a gate with the given fallback rejection message.
    pub fn new(default_message: impl Into<String>) -> Self {
        Self {
            default_message: default_message.into(),
        }
    }

    /// The message used when a step does not override it.
    pub fn default_message(&self) -> &str {
        &self.default_message
    }

    /// Whether `text` is enough to leave `step`.
    pub fn can_advance(&self, step: &StepDefinition, text: &str) -> bool {
        step.policy().allows(text)
    }

    /// Evaluate the gate, producing a [`Rejection`] when advancement is denied.
    pub fn check(&self, step: &StepDefinition, text: &str) -> Result<(), Rejection> {
        if self.can_advance(step, text) {
            return Ok(());
        }

        let message = step
            .rejection_message
            .as_deref()
            .unwrap_or(&self.default_message);
        Err(Rejection::new(message).at_step(step.index))
    }

    /// Evaluate a bare policy outside of a step sequence.
    ///
    /// Used by single-action tools (lesson reflections, daily prompt) that
    /// gate one text box rather than a stepper.
    pub fn check_policy(
        policy: AdvancePolicy,
        text: &str,
        message: impl Into<String>,
    ) -> Result<(), Rejection> {
        if policy.allows(text) {
            Ok(())
        } else {
            Err(Rejection::new(message))
        }
    }
}

impl Default for CompletionGate {
    fn default() -> Self {
        Self::new(DEFAULT_REJECTION_MESSAGE)
    }
}
