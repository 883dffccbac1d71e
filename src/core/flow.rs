//! Guided multi-step reflection flow.
//!
//! A flow composes a [`StepSequence`], an [`AnswerStore`] (inside
//! [`SessionState`]) and a [`CompletionGate`]. All transitions are
//! synchronous and immediately observable; invalid input never errors, it
//! is rejected with a message and the state is left unchanged.

use serde::Serialize;

use crate::core::gate::{CompletionGate, Rejection};
use crate::core::state::{AdvanceOutcome, FlowEvent, FlowStatus, SessionState};
use crate::core::step::{CurrentStep, StepDefinition, StepSequence};
use crate::error::{PamojaError, Result};

/// One instance of a guided flow.
///
/// Owns its state exclusively. Dropping the flow discards everything the
/// user typed.
#[derive(Debug, Clone)]
pub struct ReflectionFlow {
    name: String,
    sequence: StepSequence,
    gate: CompletionGate,
    state: SessionState,
    completion_message: Option<String>,
    events: Vec<FlowEvent>,
}

impl ReflectionFlow {
    /// Create a flow in its initial state.
    pub fn new(name: impl Into<String>, sequence: StepSequence, gate: CompletionGate) -> Self {
        let state = SessionState::new(sequence.len());
        Self {
            name: name.into(),
            sequence,
            gate,
            state,
            completion_message: None,
            events: Vec::new(),
        }
    }

    /// Build a flow straight from step definitions.
    pub fn from_steps(
        name: impl Into<String>,
        steps: impl IntoIterator<Item = StepDefinition>,
        gate: CompletionGate,
    ) -> Result<Self> {
        Ok(Self::new(name, StepSequence::new(steps)?, gate))
    }

    /// Message carried by the `Completed` event.
    pub fn with_completion_message(mut self, message: impl Into<String>) -> Self {
        self.completion_message = Some(message.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &StepSequence {
        &self.sequence
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> FlowStatus {
        self.state.status()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// The active step, or the terminal marker once complete.
    pub fn current_step(&self) -> CurrentStep<'_> {
        self.sequence.at(self.state.current_index)
    }

    /// Answer typed at the active step (empty once complete).
    pub fn current_answer(&self) -> &str {
        self.state
            .answers
            .get(self.state.current_index)
            .unwrap_or("")
    }

    pub fn answers(&self) -> &[String] {
        self.state.answers.as_slice()
    }

    /// 1-based position and total, for "Step 2 of 4" displays.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.sequence.len();
        ((self.state.current_index + 1).min(total), total)
    }

    /// Record text for the active step.
    ///
    /// Only the active step may be written; a complete flow accepts no input.
    pub fn set_answer(&mut self, text: impl Into<String>) -> Result<()> {
        if self.state.is_complete {
            return Err(PamojaError::invalid_state(format!(
                "flow '{}' is complete; reset before answering again",
                self.name
            )));
        }
        self.state.answers.set(self.state.current_index, text)
    }

    /// Try to move forward, guarded by the completion gate.
    pub fn advance(&mut self) -> AdvanceOutcome {
        let from = self.state.current_index;
        let step = match self.sequence.at(from) {
            CurrentStep::Step(step) => step,
            CurrentStep::Complete => return AdvanceOutcome::AlreadyComplete,
        };

        let answer = self.state.answers.get(from).unwrap_or("");
        if let Err(rejection) = self.gate.check(step, answer) {
            return self.reject(from, rejection);
        }

        let to = self.sequence.next_index(from);
        self.state.current_index = to;

        if from == self.sequence.last_index() {
            self.state.is_complete = true;
            tracing::info!(flow = %self.name, steps = self.sequence.len(), "flow complete");
            self.events.push(FlowEvent::Completed {
                message: self.completion_message.clone(),
            });
            return AdvanceOutcome::Completed;
        }

        tracing::debug!(flow = %self.name, from, to, "advanced");
        self.events.push(FlowEvent::Advanced { from, to });
        AdvanceOutcome::Advanced { from, to }
    }

    /// Set the active answer and advance in one go.
    ///
    /// The gate judges `text` before it is stored, so a rejected submission
    /// leaves the kept answer in place.
    pub fn submit(&mut self, text: impl Into<String>) -> Result<AdvanceOutcome> {
        let text = text.into();
        let from = self.state.current_index;
        if let CurrentStep::Step(step) = self.sequence.at(from) {
            if let Err(rejection) = self.gate.check(step, &text) {
                return Ok(self.reject(from, rejection));
            }
        }
        self.set_answer(text)?;
        Ok(self.advance())
    }

    fn reject(&mut self, step: usize, rejection: Rejection) -> AdvanceOutcome {
        tracing::warn!(flow = %self.name, step, "advance rejected");
        self.events.push(FlowEvent::Rejected {
            step,
            message: rejection.message.clone(),
        });
        AdvanceOutcome::Rejected(rejection)
    }

    /// Step back one position. Returns whether anything moved.
    ///
    /// No-op at the first step and once complete. Answers are kept.
    pub fn retreat(&mut self) -> bool {
        let from = self.state.current_index;
        if self.state.is_complete || from == 0 {
            return false;
        }

        let to = self.sequence.previous_index(from);
        self.state.current_index = to;
        tracing::debug!(flow = %self.name, from, to, "retreated");
        self.events.push(FlowEvent::Retreated { from, to });
        true
    }

    /// Return to step 0 with every answer cleared.
    pub fn reset(&mut self) {
        self.state.reset();
        tracing::debug!(flow = %self.name, "reset");
        self.events.push(FlowEvent::Reset);
    }

    /// Drain the events produced since the last call.
    pub fn take_events(&mut self) -> Vec<FlowEvent> {
        std::mem::take(&mut self.events)
    }

    /// Snapshot of prompts and answers for the completion screen.
    pub fn summary(&self) -> FlowSummary {
        FlowSummary {
            flow: self.name.clone(),
            complete: self.state.is_complete,
            steps: self
                .sequence
                .iter()
                .map(|step| StepAnswer {
                    index: step.index,
                    prompt: step.prompt.clone(),
                    answer: self
                        .state
                        .answers
                        .get(step.index)
                        .unwrap_or_default()
                        .to_string(),
                })
                .collect(),
        }
    }
}

/// Serializable view of a flow's answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowSummary {
    pub flow: String,
    pub complete: bool,
    pub steps: Vec<StepAnswer>,
}

/// One prompt and what the user wrote for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepAnswer {
    pub index: usize,
    pub prompt: String,
    pub answer: String,
}
