//! Session state and event types for guided reflection flows.
//!
//! These types hold the runtime state of one flow instance. They live only
//! as long as the flow does: nothing here is persisted, and two instances
//! of the same flow never share state.

use serde::{Deserialize, Serialize};

use crate::core::answers::AnswerStore;
use crate::core::gate::Rejection;

/// Mutable state owned by a single flow instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Active step index; equals the step count once complete.
    pub current_index: usize,
    /// One answer per step, empty by default.
    pub answers: AnswerStore,
    /// Whether the last step has been passed.
    pub is_complete: bool,
}

impl SessionState {
    /// Fresh state for a flow of `step_count` steps.
    pub fn new(step_count: usize) -> Self {
        Self {
            current_index: 0,
            answers: AnswerStore::new(step_count),
            is_complete: false,
        }
    }

    /// Return to the initial state, keeping the step count.
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.answers.clear();
        self.is_complete = false;
    }

    pub fn status(&self) -> FlowStatus {
        if self.is_complete {
            FlowStatus::Complete
        } else {
            FlowStatus::InProgress(self.current_index)
        }
    }
}

/// Flow status.
///
/// `InProgress(0)` is initial; `Complete` is terminal and left only by an
/// explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    /// Working on the step at this index.
    InProgress(usize),
    /// Every step has been passed.
    Complete,
}

impl FlowStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowStatus::Complete)
    }
}

/// Result of an `advance()` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// Moved forward to the next step.
    Advanced { from: usize, to: usize },
    /// Passed the last step; the flow is now complete.
    Completed,
    /// The gate denied the move. Nothing changed.
    Rejected(Rejection),
    /// The flow was already complete. Nothing changed.
    AlreadyComplete,
}

impl AdvanceOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, AdvanceOutcome::Rejected(_))
    }

    /// The rejection, if the gate denied this advance.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            AdvanceOutcome::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// Events emitted by flow transitions.
///
/// Callers drain these to render toasts or banners; how they are shown is
/// up to the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FlowEvent {
    Advanced { from: usize, to: usize },
    Retreated { from: usize, to: usize },
    /// An advance was denied; show `message` to the user.
    Rejected { step: usize, message: String },
    /// Fired once per pass, on the transition into `Complete`.
    Completed { message: Option<String> },
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_initial() {
        let state = SessionState::new(5);
        assert_eq!(state.current_index, 0);
        assert!(!state.is_complete);
        assert_eq!(state.answers.len(), 5);
        assert_eq!(state.status(), FlowStatus::InProgress(0));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = SessionState::new(3);
        state.current_index = 3;
        state.is_complete = true;
        state.answers.set(1, "something").unwrap();

        state.reset();
        assert_eq!(state, SessionState::new(3));
    }

    #[test]
    fn test_status_terminal() {
        assert!(FlowStatus::Complete.is_terminal());
        assert!(!FlowStatus::InProgress(2).is_terminal());
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_value(FlowEvent::Rejected {
            step: 1,
            message: "more please".to_string(),
        })
        .unwrap();
        assert_eq!(json["event"], "rejected");
        assert_eq!(json["step"], 1);
    }

    #[test]
    fn test_outcome_rejection_accessor() {
        let outcome = AdvanceOutcome::Rejected(Rejection::new("no").at_step(0));
        assert!(outcome.is_rejected());
        assert_eq!(outcome.rejection().unwrap().message, "no");
        assert!(AdvanceOutcome::Completed.rejection().is_none());
    }
}
