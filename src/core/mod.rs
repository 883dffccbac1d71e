//! Core types and logic for Pamoja.
//!
//! This module contains the guided-reflection state machine: step
//! definitions, the answer store, the completion gate, one-shot milestones,
//! and the flow that composes them.

pub mod answers;
pub mod flow;
pub mod gate;
pub mod milestone;
pub mod state;
pub mod step;

pub use answers::AnswerStore;
pub use flow::{FlowSummary, ReflectionFlow, StepAnswer};
pub use gate::{AdvancePolicy, CompletionGate, Rejection, DEFAULT_REJECTION_MESSAGE};
pub use milestone::{Milestone, MilestoneOutcome, MilestoneTracker};
pub use state::{AdvanceOutcome, FlowEvent, FlowStatus, SessionState};
pub use step::{CurrentStep, StepDefinition, StepSequence};
