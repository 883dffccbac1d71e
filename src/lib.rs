//! Pamoja - guided reflection flows for gentle self-help tools.
//!
//! The core is a small multi-step reflection state machine: an ordered
//! step sequence, an answer store, a completion gate that refuses empty
//! answers with a friendly message, and one-shot milestone flags. The
//! catalog builds the grounding stepper, the weekly check-in and the
//! psychoeducation lessons on top of it.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod services;

pub use catalog::{build_flow, FlowKind, LessonId, LessonSession};
pub use config::Config;
pub use core::{
    AdvanceOutcome, AdvancePolicy, AnswerStore, CompletionGate, FlowEvent, FlowStatus,
    MilestoneOutcome, MilestoneTracker, ReflectionFlow, Rejection, SessionState, StepDefinition,
    StepSequence,
};
pub use error::{PamojaError, Result};
pub use services::{Profile, ProfileStore, Services};

// CLI commands
pub use cli::{
    AvatarsCommand, ConfigCommand, FlowsCommand, LessonCommand, MoodCommand, PromptCommand,
    RunCommand, ToolsCommand,
};
