//! Static content and lookup tables built on the core.
//!
//! - [`grounding`] and [`checkin`]: stepper flows
//! - [`lessons`]: psychoeducation minis with milestones
//! - [`prompts`] and [`mood`]: single-screen tools
//! - [`tools`] and [`avatars`]: exhaustively checked registries

pub mod avatars;
pub mod checkin;
pub mod grounding;
pub mod lessons;
pub mod mood;
pub mod prompts;
pub mod tools;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::{CompletionGate, ReflectionFlow};
use crate::error::{PamojaError, Result};

pub use avatars::{AvatarConfig, AvatarId, AvatarRegistry, Vibe, DEFAULT_AVATAR_ID};
pub use checkin::check_in_summary;
pub use lessons::{Lesson, LessonId, LessonOutcome, LessonSession};
pub use mood::{check_entry, DiaryEntry, MoodDial, MoodLabel, SaveFeedback};
pub use tools::{ToolAccess, ToolConfig, ToolId, ToolKind, ToolRegistry};

/// Stepper flows that can be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowKind {
    Grounding,
    CheckIn,
}

impl FlowKind {
    pub const ALL: [FlowKind; 2] = [FlowKind::Grounding, FlowKind::CheckIn];

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::Grounding => grounding::GROUNDING_FLOW,
            FlowKind::CheckIn => checkin::CHECK_IN_FLOW,
        }
    }

    /// Tool that hosts this flow.
    pub fn tool(&self) -> ToolId {
        match self {
            FlowKind::Grounding => ToolId::CrisisToolkit,
            FlowKind::CheckIn => ToolId::WeeklySelfTrustCheckIn,
        }
    }

    pub fn step_count(&self) -> usize {
        match self {
            FlowKind::Grounding => grounding::SENSES.len(),
            FlowKind::CheckIn => checkin::CHECK_IN_PROMPTS.len(),
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowKind {
    type Err = PamojaError;

    fn from_str(s: &str) -> Result<Self> {
        FlowKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PamojaError::not_found("flow", s))
    }
}

/// Build a fresh flow with the gate settings from `config`.
pub fn build_flow(kind: FlowKind, config: &Config) -> Result<ReflectionFlow> {
    let gate = CompletionGate::new(config.gate.rejection_message.clone());
    let min_chars = config.gate.min_chars;
    match kind {
        FlowKind::Grounding => grounding::grounding_flow(gate, min_chars),
        FlowKind::CheckIn => checkin::check_in_flow(gate, min_chars),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_kind_parse() {
        assert_eq!("check-in".parse::<FlowKind>().unwrap(), FlowKind::CheckIn);
        assert_eq!("grounding".parse::<FlowKind>().unwrap(), FlowKind::Grounding);
        assert!("breathing".parse::<FlowKind>().is_err());
    }

    #[test]
    fn test_build_flow_matches_step_count() {
        let config = Config::default();
        for kind in FlowKind::ALL {
            let flow = build_flow(kind, &config).unwrap();
            assert_eq!(flow.sequence().len(), kind.step_count());
            assert_eq!(flow.name(), kind.as_str());
        }
    }

    #[test]
    fn test_build_flow_uses_configured_gate() {
        let mut config = Config::default();
        config.gate.min_chars = 4;
        config.gate.rejection_message = "A little more, please.".to_string();

        let mut flow = build_flow(FlowKind::Grounding, &config).unwrap();
        let outcome = flow.submit("cup").unwrap();
        assert_eq!(
            outcome.rejection().map(|r| r.message.as_str()),
            Some("A little more, please.")
        );
        assert!(!flow.submit("lamp").unwrap().is_rejected());
    }

    #[test]
    fn test_flow_tools_exist() {
        let registry = ToolRegistry::builtin().unwrap();
        assert!(!registry.get(FlowKind::Grounding.tool()).premium);
        assert!(registry.get(FlowKind::CheckIn.tool()).premium);
    }
}
