//! Tool registry.
//!
//! Maps every [`ToolId`] to its display record and the kind of screen that
//! renders it. Premium tools are locked for free profiles.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PamojaError, Result};
use crate::services::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolId {
    GroundingPrompt,
    EmotionDiary,
    CrisisToolkit,
    SafetyPlan,
    PsychoeducationMinis,
    SoftVoiceAudioLibrary,
    WeeklySelfTrustCheckIn,
    RelationshipRepairStudio,
    EmotionDiaryAnalytics,
    CopingPlanGenerator,
}

impl ToolId {
    pub const ALL: [ToolId; 10] = [
        ToolId::GroundingPrompt,
        ToolId::EmotionDiary,
        ToolId::CrisisToolkit,
        ToolId::SafetyPlan,
        ToolId::PsychoeducationMinis,
        ToolId::SoftVoiceAudioLibrary,
        ToolId::WeeklySelfTrustCheckIn,
        ToolId::RelationshipRepairStudio,
        ToolId::EmotionDiaryAnalytics,
        ToolId::CopingPlanGenerator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolId::GroundingPrompt => "grounding-prompt",
            ToolId::EmotionDiary => "emotion-diary",
            ToolId::CrisisToolkit => "crisis-toolkit",
            ToolId::SafetyPlan => "safety-plan",
            ToolId::PsychoeducationMinis => "psychoeducation-minis",
            ToolId::SoftVoiceAudioLibrary => "soft-voice-audio-library",
            ToolId::WeeklySelfTrustCheckIn => "weekly-self-trust-check-in",
            ToolId::RelationshipRepairStudio => "relationship-repair-studio",
            ToolId::EmotionDiaryAnalytics => "emotion-diary-analytics",
            ToolId::CopingPlanGenerator => "coping-plan-generator",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = PamojaError;

    fn from_str(s: &str) -> Result<Self> {
        ToolId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| PamojaError::not_found("tool", s))
    }
}

/// Which kind of screen renders a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    /// Single prompt with one text box.
    Prompt,
    /// Free-text journal with the mood dial.
    Diary,
    /// Multi-step guided reflection.
    Stepper,
    /// Lessons with milestones.
    Lessons,
    /// Structured plan editor.
    Planner,
    /// Audio playback.
    Audio,
    /// Charts over diary entries.
    Analytics,
}

/// Display record for one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolConfig {
    pub id: ToolId,
    pub title: &'static str,
    pub description: &'static str,
    pub premium: bool,
    pub kind: ToolKind,
}

/// Whether a profile may open a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolAccess {
    Open,
    /// Premium tool viewed by a free profile; show the upgrade prompt.
    Locked,
}

fn builtin_tools() -> Vec<ToolConfig> {
    fn tool(
        id: ToolId,
        title: &'static str,
        description: &'static str,
        premium: bool,
        kind: ToolKind,
    ) -> ToolConfig {
        ToolConfig {
            id,
            title,
            description,
            premium,
            kind,
        }
    }

    vec![
        tool(
            ToolId::GroundingPrompt,
            "Daily Grounding Prompt",
            "One gentle, optional check-in per day to help you pause and notice what you're \
             feeling.",
            false,
            ToolKind::Prompt,
        ),
        tool(
            ToolId::EmotionDiary,
            "Emotion Diary & Mood Dial",
            "Log what you're feeling in your own words and use a 1-10 dial to track intensity.",
            false,
            ToolKind::Diary,
        ),
        tool(
            ToolId::CrisisToolkit,
            "Crisis Toolkit",
            "Fast access to grounding exercises, breathing audio, and your personalized crisis \
             plan.",
            false,
            ToolKind::Stepper,
        ),
        tool(
            ToolId::SafetyPlan,
            "Safety Plan Studio",
            "Capture warning signs, coping strategies, and support contacts in one organized \
             place.",
            false,
            ToolKind::Planner,
        ),
        tool(
            ToolId::PsychoeducationMinis,
            "Psychoeducation Minis",
            "Tiny lessons for a sensitive nervous system.",
            false,
            ToolKind::Lessons,
        ),
        tool(
            ToolId::SoftVoiceAudioLibrary,
            "Soft-Voice Audio Library",
            "A growing library of soft-voice tracks for grounding, compassion, and breathing \
             support.",
            true,
            ToolKind::Audio,
        ),
        tool(
            ToolId::WeeklySelfTrustCheckIn,
            "Weekly Self-Trust Check-In",
            "Guided reflection to notice and celebrate small acts of self-respect and care.",
            true,
            ToolKind::Stepper,
        ),
        tool(
            ToolId::RelationshipRepairStudio,
            "Relationship Repair Studio",
            "Draft scripts for hard conversations, set boundaries, and prepare to repair after \
             conflict.",
            true,
            ToolKind::Planner,
        ),
        tool(
            ToolId::EmotionDiaryAnalytics,
            "Emotion Diary Analytics",
            "Gentle trends and patterns from your diary so you and your therapist can see shifts \
             over time.",
            true,
            ToolKind::Analytics,
        ),
        tool(
            ToolId::CopingPlanGenerator,
            "Coping Plan Generator (Early Access)",
            "Experiment with AI-supported coping plans you can share with your care team.",
            true,
            ToolKind::Planner,
        ),
    ]
}

/// Lookup table from tool id to its record.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolConfig>,
    by_id: HashMap<ToolId, usize>,
}

impl ToolRegistry {
    /// Build a registry, requiring exactly one entry per [`ToolId`].
    pub fn new(tools: Vec<ToolConfig>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(tools.len());
        for (position, config) in tools.iter().enumerate() {
            if by_id.insert(config.id, position).is_some() {
                return Err(PamojaError::config(format!(
                    "duplicate tool entry: {}",
                    config.id
                )));
            }
        }

        if let Some(missing) = ToolId::ALL.iter().find(|id| !by_id.contains_key(id)) {
            return Err(PamojaError::config(format!(
                "missing tool entry: {}",
                missing
            )));
        }

        Ok(Self { tools, by_id })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(builtin_tools())
    }

    pub fn get(&self, id: ToolId) -> &ToolConfig {
        &self.tools[self.by_id[&id]]
    }

    pub fn lookup(&self, id: &str) -> Result<&ToolConfig> {
        Ok(self.get(id.parse()?))
    }

    /// Tools in display order: free first, then premium.
    pub fn iter(&self) -> impl Iterator<Item = &ToolConfig> {
        self.tools.iter()
    }

    pub fn free(&self) -> impl Iterator<Item = &ToolConfig> {
        self.tools.iter().filter(|t| !t.premium)
    }

    pub fn premium(&self) -> impl Iterator<Item = &ToolConfig> {
        self.tools.iter().filter(|t| t.premium)
    }

    pub fn access(&self, id: ToolId, profile: &Profile) -> ToolAccess {
        if self.get(id).premium && !profile.is_premium {
            ToolAccess::Locked
        } else {
            ToolAccess::Open
        }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_is_complete() {
        let registry = ToolRegistry::builtin().unwrap();
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.free().count(), 5);
        assert_eq!(registry.premium().count(), 5);
    }

    #[test]
    fn test_lookup() {
        let registry = ToolRegistry::builtin().unwrap();
        let tool = registry.lookup("crisis-toolkit").unwrap();
        assert_eq!(tool.kind, ToolKind::Stepper);
        assert!(matches!(
            registry.lookup("time-machine"),
            Err(PamojaError::NotFound { kind: "tool", .. })
        ));
    }

    #[test]
    fn test_premium_tools_locked_for_free_profile() {
        let registry = ToolRegistry::builtin().unwrap();
        let free = Profile::new("u1", "Ada");
        let paid = Profile::new("u2", "Bo").with_premium(true);

        assert_eq!(
            registry.access(ToolId::WeeklySelfTrustCheckIn, &free),
            ToolAccess::Locked
        );
        assert_eq!(
            registry.access(ToolId::WeeklySelfTrustCheckIn, &paid),
            ToolAccess::Open
        );
        assert_eq!(
            registry.access(ToolId::EmotionDiary, &free),
            ToolAccess::Open
        );
    }

    #[test]
    fn test_incomplete_registry_rejected() {
        let mut tools = builtin_tools();
        tools.pop();
        let err = ToolRegistry::new(tools).unwrap_err();
        assert!(err.to_string().contains("coping-plan-generator"));
    }

    #[test]
    fn test_duplicate_registry_rejected() {
        let mut tools = builtin_tools();
        tools.push(tools[0].clone());
        assert!(ToolRegistry::new(tools).is_err());
    }
}
