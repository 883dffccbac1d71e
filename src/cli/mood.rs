//! Mood command for Pamoja.
//!
//! Sets the mood dial, shows its label and the crisis banner when the
//! intensity is low enough, and checks the diary entry for saving.

use serde::Serialize;

use crate::catalog::mood::{BodyState, CRISIS_BANNER, DIARY_TAGS};
use crate::catalog::{check_entry, DiaryEntry, MoodDial};
use crate::config::DiaryConfig;

/// Options for the mood command.
#[derive(Debug, Clone, Default)]
pub struct MoodOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Input for the mood command.
#[derive(Debug, Clone, Default)]
pub struct MoodInput {
    pub intensity: u8,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub body_state: Option<BodyState>,
}

/// Output format for the mood command.
#[derive(Debug, Clone, Serialize)]
pub struct MoodOutput {
    /// Dial value after clamping.
    pub intensity: u8,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_banner: Option<String>,
    pub saved: bool,
    pub message: String,
    pub entry: DiaryEntry,
}

/// The mood command implementation.
pub struct MoodCommand {
    config: DiaryConfig,
}

impl MoodCommand {
    pub fn new(config: DiaryConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, input: MoodInput) -> MoodOutput {
        let mut dial = MoodDial::new(self.config.clone());
        let intensity = dial.set(input.intensity);
        if intensity != input.intensity {
            tracing::debug!(requested = input.intensity, intensity, "mood clamped");
        }

        let tags = normalize_tags(input.tags);
        let entry = DiaryEntry {
            intensity,
            description: input.description.unwrap_or_default(),
            tags,
            body_state: input.body_state,
        };
        let feedback = check_entry(&entry, &self.config);

        MoodOutput {
            intensity,
            label: dial.label().to_string(),
            crisis_banner: dial
                .shows_crisis_banner()
                .then(|| CRISIS_BANNER.to_string()),
            saved: feedback.saved,
            message: feedback.message,
            entry,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &MoodOutput, options: &MoodOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &MoodOutput) -> String {
        let mut text = format!(
            "Mood {}/{}: {}\n",
            output.intensity, self.config.max_intensity, output.label
        );
        if let Some(banner) = &output.crisis_banner {
            text.push_str(&format!("\n{}\nRun `pamoja run grounding` to start.\n\n", banner));
        }
        text.push_str(&output.message);
        text.push('\n');
        text
    }
}

/// Match tags against the known set case-insensitively; keep unknown tags
/// as written.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        let tag = DIARY_TAGS
            .iter()
            .find(|known| known.eq_ignore_ascii_case(tag))
            .map(|known| known.to_string())
            .unwrap_or_else(|| tag.to_string());
        if !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd() -> MoodCommand {
        MoodCommand::new(DiaryConfig::default())
    }

    #[test]
    fn test_low_intensity_shows_banner() {
        let output = cmd().run(MoodInput {
            intensity: 2,
            description: Some("everything is too loud".to_string()),
            ..Default::default()
        });

        assert_eq!(output.label, "shattered, panicky");
        assert!(output.crisis_banner.is_some());
        assert!(output.saved);
    }

    #[test]
    fn test_empty_entry_gets_gentle_note() {
        let output = cmd().run(MoodInput {
            intensity: 7,
            ..Default::default()
        });

        assert!(output.crisis_banner.is_none());
        assert!(!output.saved);
        assert!(output.message.contains("even a few words are okay"));
    }

    #[test]
    fn test_intensity_is_clamped() {
        let output = cmd().run(MoodInput {
            intensity: 0,
            tags: vec!["tired".to_string()],
            ..Default::default()
        });
        assert_eq!(output.intensity, 1);
    }

    #[test]
    fn test_tags_are_normalized() {
        let tags = normalize_tags(vec![
            "good NEWS".to_string(),
            "Good news".to_string(),
            " ".to_string(),
            "sunny".to_string(),
        ]);
        assert_eq!(tags, vec!["Good news", "sunny"]);
    }

    #[test]
    fn test_custom_threshold() {
        let cmd = MoodCommand::new(DiaryConfig {
            crisis_threshold: 4,
            ..DiaryConfig::default()
        });
        let output = cmd.run(MoodInput {
            intensity: 4,
            ..Default::default()
        });
        assert!(output.crisis_banner.is_some());
    }

    #[test]
    fn test_format_output_human_readable() {
        let cmd = cmd();
        let output = cmd.run(MoodInput {
            intensity: 1,
            description: Some("numb".to_string()),
            ..Default::default()
        });
        let formatted = cmd.format_output(&output, &MoodOptions::default());
        assert!(formatted.contains("Mood 1/10: shattered, panicky"));
        assert!(formatted.contains("Crisis Toolkit"));
        assert!(formatted.contains("Entry saved."));
    }

    #[test]
    fn test_format_output_json() {
        let cmd = cmd();
        let output = cmd.run(MoodInput {
            intensity: 9,
            ..Default::default()
        });
        let options = MoodOptions {
            json: true,
            ..Default::default()
        };
        let formatted = cmd.format_output(&output, &options);
        assert!(formatted.contains("\"label\": \"joyful, expansive\""));
        assert!(!formatted.contains("crisis_banner"));
    }
}
