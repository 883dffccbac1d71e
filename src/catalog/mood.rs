//! Emotion diary: mood dial, crisis banner and save messages.

use std::fmt;

use serde::Serialize;

use crate::config::DiaryConfig;

/// Quick tags that can be attached to an entry.
pub const DIARY_TAGS: [&str; 8] = [
    "Conflict",
    "Lonely",
    "Abandoned",
    "Triggered",
    "Overwhelmed",
    "Good news",
    "Supported",
    "Tired",
];

pub const CRISIS_BANNER: &str =
    "This looks really intense. If you'd like extra support, you can open the Crisis Toolkit.";

/// Word label for a band of the dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLabel {
    Shattered,
    Heavy,
    Mixed,
    Hopeful,
    Joyful,
}

impl MoodLabel {
    /// Band for an intensity value. Bands are fixed at 2/4/6/8.
    pub fn for_intensity(intensity: u8) -> Self {
        match intensity {
            0..=2 => MoodLabel::Shattered,
            3..=4 => MoodLabel::Heavy,
            5..=6 => MoodLabel::Mixed,
            7..=8 => MoodLabel::Hopeful,
            _ => MoodLabel::Joyful,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            MoodLabel::Shattered => "shattered, panicky",
            MoodLabel::Heavy => "heavy, numb",
            MoodLabel::Mixed => "mixed, overwhelmed",
            MoodLabel::Hopeful => "hopeful, lighter",
            MoodLabel::Joyful => "joyful, expansive",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// How the body feels, optional on an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyState {
    Tense,
    Neutral,
    Relaxed,
}

/// The intensity dial, 1-10 unless configured otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodDial {
    value: u8,
    config: DiaryConfig,
}

impl MoodDial {
    /// Dial starting at the middle of the range.
    pub fn new(config: DiaryConfig) -> Self {
        let mid = config.min_intensity
            + config.max_intensity.saturating_sub(config.min_intensity) / 2;
        let mut dial = Self { value: mid, config };
        dial.set(mid);
        dial
    }

    /// Set the dial, clamping into the configured range.
    pub fn set(&mut self, value: u8) -> u8 {
        self.value = value
            .max(self.config.min_intensity)
            .min(self.config.max_intensity);
        self.value
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Label for the current value.
    ///
    /// Bands are defined on a 1-10 dial; other ranges are mapped onto it
    /// first so every label stays reachable.
    pub fn label(&self) -> MoodLabel {
        let min = u16::from(self.config.min_intensity);
        let span = u16::from(self.config.max_intensity).saturating_sub(min);
        if span == 0 {
            return MoodLabel::for_intensity(self.value);
        }
        let offset = u16::from(self.value).saturating_sub(min);
        let scaled = 1 + offset * 9 / span;
        MoodLabel::for_intensity(u8::try_from(scaled).unwrap_or(u8::MAX))
    }

    pub fn shows_crisis_banner(&self) -> bool {
        self.value <= self.config.crisis_threshold
    }
}

/// A diary entry as written on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiaryEntry {
    pub intensity: u8,
    pub description: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_state: Option<BodyState>,
}

impl DiaryEntry {
    /// True when there are no words and no tags.
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.tags.is_empty()
    }
}

/// Feedback after pressing save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveFeedback {
    pub saved: bool,
    pub message: String,
}

/// Check an entry on save.
///
/// Empty entries are never refused; they get the gentle note instead of the
/// confirmation.
pub fn check_entry(entry: &DiaryEntry, config: &DiaryConfig) -> SaveFeedback {
    if entry.is_empty() {
        SaveFeedback {
            saved: false,
            message: config.empty_entry_message.clone(),
        }
    } else {
        tracing::debug!(
            intensity = entry.intensity,
            tags = entry.tags.len(),
            "diary entry accepted"
        );
        SaveFeedback {
            saved: true,
            message: config.saved_message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_bands() {
        assert_eq!(MoodLabel::for_intensity(1), MoodLabel::Shattered);
        assert_eq!(MoodLabel::for_intensity(2), MoodLabel::Shattered);
        assert_eq!(MoodLabel::for_intensity(3), MoodLabel::Heavy);
        assert_eq!(MoodLabel::for_intensity(6), MoodLabel::Mixed);
        assert_eq!(MoodLabel::for_intensity(8), MoodLabel::Hopeful);
        assert_eq!(MoodLabel::for_intensity(10), MoodLabel::Joyful);
        assert_eq!(MoodLabel::Heavy.to_string(), "heavy, numb");
    }

    #[test]
    fn test_dial_starts_in_middle() {
        let dial = MoodDial::new(DiaryConfig::default());
        assert_eq!(dial.value(), 5);
        assert!(!dial.shows_crisis_banner());
    }

    #[test]
    fn test_dial_clamps() {
        let mut dial = MoodDial::new(DiaryConfig::default());
        assert_eq!(dial.set(0), 1);
        assert_eq!(dial.set(42), 10);
    }

    #[test]
    fn test_labels_follow_configured_range() {
        let mut dial = MoodDial::new(DiaryConfig {
            max_intensity: 5,
            ..DiaryConfig::default()
        });
        assert_eq!(dial.set(1), 1);
        assert_eq!(dial.label(), MoodLabel::Shattered);
        dial.set(4);
        assert_eq!(dial.label(), MoodLabel::Hopeful);
        dial.set(5);
        assert_eq!(dial.label(), MoodLabel::Joyful);
    }

    #[test]
    fn test_crisis_banner_uses_threshold() {
        let mut dial = MoodDial::new(DiaryConfig::default());
        dial.set(2);
        assert!(dial.shows_crisis_banner());
        dial.set(3);
        assert!(!dial.shows_crisis_banner());

        let mut dial = MoodDial::new(DiaryConfig {
            crisis_threshold: 4,
            ..DiaryConfig::default()
        });
        dial.set(3);
        assert!(dial.shows_crisis_banner());
    }

    #[test]
    fn test_empty_entry_gets_gentle_note() {
        let config = DiaryConfig::default();
        let feedback = check_entry(&DiaryEntry::default(), &config);
        assert!(!feedback.saved);
        assert_eq!(feedback.message, config.empty_entry_message);
    }

    #[test]
    fn test_tag_only_entry_is_saved() {
        let config = DiaryConfig::default();
        let entry = DiaryEntry {
            intensity: 4,
            tags: vec!["Lonely".to_string()],
            ..Default::default()
        };
        let feedback = check_entry(&entry, &config);
        assert!(feedback.saved);
        assert_eq!(feedback.message, config.saved_message);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn dial_value_always_in_range(value in any::<u8>()) {
                let mut dial = MoodDial::new(DiaryConfig::default());
                let set = dial.set(value);
                prop_assert!((1..=10).contains(&set));
                prop_assert_eq!(dial.shows_crisis_banner(), set <= 2);
                prop_assert_eq!(dial.label(), MoodLabel::for_intensity(set));
            }
        }
    }
}
