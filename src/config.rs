//! Configuration loading for Pamoja.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.pamoja/config.toml`)
//! 3. User config (`~/.pamoja/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. The product-tuned thresholds (crisis
//! banner cutoff, minimum answer lengths) live here rather than in code.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PamojaError, Result};

/// Main configuration struct for Pamoja.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Completion gate defaults for stepper flows.
    pub gate: GateConfig,
    /// Emotion diary and mood dial settings.
    pub diary: DiaryConfig,
    /// Psychoeducation lesson settings.
    pub lessons: LessonsConfig,
    /// Thought reframing settings.
    pub reframe: ReframeConfig,
}

/// Completion gate defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    /// Minimum trimmed characters for a required step.
    pub min_chars: usize,
    /// Message shown when a step refuses to advance.
    pub rejection_message: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_chars: 1,
            rejection_message: crate::core::DEFAULT_REJECTION_MESSAGE.to_string(),
        }
    }
}

/// Emotion diary settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiaryConfig {
    /// Intensity at or below which the crisis banner is shown.
    pub crisis_threshold: u8,
    /// Lowest value on the mood dial.
    pub min_intensity: u8,
    /// Highest value on the mood dial.
    pub max_intensity: u8,
    /// Gentle note for an entry with no words and no tags.
    pub empty_entry_message: String,
    /// Confirmation shown after saving an entry.
    pub saved_message: String,
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self {
            crisis_threshold: 2,
            min_intensity: 1,
            max_intensity: 10,
            empty_entry_message:
                "You can share as little or as much as you want, even a few words are okay."
                    .to_string(),
            saved_message: "Entry saved. You showed up for yourself just now.".to_string(),
        }
    }
}

/// Psychoeducation lesson settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LessonsConfig {
    /// Minimum trimmed characters for a lesson reflection.
    pub reflection_min_chars: usize,
    /// Minimum trimmed characters before asking for support.
    pub support_min_chars: usize,
}

impl Default for LessonsConfig {
    fn default() -> Self {
        Self {
            reflection_min_chars: 2,
            support_min_chars: 3,
        }
    }
}

/// Thought reframing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReframeConfig {
    /// Minimum characters of a thought sent for reframing.
    pub min_chars: usize,
}

impl Default for ReframeConfig {
    fn default() -> Self {
        Self { min_chars: 10 }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_layers(Some(&cwd)),
            Err(err) => {
                tracing::debug!("no working directory ({}), skipping project config", err);
                Self::load_layers(None)
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        Self::load_layers(Some(cwd))
    }

    /// Merge every available layer, then fall back to defaults if the
    /// result does not validate.
    fn load_layers(cwd: Option<&Path>) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = cwd.and_then(Self::load_project_config) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        if let Err(err) = config.validate() {
            tracing::warn!("{} (fail-open: using defaults)", err);
            return Config::default();
        }

        config
    }

    /// Load user config from `<pamoja_home>/config.toml`.
    fn load_user_config() -> Option<Config> {
        let config_path = pamoja_home()?.join("config.toml");
        Self::load_optional(&config_path)
    }

    /// Load project config from `.pamoja/config.toml` in the given directory.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        Self::load_optional(&project_config_path(cwd))
    }

    /// Load a config file that may legitimately be absent.
    ///
    /// A missing file is silent; a broken one is warned about and skipped.
    fn load_optional(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring config file: {}", err);
                None
            }
        }
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| PamojaError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| PamojaError::config(e.to_string()))
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        let diary = &self.diary;
        if diary.min_intensity > diary.max_intensity {
            return Err(PamojaError::config(format!(
                "diary.min_intensity ({}) is above diary.max_intensity ({})",
                diary.min_intensity, diary.max_intensity
            )));
        }
        if !(diary.min_intensity..=diary.max_intensity).contains(&diary.crisis_threshold) {
            return Err(PamojaError::config(format!(
                "diary.crisis_threshold ({}) must be within {}..={}",
                diary.crisis_threshold, diary.min_intensity, diary.max_intensity
            )));
        }
        Ok(())
    }

    /// Serialize the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PamojaError::serde(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(n) = env_number::<usize>("PAMOJA_GATE_MIN_CHARS", self.gate.min_chars) {
            self.gate.min_chars = n;
        }

        if let Some(n) = env_number::<u8>("PAMOJA_CRISIS_THRESHOLD", self.diary.crisis_threshold)
        {
            if (self.diary.min_intensity..=self.diary.max_intensity).contains(&n) {
                self.diary.crisis_threshold = n;
            } else {
                tracing::warn!(
                    "Invalid PAMOJA_CRISIS_THRESHOLD value '{}'. Must be within {}..={}. Using '{}'.",
                    n,
                    self.diary.min_intensity,
                    self.diary.max_intensity,
                    self.diary.crisis_threshold
                );
            }
        }

        if let Some(n) = env_number::<usize>(
            "PAMOJA_REFLECTION_MIN_CHARS",
            self.lessons.reflection_min_chars,
        ) {
            self.lessons.reflection_min_chars = n;
        }

        if let Some(n) =
            env_number::<usize>("PAMOJA_SUPPORT_MIN_CHARS", self.lessons.support_min_chars)
        {
            self.lessons.support_min_chars = n;
        }

        if let Some(n) = env_number::<usize>("PAMOJA_REFRAME_MIN_CHARS", self.reframe.min_chars) {
            self.reframe.min_chars = n;
        }
    }

    /// Merge another config into this one.
    ///
    /// The `other` config takes precedence field by field: any value that
    /// differs from the default overrides `self`. A higher layer therefore
    /// cannot set a value back to its default over a lower layer.
    fn merge(mut self, other: Config) -> Self {
        let default_gate = GateConfig::default();
        if other.gate.min_chars != default_gate.min_chars {
            self.gate.min_chars = other.gate.min_chars;
        }
        if other.gate.rejection_message != default_gate.rejection_message {
            self.gate.rejection_message = other.gate.rejection_message;
        }

        let default_diary = DiaryConfig::default();
        if other.diary.crisis_threshold != default_diary.crisis_threshold {
            self.diary.crisis_threshold = other.diary.crisis_threshold;
        }
        if other.diary.min_intensity != default_diary.min_intensity {
            self.diary.min_intensity = other.diary.min_intensity;
        }
        if other.diary.max_intensity != default_diary.max_intensity {
            self.diary.max_intensity = other.diary.max_intensity;
        }
        if other.diary.empty_entry_message != default_diary.empty_entry_message {
            self.diary.empty_entry_message = other.diary.empty_entry_message;
        }
        if other.diary.saved_message != default_diary.saved_message {
            self.diary.saved_message = other.diary.saved_message;
        }

        let default_lessons = LessonsConfig::default();
        if other.lessons.reflection_min_chars != default_lessons.reflection_min_chars {
            self.lessons.reflection_min_chars = other.lessons.reflection_min_chars;
        }
        if other.lessons.support_min_chars != default_lessons.support_min_chars {
            self.lessons.support_min_chars = other.lessons.support_min_chars;
        }

        if other.reframe.min_chars != ReframeConfig::default().min_chars {
            self.reframe.min_chars = other.reframe.min_chars;
        }

        self
    }
}

/// Read a numeric env override, warning on unparsable values.
fn env_number<T: std::str::FromStr + std::fmt::Display>(name: &str, current: T) -> Option<T> {
    let val = env::var(name).ok()?;
    match val.parse::<T>() {
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!(
                "Invalid {} value '{}'. Expected a non-negative integer. Using '{}'.",
                name,
                val,
                current
            );
            None
        }
    }
}

/// Get the Pamoja home directory.
///
/// `$PAMOJA_HOME` when set and non-empty, else `~/.pamoja`, else a
/// directory under the system temp dir.
pub fn pamoja_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("PAMOJA_HOME") {
        if home.is_empty() {
            tracing::warn!("PAMOJA_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("PAMOJA_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return Some(home.join(".pamoja"));
    }

    let fallback_path = env::temp_dir().join("pamoja");
    tracing::warn!(
        "HOME not set, using fallback location: {}",
        fallback_path.display()
    );
    Some(fallback_path)
}

/// Get the project config path: `<cwd>/.pamoja/config.toml`.
pub fn project_config_path(cwd: &Path) -> PathBuf {
    cwd.join(".pamoja").join("config.toml")
}
