//! Avatars command for Pamoja.
//!
//! Lists the avatar registry, or shows a single avatar by id.

use serde::Serialize;

use crate::catalog::{AvatarConfig, AvatarRegistry, Vibe, DEFAULT_AVATAR_ID};
use crate::error::Result;

/// Options for the avatars command.
#[derive(Debug, Clone, Default)]
pub struct AvatarsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvatarEntry {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub vibe: Vibe,
    pub colors: [String; 2],
    pub default: bool,
}

impl From<&AvatarConfig> for AvatarEntry {
    fn from(avatar: &AvatarConfig) -> Self {
        Self {
            id: avatar.id.to_string(),
            name: avatar.name.to_string(),
            tagline: avatar.tagline.to_string(),
            vibe: avatar.vibe,
            colors: [avatar.from.to_string(), avatar.to.to_string()],
            default: avatar.id.as_str() == DEFAULT_AVATAR_ID,
        }
    }
}

/// Output format for the avatars command.
#[derive(Debug, Clone, Serialize)]
pub struct AvatarsOutput {
    pub avatars: Vec<AvatarEntry>,
}

/// The avatars command implementation.
pub struct AvatarsCommand {
    registry: AvatarRegistry,
}

impl AvatarsCommand {
    pub fn new() -> Result<Self> {
        Ok(Self {
            registry: AvatarRegistry::builtin()?,
        })
    }

    /// List every avatar, or only `id` (unknown ids are an error).
    pub fn run(&self, id: Option<&str>) -> Result<AvatarsOutput> {
        let avatars = match id {
            Some(id) => vec![AvatarEntry::from(self.registry.lookup(id)?)],
            None => self.registry.iter().map(AvatarEntry::from).collect(),
        };
        Ok(AvatarsOutput { avatars })
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &AvatarsOutput, options: &AvatarsOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &AvatarsOutput) -> String {
        let mut text = String::new();
        for avatar in &output.avatars {
            text.push_str(&format!(
                "{:<20} {}{}\n    {}\n",
                avatar.id,
                avatar.name,
                if avatar.default { " (default)" } else { "" },
                avatar.tagline
            ));
        }
        text
    }
}
