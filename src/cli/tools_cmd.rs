//! Tools command for Pamoja.
//!
//! Lists the tool library with each tool's access for the local profile.

use serde::Serialize;

use crate::catalog::{ToolAccess, ToolKind, ToolRegistry};
use crate::error::Result;
use crate::services::Services;

/// Profile id used by the command line, which has no sign-in.
pub const LOCAL_PROFILE_ID: &str = "local";

/// Options for the tools command.
#[derive(Debug, Clone, Default)]
pub struct ToolsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Treat the local profile as premium.
    pub premium: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub premium: bool,
    pub kind: ToolKind,
    pub access: ToolAccess,
}

/// Output format for the tools command.
#[derive(Debug, Clone, Serialize)]
pub struct ToolsOutput {
    pub premium_profile: bool,
    pub tools: Vec<ToolEntry>,
}

/// The tools command implementation.
pub struct ToolsCommand<'a> {
    services: &'a Services,
    registry: ToolRegistry,
}

impl<'a> ToolsCommand<'a> {
    pub fn new(services: &'a Services) -> Result<Self> {
        Ok(Self {
            services,
            registry: ToolRegistry::builtin()?,
        })
    }

    pub fn run(&self, options: &ToolsOptions) -> ToolsOutput {
        let mut profile = self.services.profile_or_guest(LOCAL_PROFILE_ID);
        if options.premium {
            profile = profile.with_premium(true);
        }

        let tools = self
            .registry
            .iter()
            .map(|tool| ToolEntry {
                id: tool.id.to_string(),
                title: tool.title.to_string(),
                description: tool.description.to_string(),
                premium: tool.premium,
                kind: tool.kind,
                access: self.registry.access(tool.id, &profile),
            })
            .collect();

        ToolsOutput {
            premium_profile: profile.is_premium,
            tools,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ToolsOutput, options: &ToolsOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &ToolsOutput) -> String {
        let mut text = String::from("Tool library:\n");
        for tool in &output.tools {
            let badge = match (tool.premium, tool.access) {
                (false, _) => "free",
                (true, ToolAccess::Open) => "pamoja+",
                (true, ToolAccess::Locked) => "locked",
            };
            text.push_str(&format!("  [{:<7}] {}\n", badge, tool.title));
            text.push_str(&format!("            {}\n", tool.description));
        }
        if !output.premium_profile {
            text.push_str("\nUpgrade to pamoja+ to unlock the locked tools.\n");
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::services::Profile;

    #[test]
    fn test_free_profile_sees_locked_tools() {
        let services = Services::new(Config::default());
        let cmd = ToolsCommand::new(&services).unwrap();
        let output = cmd.run(&ToolsOptions::default());

        assert!(!output.premium_profile);
        let locked = output
            .tools
            .iter()
            .filter(|t| t.access == ToolAccess::Locked)
            .count();
        assert_eq!(locked, 5);
    }

    #[test]
    fn test_premium_flag_unlocks() {
        let services = Services::new(Config::default());
        let cmd = ToolsCommand::new(&services).unwrap();
        let options = ToolsOptions {
            premium: true,
            ..Default::default()
        };
        let output = cmd.run(&options);
        assert!(output.tools.iter().all(|t| t.access == ToolAccess::Open));
    }

    #[test]
    fn test_stored_premium_profile_unlocks() {
        let services = Services::new(Config::default());
        services
            .profiles()
            .put(&Profile::new(LOCAL_PROFILE_ID, "Sam").with_premium(true))
            .unwrap();
        let cmd = ToolsCommand::new(&services).unwrap();
        assert!(cmd.run(&ToolsOptions::default()).premium_profile);
    }

    #[test]
    fn test_format_output_human_readable() {
        let services = Services::new(Config::default());
        let cmd = ToolsCommand::new(&services).unwrap();
        let options = ToolsOptions::default();
        let output = cmd.run(&options);
        let formatted = cmd.format_output(&output, &options);

        assert!(formatted.contains("[free   ] Daily Grounding Prompt"));
        assert!(formatted.contains("[locked ] Emotion Diary Analytics"));
        assert!(formatted.contains("Upgrade to pamoja+"));
    }
}
