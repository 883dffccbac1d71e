//! Prompt command for Pamoja.
//!
//! Shows the daily grounding prompt and, optionally, accepts a response.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::catalog::prompts::{prompt_for, save_response};

/// Options for the prompt command.
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the prompt command.
#[derive(Debug, Clone, Serialize)]
pub struct PromptOutput {
    pub date: NaiveDate,
    pub prompt: String,
    /// Present only when a response was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PromptOutput {
    /// Whether the command did what was asked.
    pub fn success(&self) -> bool {
        self.saved.unwrap_or(true)
    }
}

/// The prompt command implementation.
#[derive(Debug, Default)]
pub struct PromptCommand;

impl PromptCommand {
    pub fn new() -> Self {
        Self
    }

    /// Prompt for `date` (today when `None`), checking `response` if given.
    pub fn run(&self, date: Option<NaiveDate>, response: Option<&str>) -> PromptOutput {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        let prompt = prompt_for(date).to_string();

        let (saved, message) = match response.map(save_response) {
            Some(Ok(message)) => (Some(true), Some(message.to_string())),
            Some(Err(rejection)) => (Some(false), Some(rejection.message)),
            None => (None, None),
        };

        PromptOutput {
            date,
            prompt,
            saved,
            message,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &PromptOutput, options: &PromptOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &PromptOutput) -> String {
        let mut text = format!("Today's prompt: {}\n", output.prompt);
        if let Some(message) = &output.message {
            text.push_str(message);
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::prompts::DAILY_PROMPTS;

    fn jan(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 1, day)
    }

    #[test]
    fn test_prompt_only() {
        let output = PromptCommand::new().run(jan(2), None);
        assert_eq!(output.prompt, DAILY_PROMPTS[2]);
        assert!(output.saved.is_none());
        assert!(output.success());
    }

    #[test]
    fn test_response_saved() {
        let output = PromptCommand::new().run(jan(2), Some("a warm shower"));
        assert_eq!(output.saved, Some(true));
        assert_eq!(
            output.message.as_deref(),
            Some("Thank you for sharing with yourself.")
        );
    }

    #[test]
    fn test_empty_response_rejected() {
        let output = PromptCommand::new().run(jan(2), Some(""));
        assert_eq!(output.saved, Some(false));
        assert!(!output.success());
        assert_eq!(
            output.message.as_deref(),
            Some("Please write a short response.")
        );
    }

    #[test]
    fn test_format_output_json() {
        let cmd = PromptCommand::new();
        let output = cmd.run(jan(5), None);
        let options = PromptOptions {
            json: true,
            ..Default::default()
        };
        let formatted = cmd.format_output(&output, &options);
        assert!(formatted.contains("\"date\": \"2025-01-05\""));
        assert!(!formatted.contains("saved"));
    }
}
