//! CLI commands for Pamoja.
//!
//! This module provides CLI commands for Pamoja, organized into:
//! - **Flow commands**: flows, run, lesson (interactive, stdin/stdout)
//! - **Tool commands**: mood, prompt (single-shot)
//! - **Utility commands**: tools, avatars, config

// Flow commands
pub mod flows;
pub mod lesson;
pub mod run;

// Tool commands
pub mod mood;
pub mod prompt;

// Utility commands
pub mod avatars_cmd;
pub mod config_cmd;
pub mod tools_cmd;

pub use avatars_cmd::AvatarsCommand;
pub use config_cmd::ConfigCommand;
pub use flows::FlowsCommand;
pub use lesson::LessonCommand;
pub use mood::MoodCommand;
pub use prompt::PromptCommand;
pub use run::RunCommand;
pub use tools_cmd::ToolsCommand;
