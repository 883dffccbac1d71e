//! Flows command for Pamoja.
//!
//! Lists the stepper flows that `pamoja run` can drive.

use serde::Serialize;

use crate::catalog::{FlowKind, ToolRegistry};
use crate::error::Result;

/// Options for the flows command.
#[derive(Debug, Clone, Default)]
pub struct FlowsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// One runnable flow.
#[derive(Debug, Clone, Serialize)]
pub struct FlowEntry {
    pub id: String,
    pub steps: usize,
    /// Tool the flow belongs to.
    pub tool: String,
    pub tool_title: String,
    pub premium: bool,
}

/// Output format for the flows command.
#[derive(Debug, Clone, Serialize)]
pub struct FlowsOutput {
    pub flows: Vec<FlowEntry>,
}

/// The flows command implementation.
pub struct FlowsCommand {
    registry: ToolRegistry,
}

impl FlowsCommand {
    pub fn new() -> Result<Self> {
        Ok(Self {
            registry: ToolRegistry::builtin()?,
        })
    }

    pub fn run(&self) -> FlowsOutput {
        let flows = FlowKind::ALL
            .iter()
            .map(|kind| {
                let tool = self.registry.get(kind.tool());
                FlowEntry {
                    id: kind.to_string(),
                    steps: kind.step_count(),
                    tool: tool.id.to_string(),
                    tool_title: tool.title.to_string(),
                    premium: tool.premium,
                }
            })
            .collect();
        FlowsOutput { flows }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &FlowsOutput, options: &FlowsOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &FlowsOutput) -> String {
        let mut text = String::from("Flows:\n");
        for flow in &output.flows {
            text.push_str(&format!(
                "  {:<10} {} steps  ({}{})\n",
                flow.id,
                flow.steps,
                flow.tool_title,
                if flow.premium { ", pamoja+" } else { "" }
            ));
        }
        text
    }
}
