//! Run command for Pamoja.
//!
//! Drives a stepper flow line by line. Every plain line becomes the answer
//! for the current step and then advances. A blank line advances on the
//! answer already kept for the step, if any. Three control lines navigate:
//! `:back`, `:reset` and `:quit`.

use std::io::{BufRead, Write};

use serde::Serialize;

use crate::catalog::grounding::GROUNDING_COMPLETE_DETAIL;
use crate::catalog::{build_flow, check_in_summary, FlowKind};
use crate::config::Config;
use crate::core::{CurrentStep, FlowEvent, ReflectionFlow, StepAnswer};
use crate::error::Result;

const BACK: &str = ":back";
const RESET: &str = ":reset";
const QUIT: &str = ":quit";

/// Options for the run command.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Print only the final summary, as JSON.
    pub json: bool,
    /// Suppress the final summary.
    pub quiet: bool,
}

/// Output format for the run command.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutput {
    pub flow: String,
    pub complete: bool,
    /// True when the session ended before completion (`:quit` or end of input).
    pub quit: bool,
    /// How many advances the gate refused.
    pub rejections: usize,
    pub steps: Vec<StepAnswer>,
    /// Closing sentence for flows that build one from the answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// The run command implementation.
pub struct RunCommand {
    config: Config,
}

impl RunCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run `kind` against `input`, writing prompts to `out`.
    ///
    /// In JSON mode nothing is written while the flow runs.
    pub fn run<R: BufRead, W: Write>(
        &self,
        kind: FlowKind,
        mut input: R,
        out: &mut W,
        options: &RunOptions,
    ) -> Result<RunOutput> {
        let mut flow = build_flow(kind, &self.config)?;
        let interactive = !options.json;
        let mut rejections = 0;
        let mut quit = false;

        while !flow.is_complete() {
            if interactive {
                write_prompt(&flow, out)?;
            }

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                quit = true;
                break;
            }
            let line = line.trim_end_matches(['\n', '\r']);

            match line.trim() {
                QUIT => {
                    quit = true;
                    break;
                }
                BACK => {
                    if !flow.retreat() && interactive {
                        writeln!(out, "You're already at the first step.")?;
                    }
                }
                RESET => flow.reset(),
                "" => {
                    flow.advance();
                }
                _ => {
                    flow.submit(line)?;
                }
            }

            for event in flow.take_events() {
                if matches!(event, FlowEvent::Rejected { .. }) {
                    rejections += 1;
                }
                if interactive {
                    write_event(&event, out)?;
                }
            }
        }

        let summary = match kind {
            FlowKind::CheckIn if flow.is_complete() => Some(check_in_summary(flow.answers())),
            _ => None,
        };

        if interactive && flow.is_complete() {
            match &summary {
                Some(sentence) => writeln!(out, "\n\"{}\"", sentence)?,
                None => writeln!(out, "{}", GROUNDING_COMPLETE_DETAIL)?,
            }
        }

        let snapshot = flow.summary();
        Ok(RunOutput {
            flow: snapshot.flow,
            complete: snapshot.complete,
            quit,
            rejections,
            steps: snapshot.steps,
            summary,
        })
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &RunOutput, options: &RunOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &RunOutput) -> String {
        if !output.complete {
            let answered = output.steps.iter().filter(|s| !s.answer.is_empty()).count();
            return format!(
                "Paused {} after {} of {} answers. That's okay.\n",
                output.flow,
                answered,
                output.steps.len()
            );
        }

        let mut text = format!("Your {} answers:\n", output.flow);
        for step in &output.steps {
            text.push_str(&format!("  {}. {}\n", step.index + 1, step.answer));
        }
        text
    }
}

fn write_prompt<W: Write>(flow: &ReflectionFlow, out: &mut W) -> Result<()> {
    let (position, total) = flow.progress();
    if let CurrentStep::Step(step) = flow.current_step() {
        match &step.label {
            Some(label) => writeln!(out, "\nStep {} of {}: {}", position, total, label)?,
            None => writeln!(out, "\nStep {} of {}", position, total)?,
        }
        writeln!(out, "{}", step.prompt)?;
        let current = flow.current_answer();
        if !current.is_empty() {
            writeln!(out, "(so far: {})", current)?;
        }
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

fn write_event<W: Write>(event: &FlowEvent, out: &mut W) -> Result<()> {
    match event {
        FlowEvent::Rejected { message, .. } => writeln!(out, "{}", message)?,
        FlowEvent::Completed {
            message: Some(message),
        } => writeln!(out, "\n{}", message)?,
        FlowEvent::Reset => writeln!(out, "Starting over.")?,
        _ => {}
    }
    Ok(())
}
