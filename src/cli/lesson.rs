//! Lesson command for Pamoja.
//!
//! Presents one psychoeducation mini and reads practice lines:
//! `reflect <text>`, `choose <option-id>`, `ask <text>`, `:quit`.

use std::io::{BufRead, Write};

use serde::Serialize;

use crate::catalog::lessons::LESSON_COMPLETE_MESSAGE;
use crate::catalog::{Lesson, LessonId, LessonOutcome, LessonSession};
use crate::error::{PamojaError, Result};
use crate::services::Services;

const QUIT: &str = ":quit";
const USAGE: &str = "Try `reflect <text>`, `choose <option-id>`, `ask <text>` or `:quit`.";

/// Options for the lesson command.
#[derive(Debug, Clone, Default)]
pub struct LessonOptions {
    /// Print only the final summary, as JSON.
    pub json: bool,
    /// Suppress the final summary.
    pub quiet: bool,
}

/// Output format for the lesson command.
#[derive(Debug, Clone, Serialize)]
pub struct LessonOutput {
    pub lesson: String,
    pub title: String,
    pub milestones: Vec<String>,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chosen_option: Option<String>,
}

/// A parsed practice line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Practice<'a> {
    Reflect(&'a str),
    Choose(&'a str),
    Ask(&'a str),
    Quit,
    Unknown,
}

fn parse_line(line: &str) -> Practice<'_> {
    let line = line.trim();
    if line == QUIT {
        return Practice::Quit;
    }
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    match verb {
        "reflect" => Practice::Reflect(rest),
        "choose" => Practice::Choose(rest.trim()),
        "ask" => Practice::Ask(rest),
        _ => Practice::Unknown,
    }
}

/// The lesson command implementation.
pub struct LessonCommand<'a> {
    services: &'a Services,
}

impl<'a> LessonCommand<'a> {
    pub fn new(services: &'a Services) -> Self {
        Self { services }
    }

    pub fn run<R: BufRead, W: Write>(
        &self,
        id: LessonId,
        mut input: R,
        out: &mut W,
        options: &LessonOptions,
    ) -> Result<LessonOutput> {
        let mut session = LessonSession::new(id, &self.services.config().lessons)?;
        let interactive = !options.json;
        if interactive {
            write_lesson(session.lesson(), out)?;
        }

        let mut announced = false;
        loop {
            if interactive {
                write!(out, "> ")?;
                out.flush()?;
            }

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            let outcome = match parse_line(&line) {
                Practice::Quit => break,
                Practice::Reflect(text) => session.submit_reflection(text),
                Practice::Choose(option) => session.choose_scenario(option),
                Practice::Ask(text) => session.ask_support(text, self.services.support()),
                Practice::Unknown => {
                    if interactive {
                        writeln!(out, "{}", USAGE)?;
                    }
                    continue;
                }
            };

            match outcome {
                Ok(outcome) => {
                    if interactive {
                        write_outcome(&outcome, out)?;
                    }
                }
                Err(err @ PamojaError::NotFound { .. }) => {
                    if interactive {
                        writeln!(out, "{}", err)?;
                    }
                }
                Err(err) => return Err(err),
            }

            if session.all_complete() && !announced {
                announced = true;
                if interactive {
                    writeln!(out, "{}", LESSON_COMPLETE_MESSAGE)?;
                }
            }
        }

        Ok(LessonOutput {
            lesson: id.to_string(),
            title: session.lesson().title.to_string(),
            milestones: session
                .milestones()
                .reached()
                .into_iter()
                .map(String::from)
                .collect(),
            complete: session.all_complete(),
            reflection: session.reflection().map(String::from),
            chosen_option: session.chosen_option().map(|o| o.id.to_string()),
        })
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &LessonOutput, options: &LessonOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &LessonOutput) -> String {
        if output.milestones.is_empty() {
            return format!("{}: no practices yet.\n", output.title);
        }
        format!(
            "{}: {} of 3 practices ({}).\n",
            output.title,
            output.milestones.len(),
            output.milestones.join(", ")
        )
    }
}

fn write_lesson<W: Write>(lesson: &Lesson, out: &mut W) -> Result<()> {
    writeln!(out, "{}\n", lesson.title)?;
    writeln!(out, "{}\n", lesson.summary)?;
    writeln!(out, "Try this: {}\n", lesson.try_this)?;
    writeln!(out, "Reflect: {}\n", lesson.reflection_prompt)?;
    writeln!(out, "Scenario: {}", lesson.scenario.description)?;
    for option in &lesson.scenario.options {
        writeln!(out, "  [{}] {}", option.id, option.label)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", USAGE)?;
    Ok(())
}

fn write_outcome<W: Write>(outcome: &LessonOutcome, out: &mut W) -> Result<()> {
    match outcome {
        LessonOutcome::Rejected(rejection) => writeln!(out, "{}", rejection)?,
        LessonOutcome::Accepted {
            message,
            celebration,
        } => {
            writeln!(out, "{}", message)?;
            if let Some(celebration) = celebration {
                writeln!(out, "* {}", celebration)?;
            }
        }
    }
    Ok(())
}
