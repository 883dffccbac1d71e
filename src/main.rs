//! Pamoja - guided reflection flows
//!
//! CLI entry point.

use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use pamoja::catalog::mood::BodyState;
use pamoja::catalog::{FlowKind, LessonId};
use pamoja::config::Config;
use pamoja::error::exit_codes;
use pamoja::services::Services;

// =============================================================================
// CLI Definition
// =============================================================================

/// Pamoja - guided reflection flows for gentle self-help tools
#[derive(Parser)]
#[command(name = "pamoja")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the stepper flows
    Flows {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Walk through a stepper flow (`:back`, `:reset`, `:quit` to navigate)
    Run {
        /// Flow to run
        #[arg(value_enum)]
        flow: FlowArg,
        /// Print only the final summary as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress the final summary
        #[arg(long, short)]
        quiet: bool,
    },

    /// Work through a psychoeducation mini (`reflect`, `choose`, `ask`, `:quit`)
    Lesson {
        /// Lesson to open
        #[arg(value_enum)]
        lesson: LessonArg,
        /// Print only the final summary as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress the final summary
        #[arg(long, short)]
        quiet: bool,
    },

    /// Set the mood dial and check a diary entry
    Mood {
        /// Intensity on the dial (clamped to the configured range)
        intensity: u8,
        /// What you're feeling, in your own words
        #[arg(long, short)]
        description: Option<String>,
        /// Quick tag (repeatable)
        #[arg(long = "tag", short)]
        tags: Vec<String>,
        /// How your body feels
        #[arg(long, value_enum)]
        body: Option<BodyArg>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show today's grounding prompt
    Prompt {
        /// Respond to the prompt
        #[arg(long, short)]
        respond: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// List the tool library
    Tools {
        /// Show access as a pamoja+ member
        #[arg(long)]
        premium: bool,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// List avatars, or show one
    Avatars {
        /// Avatar id
        id: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show the effective configuration
    Config {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FlowArg {
    Grounding,
    CheckIn,
}

impl From<FlowArg> for FlowKind {
    fn from(arg: FlowArg) -> Self {
        match arg {
            FlowArg::Grounding => FlowKind::Grounding,
            FlowArg::CheckIn => FlowKind::CheckIn,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LessonArg {
    Emotions,
    Splitting,
    SelfSoothe,
    Triggers,
}

impl From<LessonArg> for LessonId {
    fn from(arg: LessonArg) -> Self {
        match arg {
            LessonArg::Emotions => LessonId::Emotions,
            LessonArg::Splitting => LessonId::Splitting,
            LessonArg::SelfSoothe => LessonId::SelfSoothe,
            LessonArg::Triggers => LessonId::Triggers,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BodyArg {
    Tense,
    Neutral,
    Relaxed,
}

impl From<BodyArg> for BodyState {
    fn from(arg: BodyArg) -> Self {
        match arg {
            BodyArg::Tense => BodyState::Tense,
            BodyArg::Neutral => BodyState::Neutral,
            BodyArg::Relaxed => BodyState::Relaxed,
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let services = Services::new(Config::load());

    let result = run(cli.command, &services);
    services.shutdown();

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("pamoja error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Log to stderr, filtered by `PAMOJA_LOG` (default `warn`).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("PAMOJA_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Run a command and return the exit code.
fn run(command: Commands, services: &Services) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        Commands::Flows { json, quiet } => run_flows(json, quiet),
        Commands::Run { flow, json, quiet } => run_flow(flow.into(), json, quiet, services),
        Commands::Lesson {
            lesson,
            json,
            quiet,
        } => run_lesson(lesson.into(), json, quiet, services),
        Commands::Mood {
            intensity,
            description,
            tags,
            body,
            json,
            quiet,
        } => run_mood(
            intensity,
            description,
            tags,
            body.map(Into::into),
            json,
            quiet,
            services,
        ),
        Commands::Prompt {
            respond,
            json,
            quiet,
        } => run_prompt(respond, json, quiet),
        Commands::Tools {
            premium,
            json,
            quiet,
        } => run_tools(premium, json, quiet, services),
        Commands::Avatars { id, json, quiet } => run_avatars(id, json, quiet),
        Commands::Config { json, quiet } => {
            let cwd = std::env::current_dir()?;
            run_config(json, quiet, &cwd, services)
        }
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::OK as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn print_formatted(formatted: &str) {
    if !formatted.is_empty() {
        println!("{}", formatted.trim_end());
    }
}

fn run_flows(json: bool, quiet: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use pamoja::cli::flows::{FlowsCommand, FlowsOptions};

    let cmd = FlowsCommand::new()?;
    let options = FlowsOptions { json, quiet };

    let output = cmd.run();
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(true))
}

fn run_flow(
    kind: FlowKind,
    json: bool,
    quiet: bool,
    services: &Services,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use pamoja::cli::run::{RunCommand, RunOptions};

    let cmd = RunCommand::new(services.config().clone());
    let options = RunOptions { json, quiet };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let output = cmd.run(kind, stdin.lock(), &mut stdout, &options)?;
    print_formatted(&cmd.format_output(&output, &options));

    // Stopping early is allowed; it is not a failure.
    Ok(success_to_exit_code(true))
}

fn run_lesson(
    lesson: LessonId,
    json: bool,
    quiet: bool,
    services: &Services,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use pamoja::cli::lesson::{LessonCommand, LessonOptions};

    let cmd = LessonCommand::new(services);
    let options = LessonOptions { json, quiet };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let output = cmd.run(lesson, stdin.lock(), &mut stdout, &options)?;
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(true))
}

fn run_mood(
    intensity: u8,
    description: Option<String>,
    tags: Vec<String>,
    body_state: Option<BodyState>,
    json: bool,
    quiet: bool,
    services: &Services,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use pamoja::cli::mood::{MoodCommand, MoodInput, MoodOptions};

    let cmd = MoodCommand::new(services.config().diary.clone());
    let options = MoodOptions { json, quiet };

    let output = cmd.run(MoodInput {
        intensity,
        description,
        tags,
        body_state,
    });
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(true))
}

fn run_prompt(
    respond: Option<String>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use pamoja::cli::prompt::{PromptCommand, PromptOptions};

    let cmd = PromptCommand::new();
    let options = PromptOptions { json, quiet };

    let output = cmd.run(None, respond.as_deref());
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success()))
}

fn run_tools(
    premium: bool,
    json: bool,
    quiet: bool,
    services: &Services,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use pamoja::cli::tools_cmd::{ToolsCommand, ToolsOptions};

    let cmd = ToolsCommand::new(services)?;
    let options = ToolsOptions {
        json,
        quiet,
        premium,
    };

    let output = cmd.run(&options);
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(true))
}

fn run_avatars(
    id: Option<String>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use pamoja::cli::avatars_cmd::{AvatarsCommand, AvatarsOptions};

    let cmd = AvatarsCommand::new()?;
    let options = AvatarsOptions { json, quiet };

    let output = cmd.run(id.as_deref())?;
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(true))
}

fn run_config(
    json: bool,
    quiet: bool,
    cwd: &Path,
    services: &Services,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use pamoja::cli::config_cmd::{ConfigCommand, ConfigOptions};

    let cmd = ConfigCommand::new(services.config().clone());
    let options = ConfigOptions { json, quiet };

    let output = cmd.run(cwd)?;
    print_formatted(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(true))
}

// =============================================================================
// Tests
// =============================================================================
