//! Weekly self-trust check-in.

use crate::core::{CompletionGate, ReflectionFlow, StepDefinition};
use crate::error::Result;

pub const CHECK_IN_FLOW: &str = "check-in";

pub const CHECK_IN_PLACEHOLDER: &str = "Your gentle reflection...";

pub const CHECK_IN_COMPLETE: &str =
    "Check-in complete. You gathered evidence of your strength this week.";

pub const CHECK_IN_PROMPTS: [&str; 4] = [
    "Think of one moment this week where you showed up for yourself, even a tiny bit.",
    "What did you do, say, or choose in that moment?",
    "Why could this count as self-respect, self-care, or bravery?",
    "As you remember that, what do you notice in your body right now (tension, warmth, breath)?",
];

pub fn check_in_steps(min_chars: usize) -> Vec<StepDefinition> {
    CHECK_IN_PROMPTS
        .iter()
        .map(|prompt| {
            StepDefinition::new(*prompt)
                .with_placeholder(CHECK_IN_PLACEHOLDER)
                .with_min_length(min_chars)
        })
        .collect()
}

pub fn check_in_flow(gate: CompletionGate, min_chars: usize) -> Result<ReflectionFlow> {
    Ok(
        ReflectionFlow::from_steps(CHECK_IN_FLOW, check_in_steps(min_chars), gate)?
            .with_completion_message(CHECK_IN_COMPLETE),
    )
}

/// Sentence shown on the completion card, built from the second and third
/// answers.
pub fn check_in_summary(answers: &[String]) -> String {
    let what = answers.get(1).map(String::as_str).unwrap_or_default();
    let why = answers.get(2).map(String::as_str).unwrap_or_default();
    format!(
        "This week I showed self-trust by {}, even though it was hard. This mattered because it \
         was an act of {}.",
        what, why
    )
}
