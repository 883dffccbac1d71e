//! The 5-4-3-2-1 grounding stepper.

use crate::core::{CompletionGate, ReflectionFlow, StepDefinition};
use crate::error::Result;

pub const GROUNDING_FLOW: &str = "grounding";

pub const GROUNDING_PLACEHOLDER: &str = "You can write them here if it helps...";

pub const GROUNDING_COMPLETE: &str = "You made it through the steps.";

pub const GROUNDING_COMPLETE_DETAIL: &str =
    "That's not small. Take one slow breath and notice if the feeling shifted even 1%.";

/// (count, label, prompt) per sense, counting down from five.
pub(crate) const SENSES: [(u8, &str, &str); 5] = [
    (
        5,
        "things you can see",
        "Look around you. Name five things. No judgment. e.g., 'the blue lamp', 'a crack on \
         the wall'...",
    ),
    (
        4,
        "things you can touch",
        "Notice the sensation. The texture of your clothes, the coolness of a glass...",
    ),
    (
        3,
        "things you can hear",
        "Listen for sounds, near or far. A car passing, the hum of a fridge, your own breath...",
    ),
    (
        2,
        "things you can smell",
        "What scents are in the air? If none, imagine two smells that feel safe to you...",
    ),
    (
        1,
        "thing you can taste",
        "Notice the taste in your mouth, or take a sip of water and notice the sensation.",
    ),
];

/// Step definitions for the grounding stepper.
pub fn grounding_steps(min_chars: usize) -> Vec<StepDefinition> {
    SENSES
        .iter()
        .map(|(count, label, prompt)| {
            StepDefinition::new(*prompt)
                .with_label(format!("{} {}", count, label))
                .with_placeholder(GROUNDING_PLACEHOLDER)
                .with_min_length(min_chars)
        })
        .collect()
}

/// A fresh grounding flow.
pub fn grounding_flow(gate: CompletionGate, min_chars: usize) -> Result<ReflectionFlow> {
    Ok(
        ReflectionFlow::from_steps(GROUNDING_FLOW, grounding_steps(min_chars), gate)?
            .with_completion_message(GROUNDING_COMPLETE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AdvanceOutcome, FlowEvent, FlowStatus};

    fn flow() -> ReflectionFlow {
        grounding_flow(CompletionGate::default(), 1).unwrap()
    }

    #[test]
    fn test_five_steps_counting_down() {
        let steps = grounding_steps(1);
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].label.as_deref(), Some("5 things you can see"));
        assert_eq!(steps[4].label.as_deref(), Some("1 thing you can taste"));
    }

    #[test]
    fn test_walk_through_and_start_over() {
        let mut flow = flow();
        for answer in ["lamp", "sleeve", "fridge", "coffee", "mint"] {
            flow.submit(answer).unwrap();
        }
        assert_eq!(flow.status(), FlowStatus::Complete);

        let events = flow.take_events();
        assert!(events.contains(&FlowEvent::Completed {
            message: Some(GROUNDING_COMPLETE.to_string())
        }));

        flow.reset();
        assert_eq!(flow.status(), FlowStatus::InProgress(0));
        assert!(flow.answers().iter().all(String::is_empty));
    }

    #[test]
    fn test_optional_grounding_accepts_blank() {
        let mut flow = grounding_flow(CompletionGate::default(), 0).unwrap();
        assert!(matches!(flow.advance(), AdvanceOutcome::Advanced { .. }));
    }
}
