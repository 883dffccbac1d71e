//! Daily grounding prompt.
//!
//! One prompt per calendar day, picked by day of year so everyone sees the
//! same question on the same date.

use chrono::{Datelike, Local, NaiveDate};

use crate::core::{AdvancePolicy, CompletionGate, Rejection};

pub const DAILY_PROMPTS: [&str; 5] = [
    "What helped you get through today?",
    "Describe one small moment of peace you found.",
    "What is something you're looking forward to, no matter how small?",
    "Name one thing you did for yourself today.",
    "What's a sound, smell, or texture that felt comforting?",
];

pub const DAILY_PLACEHOLDER: &str = "Your thoughts here... No pressure, no judgment.";

const EMPTY_RESPONSE: &str = "Please write a short response.";
const SAVED: &str = "Thank you for sharing with yourself.";

/// Prompt for the given date. Day of year is 1-based.
pub fn prompt_for(date: NaiveDate) -> &'static str {
    DAILY_PROMPTS[date.ordinal() as usize % DAILY_PROMPTS.len()]
}

/// Prompt for today in local time.
pub fn prompt_of_the_day() -> &'static str {
    prompt_for(Local::now().date_naive())
}

/// Accept or reject a response to the daily prompt.
///
/// Nothing is stored; the caller decides what to do with accepted text.
pub fn save_response(response: &str) -> Result<&'static str, Rejection> {
    CompletionGate::check_policy(AdvancePolicy::NonEmpty, response, EMPTY_RESPONSE)?;
    tracing::debug!(chars = response.chars().count(), "daily response accepted");
    Ok(SAVED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_prompt_rotates_by_day_of_year() {
        // Jan 1 is day 1.
        assert_eq!(prompt_for(date(2025, 1, 1)), DAILY_PROMPTS[1]);
        assert_eq!(prompt_for(date(2025, 1, 4)), DAILY_PROMPTS[4]);
        assert_eq!(prompt_for(date(2025, 1, 5)), DAILY_PROMPTS[0]);
    }

    #[test]
    fn test_same_day_same_prompt() {
        assert_eq!(
            prompt_for(date(2024, 3, 10)),
            prompt_for(date(2024, 3, 10))
        );
    }

    #[test]
    fn test_prompt_of_the_day_is_from_list() {
        assert!(DAILY_PROMPTS.contains(&prompt_of_the_day()));
    }

    #[test]
    fn test_empty_response_rejected() {
        let rejection = save_response("   ").unwrap_err();
        assert_eq!(rejection.message, EMPTY_RESPONSE);
        assert_eq!(save_response("a walk"), Ok(SAVED));
    }
}
