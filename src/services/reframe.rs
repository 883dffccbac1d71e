//! Request/response wrapper around the thought reframing call.
//!
//! The rewrite itself is opaque. This wrapper only enforces the minimum
//! input length and turns failures into a message the user can read.

use serde::Serialize;

use crate::services::Reframer;

/// Message shown when the rewrite call fails.
pub const REFRAME_FAILURE_MESSAGE: &str = "An AI error occurred. Please try again.";

/// Outcome of a reframing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReframeOutcome {
    /// The rewritten thought.
    Reframed(String),
    /// User-facing error string (too short, or the call failed).
    Error(String),
}

/// Validate `thought` and forward it to the reframer.
pub fn request_reframe(reframer: &dyn Reframer, thought: &str, min_chars: usize) -> ReframeOutcome {
    if thought.is_empty() || thought.chars().count() < min_chars {
        return ReframeOutcome::Error(format!(
            "Please enter a thought with at least {} characters.",
            min_chars
        ));
    }

    match reframer.reframe(thought) {
        Ok(reframed) => ReframeOutcome::Reframed(reframed),
        Err(err) => {
            tracing::warn!(error = %err, "reframe request failed");
            ReframeOutcome::Error(REFRAME_FAILURE_MESSAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PamojaError, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Echo {
        calls: AtomicUsize,
    }

    impl Reframer for Echo {
        fn reframe(&self, thought: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("Maybe: {}", thought))
        }
    }

    struct Broken;

    impl Reframer for Broken {
        fn reframe(&self, _thought: &str) -> Result<String> {
            Err(PamojaError::service("upstream unavailable"))
        }
    }

    #[test]
    fn test_short_thought_never_reaches_service() {
        let echo = Echo {
            calls: AtomicUsize::new(0),
        };
        let outcome = request_reframe(&echo, "too short", 10);
        assert_eq!(
            outcome,
            ReframeOutcome::Error("Please enter a thought with at least 10 characters.".into())
        );
        assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_valid_thought_is_reframed() {
        let echo = Echo {
            calls: AtomicUsize::new(0),
        };
        let outcome = request_reframe(&echo, "I always ruin everything", 10);
        assert_eq!(
            outcome,
            ReframeOutcome::Reframed("Maybe: I always ruin everything".into())
        );
        assert_eq!(echo.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_service_failure_maps_to_message() {
        let outcome = request_reframe(&Broken, "Nobody ever listens to me", 10);
        assert_eq!(
            outcome,
            ReframeOutcome::Error(REFRAME_FAILURE_MESSAGE.to_string())
        );
    }
}
