//! In-memory answer storage for one flow session.

use serde::{Deserialize, Serialize};

use crate::error::{PamojaError, Result};

/// Mapping from step index to the free text entered at that step.
///
/// Every index in `[0, len)` always holds a value (empty by default).
/// Values are stored exactly as typed; emptiness checks trim at the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerStore {
    answers: Vec<String>,
}

impl AnswerStore {
    /// Create a store with `len` empty answers.
    pub fn new(len: usize) -> Self {
        Self {
            answers: vec![String::new(); len],
        }
    }

    /// The answer at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.answers.get(index).map(String::as_str)
    }

    /// Overwrite the answer at `index`, leaving all others untouched.
    pub fn set(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let len = self.answers.len();
        let slot = self.answers.get_mut(index).ok_or_else(|| {
            PamojaError::invalid_state(format!(
                "answer index {} out of range (0..{})",
                index, len
            ))
        })?;
        *slot = text.into();
        Ok(())
    }

    /// Reset every answer to the empty string.
    pub fn clear(&mut self) {
        for answer in &mut self.answers {
            answer.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_all_empty_strings() {
        let store = AnswerStore::new(4);
        assert_eq!(store.len(), 4);
        assert!((0..4).all(|i| store.get(i) == Some("")));
        assert_eq!(store.get(4), None);
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut store = AnswerStore::new(3);
        store.set(0, "first").unwrap();
        store.set(2, "third").unwrap();
        store.set(0, "again").unwrap();

        assert_eq!(store.as_slice(), &["again", "", "third"]);
    }

    #[test]
    fn test_set_does_not_trim() {
        let mut store = AnswerStore::new(1);
        store.set(0, "  spaced out \n").unwrap();
        assert_eq!(store.get(0), Some("  spaced out \n"));
    }

    #[test]
    fn test_set_out_of_range_fails() {
        let mut store = AnswerStore::new(2);
        let result = store.set(2, "nope");
        assert!(matches!(result, Err(PamojaError::InvalidState { .. })));
    }

    #[test]
    fn test_clear_keeps_length() {
        let mut store = AnswerStore::new(2);
        store.set(1, "something").unwrap();
        store.clear();
        assert_eq!(store.as_slice(), &["", ""]);
    }
}
