use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a Question within one locale's bank.
///
/// Ids come from the bundled question data as opaque strings (e.g. `"gov-12"`),
/// so there is nothing numeric to parse or allocate.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns the underlying `String`
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for QuestionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id_display() {
        let id = QuestionId::new("gov-12");
        assert_eq!(id.to_string(), "gov-12");
    }

    #[test]
    fn test_question_id_from_str_slice() {
        let id: QuestionId = "history-3".into();
        assert_eq!(id.as_str(), "history-3");
    }

    #[test]
    fn test_question_id_ordering_is_lexicographic() {
        let a = QuestionId::new("a");
        let b = QuestionId::new("b");
        assert!(a < b);
    }
}
