use thiserror::Error;

use super::category::Category;
use super::ids::QuestionId;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Raw question data as it arrives from the bundled bank, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub category: Category,
    pub text: String,
    pub options: Vec<String>,
    pub answer: usize,
}

impl QuestionDraft {
    /// Validates the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt is blank, fewer than two
    /// options are present, or `answer` does not index into `options`.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText { id: self.id });
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                id: self.id,
                found: self.options.len(),
            });
        }
        if self.answer >= self.options.len() {
            return Err(QuestionError::AnswerOutOfRange {
                id: self.id,
                answer: self.answer,
                options: self.options.len(),
            });
        }
        Ok(Question {
            id: self.id,
            category: self.category,
            text: self.text,
            options: self.options,
            answer: self.answer,
        })
    }
}

/// A validated multiple-choice question. Immutable once constructed:
/// `answer` always indexes into `options`, and `options` has at least two entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    category: Category,
    text: String,
    options: Vec<String>,
    answer: usize,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Zero-based index of the correct option.
    #[must_use]
    pub fn answer(&self) -> usize {
        self.answer
    }

    /// The correct option's text.
    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.answer]
    }

    /// Returns true when `selected` is the zero-based index of the correct option.
    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.answer
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question {id} has an empty prompt")]
    EmptyText { id: QuestionId },

    #[error("question {id} has {found} options, need at least 2")]
    TooFewOptions { id: QuestionId, found: usize },

    #[error("question {id} answer index {answer} out of range for {options} options")]
    AnswerOutOfRange {
        id: QuestionId,
        answer: usize,
        options: usize,
    },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
