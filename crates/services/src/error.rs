//! Shared error types for the services crate.

use thiserror::Error;

use civics_core::model::{Locale, QuestionError, QuestionId};

/// Errors emitted while loading the bundled question data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("malformed question data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("question {id}: unknown category label {label:?} for locale {locale}")]
    UnknownCategory {
        id: String,
        label: String,
        locale: Locale,
    },

    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Errors emitted by quiz orchestration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for quiz")]
    Empty,

    #[error(transparent)]
    Bank(#[from] QuestionBankError),
}
