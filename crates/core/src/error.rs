use thiserror::Error;

use crate::model::{ParseCategoryError, ParseLocaleError, ParseStudyModeError, QuestionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Locale(#[from] ParseLocaleError),
    #[error(transparent)]
    Category(#[from] ParseCategoryError),
    #[error(transparent)]
    StudyMode(#[from] ParseStudyModeError),
}
