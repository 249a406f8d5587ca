#![forbid(unsafe_code)]

pub mod error;
pub mod question_bank;
pub mod quiz;

pub use error::{QuestionBankError, QuizError};
pub use question_bank::QuestionBank;

pub use quiz::{
    FlashcardFilter, QuizOutcome, QuizProgress, QuizService, QuizSession, QuizStateStore,
    ReviewFilter, Score,
};
