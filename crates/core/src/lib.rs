#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod select;

pub use error::Error;
pub use model::{
    Category, CategoryFilter, Locale, Question, QuestionDraft, QuestionError, QuestionId,
    SessionKey, StudyMode,
};
pub use select::{Page, select, select_paged};
