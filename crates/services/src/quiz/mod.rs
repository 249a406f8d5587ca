mod progress;
mod scoring;
mod service;
mod store;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use progress::QuizProgress;
pub use scoring::{FlashcardFilter, PASS_THRESHOLD, ReviewFilter, Score};
pub use service::{QuestionPageView, QuizOutcome, QuizService, QuizSession};
pub use store::{MISSED_KEY, QuizStateStore, STARRED_KEY};
