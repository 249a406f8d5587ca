mod category;
mod ids;
mod locale;
mod question;
mod session;

pub use category::{Category, CategoryFilter, ParseCategoryError};
pub use ids::QuestionId;
pub use locale::{Locale, ParseLocaleError};
pub use question::{Question, QuestionDraft, QuestionError};
pub use session::{ParseStudyModeError, SessionKey, StudyMode};
