use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::category::CategoryFilter;
use super::locale::Locale;

//
// ─── STUDY MODE ────────────────────────────────────────────────────────────────
//

/// How a quiz or browsing session draws from the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudyMode {
    /// A small fixed-size random practice sample from one category.
    Trial,
    /// Every matching question, in source order (used for paged browsing).
    All,
    /// The 20-question official-test simulation, balanced across categories.
    Test,
}

impl StudyMode {
    /// Short key used in routes and storage keys.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            StudyMode::Trial => "trial",
            StudyMode::All => "all",
            StudyMode::Test => "test",
        }
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown study mode: {0}")]
pub struct ParseStudyModeError(pub String);

impl FromStr for StudyMode {
    type Err = ParseStudyModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trial" => Ok(StudyMode::Trial),
            "all" => Ok(StudyMode::All),
            "test" => Ok(StudyMode::Test),
            other => Err(ParseStudyModeError(other.to_owned())),
        }
    }
}

//
// ─── SESSION KEY ───────────────────────────────────────────────────────────────
//

/// Identity of one quiz session: locale + mode + category filter.
///
/// Renders to the `"locale:mode:category"` storage prefix so in-progress
/// answers for different sessions never clobber each other. Starred and
/// missed sets deliberately live under fixed global keys instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    locale: Locale,
    mode: StudyMode,
    filter: CategoryFilter,
}

impl SessionKey {
    #[must_use]
    pub fn new(locale: Locale, mode: StudyMode, filter: CategoryFilter) -> Self {
        Self {
            locale,
            mode,
            filter,
        }
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    #[must_use]
    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// The session's storage key prefix.
    #[must_use]
    pub fn prefix(&self) -> String {
        format!("{}:{}:{}", self.locale, self.mode, self.filter)
    }

    /// Storage key for this session's answer mapping.
    #[must_use]
    pub fn answers_key(&self) -> String {
        format!("{}:answers", self.prefix())
    }
}
