//! Loading of the bundled static question data.
//!
//! Each locale ships its questions as JSON, either as a single file or split
//! per category (gov/history/civics). Records carry the localized category
//! label, which is mapped back to the `Category` enum here, and every record
//! passes draft validation before it enters the bank.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use civics_core::model::{Category, Locale, Question, QuestionDraft, QuestionId};

use crate::error::QuestionBankError;

/// On-disk shape of one question record.
#[derive(Debug, Deserialize)]
struct QuestionRecord {
    id: String,
    category: String,
    text: String,
    options: Vec<String>,
    answer: usize,
}

impl QuestionRecord {
    fn into_question(self, locale: Locale) -> Result<Question, QuestionBankError> {
        let category = Category::from_label(locale, &self.category).ok_or_else(|| {
            QuestionBankError::UnknownCategory {
                id: self.id.clone(),
                label: self.category.clone(),
                locale,
            }
        })?;
        let question = QuestionDraft {
            id: QuestionId::new(self.id),
            category,
            text: self.text,
            options: self.options,
            answer: self.answer,
        }
        .validate()?;
        Ok(question)
    }
}

/// In-memory question bank, one read-only list per locale.
#[derive(Default)]
pub struct QuestionBank {
    by_locale: HashMap<Locale, Vec<Question>>,
}

impl QuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a locale's questions from a single JSON array.
    ///
    /// Replaces anything previously loaded for that locale and returns the
    /// number of questions loaded.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError` on malformed JSON, an unknown category
    /// label, a duplicate id, or a record failing question validation.
    pub fn load_locale(
        &mut self,
        locale: Locale,
        json: &str,
    ) -> Result<usize, QuestionBankError> {
        let questions = parse_records(locale, json)?;
        ensure_unique_ids(&questions)?;
        let count = questions.len();
        self.by_locale.insert(locale, questions);
        Ok(count)
    }

    /// Load a locale from the per-category file layout, concatenated in
    /// gov/history/civics order so `All`-mode listings page stably.
    ///
    /// # Errors
    ///
    /// Same conditions as [`QuestionBank::load_locale`]; duplicate ids are
    /// checked across all three parts.
    pub fn load_locale_parts(
        &mut self,
        locale: Locale,
        gov_json: &str,
        history_json: &str,
        civics_json: &str,
    ) -> Result<usize, QuestionBankError> {
        let mut questions = parse_records(locale, gov_json)?;
        questions.extend(parse_records(locale, history_json)?);
        questions.extend(parse_records(locale, civics_json)?);
        ensure_unique_ids(&questions)?;
        let count = questions.len();
        self.by_locale.insert(locale, questions);
        Ok(count)
    }

    /// All questions for a locale, empty for unloaded locales.
    #[must_use]
    pub fn questions(&self, locale: Locale) -> &[Question] {
        self.by_locale.get(&locale).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_loaded(&self, locale: Locale) -> bool {
        self.by_locale.contains_key(&locale)
    }
}

fn parse_records(locale: Locale, json: &str) -> Result<Vec<Question>, QuestionBankError> {
    let records: Vec<QuestionRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .map(|record| record.into_question(locale))
        .collect()
}

fn ensure_unique_ids(questions: &[Question]) -> Result<(), QuestionBankError> {
    let mut seen = HashSet::new();
    for question in questions {
        if !seen.insert(question.id()) {
            return Err(QuestionBankError::DuplicateId(question.id().clone()));
        }
    }
    Ok(())
}
