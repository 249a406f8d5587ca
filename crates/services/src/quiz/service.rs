use rand::Rng;
use std::sync::Arc;

use civics_core::model::{
    CategoryFilter, Locale, Question, QuestionId, SessionKey, StudyMode,
};
use civics_core::select;
use storage::repository::{KeyValueRepository, Storage};

use crate::error::QuizError;
use crate::question_bank::QuestionBank;
use super::progress::QuizProgress;
use super::scoring::{self, FlashcardFilter, ReviewFilter, Score};
use super::store::QuizStateStore;

/// Browsing page size bounds, matching the flashcard browser's clamps.
pub const DEFAULT_PAGE_SIZE: usize = 25;
pub const MAX_PAGE_SIZE: usize = 50;

//
// ─── QUIZ OUTCOME ──────────────────────────────────────────────────────────────
//

/// Result of submitting a quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: Score,
    /// Pass/fail against the official 12-of-20 bar; only meaningful in test mode.
    pub passed: bool,
    /// Ids recorded into the missed set, in question order.
    pub missed: Vec<QuestionId>,
}

/// One page of a browsing view, with page math already done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPageView {
    pub items: Vec<Question>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

//
// ─── QUIZ SERVICE ──────────────────────────────────────────────────────────────
//

/// Composition root for quiz and flashcard flows: owns the question bank and
/// the storage port, and builds per-page sessions from them.
pub struct QuizService {
    bank: QuestionBank,
    kv: Arc<dyn KeyValueRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(bank: QuestionBank, storage: &Storage) -> Self {
        Self {
            bank,
            kv: storage.kv.clone(),
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Start a quiz session using the thread RNG.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` when the selection comes back empty (locale
    /// not loaded, or no questions match the filter).
    pub async fn start(
        &self,
        locale: Locale,
        filter: CategoryFilter,
        mode: StudyMode,
    ) -> Result<QuizSession, QuizError> {
        self.start_with_rng(locale, filter, mode, &mut rand::rng())
            .await
    }

    /// Start a quiz session with a caller-supplied randomness source, so
    /// tests can pin the selection.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` when the selection comes back empty.
    pub async fn start_with_rng<R: Rng + ?Sized>(
        &self,
        locale: Locale,
        filter: CategoryFilter,
        mode: StudyMode,
        rng: &mut R,
    ) -> Result<QuizSession, QuizError> {
        let questions = select::select(self.bank.questions(locale), filter, mode, rng);
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        let key = SessionKey::new(locale, mode, filter);
        let store = QuizStateStore::hydrate(self.kv.clone(), key).await;
        Ok(QuizSession {
            key,
            questions,
            store,
        })
    }

    /// Deterministic paged browsing over the filtered bank (1-based pages).
    ///
    /// Page and page size are clamped to sane bounds before slicing, so any
    /// caller input yields a well-formed view.
    #[must_use]
    pub fn browse(
        &self,
        locale: Locale,
        filter: CategoryFilter,
        page: usize,
        page_size: usize,
    ) -> QuestionPageView {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let page = page.max(1);
        let paged = select::select_paged(
            self.bank.questions(locale),
            filter,
            (page - 1).saturating_mul(page_size),
            page_size,
        );
        let total_pages = paged.total.div_ceil(page_size).max(1);
        QuestionPageView {
            items: paged.items,
            total: paged.total,
            page,
            page_size,
            total_pages,
        }
    }
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// A running quiz: the selected question sequence plus the hydrated state
/// store for its session key.
pub struct QuizSession {
    key: SessionKey,
    questions: Vec<Question>,
    store: QuizStateStore,
}

impl QuizSession {
    #[must_use]
    pub fn key(&self) -> SessionKey {
        self.key
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn store(&self) -> &QuizStateStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut QuizStateStore {
        &mut self.store
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.questions.len();
        let answered = self
            .questions
            .iter()
            .filter(|q| self.store.answer(q.id()).is_some())
            .count();
        QuizProgress {
            total,
            answered,
            remaining: total - answered,
            is_complete: answered == total,
        }
    }

    #[must_use]
    pub fn score(&self) -> Score {
        scoring::score(&self.questions, &self.store)
    }

    /// Submit the attempt: score it and replace the missed set with the ids
    /// answered wrongly or not at all.
    pub async fn submit(&mut self) -> QuizOutcome {
        let score = self.score();
        let missed = scoring::missed_ids(&self.questions, &self.store);
        self.store.record_missed(missed.iter().cloned()).await;
        QuizOutcome {
            score,
            passed: score.is_passing(),
            missed,
        }
    }

    /// Clear the answer mapping for a fresh attempt on the same questions.
    pub async fn restart(&mut self) {
        self.store.reset_answers().await;
    }

    /// Post-submit review list.
    #[must_use]
    pub fn review(&self, filter: ReviewFilter) -> Vec<&Question> {
        scoring::review_questions(&self.questions, filter, &self.store)
    }

    /// Flashcard view over this session's questions.
    #[must_use]
    pub fn flashcards(&self, filter: FlashcardFilter) -> Vec<&Question> {
        scoring::flashcard_questions(&self.questions, filter, &self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civics_core::model::Category;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn record(category: Category, n: usize) -> String {
        format!(
            r#"{{"id":"{key}-{n}","category":"{label}","text":"Question {n}?","options":["a","b","c"],"answer":{answer}}}"#,
            key = category.key(),
            label = category.label(Locale::En),
            answer = n % 3,
        )
    }

    fn build_bank(gov: usize, history: usize, civics: usize) -> QuestionBank {
        let mut records = Vec::new();
        records.extend((0..gov).map(|n| record(Category::Gov, n)));
        records.extend((0..history).map(|n| record(Category::History, n)));
        records.extend((0..civics).map(|n| record(Category::Civics, n)));
        let json = format!("[{}]", records.join(","));

        let mut bank = QuestionBank::new();
        bank.load_locale(Locale::En, &json).unwrap();
        bank
    }

    fn build_service() -> QuizService {
        QuizService::new(build_bank(15, 15, 10), &Storage::in_memory())
    }

    #[tokio::test]
    async fn trial_session_has_ten_questions() {
        let service = build_service();
        let mut rng = StdRng::seed_from_u64(3);
        let session = service
            .start_with_rng(
                Locale::En,
                CategoryFilter::Only(Category::Gov),
                StudyMode::Trial,
                &mut rng,
            )
            .await
            .unwrap();

        assert_eq!(session.questions().len(), 10);
        assert!(
            session
                .questions()
                .iter()
                .all(|q| q.category() == Category::Gov)
        );
        assert_eq!(session.key().answers_key(), "en:trial:gov:answers");
    }

    #[tokio::test]
    async fn unloaded_locale_yields_empty_error() {
        let service = build_service();
        let err = service
            .start(Locale::Zh, CategoryFilter::All, StudyMode::Trial)
            .await
            .err();
        assert!(matches!(err, Some(QuizError::Empty)));
    }

    #[tokio::test]
    async fn submit_scores_and_records_missed() {
        let service = build_service();
        let mut rng = StdRng::seed_from_u64(11);
        let mut session = service
            .start_with_rng(Locale::En, CategoryFilter::All, StudyMode::Test, &mut rng)
            .await
            .unwrap();
        assert_eq!(session.questions().len(), 20);

        // answer the first 14 correctly, leave the rest wrong/blank
        let answers: Vec<(QuestionId, String)> = session
            .questions()
            .iter()
            .take(14)
            .map(|q| (q.id().clone(), q.answer().to_string()))
            .collect();
        for (id, value) in answers {
            session.store_mut().set_answer(id, value).await;
        }

        let outcome = session.submit().await;
        assert_eq!(outcome.score.correct, 14);
        assert_eq!(outcome.score.total, 20);
        assert!(outcome.passed);
        assert_eq!(outcome.missed.len(), 6);
        assert_eq!(session.store().missed().len(), 6);
    }

    #[tokio::test]
    async fn submit_replaces_previous_missed_set() {
        let service = build_service();
        let mut rng = StdRng::seed_from_u64(11);
        let mut session = service
            .start_with_rng(Locale::En, CategoryFilter::All, StudyMode::Test, &mut rng)
            .await
            .unwrap();

        session.submit().await;
        assert_eq!(session.store().missed().len(), 20);

        let answers: Vec<(QuestionId, String)> = session
            .questions()
            .iter()
            .map(|q| (q.id().clone(), q.answer().to_string()))
            .collect();
        for (id, value) in answers {
            session.store_mut().set_answer(id, value).await;
        }

        let outcome = session.submit().await;
        assert_eq!(outcome.score.correct, 20);
        assert!(session.store().missed().is_empty());
        assert!(outcome.missed.is_empty());
    }

    #[tokio::test]
    async fn restart_clears_answers_but_not_stars() {
        let service = build_service();
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = service
            .start_with_rng(
                Locale::En,
                CategoryFilter::Only(Category::History),
                StudyMode::Trial,
                &mut rng,
            )
            .await
            .unwrap();

        let first = session.questions()[0].id().clone();
        session.store_mut().set_answer(first.clone(), "1").await;
        session.store_mut().toggle_star(&first).await;

        session.restart().await;
        assert_eq!(session.progress().answered, 0);
        assert!(session.store().is_starred(&first));
    }

    #[tokio::test]
    async fn progress_tracks_answered_count() {
        let service = build_service();
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = service
            .start_with_rng(
                Locale::En,
                CategoryFilter::Only(Category::Civics),
                StudyMode::Trial,
                &mut rng,
            )
            .await
            .unwrap();

        let progress = session.progress();
        assert_eq!(progress.total, 10);
        assert_eq!(progress.remaining, 10);
        assert!(!progress.is_complete);

        let id = session.questions()[3].id().clone();
        session.store_mut().set_answer(id, "0").await;
        assert_eq!(session.progress().answered, 1);
    }

    #[test]
    fn browse_pages_are_stable_and_clamped() {
        let service = build_service();
        let filter = CategoryFilter::Only(Category::Gov);

        let first = service.browse(Locale::En, filter, 1, 4);
        assert_eq!(first.items.len(), 4);
        assert_eq!(first.total, 15);
        assert_eq!(first.total_pages, 4);

        let again = service.browse(Locale::En, filter, 1, 4);
        assert_eq!(first, again);

        let last = service.browse(Locale::En, filter, 4, 4);
        assert_eq!(last.items.len(), 3);

        // page 0 and oversized page sizes get clamped
        let clamped = service.browse(Locale::En, filter, 0, 500);
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.page_size, MAX_PAGE_SIZE);
        assert_eq!(clamped.items.len(), 15);
    }

    #[test]
    fn browse_survives_extreme_page_numbers() {
        let service = build_service();
        let view = service.browse(Locale::En, CategoryFilter::All, usize::MAX, 50);
        assert!(view.items.is_empty());
        assert_eq!(view.total, 40);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn browse_empty_locale_has_one_empty_page() {
        let service = build_service();
        let view = service.browse(Locale::Zh, CategoryFilter::All, 1, DEFAULT_PAGE_SIZE);
        assert!(view.items.is_empty());
        assert_eq!(view.total, 0);
        assert_eq!(view.total_pages, 1);
    }

    #[tokio::test]
    async fn flashcard_session_filters_by_store_sets() {
        let service = build_service();
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = service
            .start_with_rng(Locale::En, CategoryFilter::All, StudyMode::All, &mut rng)
            .await
            .unwrap();
        assert_eq!(session.questions().len(), 40);

        let starred_id = session.questions()[0].id().clone();
        let missed_id = session.questions()[1].id().clone();
        session.store_mut().toggle_star(&starred_id).await;
        session.store_mut().record_missed([missed_id]).await;

        assert_eq!(session.flashcards(FlashcardFilter::All).len(), 40);
        let starred = session.flashcards(FlashcardFilter::Starred);
        assert_eq!(starred.len(), 1);
        assert_eq!(starred[0].id(), &starred_id);
        assert_eq!(session.flashcards(FlashcardFilter::Missed).len(), 1);
    }

    #[tokio::test]
    async fn review_wrong_after_submit() {
        let service = build_service();
        let mut rng = StdRng::seed_from_u64(13);
        let mut session = service
            .start_with_rng(
                Locale::En,
                CategoryFilter::Only(Category::Gov),
                StudyMode::Trial,
                &mut rng,
            )
            .await
            .unwrap();

        let (correct_id, correct_value) = {
            let q = &session.questions()[0];
            (q.id().clone(), q.answer().to_string())
        };
        session.store_mut().set_answer(correct_id, correct_value).await;
        session.submit().await;

        assert_eq!(session.review(ReviewFilter::All).len(), 10);
        assert_eq!(session.review(ReviewFilter::Wrong).len(), 9);
    }
}
