use civics_core::model::{Question, QuestionId};

use super::store::QuizStateStore;

/// Correct answers needed to pass the simulated official test (12 of 20).
pub const PASS_THRESHOLD: usize = 12;

/// Tally of a quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// Pass/fail against [`PASS_THRESHOLD`]; only meaningful for test mode.
    #[must_use]
    pub fn is_passing(self) -> bool {
        self.correct >= PASS_THRESHOLD
    }
}

/// Post-submit review list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewFilter {
    All,
    Wrong,
    Starred,
}

/// Flashcard deck filter backed by the store's starred/missed sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashcardFilter {
    All,
    Starred,
    Missed,
}

/// True when the stored answer parses as an option index and hits the
/// correct one. Unanswered and unparseable both count as incorrect.
fn answered_correctly(question: &Question, store: &QuizStateStore) -> bool {
    store
        .answer(question.id())
        .and_then(|value| value.parse::<usize>().ok())
        .is_some_and(|selected| question.is_correct(selected))
}

/// Scores the session's questions against the store's answers.
#[must_use]
pub fn score(questions: &[Question], store: &QuizStateStore) -> Score {
    let correct = questions
        .iter()
        .filter(|q| answered_correctly(q, store))
        .count();
    Score {
        correct,
        total: questions.len(),
    }
}

/// Ids answered wrongly or not at all, in question order. This is exactly the
/// set `record_missed` should receive on submit.
#[must_use]
pub fn missed_ids(questions: &[Question], store: &QuizStateStore) -> Vec<QuestionId> {
    questions
        .iter()
        .filter(|q| !answered_correctly(q, store))
        .map(|q| q.id().clone())
        .collect()
}

/// Filters the session's questions for the post-submit review list.
#[must_use]
pub fn review_questions<'a>(
    questions: &'a [Question],
    filter: ReviewFilter,
    store: &QuizStateStore,
) -> Vec<&'a Question> {
    questions
        .iter()
        .filter(|q| match filter {
            ReviewFilter::All => true,
            ReviewFilter::Wrong => !answered_correctly(q, store),
            ReviewFilter::Starred => store.is_starred(q.id()),
        })
        .collect()
}

/// Filters a flashcard deck by the store's starred/missed sets.
#[must_use]
pub fn flashcard_questions<'a>(
    cards: &'a [Question],
    filter: FlashcardFilter,
    store: &QuizStateStore,
) -> Vec<&'a Question> {
    cards
        .iter()
        .filter(|q| match filter {
            FlashcardFilter::All => true,
            FlashcardFilter::Starred => store.is_starred(q.id()),
            FlashcardFilter::Missed => store.was_missed(q.id()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use civics_core::model::{
        Category, CategoryFilter, Locale, QuestionDraft, SessionKey, StudyMode,
    };
    use std::sync::Arc;
    use storage::repository::InMemoryRepository;

    fn build_question(id: &str, answer: usize) -> Question {
        QuestionDraft {
            id: QuestionId::new(id),
            category: Category::Gov,
            text: format!("{id}?"),
            options: vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
            answer,
        }
        .validate()
        .unwrap()
    }

    async fn empty_store() -> QuizStateStore {
        QuizStateStore::hydrate(
            Arc::new(InMemoryRepository::new()),
            SessionKey::new(Locale::En, StudyMode::Trial, CategoryFilter::All),
        )
        .await
    }

    #[tokio::test]
    async fn scores_correct_wrong_and_unanswered() {
        let questions = vec![
            build_question("q1", 1),
            build_question("q2", 0),
            build_question("q3", 2),
        ];
        let mut store = empty_store().await;
        store.set_answer(QuestionId::new("q1"), "1").await; // correct
        store.set_answer(QuestionId::new("q2"), "2").await; // wrong
        // q3 unanswered

        let score = score(&questions, &store);
        assert_eq!(score.correct, 1);
        assert_eq!(score.total, 3);

        let missed = missed_ids(&questions, &store);
        assert_eq!(missed, vec![QuestionId::new("q2"), QuestionId::new("q3")]);
    }

    #[tokio::test]
    async fn garbage_answer_value_counts_as_wrong() {
        let questions = vec![build_question("q1", 0)];
        let mut store = empty_store().await;
        store.set_answer(QuestionId::new("q1"), "not-a-number").await;

        assert_eq!(score(&questions, &store).correct, 0);
    }

    #[test]
    fn pass_threshold_is_twelve() {
        assert!(
            Score {
                correct: 12,
                total: 20
            }
            .is_passing()
        );
        assert!(
            !Score {
                correct: 11,
                total: 20
            }
            .is_passing()
        );
    }

    #[tokio::test]
    async fn review_filter_wrong_and_starred() {
        let questions = vec![build_question("q1", 0), build_question("q2", 0)];
        let mut store = empty_store().await;
        store.set_answer(QuestionId::new("q1"), "0").await;
        store.toggle_star(&QuestionId::new("q1")).await;

        let wrong = review_questions(&questions, ReviewFilter::Wrong, &store);
        assert_eq!(wrong.len(), 1);
        assert_eq!(wrong[0].id().as_str(), "q2");

        let starred = review_questions(&questions, ReviewFilter::Starred, &store);
        assert_eq!(starred.len(), 1);
        assert_eq!(starred[0].id().as_str(), "q1");

        let all = review_questions(&questions, ReviewFilter::All, &store);
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn flashcard_filter_uses_missed_set() {
        let cards = vec![build_question("q1", 0), build_question("q2", 0)];
        let mut store = empty_store().await;
        store.record_missed([QuestionId::new("q2")]).await;

        let missed = flashcard_questions(&cards, FlashcardFilter::Missed, &store);
        assert_eq!(missed.len(), 1);
        assert_eq!(missed[0].id().as_str(), "q2");
    }
}
