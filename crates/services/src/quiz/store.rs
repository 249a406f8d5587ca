use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use civics_core::model::{QuestionId, SessionKey};
use storage::repository::KeyValueRepository;

/// Global storage key for the starred-question id list.
pub const STARRED_KEY: &str = "starredIds";

/// Global storage key for the ids missed on the most recent submit.
pub const MISSED_KEY: &str = "lastIncorrectIds";

//
// ─── QUIZ STATE STORE ──────────────────────────────────────────────────────────
//

/// Client-side quiz state: the in-progress answer mapping for one session,
/// plus the starred and missed id sets shared across all sessions.
///
/// Owned by the composition root and mutated synchronously from UI events.
/// Every mutation writes through to the injected key-value repository.
/// Persistence is best-effort by policy: a failed write is logged at `warn`
/// and the in-memory state stays authoritative, so a full store never blocks
/// the quiz. Answers live under the session's own key; starred and missed
/// sets live under fixed global keys and survive across sessions. With two
/// concurrent writers on the same keys the last write wins; the store makes
/// no attempt at coordination.
pub struct QuizStateStore {
    kv: Arc<dyn KeyValueRepository>,
    answers_key: String,
    answers: HashMap<QuestionId, String>,
    starred: HashSet<QuestionId>,
    missed: HashSet<QuestionId>,
}

impl QuizStateStore {
    /// Build a store for `session`, rehydrating persisted state.
    ///
    /// Missing keys start empty; malformed persisted values are logged and
    /// discarded, falling back to empty state rather than erroring.
    pub async fn hydrate(kv: Arc<dyn KeyValueRepository>, session: SessionKey) -> Self {
        let answers_key = session.answers_key();
        let answers = read_map(kv.as_ref(), &answers_key).await;
        let starred = read_set(kv.as_ref(), STARRED_KEY).await;
        let missed = read_set(kv.as_ref(), MISSED_KEY).await;
        Self {
            kv,
            answers_key,
            answers,
            starred,
            missed,
        }
    }

    //
    // ─── ANSWERS ───────────────────────────────────────────────────────────────
    //

    /// Current answer for a question (a string-encoded option index), or
    /// `None` if unanswered.
    #[must_use]
    pub fn answer(&self, id: &QuestionId) -> Option<&str> {
        self.answers.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn answers(&self) -> &HashMap<QuestionId, String> {
        &self.answers
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Records or overwrites the answer for a question.
    ///
    /// Whether overwriting is allowed at all is UI policy (test mode permits
    /// changes, practice mode locks after the first pick); the store always
    /// takes the last write.
    pub async fn set_answer(&mut self, id: QuestionId, value: impl Into<String>) {
        self.answers.insert(id, value.into());
        self.persist_answers().await;
    }

    /// Replaces the entire answer mapping (bulk load).
    pub async fn replace_all_answers(&mut self, map: HashMap<QuestionId, String>) {
        self.answers = map;
        self.persist_answers().await;
    }

    /// Clears the answer mapping for a fresh attempt.
    pub async fn reset_answers(&mut self) {
        self.answers.clear();
        self.persist_answers().await;
    }

    //
    // ─── STARRED ───────────────────────────────────────────────────────────────
    //

    /// Flips a question's membership in the starred set and returns the new
    /// membership state.
    pub async fn toggle_star(&mut self, id: &QuestionId) -> bool {
        let starred = if self.starred.remove(id) {
            false
        } else {
            self.starred.insert(id.clone());
            true
        };
        self.persist_set(STARRED_KEY, &self.starred).await;
        starred
    }

    #[must_use]
    pub fn is_starred(&self, id: &QuestionId) -> bool {
        self.starred.contains(id)
    }

    #[must_use]
    pub fn starred(&self) -> &HashSet<QuestionId> {
        &self.starred
    }

    //
    // ─── MISSED ────────────────────────────────────────────────────────────────
    //

    /// Replaces the missed set with exactly the given ids (never a union).
    pub async fn record_missed(&mut self, ids: impl IntoIterator<Item = QuestionId>) {
        self.missed = ids.into_iter().collect();
        self.persist_set(MISSED_KEY, &self.missed).await;
    }

    #[must_use]
    pub fn was_missed(&self, id: &QuestionId) -> bool {
        self.missed.contains(id)
    }

    #[must_use]
    pub fn missed(&self) -> &HashSet<QuestionId> {
        &self.missed
    }

    //
    // ─── PERSISTENCE ───────────────────────────────────────────────────────────
    //

    async fn persist_answers(&self) {
        // Sorted map for a stable encoding.
        let encoded: BTreeMap<&str, &str> = self
            .answers
            .iter()
            .map(|(id, value)| (id.as_str(), value.as_str()))
            .collect();
        match serde_json::to_string(&encoded) {
            Ok(json) => self.write_best_effort(&self.answers_key, &json).await,
            Err(err) => {
                tracing::warn!(key = self.answers_key.as_str(), error = %err, "failed to encode answers");
            }
        }
    }

    async fn persist_set(&self, key: &str, ids: &HashSet<QuestionId>) {
        let mut encoded: Vec<&str> = ids.iter().map(QuestionId::as_str).collect();
        encoded.sort_unstable();
        match serde_json::to_string(&encoded) {
            Ok(json) => self.write_best_effort(key, &json).await,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to encode id set");
            }
        }
    }

    async fn write_best_effort(&self, key: &str, value: &str) {
        if let Err(err) = self.kv.put(key, value).await {
            tracing::warn!(key, error = %err, "state write failed; keeping in-memory value");
        }
    }
}

async fn read_map(kv: &dyn KeyValueRepository, key: &str) -> HashMap<QuestionId, String> {
    let Some(raw) = read_raw(kv, key).await else {
        return HashMap::new();
    };
    match serde_json::from_str::<HashMap<String, String>>(&raw) {
        Ok(map) => map
            .into_iter()
            .map(|(id, value)| (QuestionId::from(id), value))
            .collect(),
        Err(err) => {
            tracing::warn!(key, error = %err, "malformed persisted answers; starting empty");
            HashMap::new()
        }
    }
}

async fn read_set(kv: &dyn KeyValueRepository, key: &str) -> HashSet<QuestionId> {
    let Some(raw) = read_raw(kv, key).await else {
        return HashSet::new();
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(ids) => ids.into_iter().map(QuestionId::from).collect(),
        Err(err) => {
            tracing::warn!(key, error = %err, "malformed persisted id set; starting empty");
            HashSet::new()
        }
    }
}

async fn read_raw(kv: &dyn KeyValueRepository, key: &str) -> Option<String> {
    match kv.get(key).await {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "state read failed; starting empty");
            None
        }
    }
}
