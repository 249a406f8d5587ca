//! Question selection: random practice samples, full listings, the balanced
//! 20-question test simulation, and deterministic paging.
//!
//! Every sampling entry point takes the RNG as an argument so callers (and
//! tests) control the randomness source; production callers pass `rand::rng()`.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::model::{Category, CategoryFilter, Question, QuestionId, StudyMode};

/// Sample size for `StudyMode::Trial`.
pub const TRIAL_SAMPLE_SIZE: usize = 10;

/// Total questions in a `StudyMode::Test` simulation.
pub const TEST_TARGET_TOTAL: usize = 20;

/// Cycle order for distributing balanced-test remainder slots.
///
/// With a remainder of 2 this always hands the extra picks to gov and history
/// and never to civics. That is an artifact of the fixed cycle, kept for
/// compatibility with the shipped behavior rather than a fairness policy.
pub const TEST_CYCLE: [Category; 3] = Category::ALL;

/// One page of an unshuffled, filtered listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Question>,
    /// Count of all questions passing the filter, invariant across offsets.
    pub total: usize,
}

impl Page {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fisher-Yates shuffle, then take a prefix: a uniform sample without
/// replacement of `min(count, pool.len())` questions.
fn sample<R: Rng + ?Sized>(mut pool: Vec<Question>, count: usize, rng: &mut R) -> Vec<Question> {
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

fn filter_questions(all: &[Question], filter: CategoryFilter) -> Vec<Question> {
    all.iter()
        .filter(|q| filter.matches(q.category()))
        .cloned()
        .collect()
}

/// Selects the question sequence for a study session.
///
/// - `Trial`: uniform random sample of `min(10, filtered)` from the filtered set.
/// - `All`: the filtered set unchanged, source order preserved (stable paging).
/// - `Test`: balanced 20-question simulation over the whole bank; the category
///   filter is ignored since the official test always spans all three.
///
/// Never errors: an under-supplied bank simply yields fewer questions.
pub fn select<R: Rng + ?Sized>(
    all: &[Question],
    filter: CategoryFilter,
    mode: StudyMode,
    rng: &mut R,
) -> Vec<Question> {
    match mode {
        StudyMode::Test => balanced_test(all, rng),
        StudyMode::All => filter_questions(all, filter),
        StudyMode::Trial => sample(filter_questions(all, filter), TRIAL_SAMPLE_SIZE, rng),
    }
}

/// Builds the balanced official-test simulation.
///
/// Draws `floor(20/3) = 6` from each category, then fills the 2 remainder
/// slots one at a time cycling through [`TEST_CYCLE`], each time sampling from
/// that category's still-unpicked pool so no id appears twice. Categories
/// short on questions silently contribute fewer. The result is returned in
/// random order, not grouped by category.
pub fn balanced_test<R: Rng + ?Sized>(all: &[Question], rng: &mut R) -> Vec<Question> {
    let base = TEST_TARGET_TOTAL / TEST_CYCLE.len();
    let remainder = TEST_TARGET_TOTAL - base * TEST_CYCLE.len();

    let mut picked: Vec<Question> = Vec::with_capacity(TEST_TARGET_TOTAL);
    for category in TEST_CYCLE {
        let pool = filter_questions(all, CategoryFilter::Only(category));
        picked.extend(sample(pool, base, rng));
    }

    let mut picked_ids: HashSet<QuestionId> = picked.iter().map(|q| q.id().clone()).collect();
    for slot in 0..remainder {
        let category = TEST_CYCLE[slot % TEST_CYCLE.len()];
        let pool: Vec<Question> = all
            .iter()
            .filter(|q| q.category() == category && !picked_ids.contains(q.id()))
            .cloned()
            .collect();
        for question in sample(pool, 1, rng) {
            picked_ids.insert(question.id().clone());
            picked.push(question);
        }
    }

    picked.shuffle(rng);
    picked
}

/// Deterministic, unshuffled slice of the filtered set: up to `limit` items
/// starting at `offset`, plus the total filtered count for page math.
///
/// Out-of-range offsets yield an empty page; clamping offsets to sane bounds
/// is the caller's responsibility.
#[must_use]
pub fn select_paged(
    all: &[Question],
    filter: CategoryFilter,
    offset: usize,
    limit: usize,
) -> Page {
    let filtered = filter_questions(all, filter);
    let total = filtered.len();
    let start = offset.min(total);
    let end = offset.saturating_add(limit).min(total);
    Page {
        items: filtered[start..end].to_vec(),
        total,
    }
}
