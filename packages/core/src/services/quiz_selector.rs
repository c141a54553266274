//! Quiz Selector
//!
//! Picks the next quiz question uniformly at random among the questions the
//! caller hasn't been shown yet. There is no session state: the caller sends
//! the full set of previously asked ids with every request, and each call
//! either yields a question (still selecting) or `None` (exhausted).
//!
//! The random source is injected so tests and reproducible deployments can
//! run from a fixed seed:
//!
//! ```
//! use std::collections::HashSet;
//! use trivia_core::models::{NewQuestion, QuizCategory};
//! use trivia_core::services::QuizSelector;
//!
//! let selector = QuizSelector::seeded(42);
//! let bank = vec![NewQuestion::new("Q", "A", 1, 1).into_question(12)];
//!
//! let next = selector.select(bank, QuizCategory::Only(1), &HashSet::from([10, 11]));
//! assert_eq!(next.map(|q| q.id), Some(12));
//! ```

use crate::models::{Question, QuestionId, QuizCategory};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Choose one eligible question uniformly at random.
///
/// Eligible means: id not in `excluded` and category admitted by `category`.
/// Returns `None` when nothing is eligible.
pub fn choose_question<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    category: QuizCategory,
    excluded: &HashSet<QuestionId>,
    rng: &mut R,
) -> Option<Question> {
    let mut eligible: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !excluded.contains(&q.id) && category.admits(q.category))
        .collect();

    if eligible.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..eligible.len());
    Some(eligible.swap_remove(index))
}

/// Shareable quiz selector owning its random generator.
///
/// The generator is behind a mutex held only for the duration of one draw.
pub struct QuizSelector<R = StdRng> {
    rng: Mutex<R>,
}

impl QuizSelector<StdRng> {
    /// Selector seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Selector with a reproducible draw sequence
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuizSelector<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// See [`choose_question`]
    pub fn select(
        &self,
        candidates: Vec<Question>,
        category: QuizCategory,
        excluded: &HashSet<QuestionId>,
    ) -> Option<Question> {
        // A panic mid-draw cannot leave the generator in an invalid state
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        choose_question(candidates, category, excluded, &mut *rng)
    }
}
