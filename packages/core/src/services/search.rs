//! Free-text question search

use crate::models::Question;

/// Case-insensitive substring search over question text.
///
/// An empty `term` matches nothing: an empty search is a deliberate
/// zero-result query, not a request for the full listing. Matches keep the
/// order of `all`.
pub fn search_questions(all: Vec<Question>, term: &str) -> Vec<Question> {
    if term.is_empty() {
        return Vec::new();
    }

    let needle = term.to_lowercase();
    all.into_iter()
        .filter(|question| question.text_contains_lowercase(&needle))
        .collect()
}
