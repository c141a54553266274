//! Unit tests for TriviaService boundary policies
//!
//! Runs against in-memory store doubles so every empty/failure branch can be
//! exercised without a database. End-to-end behaviour over libsql lives in
//! `tests/trivia_service_test.rs`.

use super::*;
use crate::db::DatabaseError;
use crate::models::{Category, NewQuestion};
use async_trait::async_trait;
use std::sync::Mutex;

/// Vec-backed store. With `ignore_quiz_filters` set, quiz candidates are the
/// whole bank, as a store without predicate push-down would return.
#[derive(Default)]
struct InMemoryStore {
    questions: Mutex<Vec<Question>>,
    categories: Mutex<Vec<Category>>,
    ignore_quiz_filters: bool,
}

impl InMemoryStore {
    fn with_categories(names: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut categories = store.categories.lock().unwrap();
            for (i, name) in names.iter().enumerate() {
                categories.push(Category {
                    id: i as i64 + 1,
                    kind: name.to_string(),
                });
            }
        }
        store
    }

    fn push(&self, id: QuestionId, text: &str, category: CategoryId) {
        self.questions
            .lock()
            .unwrap()
            .push(NewQuestion::new(text, "answer", category, 1).into_question(id));
    }
}

#[async_trait]
impl TriviaStore for InMemoryStore {
    async fn list_all_questions(&self) -> Result<Vec<Question>, DatabaseError> {
        Ok(self.questions.lock().unwrap().clone())
    }

    async fn list_questions_by_category(
        &self,
        category: CategoryId,
    ) -> Result<Vec<Question>, DatabaseError> {
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.category == category)
            .cloned()
            .collect())
    }

    async fn list_quiz_candidates(
        &self,
        category: QuizCategory,
        excluded: &HashSet<QuestionId>,
    ) -> Result<Vec<Question>, DatabaseError> {
        let all = self.questions.lock().unwrap().clone();
        if self.ignore_quiz_filters {
            return Ok(all);
        }
        Ok(all
            .into_iter()
            .filter(|q| !excluded.contains(&q.id) && category.admits(q.category))
            .collect())
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<QuestionId, DatabaseError> {
        let mut questions = self.questions.lock().unwrap();
        let id = questions.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        questions.push(question.into_question(id));
        Ok(id)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<bool, DatabaseError> {
        let mut questions = self.questions.lock().unwrap();
        let before = questions.len();
        questions.retain(|q| q.id != id);
        Ok(questions.len() != before)
    }

    async fn list_all_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, DatabaseError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn insert_category(&self, kind: &str) -> Result<CategoryId, DatabaseError> {
        let mut categories = self.categories.lock().unwrap();
        let id = categories.len() as i64 + 1;
        categories.push(Category {
            id,
            kind: kind.to_string(),
        });
        Ok(id)
    }
}

/// Store whose writes always fail
struct FailingStore;

#[async_trait]
impl TriviaStore for FailingStore {
    async fn list_all_questions(&self) -> Result<Vec<Question>, DatabaseError> {
        Err(DatabaseError::sql_execution("connection lost"))
    }

    async fn list_questions_by_category(
        &self,
        _category: CategoryId,
    ) -> Result<Vec<Question>, DatabaseError> {
        Err(DatabaseError::sql_execution("connection lost"))
    }

    async fn list_quiz_candidates(
        &self,
        _category: QuizCategory,
        _excluded: &HashSet<QuestionId>,
    ) -> Result<Vec<Question>, DatabaseError> {
        Err(DatabaseError::sql_execution("connection lost"))
    }

    async fn insert_question(&self, _question: NewQuestion) -> Result<QuestionId, DatabaseError> {
        Err(DatabaseError::sql_execution("constraint violation"))
    }

    async fn delete_question(&self, _id: QuestionId) -> Result<bool, DatabaseError> {
        Err(DatabaseError::sql_execution("connection lost"))
    }

    async fn list_all_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        Ok(Vec::new())
    }

    async fn get_category(&self, _id: CategoryId) -> Result<Option<Category>, DatabaseError> {
        Ok(None)
    }

    async fn insert_category(&self, _kind: &str) -> Result<CategoryId, DatabaseError> {
        Err(DatabaseError::sql_execution("connection lost"))
    }
}

fn service(store: InMemoryStore) -> TriviaService {
    TriviaService::with_seed(Arc::new(store), 17)
}

#[tokio::test]
async fn test_list_categories_empty_is_not_found() {
    let service = service(InMemoryStore::default());
    let err = service.list_categories().await.unwrap_err();
    assert!(matches!(err, TriviaError::NotFound(_)));
}

#[tokio::test]
async fn test_list_categories_maps_id_to_name() {
    let service = service(InMemoryStore::with_categories(&["Science", "Art"]));
    let categories = service.list_categories().await.unwrap();
    assert_eq!(categories.get(&1).map(String::as_str), Some("Science"));
    assert_eq!(categories.get(&2).map(String::as_str), Some("Art"));
}

#[tokio::test]
async fn test_list_questions_pages_and_totals() {
    let store = InMemoryStore::with_categories(&["Science", "Art"]);
    for id in 1..=12 {
        store.push(id, &format!("Question {id}"), if id % 2 == 0 { 2 } else { 1 });
    }
    let service = service(store);

    let first = service.list_questions(1).await.unwrap();
    assert_eq!(first.questions.len(), 10);
    assert_eq!(first.total_questions, 12);
    assert_eq!(first.categories.len(), 2);

    let second = service.list_questions(2).await.unwrap();
    assert_eq!(
        second.questions.iter().map(|q| q.id).collect::<Vec<_>>(),
        vec![11, 12]
    );
    assert_eq!(second.total_questions, 12);

    let err = service.list_questions(3).await.unwrap_err();
    assert!(matches!(err, TriviaError::NotFound(_)));
}

#[tokio::test]
async fn test_custom_page_size() {
    let store = InMemoryStore::with_categories(&["Science"]);
    for id in 1..=5 {
        store.push(id, "Q", 1);
    }
    let service = service(store).with_page_size(2);

    assert_eq!(service.page_size(), 2);
    let third = service.list_questions(3).await.unwrap();
    assert_eq!(third.questions.len(), 1);
    assert_eq!(third.total_questions, 5);
}

#[tokio::test]
async fn test_zero_page_size_is_ignored() {
    let service = service(InMemoryStore::default()).with_page_size(0);
    assert_eq!(service.page_size(), QUESTIONS_PER_PAGE);
}

#[tokio::test]
async fn test_delete_missing_question_is_not_found() {
    let store = InMemoryStore::with_categories(&["Science"]);
    store.push(1, "Q", 1);
    let service = service(store);

    assert_eq!(service.delete_question(1).await.unwrap(), 1);
    let err = service.delete_question(1).await.unwrap_err();
    assert!(matches!(err, TriviaError::NotFound(_)));
}

#[tokio::test]
async fn test_create_question_validates_before_insert() {
    let service = service(InMemoryStore::default());

    let err = service
        .create_question(NewQuestion::new("", "answer", 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, TriviaError::InvalidRequest(_)));
    assert!(service.store().list_all_questions().await.unwrap().is_empty());

    let id = service
        .create_question(NewQuestion::new("Q", "A", 1, 1))
        .await
        .unwrap();
    assert_eq!(id, 1);
}

#[tokio::test]
async fn test_store_failures_surface_as_persistence_errors() {
    let service = TriviaService::with_seed(Arc::new(FailingStore), 1);

    let err = service
        .create_question(NewQuestion::new("Q", "A", 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, TriviaError::PersistenceError(_)));

    let err = service.delete_question(1).await.unwrap_err();
    assert!(matches!(err, TriviaError::PersistenceError(_)));

    let err = service
        .next_quiz_question(Some(QuizCategory::Any), &HashSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TriviaError::PersistenceError(_)));
}

#[tokio::test]
async fn test_search_empty_term_is_zero_results() {
    let store = InMemoryStore::with_categories(&["Science"]);
    store.push(1, "What is 2+2?", 1);
    let service = service(store);

    let results = service.search_questions("").await.unwrap();
    assert!(results.questions.is_empty());
    assert_eq!(results.total_questions, 0);
}

#[tokio::test]
async fn test_search_no_match_is_not_found() {
    let store = InMemoryStore::with_categories(&["Science"]);
    store.push(1, "What is 2+2?", 1);
    store.push(2, "What color is the sky?", 1);
    let service = service(store);

    let results = service.search_questions("what").await.unwrap();
    assert_eq!(results.total_questions, 2);

    let err = service.search_questions("banana").await.unwrap_err();
    assert!(matches!(err, TriviaError::NotFound(_)));
}

#[tokio::test]
async fn test_questions_by_category() {
    let store = InMemoryStore::with_categories(&["Science", "Art", "History"]);
    store.push(1, "Q1", 1);
    store.push(2, "Q2", 2);
    store.push(3, "Q3", 1);
    let service = service(store);

    let science = service.questions_by_category(1).await.unwrap();
    assert_eq!(science.current_category, "Science");
    assert_eq!(science.total_questions, 2);

    // Known category, no questions
    let err = service.questions_by_category(3).await.unwrap_err();
    assert!(matches!(err, TriviaError::NotFound(_)));

    // Unknown category
    let err = service.questions_by_category(42).await.unwrap_err();
    assert!(matches!(err, TriviaError::NotFound(_)));
}

#[tokio::test]
async fn test_quiz_requires_category() {
    let service = service(InMemoryStore::default());
    let err = service
        .next_quiz_question(None, &HashSet::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TriviaError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_quiz_exhaustion_is_not_an_error() {
    let store = InMemoryStore::with_categories(&["Science"]);
    for id in [10, 11, 12] {
        store.push(id, "Q", 1);
    }
    let service = service(store);

    let next = service
        .next_quiz_question(Some(QuizCategory::Only(1)), &HashSet::from([10, 11, 12]))
        .await
        .unwrap();
    assert_eq!(next, None);

    for _ in 0..20 {
        let next = service
            .next_quiz_question(Some(QuizCategory::Only(1)), &HashSet::from([10, 11]))
            .await
            .unwrap();
        assert_eq!(next.map(|q| q.id), Some(12));
    }
}

#[tokio::test]
async fn test_quiz_correct_even_without_store_push_down() {
    let store = InMemoryStore {
        ignore_quiz_filters: true,
        ..InMemoryStore::with_categories(&["Science", "Art"])
    };
    for id in 1..=6 {
        store.push(id, "Q", if id <= 3 { 1 } else { 2 });
    }
    let service = service(store);
    let excluded = HashSet::from([1, 2]);

    for _ in 0..50 {
        let next = service
            .next_quiz_question(Some(QuizCategory::Only(1)), &excluded)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(next.id, 3);
    }
}

#[tokio::test]
async fn test_full_quiz_run_visits_each_question_once() {
    let store = InMemoryStore::with_categories(&["Science", "Art"]);
    for id in 1..=8 {
        store.push(id, "Q", if id % 2 == 0 { 2 } else { 1 });
    }
    let service = service(store);

    let mut asked = HashSet::new();
    while let Some(question) = service
        .next_quiz_question(Some(QuizCategory::Any), &asked)
        .await
        .unwrap()
    {
        assert!(asked.insert(question.id), "question {} repeated", question.id);
    }

    assert_eq!(asked, (1..=8).collect::<HashSet<_>>());
}
