use crate::storage::{
    new_document_id, next_free_timestamp, NewAnswer, NewQuestion, QuestionStore, StoreError,
};
use shared_types::{Answer, Question, ReceivedQuestionsQuery};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Collections {
    questions: HashMap<String, Question>,
    answers: Vec<Answer>,
}

/// Store kept entirely in memory.
///
/// Both collections sit behind one lock; holding it is the transaction.
#[derive(Clone, Default)]
pub struct InMemoryQuestionStore {
    collections: Arc<Mutex<Collections>>,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, StoreError> {
        self.collections
            .lock()
            .map_err(|e| StoreError::OperationFailed(format!("Lock error: {}", e)))
    }
}

#[async_trait::async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn create_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut collections = self.lock()?;

        let created_at = next_free_timestamp(question.created_at, |ts| {
            Ok(collections.questions.values().any(|q| q.created_at == ts))
        })?;

        let question = Question {
            id: new_document_id(),
            body: question.body,
            receiver_uid: question.receiver_uid,
            is_replied: false,
            created_at,
        };
        collections
            .questions
            .insert(question.id.clone(), question.clone());

        Ok(question)
    }

    async fn get_question(&self, question_id: &str) -> Result<Option<Question>, StoreError> {
        Ok(self.lock()?.questions.get(question_id).cloned())
    }

    async fn list_received(
        &self,
        receiver_uid: &str,
        query: &ReceivedQuestionsQuery,
    ) -> Result<Vec<Question>, StoreError> {
        let collections = self.lock()?;

        let mut questions: Vec<Question> = collections
            .questions
            .values()
            .filter(|q| q.receiver_uid == receiver_uid)
            .filter(|q| query.after.map_or(true, |cursor| q.created_at < cursor))
            .cloned()
            .collect();
        questions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        questions.truncate(query.page_size() as usize);

        Ok(questions)
    }

    async fn submit_answer(&self, answer: NewAnswer) -> Result<Answer, StoreError> {
        let mut collections = self.lock()?;

        if !collections.questions.contains_key(&answer.question_id) {
            return Err(StoreError::NotFound(format!(
                "Question {} not found",
                answer.question_id
            )));
        }

        let created_at = next_free_timestamp(answer.created_at, |ts| {
            Ok(collections.answers.iter().any(|a| a.created_at == ts))
        })?;

        let answer = Answer {
            id: new_document_id(),
            uid: answer.uid,
            question_id: answer.question_id,
            body: answer.body,
            created_at,
        };

        if let Some(question) = collections.questions.get_mut(&answer.question_id) {
            question.is_replied = true;
        }
        collections.answers.push(answer.clone());

        Ok(answer)
    }

    async fn list_answers(&self, question_id: &str) -> Result<Vec<Answer>, StoreError> {
        let collections = self.lock()?;

        let mut answers: Vec<Answer> = collections
            .answers
            .iter()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect();
        answers.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn test_list_received_filters_by_receiver_and_orders_newest_first() {
        let store = InMemoryQuestionStore::new();
        let base = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

        for day in 0..3 {
            store
                .create_question(
                    NewQuestion::new("u1", format!("question {}", day))
                        .created_at(base + Duration::days(day)),
                )
                .await
                .unwrap();
        }
        store
            .create_question(NewQuestion::new("u2", "not for u1").created_at(base))
            .await
            .unwrap();

        let questions = store
            .list_received("u1", &ReceivedQuestionsQuery::first_page())
            .await
            .unwrap();

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].body, "question 2");
        assert_eq!(questions[2].body, "question 0");
        assert!(questions.iter().all(|q| q.receiver_uid == "u1"));
    }

    #[tokio::test]
    async fn test_submit_answer_for_missing_question_writes_nothing() {
        let store = InMemoryQuestionStore::new();

        let result = store
            .submit_answer(NewAnswer::new("u1", "missing", "元気です"))
            .await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert!(store.list_answers("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_colliding_timestamps_are_made_unique() {
        let store = InMemoryQuestionStore::new();
        let instant = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

        let first = store
            .create_question(NewQuestion::new("u1", "first").created_at(instant))
            .await
            .unwrap();
        let second = store
            .create_question(NewQuestion::new("u1", "second").created_at(instant))
            .await
            .unwrap();

        assert_ne!(first.created_at, second.created_at);
    }
}
