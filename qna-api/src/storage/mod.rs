use async_trait::async_trait;
use chrono::{DateTime, Duration, Timelike, Utc};
use shared_types::{Answer, Question, ReceivedQuestionsQuery};

mod memory;
pub mod migrations;
mod sqlite;

pub use memory::InMemoryQuestionStore;
pub use sqlite::SqliteQuestionStore;

/// Document store for questions and answers.
///
/// Identifiers are assigned by the store. Creation timestamps are unique
/// within a collection, so a timestamp cursor never skips a sibling.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn create_question(&self, question: NewQuestion) -> Result<Question, StoreError>;
    async fn get_question(&self, question_id: &str) -> Result<Option<Question>, StoreError>;

    /// Questions addressed to `receiver_uid`, newest first, at most
    /// `query.page_size()` of them, all strictly older than `query.after`.
    async fn list_received(
        &self,
        receiver_uid: &str,
        query: &ReceivedQuestionsQuery,
    ) -> Result<Vec<Question>, StoreError>;

    /// Inserts the answer and marks its question replied in one transaction.
    /// Fails with `StoreError::NotFound` and writes nothing when the question
    /// does not exist.
    async fn submit_answer(&self, answer: NewAnswer) -> Result<Answer, StoreError>;

    /// Answers of a question, oldest first
    async fn list_answers(&self, question_id: &str) -> Result<Vec<Answer>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage operation failed: {0}")]
    OperationFailed(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] refinery::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub receiver_uid: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl NewQuestion {
    pub fn new(receiver_uid: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            receiver_uid: receiver_uid.into(),
            body: body.into(),
            created_at: server_timestamp(),
        }
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub uid: String,
    pub question_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl NewAnswer {
    pub fn new(
        uid: impl Into<String>,
        question_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            question_id: question_id.into(),
            body: body.into(),
            created_at: server_timestamp(),
        }
    }
}

/// Current time truncated to the microsecond precision the stores keep
pub fn server_timestamp() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

pub(crate) fn next_free_timestamp(
    mut candidate: DateTime<Utc>,
    mut is_taken: impl FnMut(DateTime<Utc>) -> Result<bool, StoreError>,
) -> Result<DateTime<Utc>, StoreError> {
    while is_taken(candidate)? {
        candidate += Duration::microseconds(1);
    }
    Ok(candidate)
}

pub(crate) fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_server_timestamp_has_microsecond_precision() {
        let ts = server_timestamp();
        assert_eq!(ts.nanosecond() % 1_000, 0);
    }

    #[test]
    fn test_next_free_timestamp_skips_taken_instants() {
        let base = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let taken = [base, base + Duration::microseconds(1)];

        let free = next_free_timestamp(base, |ts| Ok(taken.contains(&ts))).unwrap();

        assert_eq!(free, base + Duration::microseconds(2));
    }
}
