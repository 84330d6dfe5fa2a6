use crate::api_client::{ApiClient, ApiError};
use async_trait::async_trait;
use shared_types::{Answer, Question, ReceivedQuestionsQuery, UserInfo};

/// Where the views read questions from and send answers to
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// The signed-in user, or `None` when nobody is signed in
    async fn current_user(&self) -> Result<Option<UserInfo>, ApiError>;

    async fn fetch_question(&self, question_id: &str) -> Result<Option<Question>, ApiError>;

    /// One page of the signed-in user's received questions
    async fn fetch_received_page(
        &self,
        query: &ReceivedQuestionsQuery,
    ) -> Result<Vec<Question>, ApiError>;

    /// Creates the answer and marks the question replied in one transaction
    async fn submit_answer(&self, question_id: &str, body: &str) -> Result<Answer, ApiError>;
}

#[async_trait]
impl QuestionSource for ApiClient {
    async fn current_user(&self) -> Result<Option<UserInfo>, ApiError> {
        if !self.has_token() {
            return Ok(None);
        }

        match ApiClient::current_user(self).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_unauthorized() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn fetch_question(&self, question_id: &str) -> Result<Option<Question>, ApiError> {
        self.get_question(question_id).await
    }

    async fn fetch_received_page(
        &self,
        query: &ReceivedQuestionsQuery,
    ) -> Result<Vec<Question>, ApiError> {
        self.list_received(query).await
    }

    async fn submit_answer(&self, question_id: &str, body: &str) -> Result<Answer, ApiError> {
        ApiClient::submit_answer(self, question_id, body).await
    }
}
