use serde::de::DeserializeOwned;
use shared_types::{
    Answer, AnswerListResponse, AnswerResponse, CreateAnswerRequest, CreateQuestionRequest,
    Question, QuestionListResponse, QuestionResponse, ReceivedQuestionsQuery, UserInfo,
    RECEIVED_QUESTIONS_PATH,
};
use std::time::Duration;

/// HTTP client for the qna api
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    jwt_token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    /// Client without a request timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_client(base_url, reqwest::Client::new())
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::from_client(base_url, client))
    }

    fn from_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            jwt_token: None,
            client,
        }
    }

    pub fn set_jwt_token(&mut self, token: Option<String>) {
        self.jwt_token = token;
    }

    pub fn has_token(&self) -> bool {
        self.jwt_token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.jwt_token {
            request.header("Authorization", format!("Bearer {}", token))
        } else {
            request
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self
            .add_auth_header(request)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::ParseFailed(e.to_string()))
    }

    pub async fn current_user(&self) -> Result<UserInfo, ApiError> {
        self.send(self.client.get(self.url("/me"))).await
    }

    /// `Ok(None)` when the question does not exist
    pub async fn get_question(&self, question_id: &str) -> Result<Option<Question>, ApiError> {
        let url = self.url(&shared_types::question_path(question_id));
        match self.send::<QuestionResponse>(self.client.get(&url)).await {
            Ok(response) => Ok(Some(response.question)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn list_received(
        &self,
        query: &ReceivedQuestionsQuery,
    ) -> Result<Vec<Question>, ApiError> {
        let request = self.client.get(self.url(RECEIVED_QUESTIONS_PATH)).query(query);
        let response: QuestionListResponse = self.send(request).await?;
        Ok(response.questions)
    }

    pub async fn create_question(
        &self,
        receiver_uid: &str,
        body: &str,
    ) -> Result<Question, ApiError> {
        let request = self
            .client
            .post(self.url("/questions"))
            .json(&CreateQuestionRequest {
                receiver_uid: receiver_uid.to_string(),
                body: body.to_string(),
            });
        let response: QuestionResponse = self.send(request).await?;
        Ok(response.question)
    }

    pub async fn submit_answer(&self, question_id: &str, body: &str) -> Result<Answer, ApiError> {
        let url = format!("{}/answers", self.url(&shared_types::question_path(question_id)));
        let request = self.client.post(&url).json(&CreateAnswerRequest {
            body: body.to_string(),
        });
        let response: AnswerResponse = self.send(request).await?;
        Ok(response.answer)
    }

    pub async fn list_answers(&self, question_id: &str) -> Result<Vec<Answer>, ApiError> {
        let url = format!("{}/answers", self.url(&shared_types::question_path(question_id)));
        let response: AnswerListResponse = self.send(self.client.get(&url)).await?;
        Ok(response.answers)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("Parse failed: {0}")]
    ParseFailed(String),
}

impl ApiError {
    /// Check if this error is a 401 Unauthorized error (needs authentication)
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::HttpStatus(status) if status == &reqwest::StatusCode::UNAUTHORIZED)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::HttpStatus(status) if status == &reqwest::StatusCode::NOT_FOUND)
    }
}
