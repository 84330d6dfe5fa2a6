use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod auth;
pub mod question;
pub mod typescript_gen;

pub use typescript_gen::{generate_typescript_definitions, write_typescript_definitions};

pub use auth::UserInfo;
pub use question::{
    question_path, Answer, AnswerListResponse, AnswerResponse, CreateAnswerRequest,
    CreateQuestionRequest, Question, QuestionListResponse, QuestionResponse,
    ReceivedQuestionsQuery, MAX_PAGE_SIZE, PAGE_SIZE, RECEIVED_QUESTIONS_PATH,
};

// Shared models for the qna api and its clients

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStatus {
    pub status: String,
    pub version: String,
}
