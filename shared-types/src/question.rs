use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of questions fetched per received-questions page
pub const PAGE_SIZE: u32 = 10;

/// Upper bound accepted for the `limit` query parameter
pub const MAX_PAGE_SIZE: u32 = 100;

pub const RECEIVED_QUESTIONS_PATH: &str = "/questions/received";

/// Route of the detail page for a question
pub fn question_path(id: &str) -> String {
    format!("/questions/{}", id)
}

/// A question addressed to `receiver_uid`.
///
/// `id` and `created_at` are assigned by the store when the question is
/// created. `is_replied` flips to true exactly once, in the same transaction
/// that records the first answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Question {
    pub id: String,
    pub body: String,
    pub receiver_uid: String,
    pub is_replied: bool,
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn path(&self) -> String {
        question_path(&self.id)
    }

    /// Creation time as shown in question lists, e.g. `2021/01/10 09:30`
    pub fn display_created_at(&self) -> String {
        self.created_at.format("%Y/%m/%d %H:%M").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Answer {
    pub id: String,
    /// Author of the answer
    pub uid: String,
    pub question_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateQuestionRequest {
    pub receiver_uid: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateAnswerRequest {
    pub body: String,
}

/// Query string of `GET /questions/received`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceivedQuestionsQuery {
    /// Only questions created strictly before this instant are returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub after: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub limit: Option<u32>,
}

impl ReceivedQuestionsQuery {
    pub fn first_page() -> Self {
        Self::default()
    }

    pub fn starting_after(cursor: DateTime<Utc>) -> Self {
        Self {
            after: Some(cursor),
            limit: None,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.limit.unwrap_or(PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionResponse {
    pub question: Question,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerResponse {
    pub answer: Answer,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerListResponse {
    pub answers: Vec<Answer>,
}
