use crate::api_client::ApiError;
use crate::source::QuestionSource;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use shared_types::{Answer, Question, ReceivedQuestionsQuery, UserInfo};
use std::sync::Mutex;

/// Midnight UTC on the given day of January 2021
pub fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, day, 0, 0, 0).unwrap()
}

pub fn question(id: &str, receiver_uid: &str, created_at: DateTime<Utc>) -> Question {
    Question {
        id: id.to_string(),
        body: format!("body of {}", id),
        receiver_uid: receiver_uid.to_string(),
        is_replied: false,
        created_at,
    }
}

/// In-process stand-in for the api, recording every request it sees
pub struct FakeQuestionSource {
    user: Option<UserInfo>,
    questions: Mutex<Vec<Question>>,
    answers: Mutex<Vec<Answer>>,
    page_requests: Mutex<Vec<ReceivedQuestionsQuery>>,
    question_requests: Mutex<Vec<String>>,
    fail_requests: Mutex<bool>,
}

impl FakeQuestionSource {
    pub fn signed_in(uid: &str) -> Self {
        Self {
            user: Some(UserInfo::new(uid)),
            questions: Mutex::new(Vec::new()),
            answers: Mutex::new(Vec::new()),
            page_requests: Mutex::new(Vec::new()),
            question_requests: Mutex::new(Vec::new()),
            fail_requests: Mutex::new(false),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            ..Self::signed_in("")
        }
    }

    pub fn with_questions(self, questions: Vec<Question>) -> Self {
        *self.questions.lock().unwrap() = questions;
        self
    }

    /// Makes every following request fail until reset
    pub fn set_failing(&self, failing: bool) {
        *self.fail_requests.lock().unwrap() = failing;
    }

    pub fn page_requests(&self) -> Vec<ReceivedQuestionsQuery> {
        self.page_requests.lock().unwrap().clone()
    }

    pub fn question_requests(&self) -> Vec<String> {
        self.question_requests.lock().unwrap().clone()
    }

    pub fn answers(&self) -> Vec<Answer> {
        self.answers.lock().unwrap().clone()
    }

    pub fn stored_question(&self, id: &str) -> Option<Question> {
        self.questions
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned()
    }

    fn check_failing(&self) -> Result<(), ApiError> {
        if *self.fail_requests.lock().unwrap() {
            return Err(ApiError::RequestFailed("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl QuestionSource for FakeQuestionSource {
    async fn current_user(&self) -> Result<Option<UserInfo>, ApiError> {
        Ok(self.user.clone())
    }

    async fn fetch_question(&self, question_id: &str) -> Result<Option<Question>, ApiError> {
        self.question_requests
            .lock()
            .unwrap()
            .push(question_id.to_string());
        self.check_failing()?;
        Ok(self.stored_question(question_id))
    }

    async fn fetch_received_page(
        &self,
        query: &ReceivedQuestionsQuery,
    ) -> Result<Vec<Question>, ApiError> {
        self.page_requests.lock().unwrap().push(query.clone());
        self.check_failing()?;

        let uid = match &self.user {
            Some(user) => user.uid.clone(),
            None => return Err(ApiError::HttpStatus(reqwest::StatusCode::UNAUTHORIZED)),
        };

        let mut page: Vec<Question> = self
            .questions
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.receiver_uid == uid)
            .filter(|q| query.after.map_or(true, |cursor| q.created_at < cursor))
            .cloned()
            .collect();
        page.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        page.truncate(query.page_size() as usize);
        Ok(page)
    }

    async fn submit_answer(&self, question_id: &str, body: &str) -> Result<Answer, ApiError> {
        self.check_failing()?;
        let uid = self
            .user
            .as_ref()
            .map(|u| u.uid.clone())
            .ok_or(ApiError::HttpStatus(reqwest::StatusCode::UNAUTHORIZED))?;

        let mut questions = self.questions.lock().unwrap();
        let question = questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or(ApiError::HttpStatus(reqwest::StatusCode::NOT_FOUND))?;

        let mut answers = self.answers.lock().unwrap();
        let answer = Answer {
            id: format!("a{}", answers.len() + 1),
            uid,
            question_id: question_id.to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
        };
        question.is_replied = true;
        answers.push(answer.clone());

        Ok(answer)
    }
}
