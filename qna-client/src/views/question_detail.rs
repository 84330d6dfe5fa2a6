use crate::api_client::ApiError;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::source::QuestionSource;
use shared_types::{Answer, Question};
use tracing::{error, info};

/// An answer ready to be sent, handed out by `begin_submit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub question_id: String,
    pub body: String,
}

/// One question and the answer form below it
#[derive(Debug)]
pub struct QuestionDetailView {
    question_id: String,
    session: Session,
    question: Option<Question>,
    body: String,
    is_sending: bool,
}

impl QuestionDetailView {
    pub fn new(question_id: impl Into<String>, session: Session) -> Self {
        Self {
            question_id: question_id.into(),
            session,
            question: None,
            body: String::new(),
            is_sending: false,
        }
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_sending(&self) -> bool {
        self.is_sending
    }

    /// Fetches the question once a user is signed in; the api only serves it
    /// to bearers of a token. A missing question leaves the view empty.
    pub async fn load<S: QuestionSource + ?Sized>(&mut self, source: &S) -> ClientResult<()> {
        if self.session.user().is_none() {
            return Ok(());
        }

        self.question = source.fetch_question(&self.question_id).await?;
        if self.question.is_none() {
            info!(question_id = %self.question_id, "Question not found");
        }
        Ok(())
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Whether the send button is enabled
    pub fn can_submit(&self) -> bool {
        self.session.user().is_some()
            && self.question.is_some()
            && !self.body.trim().is_empty()
            && !self.is_sending
    }

    /// Validates the form and marks it sending. Every later call fails with
    /// `SubmitInProgress` until `finish_submit`.
    pub fn begin_submit(&mut self) -> ClientResult<SubmitRequest> {
        if self.session.user().is_none() {
            return Err(ClientError::NotSignedIn);
        }
        if self.question.is_none() {
            return Err(ClientError::QuestionNotLoaded);
        }
        if self.is_sending {
            return Err(ClientError::SubmitInProgress);
        }
        if self.body.trim().is_empty() {
            return Err(ClientError::EmptyBody);
        }

        self.is_sending = true;
        Ok(SubmitRequest {
            question_id: self.question_id.clone(),
            body: self.body.clone(),
        })
    }

    /// Clears the sending flag. On success the form is emptied and the
    /// question shows as replied.
    pub fn finish_submit(&mut self, result: Result<Answer, ApiError>) -> ClientResult<Answer> {
        self.is_sending = false;

        match result {
            Ok(answer) => {
                self.body.clear();
                if let Some(question) = self.question.as_mut() {
                    question.is_replied = true;
                }
                info!(question_id = %answer.question_id, answer_id = %answer.id, "Answer sent");
                Ok(answer)
            }
            Err(e) => {
                error!(question_id = %self.question_id, "Failed to send answer: {}", e);
                Err(e.into())
            }
        }
    }

    pub async fn submit<S: QuestionSource + ?Sized>(&mut self, source: &S) -> ClientResult<Answer> {
        let request = self.begin_submit()?;
        let result = source
            .submit_answer(&request.question_id, &request.body)
            .await;
        self.finish_submit(result)
    }
}
