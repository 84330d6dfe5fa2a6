use crate::api_client::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Question has not been loaded")]
    QuestionNotLoaded,

    #[error("Answer body must not be empty")]
    EmptyBody,

    #[error("An answer is already being sent")]
    SubmitInProgress,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Process exit code for the `qna` command
    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::Config(_) => 2,
            ClientError::Api(_) => 3,
            ClientError::NotSignedIn => 4,
            ClientError::QuestionNotLoaded
            | ClientError::EmptyBody
            | ClientError::SubmitInProgress => 5,
            ClientError::Io(_) => 1,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
