pub mod api_client;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod source;
pub mod views;

#[cfg(test)]
pub(crate) mod fake;

pub use api_client::{ApiClient, ApiError};
pub use error::ClientError;
pub use session::{AuthState, Session};
pub use source::QuestionSource;
pub use views::{QuestionDetailView, ReceivedQuestionsView};
