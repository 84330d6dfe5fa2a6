use actix_web::web;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod storage;

pub type DbConnection = Arc<Mutex<Connection>>;

/// Shared state handed to every handler
pub struct AppState {
    pub store: Arc<dyn storage::QuestionStore>,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(store: Arc<dyn storage::QuestionStore>, jwt_secret: impl Into<String>) -> Self {
        Self {
            store,
            jwt_secret: jwt_secret.into(),
        }
    }
}

/// Registers every route. `/questions/received` goes before
/// `/questions/{question_id}` so it is not captured as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::users::health)
        .service(handlers::users::current_user)
        .service(handlers::questions::create_question)
        .service(handlers::questions::list_received_questions)
        .service(handlers::questions::get_question)
        .service(handlers::answers::list_answers)
        .service(handlers::answers::submit_answer);
}
