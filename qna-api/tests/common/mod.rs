#![allow(dead_code)]

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use chrono::{DateTime, TimeZone, Utc};
use qna_api::auth::{generate_token, Claims};
use qna_api::middleware::AuthenticationMiddleware;
use qna_api::storage::{InMemoryQuestionStore, NewQuestion, QuestionStore, SqliteQuestionStore};
use qna_api::AppState;
use shared_types::Question;
use std::sync::Arc;
use tempfile::TempDir;

pub type TestResponse = ServiceResponse<EitherBody<BoxBody>>;

pub const TEST_SECRET: &str = "test_secret_key_123";

pub struct TestApp<S> {
    pub store: Arc<dyn QuestionStore>,
    pub app: S,
    // keeps the SQLite file alive for the duration of the test
    pub _db_dir: Option<TempDir>,
}

pub fn bearer(uid: &str) -> (&'static str, String) {
    let token = generate_token(&Claims::new(uid), TEST_SECRET).unwrap();
    ("Authorization", format!("Bearer {}", token))
}

/// Midnight UTC on the given day of January 2021
pub fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 1, day, 0, 0, 0).unwrap()
}

pub async fn seed_question(
    store: &Arc<dyn QuestionStore>,
    receiver_uid: &str,
    body: &str,
    created_at: DateTime<Utc>,
) -> Question {
    store
        .create_question(NewQuestion::new(receiver_uid, body).created_at(created_at))
        .await
        .unwrap()
}

pub async fn setup_test_app_with_store(
    store: Arc<dyn QuestionStore>,
    db_dir: Option<TempDir>,
) -> TestApp<
    impl Service<actix_http::Request, Response = TestResponse, Error = actix_web::Error>,
> {
    let state = web::Data::new(AppState::new(store.clone(), TEST_SECRET));

    let app = test::init_service(
        App::new()
            .app_data(state)
            .wrap(AuthenticationMiddleware)
            .configure(qna_api::configure),
    )
    .await;

    TestApp {
        store,
        app,
        _db_dir: db_dir,
    }
}

pub async fn setup_test_app() -> TestApp<
    impl Service<actix_http::Request, Response = TestResponse, Error = actix_web::Error>,
> {
    setup_test_app_with_store(Arc::new(InMemoryQuestionStore::new()), None).await
}

pub async fn setup_sqlite_test_app() -> TestApp<
    impl Service<actix_http::Request, Response = TestResponse, Error = actix_web::Error>,
> {
    let db_dir = tempfile::tempdir().unwrap();
    let store = SqliteQuestionStore::open(&db_dir.path().join("qna.db")).unwrap();
    setup_test_app_with_store(Arc::new(store), Some(db_dir)).await
}
