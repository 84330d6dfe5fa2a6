mod common;

use actix_web::test;
use actix_web::test::TestRequest;
use common::{bearer, jan, seed_question, setup_sqlite_test_app, setup_test_app};
use shared_types::QuestionListResponse;

#[actix_rt::test]
async fn test_received_pages_follow_the_cursor() -> anyhow::Result<()> {
    let test_app = setup_sqlite_test_app().await;
    for day in 1..=10 {
        seed_question(&test_app.store, "u1", &format!("question {}", day), jan(day)).await;
    }
    seed_question(&test_app.store, "u2", "for someone else", jan(5)).await;

    let req = TestRequest::get()
        .uri("/questions/received")
        .insert_header(bearer("u1"))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert!(resp.status().is_success());

    let page: QuestionListResponse = serde_json::from_slice(&test::read_body(resp).await)?;
    assert_eq!(page.questions.len(), 10);
    assert_eq!(page.questions[0].created_at, jan(10));
    assert_eq!(page.questions[9].created_at, jan(1));
    assert!(page.questions.iter().all(|q| q.receiver_uid == "u1"));
    assert!(page
        .questions
        .windows(2)
        .all(|pair| pair[0].created_at > pair[1].created_at));

    let req = TestRequest::get()
        .uri("/questions/received?after=2021-01-01T00:00:00Z")
        .insert_header(bearer("u1"))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert!(resp.status().is_success());

    let next: QuestionListResponse = serde_json::from_slice(&test::read_body(resp).await)?;
    assert!(next.questions.is_empty());
    Ok(())
}

#[actix_rt::test]
async fn test_received_limit_parameter_is_honoured() -> anyhow::Result<()> {
    let test_app = setup_test_app().await;
    for day in 1..=5 {
        seed_question(&test_app.store, "u1", &format!("question {}", day), jan(day)).await;
    }

    let req = TestRequest::get()
        .uri("/questions/received?after=2021-01-05T00:00:00Z&limit=2")
        .insert_header(bearer("u1"))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;
    assert!(resp.status().is_success());

    let page: QuestionListResponse = serde_json::from_slice(&test::read_body(resp).await)?;
    let bodies: Vec<&str> = page.questions.iter().map(|q| q.body.as_str()).collect();
    assert_eq!(bodies, vec!["question 4", "question 3"]);
    Ok(())
}

#[actix_rt::test]
async fn test_received_route_is_not_treated_as_question_id() -> anyhow::Result<()> {
    let test_app = setup_test_app().await;

    let req = TestRequest::get()
        .uri("/questions/received")
        .insert_header(bearer("nobody"))
        .to_request();
    let resp = test::call_service(&test_app.app, req).await;

    assert!(resp.status().is_success());
    let page: QuestionListResponse = serde_json::from_slice(&test::read_body(resp).await)?;
    assert!(page.questions.is_empty());
    Ok(())
}
