use crate::error::ApiResult;
use crate::handlers::require_text;
use crate::middleware::CurrentUser;
use crate::storage::NewAnswer;
use crate::AppState;
use actix_web::{get, post, web, HttpResponse};
use shared_types::{AnswerListResponse, AnswerResponse, CreateAnswerRequest};
use tracing::{error, info};

/// Records an answer and marks the question replied, atomically
#[post("/questions/{question_id}/answers")]
pub async fn submit_answer(
    user: CurrentUser,
    question_id: web::Path<String>,
    request: web::Json<CreateAnswerRequest>,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let question_id = question_id.into_inner();
    let request = request.into_inner();
    require_text("body", &request.body)?;

    let answer = state
        .store
        .submit_answer(NewAnswer::new(user.uid(), question_id.clone(), request.body))
        .await
        .map_err(|e| {
            error!(error = %e, question_id = %question_id, "Answer transaction failed");
            e
        })?;

    info!(
        answer_id = %answer.id,
        question_id = %answer.question_id,
        uid = user.uid(),
        "Answer submitted"
    );

    Ok(HttpResponse::Created().json(AnswerResponse { answer }))
}

#[get("/questions/{question_id}/answers")]
pub async fn list_answers(
    _user: CurrentUser,
    question_id: web::Path<String>,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let question_id = question_id.into_inner();

    let answers = state.store.list_answers(&question_id).await?;

    Ok(HttpResponse::Ok().json(AnswerListResponse { answers }))
}
