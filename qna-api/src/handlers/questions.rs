use crate::error::{ApiError, ApiResult};
use crate::handlers::require_text;
use crate::middleware::CurrentUser;
use crate::storage::NewQuestion;
use crate::AppState;
use actix_web::{get, post, web, HttpResponse};
use shared_types::{
    CreateQuestionRequest, QuestionListResponse, QuestionResponse, ReceivedQuestionsQuery,
};
use tracing::{info, warn};

#[post("/questions")]
pub async fn create_question(
    user: CurrentUser,
    request: web::Json<CreateQuestionRequest>,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let request = request.into_inner();
    require_text("receiverUid", &request.receiver_uid)?;
    require_text("body", &request.body)?;

    let question = state
        .store
        .create_question(NewQuestion::new(request.receiver_uid, request.body))
        .await?;

    info!(
        question_id = %question.id,
        asker = user.uid(),
        receiver = %question.receiver_uid,
        "Question created"
    );

    Ok(HttpResponse::Created().json(QuestionResponse { question }))
}

/// One page of the signed-in user's received questions, newest first
#[get("/questions/received")]
pub async fn list_received_questions(
    user: CurrentUser,
    query: web::Query<ReceivedQuestionsQuery>,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();

    let questions = state.store.list_received(user.uid(), &query).await?;

    info!(
        uid = user.uid(),
        after = ?query.after,
        count = questions.len(),
        "Loaded received questions page"
    );

    Ok(HttpResponse::Ok().json(QuestionListResponse { questions }))
}

#[get("/questions/{question_id}")]
pub async fn get_question(
    _user: CurrentUser,
    question_id: web::Path<String>,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let id = question_id.into_inner();
    info!(question_id = %id, "Retrieving question");

    match state.store.get_question(&id).await? {
        Some(question) => Ok(HttpResponse::Ok().json(QuestionResponse { question })),
        None => {
            warn!(question_id = %id, "Question not found");
            Err(ApiError::NotFound(format!("Question {} not found", id)))
        }
    }
}
