use crate::middleware::CurrentUser;
use actix_web::{get, HttpResponse, Responder};
use shared_types::ServerStatus;

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(ServerStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[get("/me")]
pub async fn current_user(user: CurrentUser) -> impl Responder {
    HttpResponse::Ok().json(user.0)
}
