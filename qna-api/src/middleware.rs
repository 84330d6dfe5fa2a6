use crate::auth::validate_token;
use crate::error::ApiError;
use crate::AppState;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use shared_types::UserInfo;

/// Paths served without a bearer token
const PUBLIC_PATHS: &[&str] = &["/health"];

/// Authentication middleware that validates the bearer token and attaches
/// the signed-in user to the request
pub struct AuthenticationMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthenticationMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthenticationMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthenticationMiddlewareService { service }))
    }
}

pub struct AuthenticationMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if PUBLIC_PATHS.contains(&req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        match authenticate(&req) {
            Ok(user) => {
                tracing::debug!(uid = %user.uid, path = req.path(), "Auth successful");
                req.extensions_mut().insert(user);

                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                tracing::warn!(path = req.path(), "Auth failed: {}", err);
                let response = req.into_response(err.error_response()).map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<UserInfo, ApiError> {
    let jwt_secret = req
        .app_data::<web::Data<AppState>>()
        .map(|state| state.jwt_secret.clone())
        .ok_or_else(|| ApiError::Internal("Application state not configured".to_string()))?;

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected 'Bearer <token>'".to_string(),
        )
    })?;

    let claims = validate_token(token, &jwt_secret)?;
    Ok(claims.user())
}

/// The signed-in user, as attached by `AuthenticationMiddleware`
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserInfo);

impl CurrentUser {
    pub fn uid(&self) -> &str {
        &self.0.uid
    }
}

impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserInfo>()
                .cloned()
                .map(CurrentUser)
                .ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string())),
        )
    }
}
