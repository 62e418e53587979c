use crate::routes::error::{ApiErrorType, ErrorData, LoginError};
use crate::user::{ExtractUser, ExtractUserId};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use homeroom_core::account;
use homeroom_model::login::{SigninRequest, SigninResponse, SignupRequest};
use homeroom_model::user::{Role, User};
use http::StatusCode;
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::error::Error;

pub fn create_router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/logout", post(logout))
        .route("/whoami", get(whoami))
        .with_state(())
}

#[utoipa::path(
    post,
    path = "/signup",
    request_body = SignupRequest,
    responses(
        (status = CREATED, description = "Student account created and signed in", body = SigninResponse),
        (status = BAD_REQUEST, description = "The form has errors, see `data`", body = ErrorData<ApiErrorType>),
    ),
    tag = "auth"
)]
pub(crate) async fn signup(
    Extension(conn): Extension<DatabaseConnection>,
    Json(request): Json<SignupRequest>,
) -> Result<Response, LoginError> {
    let response = account::signup_student(&conn, request).await?;
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

#[utoipa::path(
    post,
    path = "/signin",
    request_body = SigninRequest,
    responses(
        (status = OK, description = "Successful sign-in, returns the bearer token and the role", body = SigninResponse, example = json!(SigninResponse { access_token: "abcToken12345678".into(), role: Role::Student })),
        (status = UNAUTHORIZED, description = "Invalid email or password", body = ErrorData<ApiErrorType>),
        (status = FORBIDDEN, description = "Student account without enrollment", body = ErrorData<ApiErrorType>),
    ),
    tag = "auth"
)]
pub(crate) async fn signin(
    Extension(conn): Extension<DatabaseConnection>,
    Json(request): Json<SigninRequest>,
) -> Result<Json<SigninResponse>, LoginError> {
    Ok(Json(account::signin(&conn, request).await?))
}

#[utoipa::path(
    get,
    path = "/whoami",
    responses(
        (status = OK, description = "The signed-in user", body = User),
        (status = UNAUTHORIZED, description = "No valid token"),
    ),
    tag = "auth",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn whoami(user: Option<ExtractUser>) -> Response {
    match user {
        None => {
            tracing::debug!("no user found");
            (StatusCode::UNAUTHORIZED, "no user").into_response()
        }
        Some(ExtractUser(user)) => Json(user).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = NO_CONTENT, description = "User Logged out successfully"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to delete access token")
    ),
    tag = "auth",
    security(
        ("token" = [])
    )
)]
pub(crate) async fn logout(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> impl IntoResponse {
    if let Err(error) = account::logout(&conn, user_id).await {
        tracing::error!(
            user = %user_id,
            error = &error as &dyn Error,
            "failed to delete access token"
        );
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    tracing::debug!(user = %user_id, "user logged out");
    StatusCode::NO_CONTENT
}
