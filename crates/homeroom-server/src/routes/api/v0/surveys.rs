use crate::permissions::Permission;
use crate::routes::api::v0::surveys::error::SurveysError;
use crate::routes::error::{ApiErrorType, ErrorData};
use crate::user::ExtractUserId;
use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Extension, Json, Router};
use homeroom_core::survey;
use homeroom_model::survey::{SetSurveyStatus, SurveyDetail, SurveyDraft, SurveySummary};
use http::StatusCode;
use protect_axum::protect;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

pub(crate) mod assignments;
pub(crate) mod error;
pub(crate) mod results;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_surveys).post(create_survey))
        .nest(
            "/{survey_id}",
            Router::new()
                .route("/", get(get_survey).put(update_survey).delete(delete_survey))
                .route("/status", put(set_status))
                .route("/preview", get(preview_survey))
                .nest("/assignments", assignments::create_router())
                .route("/results", get(results::survey_results))
                .route("/questions/{question_id}/word-cloud", get(results::word_cloud)),
        )
        .with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/surveys",
    responses(
        (status = OK, body = Vec<SurveySummary>, description = "Surveys of the teacher, most recently updated first"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn list_surveys(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<Vec<SurveySummary>>, SurveysError> {
    Ok(Json(survey::list_surveys(&conn, user_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v0/surveys",
    request_body = SurveyDraft,
    responses(
        (status = CREATED, body = SurveyDetail, description = "The new draft survey"),
        (status = BAD_REQUEST, body = ErrorData<ApiErrorType>, description = "The draft has errors, see `data`"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn create_survey(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Json(draft): Json<SurveyDraft>,
) -> Result<Response, SurveysError> {
    let survey = survey::save_survey(&conn, user_id, None, draft).await?;
    Ok((StatusCode::CREATED, Json(survey)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v0/surveys/{survey_id}",
    params(("survey_id" = Uuid, Path, description = "Survey id")),
    responses(
        (status = OK, body = SurveyDetail, description = "The survey with its questions in order"),
        (status = NOT_FOUND, body = ErrorData<ApiErrorType>, description = "No such survey of this teacher"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn get_survey(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
) -> Result<Json<SurveyDetail>, SurveysError> {
    Ok(Json(survey::load_survey(&conn, user_id, survey_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v0/surveys/{survey_id}",
    params(("survey_id" = Uuid, Path, description = "Survey id")),
    request_body = SurveyDraft,
    responses(
        (status = OK, body = SurveyDetail, description = "The saved survey"),
        (status = BAD_REQUEST, body = ErrorData<ApiErrorType>, description = "The draft has errors, see `data`"),
        (status = CONFLICT, body = ErrorData<ApiErrorType>, description = "Questions can't change once responses exist"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn update_survey(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
    Json(draft): Json<SurveyDraft>,
) -> Result<Json<SurveyDetail>, SurveysError> {
    Ok(Json(survey::save_survey(&conn, user_id, Some(survey_id), draft).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v0/surveys/{survey_id}",
    params(("survey_id" = Uuid, Path, description = "Survey id")),
    responses(
        (status = NO_CONTENT, description = "Survey deleted with its assignments and responses"),
        (status = NOT_FOUND, body = ErrorData<ApiErrorType>, description = "No such survey of this teacher"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn delete_survey(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
) -> Result<StatusCode, SurveysError> {
    survey::delete_survey(&conn, user_id, survey_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/v0/surveys/{survey_id}/status",
    params(("survey_id" = Uuid, Path, description = "Survey id")),
    request_body = SetSurveyStatus,
    responses(
        (status = OK, body = SurveySummary, description = "The survey in its new status"),
        (status = CONFLICT, body = ErrorData<ApiErrorType>, description = "Transition not allowed or nothing to publish"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn set_status(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
    Json(SetSurveyStatus { status }): Json<SetSurveyStatus>,
) -> Result<Json<SurveySummary>, SurveysError> {
    Ok(Json(survey::set_survey_status(&conn, user_id, survey_id, status).await?))
}

#[utoipa::path(
    get,
    path = "/api/v0/surveys/{survey_id}/preview",
    params(("survey_id" = Uuid, Path, description = "Survey id")),
    responses(
        (status = OK, body = SurveyDetail, description = "The survey as a student would see it"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn preview_survey(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
) -> Result<Json<SurveyDetail>, SurveysError> {
    Ok(Json(survey::preview_survey(&conn, user_id, survey_id).await?))
}
