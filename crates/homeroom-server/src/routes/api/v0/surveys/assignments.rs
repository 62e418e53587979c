use crate::permissions::Permission;
use crate::routes::api::v0::surveys::error::SurveysError;
use crate::routes::error::{ApiErrorType, ErrorData};
use crate::user::ExtractUserId;
use axum::extract::Path;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Extension, Json, Router};
use homeroom_core::survey::assignment;
use homeroom_model::assignment::{AssignSurvey, Assignment, UpdateAssignment};
use http::StatusCode;
use protect_axum::protect;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_assignments).post(assign_survey))
        .route("/{assignment_id}", patch(update_assignment).delete(remove_assignment))
        .with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/surveys/{survey_id}/assignments",
    params(("survey_id" = Uuid, Path, description = "Survey id")),
    responses(
        (status = OK, body = Vec<Assignment>, description = "Sections the survey is assigned to"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn list_assignments(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
) -> Result<Json<Vec<Assignment>>, SurveysError> {
    Ok(Json(assignment::list_assignments(&conn, user_id, survey_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/v0/surveys/{survey_id}/assignments",
    params(("survey_id" = Uuid, Path, description = "Survey id")),
    request_body = AssignSurvey,
    responses(
        (status = CREATED, body = Vec<Assignment>, description = "One assignment per requested section"),
        (status = BAD_REQUEST, body = ErrorData<ApiErrorType>, description = "Unknown or missing sections"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn assign_survey(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
    Json(request): Json<AssignSurvey>,
) -> Result<Response, SurveysError> {
    let assignments = assignment::assign_survey(&conn, user_id, survey_id, request).await?;
    Ok((StatusCode::CREATED, Json(assignments)).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/v0/surveys/{survey_id}/assignments/{assignment_id}",
    params(
        ("survey_id" = Uuid, Path, description = "Survey id"),
        ("assignment_id" = Uuid, Path, description = "Assignment id"),
    ),
    request_body = UpdateAssignment,
    responses(
        (status = OK, body = Assignment, description = "The updated assignment"),
        (status = NOT_FOUND, body = ErrorData<ApiErrorType>, description = "No such assignment on this survey"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn update_assignment(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path((survey_id, assignment_id)): Path<(Uuid, Uuid)>,
    Json(update): Json<UpdateAssignment>,
) -> Result<Json<Assignment>, SurveysError> {
    Ok(Json(
        assignment::set_assignment_status(&conn, user_id, survey_id, assignment_id, update).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v0/surveys/{survey_id}/assignments/{assignment_id}",
    params(
        ("survey_id" = Uuid, Path, description = "Survey id"),
        ("assignment_id" = Uuid, Path, description = "Assignment id"),
    ),
    responses(
        (status = NO_CONTENT, description = "Assignment removed"),
        (status = CONFLICT, body = ErrorData<ApiErrorType>, description = "Students already answered it, close it instead"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn remove_assignment(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path((survey_id, assignment_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, SurveysError> {
    assignment::remove_assignment(&conn, user_id, survey_id, assignment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
