use crate::permissions::Permission;
use crate::routes::api::v0::student::error::StudentError;
use crate::routes::error::{ApiErrorType, ErrorData};
use crate::user::ExtractStudent;
use axum::extract::Path;
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use homeroom_core::submission;
use homeroom_model::assignment::StudentAssignment;
use homeroom_model::submission::{SaveAnswers, Submission, SubmissionView, TakeSurvey};
use protect_axum::protect;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

pub(crate) mod error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .nest(
            "/assignments",
            Router::new().route("/", get(dashboard)).nest(
                "/{assignment_id}",
                Router::new()
                    .route("/", get(take_survey))
                    .route("/draft", put(save_draft))
                    .route("/submit", post(submit)),
            ),
        )
        .route("/submissions/{submission_id}", get(view_response))
        .with_state(())
}

#[utoipa::path(
    get,
    path = "/api/v0/student/assignments",
    responses(
        (status = OK, body = Vec<StudentAssignment>, description = "Surveys assigned to the student's section"),
    ),
    tag = "v0/student",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Student", ty = "Permission")]
pub(crate) async fn dashboard(
    ExtractStudent(student): ExtractStudent,
    Extension(conn): Extension<DatabaseConnection>,
) -> Result<Json<Vec<StudentAssignment>>, StudentError> {
    Ok(Json(submission::student_dashboard(&conn, &student).await?))
}

#[utoipa::path(
    get,
    path = "/api/v0/student/assignments/{assignment_id}",
    params(("assignment_id" = Uuid, Path, description = "Assignment id")),
    responses(
        (status = OK, body = TakeSurvey, description = "Questions and previously saved answers"),
        (status = NOT_FOUND, body = ErrorData<ApiErrorType>, description = "Not assigned to the student's section"),
    ),
    tag = "v0/student",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Student", ty = "Permission")]
pub(crate) async fn take_survey(
    ExtractStudent(student): ExtractStudent,
    Extension(conn): Extension<DatabaseConnection>,
    Path(assignment_id): Path<Uuid>,
) -> Result<Json<TakeSurvey>, StudentError> {
    Ok(Json(submission::take_survey(&conn, &student, assignment_id).await?))
}

#[utoipa::path(
    put,
    path = "/api/v0/student/assignments/{assignment_id}/draft",
    params(("assignment_id" = Uuid, Path, description = "Assignment id")),
    request_body = SaveAnswers,
    responses(
        (status = OK, body = Submission, description = "Answers saved, the survey can be finished later"),
        (status = BAD_REQUEST, body = ErrorData<ApiErrorType>, description = "Some answers are invalid, see `data`"),
        (status = FORBIDDEN, body = ErrorData<ApiErrorType>, description = "The survey no longer accepts responses"),
        (status = CONFLICT, body = ErrorData<ApiErrorType>, description = "Already submitted"),
    ),
    tag = "v0/student",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Student", ty = "Permission")]
pub(crate) async fn save_draft(
    ExtractStudent(student): ExtractStudent,
    Extension(conn): Extension<DatabaseConnection>,
    Path(assignment_id): Path<Uuid>,
    Json(request): Json<SaveAnswers>,
) -> Result<Json<Submission>, StudentError> {
    Ok(Json(submission::save_draft(&conn, &student, assignment_id, request).await?))
}

#[utoipa::path(
    post,
    path = "/api/v0/student/assignments/{assignment_id}/submit",
    params(("assignment_id" = Uuid, Path, description = "Assignment id")),
    request_body = SaveAnswers,
    responses(
        (status = OK, body = Submission, description = "Submitted, no further changes are possible"),
        (status = BAD_REQUEST, body = ErrorData<ApiErrorType>, description = "Required questions are unanswered, see `data`"),
        (status = FORBIDDEN, body = ErrorData<ApiErrorType>, description = "The survey no longer accepts responses"),
        (status = CONFLICT, body = ErrorData<ApiErrorType>, description = "Already submitted"),
    ),
    tag = "v0/student",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Student", ty = "Permission")]
pub(crate) async fn submit(
    ExtractStudent(student): ExtractStudent,
    Extension(conn): Extension<DatabaseConnection>,
    Path(assignment_id): Path<Uuid>,
    Json(request): Json<SaveAnswers>,
) -> Result<Json<Submission>, StudentError> {
    Ok(Json(submission::submit(&conn, &student, assignment_id, request).await?))
}

#[utoipa::path(
    get,
    path = "/api/v0/student/submissions/{submission_id}",
    params(("submission_id" = Uuid, Path, description = "Submission id")),
    responses(
        (status = OK, body = SubmissionView, description = "The student's own answers"),
        (status = NOT_FOUND, body = ErrorData<ApiErrorType>, description = "No such submission of this student"),
    ),
    tag = "v0/student",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Student", ty = "Permission")]
pub(crate) async fn view_response(
    ExtractStudent(student): ExtractStudent,
    Extension(conn): Extension<DatabaseConnection>,
    Path(submission_id): Path<Uuid>,
) -> Result<Json<SubmissionView>, StudentError> {
    Ok(Json(submission::view_response(&conn, student.user_id, submission_id).await?))
}
