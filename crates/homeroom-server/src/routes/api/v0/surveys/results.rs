use crate::permissions::Permission;
use crate::routes::api::v0::surveys::error::SurveysError;
use crate::routes::error::{ApiErrorType, ErrorData};
use crate::user::ExtractUserId;
use axum::extract::{Path, Query};
use axum::{Extension, Json};
use homeroom_core::aggregation;
use homeroom_core::wordcloud::DEFAULT_MAX_WORDS;
use homeroom_model::results::{SurveyResults, WordCloud};
use protect_axum::protect;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct ResultsQuery {
    /// Restrict the results to one section.
    section: Option<Uuid>,
    /// Size of each word cloud, defaults to 200.
    max_words: Option<usize>,
}

impl ResultsQuery {
    fn max_words(&self) -> usize {
        self.max_words.unwrap_or(DEFAULT_MAX_WORDS)
    }
}

#[utoipa::path(
    get,
    path = "/api/v0/surveys/{survey_id}/results",
    params(("survey_id" = Uuid, Path, description = "Survey id"), ResultsQuery),
    responses(
        (status = OK, body = SurveyResults, description = "Response rate and per question summaries of the submitted responses"),
        (status = NOT_FOUND, body = ErrorData<ApiErrorType>, description = "No such survey of this teacher"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn survey_results(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<SurveyResults>, SurveysError> {
    let results = aggregation::survey_results(&conn, user_id, survey_id, query.section, query.max_words()).await?;
    Ok(Json(results))
}

#[utoipa::path(
    get,
    path = "/api/v0/surveys/{survey_id}/questions/{question_id}/word-cloud",
    params(
        ("survey_id" = Uuid, Path, description = "Survey id"),
        ("question_id" = Uuid, Path, description = "Short answer question id"),
        ResultsQuery,
    ),
    responses(
        (status = OK, body = WordCloud, description = "Word frequencies of the submitted answers"),
        (status = BAD_REQUEST, body = ErrorData<ApiErrorType>, description = "The question is not a short answer question"),
    ),
    tag = "v0/surveys",
    security(
        ("token" = [])
    )
)]
#[protect("Permission::Teacher", ty = "Permission")]
pub(crate) async fn word_cloud(
    ExtractUserId(user_id): ExtractUserId,
    Extension(conn): Extension<DatabaseConnection>,
    Path((survey_id, question_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<ResultsQuery>,
) -> Result<Json<WordCloud>, SurveysError> {
    let cloud = aggregation::question_word_cloud(
        &conn,
        user_id,
        survey_id,
        question_id,
        query.section,
        query.max_words(),
    )
    .await?;
    Ok(Json(cloud))
}
