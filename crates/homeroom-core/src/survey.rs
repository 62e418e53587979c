use crate::survey::draft::validate_draft;
use crate::survey::error::SurveyError;
use homeroom_db::survey::survey::{self as survey_db, SurveyContent, SurveyUpdate};
use homeroom_db::survey::question;
use homeroom_entity::survey::survey::{Model as SurveyModel, SurveyStatus as SurveyStatusModel};
use homeroom_model::survey::{Question, QuestionDetail, SurveyDetail, SurveyDraft, SurveyStatus, SurveySummary};
use homeroom_model_tools::convert::{IntoDbModel, IntoModel, TryFromDbModel};
use rand::{rng, seq::SliceRandom};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

pub mod assignment;
pub mod draft;
pub mod error;

/// Draft -> Published -> Closed, Closed -> Published, and anything -> Archived.
#[must_use]
pub fn can_transition(from: SurveyStatus, to: SurveyStatus) -> bool {
    matches!(
        (from, to),
        (SurveyStatus::Draft | SurveyStatus::Closed, SurveyStatus::Published)
            | (SurveyStatus::Published, SurveyStatus::Closed)
            | (_, SurveyStatus::Archived)
    )
}

/// Puts the choices of every shuffling multiple choice question in a fresh random order.
pub fn shuffle_choices(questions: &mut [Question]) {
    let mut rng = rng();
    for question in questions {
        if let QuestionDetail::MultipleChoice {
            shuffle_choices: true,
            choices,
        } = &mut question.detail
        {
            choices.shuffle(&mut rng);
        }
    }
}

async fn summary(conn: &DatabaseConnection, survey: SurveyModel) -> Result<SurveySummary, SurveyError> {
    let counts = survey_db::Query::counts(conn, &[survey.id])
        .await?
        .remove(&survey.id)
        .unwrap_or_default();
    Ok((survey, counts).into_model())
}

/// The teacher's surveys, newest first.
pub async fn list_surveys(conn: &DatabaseConnection, owner_id: Uuid) -> Result<Vec<SurveySummary>, SurveyError> {
    let surveys = survey_db::Query::list_by_owner(conn, owner_id).await?;
    let ids: Vec<Uuid> = surveys.iter().map(|survey| survey.id).collect();
    let mut counts = survey_db::Query::counts(conn, &ids).await?;
    Ok(surveys
        .into_iter()
        .map(|survey| {
            let counts = counts.remove(&survey.id).unwrap_or_default();
            (survey, counts).into_model()
        })
        .collect())
}

pub async fn load_survey(conn: &DatabaseConnection, owner_id: Uuid, survey_id: Uuid) -> Result<SurveyDetail, SurveyError> {
    let survey = survey_db::Query::find_owned(conn, owner_id, survey_id).await?;
    let questions = question::Query::load_for_survey(conn, survey_id).await?;
    Ok(SurveyDetail::try_from_db_model((survey, questions))?)
}

/// The survey the way a student would get it.
pub async fn preview_survey(
    conn: &DatabaseConnection,
    owner_id: Uuid,
    survey_id: Uuid,
) -> Result<SurveyDetail, SurveyError> {
    let mut survey = load_survey(conn, owner_id, survey_id).await?;
    shuffle_choices(&mut survey.questions);
    Ok(survey)
}

/// Creates a survey, or rewrites the one identified by `survey_id`.
pub async fn save_survey(
    conn: &DatabaseConnection,
    owner_id: Uuid,
    survey_id: Option<Uuid>,
    draft: SurveyDraft,
) -> Result<SurveyDetail, SurveyError> {
    let saved = match survey_id {
        None => {
            let draft = validate_draft(draft, false).map_err(SurveyError::Validation)?;
            survey_db::Mutation::create_survey(
                conn,
                owner_id,
                SurveyContent {
                    title: draft.title,
                    description: draft.description,
                    questions: draft.questions.unwrap_or_default(),
                },
            )
            .await?
        }
        Some(survey_id) => {
            let existing = survey_db::Query::find_owned(conn, owner_id, survey_id).await?;
            let draft =
                validate_draft(draft, existing.status != SurveyStatusModel::Draft).map_err(SurveyError::Validation)?;
            survey_db::Mutation::update_survey(
                conn,
                owner_id,
                survey_id,
                SurveyUpdate {
                    title: draft.title,
                    description: draft.description,
                    questions: draft.questions,
                },
            )
            .await?
        }
    };
    tracing::info!(survey_id = %saved.id, version = saved.version, "saved survey");
    load_survey(conn, owner_id, saved.id).await
}

pub async fn set_survey_status(
    conn: &DatabaseConnection,
    owner_id: Uuid,
    survey_id: Uuid,
    status: SurveyStatus,
) -> Result<SurveySummary, SurveyError> {
    let survey = survey_db::Query::find_owned(conn, owner_id, survey_id).await?;
    let from: SurveyStatus = survey.status.into_model();
    if from == status {
        return summary(conn, survey).await;
    }
    if !can_transition(from, status) {
        return Err(SurveyError::InvalidTransition { from, to: status });
    }
    if status == SurveyStatus::Published && survey_db::Query::count_questions(conn, survey_id).await? == 0 {
        return Err(SurveyError::NoQuestions);
    }

    let updated = survey_db::Mutation::set_status(conn, survey_id, status.into_db_model()).await?;
    tracing::info!(%survey_id, %from, to = %status, "changed survey status");
    summary(conn, updated).await
}

pub async fn delete_survey(conn: &DatabaseConnection, owner_id: Uuid, survey_id: Uuid) -> Result<(), SurveyError> {
    survey_db::Mutation::delete_survey(conn, owner_id, survey_id).await?;
    tracing::info!(%survey_id, "deleted survey");
    Ok(())
}
