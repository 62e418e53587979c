use crate::error::Error;
use crate::survey::question;
use crate::survey::question::NewQuestion;
use crate::survey::survey::Query;
use crate::util::{FlattenTransactionResultExt, now};
use homeroom_entity::submission::{answer, submission};
use homeroom_entity::survey::assignment;
use homeroom_entity::survey::survey::{ActiveModel as ActiveSurvey, Entity as SurveyEntity, Model as Survey, SurveyStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect,
    TransactionTrait,
};
use std::error::Error as StdError;
use uuid::Uuid;

pub struct SurveyContent {
    pub title: String,
    pub description: String,
    pub questions: Vec<NewQuestion>,
}

pub struct SurveyUpdate {
    pub title: String,
    pub description: String,
    /// `None` keeps the current questions.
    pub questions: Option<Vec<NewQuestion>>,
}

pub struct Mutation;

impl Mutation {
    pub async fn create_survey<C: TransactionTrait>(
        conn: &C,
        owner_id: Uuid,
        content: SurveyContent,
    ) -> Result<Survey, DbErr> {
        conn.transaction(|txn| {
            Box::pin(async move {
                let created_at = now();
                let survey = ActiveSurvey {
                    id: ActiveValue::Set(Uuid::new_v4()),
                    owner_id: ActiveValue::Set(owner_id),
                    title: ActiveValue::Set(content.title),
                    description: ActiveValue::Set(content.description),
                    status: ActiveValue::Set(SurveyStatus::Draft),
                    version: ActiveValue::Set(1),
                    created_at: ActiveValue::Set(created_at),
                    updated_at: ActiveValue::Set(created_at),
                }
                .insert(txn)
                .await?;
                question::Mutation::insert_questions(txn, survey.id, survey.version, content.questions).await?;
                Ok(survey)
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| tracing::error!(error = error as &dyn StdError, %owner_id, "failed to create survey"))
    }

    /// Rewrites a survey. Replacing the questions deletes and recreates them and bumps the version,
    /// which is refused once a student has started responding.
    pub async fn update_survey<C: TransactionTrait>(
        conn: &C,
        owner_id: Uuid,
        survey_id: Uuid,
        update: SurveyUpdate,
    ) -> Result<Survey, Error> {
        conn.transaction(|txn| {
            Box::pin(async move {
                let survey = Query::find_owned(txn, owner_id, survey_id).await?;
                let mut version = survey.version;

                if let Some(questions) = update.questions {
                    if Query::count_submissions(txn, survey_id).await? > 0 {
                        return Err(Error::SurveyLocked(survey_id));
                    }
                    version += 1;
                    let removed = question::Mutation::delete_for_survey(txn, survey_id).await?;
                    tracing::debug!(%survey_id, removed, version, "replacing survey questions");
                    question::Mutation::insert_questions(txn, survey_id, version, questions).await?;
                }

                let survey = ActiveSurvey {
                    id: ActiveValue::Unchanged(survey_id),
                    title: ActiveValue::Set(update.title),
                    description: ActiveValue::Set(update.description),
                    version: ActiveValue::Set(version),
                    updated_at: ActiveValue::Set(now()),
                    ..Default::default()
                }
                .update(txn)
                .await?;
                Ok(survey)
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| tracing::error!(error = error as &dyn StdError, %survey_id, "failed to update survey"))
    }

    pub async fn set_status<C: ConnectionTrait>(
        conn: &C,
        survey_id: Uuid,
        status: SurveyStatus,
    ) -> Result<Survey, DbErr> {
        ActiveSurvey {
            id: ActiveValue::Unchanged(survey_id),
            status: ActiveValue::Set(status),
            updated_at: ActiveValue::Set(now()),
            ..Default::default()
        }
        .update(conn)
        .await
        .inspect_err(
            |error| tracing::error!(error = error as &dyn StdError, %survey_id, %status, "failed to set survey status"),
        )
    }

    /// Deletes a survey with everything hanging off it.
    pub async fn delete_survey<C: TransactionTrait>(conn: &C, owner_id: Uuid, survey_id: Uuid) -> Result<(), DbErr> {
        conn.transaction(|txn| {
            Box::pin(async move {
                Query::find_owned(txn, owner_id, survey_id).await?;

                let submission_ids: Vec<Uuid> = submission::Entity::find()
                    .select_only()
                    .column(submission::Column::Id)
                    .filter(submission::Column::SurveyId.eq(survey_id))
                    .into_tuple()
                    .all(txn)
                    .await?;
                if !submission_ids.is_empty() {
                    answer::Entity::delete_many()
                        .filter(answer::Column::SubmissionId.is_in(submission_ids))
                        .exec(txn)
                        .await?;
                }
                submission::Entity::delete_many()
                    .filter(submission::Column::SurveyId.eq(survey_id))
                    .exec(txn)
                    .await?;
                assignment::Entity::delete_many()
                    .filter(assignment::Column::SurveyId.eq(survey_id))
                    .exec(txn)
                    .await?;
                question::Mutation::delete_for_survey(txn, survey_id).await?;
                let res = SurveyEntity::delete_by_id(survey_id).exec(txn).await?;
                if res.rows_affected == 0 {
                    return Err(DbErr::RecordNotFound("survey not found".to_owned()));
                }
                Ok(())
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| tracing::error!(error = error as &dyn StdError, %survey_id, "failed to delete survey"))
    }
}
