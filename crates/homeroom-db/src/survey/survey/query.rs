use crate::util::RequireRecord;
use homeroom_entity::submission::submission;
use homeroom_entity::survey::survey::{Column, Entity as SurveyEntity, Model as Survey};
use homeroom_entity::survey::{assignment, question as question_entity};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

/// Counters shown next to a survey in the teacher's overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurveyCounts {
    pub questions: i64,
    pub assignments: i64,
    pub submitted: i64,
}

pub struct Query;

async fn count_grouped<C, E>(
    conn: &C,
    survey_ids: &[Uuid],
    survey_column: E::Column,
    extra: Option<Condition>,
) -> Result<HashMap<Uuid, i64>, DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let mut select = E::find()
        .select_only()
        .column(survey_column)
        .column_as(survey_column.count(), "count")
        .filter(survey_column.is_in(survey_ids.to_vec()))
        .group_by(survey_column);
    if let Some(condition) = extra {
        select = select.filter(condition);
    }
    let rows: Vec<(Uuid, i64)> = select.into_tuple().all(conn).await?;
    Ok(rows.into_iter().collect())
}

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Survey>, DbErr> {
        SurveyEntity::find_by_id(id).one(conn).await
    }

    /// Loads a survey only if it belongs to `owner_id`.
    pub async fn find_owned<C: ConnectionTrait>(conn: &C, owner_id: Uuid, id: Uuid) -> Result<Survey, DbErr> {
        SurveyEntity::find_by_id(id)
            .filter(Column::OwnerId.eq(owner_id))
            .one(conn)
            .await
            .require("survey")
            .inspect_err(|error| tracing::warn!(error = error as &dyn Error, %owner_id, survey_id = %id, "failed to load survey"))
    }

    pub async fn list_by_owner<C: ConnectionTrait>(conn: &C, owner_id: Uuid) -> Result<Vec<Survey>, DbErr> {
        SurveyEntity::find()
            .filter(Column::OwnerId.eq(owner_id))
            .order_by_desc(Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %owner_id, "failed to list surveys"))
    }

    pub async fn count_submissions<C: ConnectionTrait>(conn: &C, survey_id: Uuid) -> Result<u64, DbErr> {
        submission::Entity::find()
            .filter(submission::Column::SurveyId.eq(survey_id))
            .count(conn)
            .await
    }

    pub async fn count_questions<C: ConnectionTrait>(conn: &C, survey_id: Uuid) -> Result<u64, DbErr> {
        question_entity::Entity::find()
            .filter(question_entity::Column::SurveyId.eq(survey_id))
            .count(conn)
            .await
    }

    pub async fn counts<C: ConnectionTrait>(conn: &C, survey_ids: &[Uuid]) -> Result<HashMap<Uuid, SurveyCounts>, DbErr> {
        if survey_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let questions =
            count_grouped::<_, question_entity::Entity>(conn, survey_ids, question_entity::Column::SurveyId, None).await?;
        let assignments =
            count_grouped::<_, assignment::Entity>(conn, survey_ids, assignment::Column::SurveyId, None).await?;
        let submitted = count_grouped::<_, submission::Entity>(
            conn,
            survey_ids,
            submission::Column::SurveyId,
            Some(Condition::all().add(submission::Column::IsSubmitted.eq(true))),
        )
        .await
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to count survey submissions"))?;

        Ok(survey_ids
            .iter()
            .map(|id| {
                (
                    *id,
                    SurveyCounts {
                        questions: questions.get(id).copied().unwrap_or_default(),
                        assignments: assignments.get(id).copied().unwrap_or_default(),
                        submitted: submitted.get(id).copied().unwrap_or_default(),
                    },
                )
            })
            .collect())
    }
}
