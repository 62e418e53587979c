use crate::util::RequireRecord;
use homeroom_entity::submission::submission::{Column, Entity as SubmissionEntity, Model as Submission};
use homeroom_entity::survey::assignment;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select};
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

/// Submitted and draft submissions of a survey.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionCounts {
    pub submitted: u64,
    pub drafts: u64,
}

pub struct Query;

fn for_survey(survey_id: Uuid, section_id: Option<Uuid>) -> Select<SubmissionEntity> {
    let select = SubmissionEntity::find().filter(Column::SurveyId.eq(survey_id));
    match section_id {
        Some(section_id) => select
            .inner_join(assignment::Entity)
            .filter(assignment::Column::SectionId.eq(section_id)),
        None => select,
    }
}

impl Query {
    pub async fn find_for_student<C: ConnectionTrait>(
        conn: &C,
        survey_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<Submission>, DbErr> {
        SubmissionEntity::find()
            .filter(Column::SurveyId.eq(survey_id))
            .filter(Column::StudentId.eq(student_id))
            .one(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %survey_id, %student_id, "failed to load submission"),
            )
    }

    /// Loads a submission only if it belongs to `student_id`.
    pub async fn find_owned<C: ConnectionTrait>(conn: &C, student_id: Uuid, id: Uuid) -> Result<Submission, DbErr> {
        SubmissionEntity::find_by_id(id)
            .filter(Column::StudentId.eq(student_id))
            .one(conn)
            .await
            .require("submission")
    }

    pub async fn list_for_student<C: ConnectionTrait>(conn: &C, student_id: Uuid) -> Result<Vec<Submission>, DbErr> {
        SubmissionEntity::find()
            .filter(Column::StudentId.eq(student_id))
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %student_id, "failed to list submissions"))
    }

    pub async fn list_submitted<C: ConnectionTrait>(
        conn: &C,
        survey_id: Uuid,
        section_id: Option<Uuid>,
    ) -> Result<Vec<Submission>, DbErr> {
        for_survey(survey_id, section_id)
            .filter(Column::IsSubmitted.eq(true))
            .order_by_asc(Column::SubmittedAt)
            .all(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to list submitted responses"),
            )
    }

    pub async fn counts<C: ConnectionTrait>(
        conn: &C,
        survey_id: Uuid,
        section_id: Option<Uuid>,
    ) -> Result<SubmissionCounts, DbErr> {
        let rows: Vec<(bool, i64)> = for_survey(survey_id, section_id)
            .select_only()
            .column(Column::IsSubmitted)
            .column_as(Column::Id.count(), "count")
            .group_by(Column::IsSubmitted)
            .into_tuple()
            .all(conn)
            .await?;
        let mut counts = SubmissionCounts::default();
        for (is_submitted, count) in rows {
            let count = u64::try_from(count).unwrap_or_default();
            if is_submitted {
                counts.submitted = count;
            } else {
                counts.drafts = count;
            }
        }
        Ok(counts)
    }

    pub async fn submitted_per_assignment<C: ConnectionTrait>(
        conn: &C,
        survey_id: Uuid,
    ) -> Result<HashMap<Uuid, i64>, DbErr> {
        let rows: Vec<(Uuid, i64)> = SubmissionEntity::find()
            .select_only()
            .column(Column::AssignmentId)
            .column_as(Column::Id.count(), "count")
            .filter(Column::SurveyId.eq(survey_id))
            .filter(Column::IsSubmitted.eq(true))
            .group_by(Column::AssignmentId)
            .into_tuple()
            .all(conn)
            .await?;
        Ok(rows.into_iter().collect())
    }
}
