use homeroom_entity::class_section::{Entity as SectionEntity, Model as Section};
use homeroom_entity::survey::assignment::{AssignmentStatus, Column, Entity as AssignmentEntity, Model as Assignment};
use homeroom_entity::survey::survey::{self, Entity as SurveyEntity, Model as Survey, SurveyStatus};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Assignment>, DbErr> {
        AssignmentEntity::find_by_id(id).one(conn).await
    }

    pub async fn find_with_survey<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
    ) -> Result<Option<(Assignment, Survey)>, DbErr> {
        let res = AssignmentEntity::find_by_id(id)
            .find_also_related(SurveyEntity)
            .one(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, assignment_id = %id, "failed to load assignment"))?;
        Ok(res.and_then(|(assignment, survey)| survey.map(|survey| (assignment, survey))))
    }

    pub async fn list_for_survey<C: ConnectionTrait>(
        conn: &C,
        survey_id: Uuid,
    ) -> Result<Vec<(Assignment, Option<Section>)>, DbErr> {
        AssignmentEntity::find()
            .filter(Column::SurveyId.eq(survey_id))
            .find_also_related(SectionEntity)
            .order_by_asc(Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to list assignments"))
    }

    /// Assignments of a section that students may see: the assignment left draft and the survey is
    /// published or closed.
    pub async fn list_visible_for_section<C: ConnectionTrait>(
        conn: &C,
        section_id: Uuid,
    ) -> Result<Vec<(Assignment, Survey)>, DbErr> {
        let rows = AssignmentEntity::find()
            .filter(Column::SectionId.eq(section_id))
            .filter(Column::Status.is_in([AssignmentStatus::Open, AssignmentStatus::Closed]))
            .find_also_related(SurveyEntity)
            .filter(survey::Column::Status.is_in([SurveyStatus::Published, SurveyStatus::Closed]))
            .order_by_asc(Column::DueAt)
            .order_by_desc(Column::CreatedAt)
            .all(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %section_id, "failed to list visible assignments"),
            )?;
        Ok(rows
            .into_iter()
            .filter_map(|(assignment, survey)| survey.map(|survey| (assignment, survey)))
            .collect())
    }

    /// Sections whose students can see the survey. Draft assignments are left out.
    pub async fn section_ids_for_survey<C: ConnectionTrait>(conn: &C, survey_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        Ok(AssignmentEntity::find()
            .filter(Column::SurveyId.eq(survey_id))
            .filter(Column::Status.is_in([AssignmentStatus::Open, AssignmentStatus::Closed]))
            .all(conn)
            .await?
            .into_iter()
            .map(|assignment| assignment.section_id)
            .collect())
    }
}
