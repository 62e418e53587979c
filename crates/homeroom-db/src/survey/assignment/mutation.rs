use crate::error::Error;
use crate::util::{FlattenTransactionResultExt, RequireRecord, now};
use chrono::NaiveDateTime;
use homeroom_entity::submission::submission;
use homeroom_entity::survey::assignment::{
    ActiveModel as ActiveAssignment, AssignmentStatus, Column, Entity as AssignmentEntity, Model as Assignment,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, TransactionTrait,
};
use std::error::Error as StdError;
use uuid::Uuid;

pub struct Mutation;

fn published_at(status: AssignmentStatus, current: Option<NaiveDateTime>) -> Option<NaiveDateTime> {
    match (status, current) {
        (_, Some(current)) => Some(current),
        (AssignmentStatus::Open, None) => Some(now()),
        _ => None,
    }
}

impl Mutation {
    /// Creates or updates the assignment of `survey_id` for a single section.
    pub async fn upsert<C: ConnectionTrait>(
        conn: &C,
        survey_id: Uuid,
        section_id: Uuid,
        status: AssignmentStatus,
        due_at: Option<NaiveDateTime>,
    ) -> Result<Assignment, DbErr> {
        let existing = AssignmentEntity::find()
            .filter(Column::SurveyId.eq(survey_id))
            .filter(Column::SectionId.eq(section_id))
            .one(conn)
            .await?;

        let res = match existing {
            Some(existing) => {
                let published = published_at(status, existing.published_at);
                let mut active = existing.into_active_model();
                active.status = ActiveValue::Set(status);
                active.due_at = ActiveValue::Set(due_at);
                active.published_at = ActiveValue::Set(published);
                active.update(conn).await
            }
            None => {
                ActiveAssignment {
                    id: ActiveValue::Set(Uuid::new_v4()),
                    survey_id: ActiveValue::Set(survey_id),
                    section_id: ActiveValue::Set(section_id),
                    status: ActiveValue::Set(status),
                    due_at: ActiveValue::Set(due_at),
                    published_at: ActiveValue::Set(published_at(status, None)),
                    created_at: ActiveValue::Set(now()),
                }
                .insert(conn)
                .await
            }
        };
        res.inspect_err(|error| {
            tracing::error!(error = error as &dyn StdError, %survey_id, %section_id, "failed to upsert assignment");
        })
    }

    pub async fn assign_to_sections<C: TransactionTrait>(
        conn: &C,
        survey_id: Uuid,
        section_ids: Vec<Uuid>,
        status: AssignmentStatus,
        due_at: Option<NaiveDateTime>,
    ) -> Result<Vec<Assignment>, DbErr> {
        conn.transaction(|txn| {
            Box::pin(async move {
                let mut assignments = Vec::with_capacity(section_ids.len());
                for section_id in section_ids {
                    assignments.push(Self::upsert(txn, survey_id, section_id, status, due_at).await?);
                }
                Ok(assignments)
            })
        })
        .await
        .flatten_res()
    }

    pub async fn set_status<C: ConnectionTrait>(
        conn: &C,
        assignment_id: Uuid,
        status: AssignmentStatus,
        due_at: Option<Option<NaiveDateTime>>,
    ) -> Result<Assignment, DbErr> {
        let existing = AssignmentEntity::find_by_id(assignment_id)
            .one(conn)
            .await
            .require("assignment")?;
        let published = published_at(status, existing.published_at);
        let mut active = existing.into_active_model();
        active.status = ActiveValue::Set(status);
        active.published_at = ActiveValue::Set(published);
        if let Some(due_at) = due_at {
            active.due_at = ActiveValue::Set(due_at);
        }
        active.update(conn).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn StdError, %assignment_id, %status, "failed to update assignment");
        })
    }

    pub async fn delete<C: TransactionTrait>(conn: &C, assignment_id: Uuid) -> Result<(), Error> {
        conn.transaction(|txn| {
            Box::pin(async move {
                let submissions = submission::Entity::find()
                    .filter(submission::Column::AssignmentId.eq(assignment_id))
                    .count(txn)
                    .await?;
                if submissions > 0 {
                    return Err(Error::AssignmentInUse(assignment_id));
                }
                let res = AssignmentEntity::delete_by_id(assignment_id).exec(txn).await?;
                if res.rows_affected == 0 {
                    return Err(DbErr::RecordNotFound("assignment not found".to_owned()).into());
                }
                Ok(())
            })
        })
        .await
        .flatten_res()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_at() {
        assert!(published_at(AssignmentStatus::Draft, None).is_none());
        assert!(published_at(AssignmentStatus::Closed, None).is_none());
        assert!(published_at(AssignmentStatus::Open, None).is_some());

        let first = now();
        assert_eq!(published_at(AssignmentStatus::Closed, Some(first)), Some(first));
        assert_eq!(published_at(AssignmentStatus::Open, Some(first)), Some(first));
    }
}
