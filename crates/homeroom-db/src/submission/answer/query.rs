use homeroom_entity::submission::answer::{Column, Entity as AnswerEntity, Model as Answer};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use std::error::Error;
use uuid::Uuid;

pub struct Query;

impl Query {
    pub async fn load_answers<C: ConnectionTrait>(conn: &C, submission_id: Uuid) -> Result<Vec<Answer>, DbErr> {
        AnswerEntity::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .all(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %submission_id, "failed to load answers"),
            )
    }

    pub async fn load_for_submissions<C: ConnectionTrait>(
        conn: &C,
        submission_ids: Vec<Uuid>,
    ) -> Result<Vec<Answer>, DbErr> {
        if submission_ids.is_empty() {
            return Ok(vec![]);
        }
        AnswerEntity::find()
            .filter(Column::SubmissionId.is_in(submission_ids))
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to load submission answers"))
    }
}
