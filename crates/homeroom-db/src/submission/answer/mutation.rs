use homeroom_entity::submission::answer::{ActiveModel as ActiveAnswer, Column, Entity as AnswerEntity};
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use std::error::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub question_id: Uuid,
    pub choice_id: Option<Uuid>,
    pub text: Option<String>,
}

pub struct Mutation;

impl Mutation {
    /// Drops every answer of the submission and stores `answers` in their place.
    pub async fn replace_answers<C: ConnectionTrait>(
        conn: &C,
        submission_id: Uuid,
        answers: Vec<NewAnswer>,
    ) -> Result<(), DbErr> {
        AnswerEntity::delete_many()
            .filter(Column::SubmissionId.eq(submission_id))
            .exec(conn)
            .await
            .inspect_err(
                |error| tracing::error!(error = error as &dyn Error, %submission_id, "failed to delete old answers"),
            )?;
        if answers.is_empty() {
            return Ok(());
        }

        let data: Vec<_> = answers
            .into_iter()
            .map(|answer| ActiveAnswer {
                id: ActiveValue::Set(Uuid::new_v4()),
                submission_id: ActiveValue::Set(submission_id),
                question_id: ActiveValue::Set(answer.question_id),
                choice_id: ActiveValue::Set(answer.choice_id),
                text: ActiveValue::Set(answer.text),
            })
            .collect();
        AnswerEntity::insert_many(data)
            .exec_without_returning(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %submission_id, "failed to insert answers"))?;
        Ok(())
    }
}
