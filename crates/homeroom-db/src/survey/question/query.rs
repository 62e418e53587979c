use homeroom_entity::survey::question::{Column, Entity as QuestionEntity, Model as Question};
use homeroom_entity::survey::{choice, likert_question, mcq_question, short_answer_question};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

/// A question together with its subtype row and ordered choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedQuestion {
    pub question: Question,
    pub mcq: Option<mcq_question::Model>,
    pub likert: Option<likert_question::Model>,
    pub short_answer: Option<short_answer_question::Model>,
    pub choices: Vec<choice::Model>,
}

pub struct Query;

impl Query {
    pub async fn load_for_survey<C: ConnectionTrait>(conn: &C, survey_id: Uuid) -> Result<Vec<LoadedQuestion>, DbErr> {
        let questions = QuestionEntity::find()
            .filter(Column::SurveyId.eq(survey_id))
            .order_by_asc(Column::Position)
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to load questions"))?;
        if questions.is_empty() {
            return Ok(vec![]);
        }
        let ids: Vec<Uuid> = questions.iter().map(|question| question.id).collect();

        let mut mcq: HashMap<Uuid, _> = mcq_question::Entity::find()
            .filter(mcq_question::Column::QuestionId.is_in(ids.clone()))
            .all(conn)
            .await?
            .into_iter()
            .map(|row| (row.question_id, row))
            .collect();
        let mut likert: HashMap<Uuid, _> = likert_question::Entity::find()
            .filter(likert_question::Column::QuestionId.is_in(ids.clone()))
            .all(conn)
            .await?
            .into_iter()
            .map(|row| (row.question_id, row))
            .collect();
        let mut short_answer: HashMap<Uuid, _> = short_answer_question::Entity::find()
            .filter(short_answer_question::Column::QuestionId.is_in(ids.clone()))
            .all(conn)
            .await?
            .into_iter()
            .map(|row| (row.question_id, row))
            .collect();

        let mut choices: HashMap<Uuid, Vec<choice::Model>> = HashMap::new();
        for row in choice::Entity::find()
            .filter(choice::Column::QuestionId.is_in(ids))
            .order_by_asc(choice::Column::Position)
            .all(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to load choices"))?
        {
            choices.entry(row.question_id).or_default().push(row);
        }

        Ok(questions
            .into_iter()
            .map(|question| LoadedQuestion {
                mcq: mcq.remove(&question.id),
                likert: likert.remove(&question.id),
                short_answer: short_answer.remove(&question.id),
                choices: choices.remove(&question.id).unwrap_or_default(),
                question,
            })
            .collect())
    }
}
