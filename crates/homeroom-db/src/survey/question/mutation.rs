use homeroom_entity::survey::question::{ActiveModel as ActiveQuestion, Column, Entity as QuestionEntity, QuestionKind};
use homeroom_entity::survey::{choice, likert_question, mcq_question, short_answer_question};
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};
use std::error::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChoice {
    pub label: String,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewQuestionDetail {
    MultipleChoice {
        shuffle_choices: bool,
        choices: Vec<NewChoice>,
    },
    Likert {
        scale_min: i32,
        scale_max: i32,
        min_label: String,
        max_label: String,
        choices: Vec<NewChoice>,
    },
    ShortAnswer {
        max_length: i32,
        placeholder: String,
    },
}

impl NewQuestionDetail {
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Self::Likert { .. } => QuestionKind::Likert,
            Self::ShortAnswer { .. } => QuestionKind::ShortAnswer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub prompt: String,
    pub required: bool,
    pub detail: NewQuestionDetail,
}

pub struct Mutation;

impl Mutation {
    /// Inserts the questions in order. Positions and choice positions follow the vector order.
    pub async fn insert_questions<C: ConnectionTrait>(
        conn: &C,
        survey_id: Uuid,
        survey_version: i32,
        questions: Vec<NewQuestion>,
    ) -> Result<(), DbErr> {
        let mut active_questions = Vec::with_capacity(questions.len());
        let mut mcq_rows = vec![];
        let mut likert_rows = vec![];
        let mut short_answer_rows = vec![];
        let mut choice_rows = vec![];

        for (position, question) in (0i32..).zip(questions) {
            let question_id = Uuid::new_v4();
            active_questions.push(ActiveQuestion {
                id: ActiveValue::Set(question_id),
                survey_id: ActiveValue::Set(survey_id),
                position: ActiveValue::Set(position),
                prompt: ActiveValue::Set(question.prompt),
                kind: ActiveValue::Set(question.detail.kind()),
                required: ActiveValue::Set(question.required),
                survey_version: ActiveValue::Set(survey_version),
            });

            let choices = match question.detail {
                NewQuestionDetail::MultipleChoice {
                    shuffle_choices,
                    choices,
                } => {
                    mcq_rows.push(mcq_question::ActiveModel {
                        question_id: ActiveValue::Set(question_id),
                        shuffle_choices: ActiveValue::Set(shuffle_choices),
                    });
                    choices
                }
                NewQuestionDetail::Likert {
                    scale_min,
                    scale_max,
                    min_label,
                    max_label,
                    choices,
                } => {
                    likert_rows.push(likert_question::ActiveModel {
                        question_id: ActiveValue::Set(question_id),
                        scale_min: ActiveValue::Set(scale_min),
                        scale_max: ActiveValue::Set(scale_max),
                        min_label: ActiveValue::Set(min_label),
                        max_label: ActiveValue::Set(max_label),
                    });
                    choices
                }
                NewQuestionDetail::ShortAnswer {
                    max_length,
                    placeholder,
                } => {
                    short_answer_rows.push(short_answer_question::ActiveModel {
                        question_id: ActiveValue::Set(question_id),
                        max_length: ActiveValue::Set(max_length),
                        placeholder: ActiveValue::Set(placeholder),
                    });
                    vec![]
                }
            };
            choice_rows.extend((0i32..).zip(choices).map(|(position, choice)| choice::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                question_id: ActiveValue::Set(question_id),
                label: ActiveValue::Set(choice.label),
                value: ActiveValue::Set(choice.value),
                position: ActiveValue::Set(position),
            }));
        }

        if active_questions.is_empty() {
            return Ok(());
        }
        QuestionEntity::insert_many(active_questions)
            .exec_without_returning(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to insert questions"))?;
        if !mcq_rows.is_empty() {
            mcq_question::Entity::insert_many(mcq_rows).exec_without_returning(conn).await?;
        }
        if !likert_rows.is_empty() {
            likert_question::Entity::insert_many(likert_rows).exec_without_returning(conn).await?;
        }
        if !short_answer_rows.is_empty() {
            short_answer_question::Entity::insert_many(short_answer_rows)
                .exec_without_returning(conn)
                .await?;
        }
        if !choice_rows.is_empty() {
            choice::Entity::insert_many(choice_rows)
                .exec_without_returning(conn)
                .await
                .inspect_err(|error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to insert choices"))?;
        }
        Ok(())
    }

    /// Removes all questions of a survey with their subtype rows and choices.
    pub async fn delete_for_survey<C: ConnectionTrait>(conn: &C, survey_id: Uuid) -> Result<u64, DbErr> {
        let ids: Vec<Uuid> = QuestionEntity::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::SurveyId.eq(survey_id))
            .into_tuple()
            .all(conn)
            .await?;
        if ids.is_empty() {
            return Ok(0);
        }

        choice::Entity::delete_many()
            .filter(choice::Column::QuestionId.is_in(ids.clone()))
            .exec(conn)
            .await?;
        mcq_question::Entity::delete_many()
            .filter(mcq_question::Column::QuestionId.is_in(ids.clone()))
            .exec(conn)
            .await?;
        likert_question::Entity::delete_many()
            .filter(likert_question::Column::QuestionId.is_in(ids.clone()))
            .exec(conn)
            .await?;
        short_answer_question::Entity::delete_many()
            .filter(short_answer_question::Column::QuestionId.is_in(ids.clone()))
            .exec(conn)
            .await?;
        let res = QuestionEntity::delete_many()
            .filter(Column::Id.is_in(ids))
            .exec(conn)
            .await
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to delete questions"))?;
        Ok(res.rows_affected)
    }
}
