use crate::convert::{FromDbModel, FromModel, IntoModel, TryFromDbModel};
use crate::error::Error;
use homeroom_db::survey::question::LoadedQuestion;
use homeroom_db::survey::survey::SurveyCounts;
use homeroom_entity::survey::choice::Model as ChoiceModel;
use homeroom_entity::survey::question::QuestionKind as QuestionKindModel;
use homeroom_entity::survey::survey::{Model as SurveyModel, SurveyStatus as SurveyStatusModel};
use homeroom_model::label::status_label;
use homeroom_model::survey::{Choice, Question, QuestionDetail, QuestionKind, SurveyDetail, SurveyStatus, SurveySummary};

impl FromDbModel<SurveyStatusModel> for SurveyStatus {
    fn from_db_model(model: SurveyStatusModel) -> Self {
        match model {
            SurveyStatusModel::Draft => Self::Draft,
            SurveyStatusModel::Published => Self::Published,
            SurveyStatusModel::Closed => Self::Closed,
            SurveyStatusModel::Archived => Self::Archived,
        }
    }
}

impl FromModel<SurveyStatus> for SurveyStatusModel {
    fn from_model(model: SurveyStatus) -> Self {
        match model {
            SurveyStatus::Draft => Self::Draft,
            SurveyStatus::Published => Self::Published,
            SurveyStatus::Closed => Self::Closed,
            SurveyStatus::Archived => Self::Archived,
        }
    }
}

impl FromDbModel<QuestionKindModel> for QuestionKind {
    fn from_db_model(model: QuestionKindModel) -> Self {
        match model {
            QuestionKindModel::MultipleChoice => Self::MultipleChoice,
            QuestionKindModel::Likert => Self::Likert,
            QuestionKindModel::ShortAnswer => Self::ShortAnswer,
        }
    }
}

impl FromDbModel<ChoiceModel> for Choice {
    fn from_db_model(model: ChoiceModel) -> Self {
        Self {
            id: model.id,
            label: model.label,
            value: model.value,
        }
    }
}

impl TryFromDbModel<LoadedQuestion> for Question {
    type Error = Error;

    fn try_from_db_model(model: LoadedQuestion) -> Result<Self, Self::Error> {
        let question = model.question;
        let choices = model.choices.into_iter().map(IntoModel::into_model).collect();
        let detail = match question.kind {
            QuestionKindModel::MultipleChoice => {
                let mcq = model.mcq.ok_or(Error::MissingQuestionDetail(question.id, "multiple choice"))?;
                QuestionDetail::MultipleChoice {
                    shuffle_choices: mcq.shuffle_choices,
                    choices,
                }
            }
            QuestionKindModel::Likert => {
                let likert = model.likert.ok_or(Error::MissingQuestionDetail(question.id, "likert"))?;
                QuestionDetail::Likert {
                    scale_min: likert.scale_min,
                    scale_max: likert.scale_max,
                    min_label: likert.min_label,
                    max_label: likert.max_label,
                    choices,
                }
            }
            QuestionKindModel::ShortAnswer => {
                let short_answer = model
                    .short_answer
                    .ok_or(Error::MissingQuestionDetail(question.id, "short answer"))?;
                QuestionDetail::ShortAnswer {
                    max_length: short_answer.max_length,
                    placeholder: short_answer.placeholder,
                }
            }
        };

        Ok(Self {
            id: question.id,
            position: question.position,
            prompt: question.prompt,
            required: question.required,
            detail,
        })
    }
}

impl FromDbModel<(SurveyModel, SurveyCounts)> for SurveySummary {
    fn from_db_model((model, counts): (SurveyModel, SurveyCounts)) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            status_label: status_label(model.status),
            status: model.status.into_model(),
            version: model.version,
            question_count: counts.questions,
            assignment_count: counts.assignments,
            submitted_count: counts.submitted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl TryFromDbModel<(SurveyModel, Vec<LoadedQuestion>)> for SurveyDetail {
    type Error = Error;

    fn try_from_db_model((model, questions): (SurveyModel, Vec<LoadedQuestion>)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            title: model.title,
            description: model.description,
            status_label: status_label(model.status),
            status: model.status.into_model(),
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
            questions: questions
                .into_iter()
                .map(Question::try_from_db_model)
                .collect::<Result<_, _>>()?,
        })
    }
}
