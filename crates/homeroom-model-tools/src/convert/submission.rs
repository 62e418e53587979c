use crate::convert::FromDbModel;
use homeroom_entity::submission::answer::Model as AnswerModel;
use homeroom_entity::submission::submission::Model as SubmissionModel;
use homeroom_model::submission::{SavedAnswer, Submission};

impl FromDbModel<SubmissionModel> for Submission {
    fn from_db_model(model: SubmissionModel) -> Self {
        Self {
            id: model.id,
            survey_id: model.survey_id,
            assignment_id: model.assignment_id,
            is_submitted: model.is_submitted,
            submitted_at: model.submitted_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl FromDbModel<AnswerModel> for SavedAnswer {
    fn from_db_model(model: AnswerModel) -> Self {
        Self {
            question_id: model.question_id,
            choice_id: model.choice_id,
            text: model.text,
        }
    }
}
