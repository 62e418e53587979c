use crate::assignment::StudentAssignment;
use crate::survey::{Question, QuestionKind};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerValue {
    Choice { choice_id: Uuid },
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnswerRequest {
    pub question_id: Uuid,
    #[serde(flatten)]
    pub value: AnswerValue,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SaveAnswers {
    #[serde(default)]
    pub answers: Vec<AnswerRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SavedAnswer {
    pub question_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    pub id: Uuid,
    pub survey_id: Uuid,
    pub assignment_id: Uuid,
    pub is_submitted: bool,
    pub submitted_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// What a student needs to fill in a survey.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TakeSurvey {
    pub assignment: StudentAssignment,
    pub questions: Vec<Question>,
    pub answers: Vec<SavedAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerView {
    pub question_id: Uuid,
    pub prompt: String,
    pub kind: QuestionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionView {
    pub submission: Submission,
    pub survey_title: String,
    pub answers: Vec<AnswerView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_answers() {
        let question_id = Uuid::new_v4();
        let choice_id = Uuid::new_v4();
        let request: SaveAnswers = serde_json::from_value(json!({
            "answers": [
                {"question_id": question_id, "type": "choice", "choice_id": choice_id},
                {"question_id": question_id, "type": "text", "text": "hello"},
            ]
        }))
        .unwrap();
        assert_eq!(request.answers[0].value, AnswerValue::Choice { choice_id });
        assert_eq!(
            request.answers[1].value,
            AnswerValue::Text {
                text: "hello".to_owned()
            }
        );

        let empty: SaveAnswers = serde_json::from_value(json!({})).unwrap();
        assert!(empty.answers.is_empty());

        assert!(serde_json::from_value::<AnswerRequest>(json!({"question_id": question_id, "type": "scale"})).is_err());
    }
}
