use crate::survey::QuestionKind;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WordFrequency {
    pub word: String,
    pub count: u64,
    /// `count` relative to the most frequent word, in `(0, 1]`.
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChoiceCount {
    pub choice_id: Uuid,
    pub label: String,
    pub value: i32,
    pub count: u64,
    /// Share of the answered responses, in percent with one decimal.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionSummary {
    Choice {
        choices: Vec<ChoiceCount>,
        answered: u64,
        skipped: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        mean: Option<f64>,
    },
    Text {
        responses: Vec<String>,
        word_cloud: Vec<WordFrequency>,
        answered: u64,
        skipped: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuestionResult {
    pub question_id: Uuid,
    pub position: i32,
    pub prompt: String,
    pub kind: QuestionKind,
    pub required: bool,
    #[serde(flatten)]
    pub summary: QuestionSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SurveyResults {
    pub survey_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<Uuid>,
    /// Students enrolled in the targeted sections.
    pub students: u64,
    pub submitted: u64,
    pub drafts: u64,
    /// `submitted / students`, zero without students.
    pub response_rate: f64,
    pub questions: Vec<QuestionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WordCloud {
    pub question_id: Uuid,
    pub responses: u64,
    pub words: Vec<WordFrequency>,
}
