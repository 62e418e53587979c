use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SurveyStatus {
    Draft,
    Published,
    Closed,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    Likert,
    ShortAnswer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Choice {
    pub id: Uuid,
    pub label: String,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionDetail {
    MultipleChoice {
        shuffle_choices: bool,
        choices: Vec<Choice>,
    },
    Likert {
        scale_min: i32,
        scale_max: i32,
        min_label: String,
        max_label: String,
        choices: Vec<Choice>,
    },
    ShortAnswer {
        max_length: i32,
        placeholder: String,
    },
}

impl QuestionDetail {
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Self::Likert { .. } => QuestionKind::Likert,
            Self::ShortAnswer { .. } => QuestionKind::ShortAnswer,
        }
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        match self {
            Self::MultipleChoice { choices, .. } | Self::Likert { choices, .. } => choices,
            Self::ShortAnswer { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: Uuid,
    pub position: i32,
    pub prompt: String,
    pub required: bool,
    #[serde(flatten)]
    pub detail: QuestionDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SurveySummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: SurveyStatus,
    #[schema(example = "Open")]
    pub status_label: String,
    pub version: i32,
    pub question_count: i64,
    pub assignment_count: i64,
    pub submitted_count: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SurveyDetail {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: SurveyStatus,
    pub status_label: String,
    pub version: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub questions: Vec<Question>,
}

fn default_required() -> bool {
    true
}

/// Question as sent by the survey editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionDraftDetail {
    MultipleChoice {
        #[serde(default)]
        shuffle_choices: bool,
        choices: Vec<String>,
    },
    Likert {
        scale_min: i32,
        scale_max: i32,
        #[serde(default)]
        min_label: String,
        #[serde(default)]
        max_label: String,
        /// Optional label per scale point, starting at `scale_min`. Missing or blank labels fall back to the number.
        #[serde(default)]
        labels: Vec<String>,
    },
    ShortAnswer {
        #[serde(default)]
        max_length: Option<i32>,
        #[serde(default)]
        placeholder: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuestionDraft {
    pub prompt: String,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(flatten)]
    pub detail: QuestionDraftDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SurveyDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Omitting the questions on update keeps the current ones.
    #[serde(default)]
    pub questions: Option<Vec<QuestionDraft>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct SetSurveyStatus {
    pub status: SurveyStatus,
}
