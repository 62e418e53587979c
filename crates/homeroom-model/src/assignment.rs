use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AssignmentStatus {
    Draft,
    Open,
    Closed,
}

/// Where a student stands with one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Submitted,
    InProgress,
    NotStarted,
    Missed,
}

impl StudentStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::InProgress => "In progress",
            Self::NotStarted => "Not started",
            Self::Missed => "Missed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Assignment {
    pub id: Uuid,
    pub survey_id: Uuid,
    pub section_id: Uuid,
    #[schema(example = "1st Year - Section A")]
    pub section_name: String,
    pub status: AssignmentStatus,
    #[schema(example = "Open")]
    pub status_label: String,
    pub due_at: Option<NaiveDateTime>,
    pub published_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub submitted_count: i64,
}

fn default_assign_status() -> AssignmentStatus {
    AssignmentStatus::Open
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignSurvey {
    pub section_ids: Vec<Uuid>,
    #[serde(default = "default_assign_status")]
    pub status: AssignmentStatus,
    #[serde(default)]
    pub due_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAssignment {
    pub status: AssignmentStatus,
    /// Absent keeps the due date, `null` clears it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    #[schema(value_type = Option<NaiveDateTime>)]
    pub due_at: Option<Option<NaiveDateTime>>,
}

/// One row of the student's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudentAssignment {
    pub assignment_id: Uuid,
    pub survey_id: Uuid,
    pub title: String,
    pub description: String,
    pub due_at: Option<NaiveDateTime>,
    pub status: AssignmentStatus,
    pub status_label: String,
    pub student_status: StudentStatus,
    #[schema(example = "Not started")]
    pub student_status_label: String,
    pub accepting_responses: bool,
    pub submission_id: Option<Uuid>,
    pub submitted_at: Option<NaiveDateTime>,
}
