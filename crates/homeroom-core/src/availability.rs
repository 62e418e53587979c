use chrono::NaiveDateTime;
use homeroom_entity::submission::submission::Model as Submission;
use homeroom_entity::survey::assignment::{AssignmentStatus, Model as Assignment};
use homeroom_entity::survey::survey::{Model as Survey, SurveyStatus};
use homeroom_model::assignment::StudentStatus;

/// Students of the section see the assignment on their dashboard.
#[must_use]
pub fn is_visible(assignment: &Assignment, survey: &Survey) -> bool {
    matches!(assignment.status, AssignmentStatus::Open | AssignmentStatus::Closed)
        && matches!(survey.status, SurveyStatus::Published | SurveyStatus::Closed)
}

/// Students may still save or submit answers.
#[must_use]
pub fn is_accepting_responses(assignment: &Assignment, survey: &Survey, now: NaiveDateTime) -> bool {
    assignment.status == AssignmentStatus::Open
        && survey.status == SurveyStatus::Published
        && assignment.due_at.is_none_or(|due_at| now <= due_at)
}

#[must_use]
pub fn student_status(submission: Option<&Submission>, accepting: bool) -> StudentStatus {
    match submission {
        Some(submission) if submission.is_submitted => StudentStatus::Submitted,
        Some(_) if accepting => StudentStatus::InProgress,
        None if accepting => StudentStatus::NotStarted,
        _ => StudentStatus::Missed,
    }
}
