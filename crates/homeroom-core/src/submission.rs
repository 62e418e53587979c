use crate::availability::{is_accepting_responses, is_visible, student_status};
use crate::submission::answers::validate_answers;
use crate::submission::error::SubmissionError;
use crate::survey::shuffle_choices;
use chrono::NaiveDateTime;
use homeroom_db::submission::{answer, submission as submission_db};
use homeroom_db::survey::{assignment, question, survey};
use homeroom_db::util::now;
use homeroom_entity::student_profile::Model as StudentProfile;
use homeroom_entity::submission::submission::Model as SubmissionModel;
use homeroom_entity::survey::assignment::Model as AssignmentModel;
use homeroom_entity::survey::survey::Model as SurveyModel;
use homeroom_model::assignment::StudentAssignment;
use homeroom_model::label::status_label;
use homeroom_model::submission::{AnswerView, SaveAnswers, SavedAnswer, Submission, SubmissionView, TakeSurvey};
use homeroom_model::survey::{Question, QuestionDetail};
use homeroom_model_tools::convert::{IntoModel, TryFromDbModel};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use uuid::Uuid;

pub mod answers;
pub mod error;

fn student_assignment(
    assignment: &AssignmentModel,
    survey: &SurveyModel,
    submission: Option<&SubmissionModel>,
    now: NaiveDateTime,
) -> StudentAssignment {
    let accepting = is_accepting_responses(assignment, survey, now);
    let student_status = student_status(submission, accepting);
    StudentAssignment {
        assignment_id: assignment.id,
        survey_id: survey.id,
        title: survey.title.clone(),
        description: survey.description.clone(),
        due_at: assignment.due_at,
        status: assignment.status.into_model(),
        status_label: status_label(assignment.status),
        student_status,
        student_status_label: student_status.label().to_owned(),
        accepting_responses: accepting,
        submission_id: submission.map(|submission| submission.id),
        submitted_at: submission.and_then(|submission| submission.submitted_at),
    }
}

/// The assignment and its survey, if the student is allowed to see them.
async fn visible_assignment(
    conn: &DatabaseConnection,
    student: &StudentProfile,
    assignment_id: Uuid,
) -> Result<(AssignmentModel, SurveyModel), SubmissionError> {
    assignment::Query::find_with_survey(conn, assignment_id)
        .await?
        .filter(|(assignment, survey)| assignment.section_id == student.section_id && is_visible(assignment, survey))
        .ok_or_else(|| SubmissionError::NotFound("assignment not found".to_owned()))
}

async fn load_questions(conn: &DatabaseConnection, survey_id: Uuid) -> Result<Vec<Question>, SubmissionError> {
    Ok(question::Query::load_for_survey(conn, survey_id)
        .await?
        .into_iter()
        .map(Question::try_from_db_model)
        .collect::<Result<Vec<_>, _>>()?)
}

/// Every assignment visible to the student's section, with the student's progress.
pub async fn student_dashboard(
    conn: &DatabaseConnection,
    student: &StudentProfile,
) -> Result<Vec<StudentAssignment>, SubmissionError> {
    let assignments = assignment::Query::list_visible_for_section(conn, student.section_id).await?;
    let submissions: HashMap<Uuid, SubmissionModel> = submission_db::Query::list_for_student(conn, student.user_id)
        .await?
        .into_iter()
        .map(|submission| (submission.survey_id, submission))
        .collect();
    let now = now();
    Ok(assignments
        .iter()
        .map(|(assignment, survey)| student_assignment(assignment, survey, submissions.get(&survey.id), now))
        .collect())
}

/// The questions of an assignment together with the student's saved answers.
pub async fn take_survey(
    conn: &DatabaseConnection,
    student: &StudentProfile,
    assignment_id: Uuid,
) -> Result<TakeSurvey, SubmissionError> {
    let (assignment, survey) = visible_assignment(conn, student, assignment_id).await?;
    let submission = submission_db::Query::find_for_student(conn, survey.id, student.user_id).await?;
    let answers: Vec<SavedAnswer> = match &submission {
        Some(submission) => answer::Query::load_answers(conn, submission.id)
            .await?
            .into_iter()
            .map(IntoModel::into_model)
            .collect(),
        None => vec![],
    };
    let mut questions = load_questions(conn, survey.id).await?;
    shuffle_choices(&mut questions);

    Ok(TakeSurvey {
        assignment: student_assignment(&assignment, &survey, submission.as_ref(), now()),
        questions,
        answers,
    })
}

async fn save(
    conn: &DatabaseConnection,
    student: &StudentProfile,
    assignment_id: Uuid,
    request: SaveAnswers,
    submit: bool,
) -> Result<Submission, SubmissionError> {
    let (assignment, survey) = visible_assignment(conn, student, assignment_id).await?;
    if let Some(existing) = submission_db::Query::find_for_student(conn, survey.id, student.user_id).await?
        && existing.is_submitted
    {
        return Err(SubmissionError::AlreadySubmitted(existing.id));
    }
    if !is_accepting_responses(&assignment, &survey, now()) {
        return Err(SubmissionError::NotAccepting);
    }

    let questions = load_questions(conn, survey.id).await?;
    let answers = validate_answers(&questions, request.answers, submit).map_err(SubmissionError::Validation)?;
    let saved = submission_db::Mutation::save_answers(
        conn,
        survey.id,
        assignment.id,
        student.user_id,
        answers,
        submit,
    )
    .await?;
    if submit {
        tracing::info!(submission_id = %saved.id, survey_id = %survey.id, "survey submitted");
    }
    Ok(saved.into_model())
}

/// Replaces the student's draft answers. Partial answers are fine.
pub async fn save_draft(
    conn: &DatabaseConnection,
    student: &StudentProfile,
    assignment_id: Uuid,
    request: SaveAnswers,
) -> Result<Submission, SubmissionError> {
    save(conn, student, assignment_id, request, false).await
}

/// Stores the final answers. Afterwards the submission can't change anymore.
pub async fn submit(
    conn: &DatabaseConnection,
    student: &StudentProfile,
    assignment_id: Uuid,
    request: SaveAnswers,
) -> Result<Submission, SubmissionError> {
    save(conn, student, assignment_id, request, true).await
}

pub async fn view_response(
    conn: &DatabaseConnection,
    student_id: Uuid,
    submission_id: Uuid,
) -> Result<SubmissionView, SubmissionError> {
    let submission = submission_db::Query::find_owned(conn, student_id, submission_id).await?;
    let survey = survey::Query::find_by_id(conn, submission.survey_id)
        .await?
        .ok_or_else(|| SubmissionError::NotFound("survey not found".to_owned()))?;
    let mut answers: HashMap<Uuid, _> = answer::Query::load_answers(conn, submission.id)
        .await?
        .into_iter()
        .map(|answer| (answer.question_id, answer))
        .collect();

    let answers = load_questions(conn, survey.id)
        .await?
        .into_iter()
        .filter_map(|question| {
            let answer = answers.remove(&question.id)?;
            let choice_label = answer.choice_id.and_then(|choice_id| {
                question
                    .detail
                    .choices()
                    .iter()
                    .find(|choice| choice.id == choice_id)
                    .map(|choice| choice.label.clone())
            });
            Some(AnswerView {
                question_id: question.id,
                prompt: question.prompt,
                kind: question.detail.kind(),
                choice_label,
                text: match question.detail {
                    QuestionDetail::ShortAnswer { .. } => answer.text,
                    _ => None,
                },
            })
        })
        .collect();

    Ok(SubmissionView {
        submission: submission.into_model(),
        survey_title: survey.title,
        answers,
    })
}
