mod common;

use crate::common::{assign, draft, likert, mcq, published_survey, setup, short_answer, student, teacher};
use homeroom_core::submission::submit;
use homeroom_core::survey::assignment::{assign_survey, list_assignments, remove_assignment, set_assignment_status};
use homeroom_core::survey::error::SurveyError;
use homeroom_core::survey::{delete_survey, list_surveys, load_survey, preview_survey, save_survey, set_survey_status};
use homeroom_model::assignment::{AssignSurvey, AssignmentStatus, UpdateAssignment};
use homeroom_model::submission::{AnswerRequest, AnswerValue, SaveAnswers};
use homeroom_model::survey::{QuestionDetail, SurveyDraft, SurveyStatus};
use test_log::test;
use uuid::Uuid;

#[test(tokio::test)]
async fn test_save_and_load() {
    let db = &setup().await;
    let owner = teacher(db, "teacher@school.test").await;

    let created = save_survey(
        db,
        owner.id,
        None,
        draft(
            "  Classroom climate ",
            vec![mcq("Seat preference", &["Front", "Back"]), likert("I feel heard", 1, 5), short_answer("Ideas", false)],
        ),
    )
    .await
    .unwrap();
    assert_eq!(created.title, "Classroom climate");
    assert_eq!(created.status, SurveyStatus::Draft);
    assert_eq!(created.status_label, "Draft");
    assert_eq!(created.version, 1);
    let positions: Vec<_> = created.questions.iter().map(|question| question.position).collect();
    assert_eq!(positions, [0, 1, 2]);
    let QuestionDetail::Likert { choices, .. } = &created.questions[1].detail else {
        panic!("expected a likert question");
    };
    let values: Vec<_> = choices.iter().map(|choice| (choice.label.as_str(), choice.value)).collect();
    assert_eq!(values, [("1", 1), ("2", 2), ("3", 3), ("4", 4), ("5", 5)]);

    let updated = save_survey(
        db,
        owner.id,
        Some(created.id),
        draft("Classroom climate", vec![short_answer("Anything else?", true)]),
    )
    .await
    .unwrap();
    assert_eq!(updated.version, 2);
    assert_eq!(updated.questions.len(), 1);
    assert_ne!(updated.questions[0].id, created.questions[2].id);

    let renamed = save_survey(
        db,
        owner.id,
        Some(created.id),
        SurveyDraft {
            title: "Renamed".to_owned(),
            description: String::new(),
            questions: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.version, 2);
    assert_eq!(renamed.questions, updated.questions);

    let preview = preview_survey(db, owner.id, created.id).await.unwrap();
    assert_eq!(preview.questions.len(), 1);

    let stranger = teacher(db, "other@school.test").await;
    assert!(matches!(load_survey(db, stranger.id, created.id).await, Err(SurveyError::NotFound(_))));
}

#[test(tokio::test)]
async fn test_invalid_draft() {
    let db = &setup().await;
    let owner = teacher(db, "teacher@school.test").await;

    let Err(SurveyError::Validation(errors)) =
        save_survey(db, owner.id, None, draft("", vec![mcq("Pick", &["only one"])])).await
    else {
        panic!("invalid draft accepted");
    };
    assert!(errors.get("title").is_some());
    assert!(errors.get("questions[0].choices").is_some());
    assert!(list_surveys(db, owner.id).await.unwrap().is_empty());

    let survey = published_survey(db, &owner, vec![short_answer("Why?", true)]).await;
    let Err(SurveyError::Validation(errors)) =
        save_survey(db, owner.id, Some(survey.id), draft("Still here", vec![])).await
    else {
        panic!("published survey emptied");
    };
    assert_eq!(errors.get("questions"), Some(&["Add at least one question.".to_owned()][..]));
}

#[test(tokio::test)]
async fn test_status_lifecycle() {
    let db = &setup().await;
    let owner = teacher(db, "teacher@school.test").await;
    let empty = save_survey(db, owner.id, None, draft("Empty", vec![])).await.unwrap();

    assert!(matches!(
        set_survey_status(db, owner.id, empty.id, SurveyStatus::Published).await,
        Err(SurveyError::NoQuestions)
    ));
    assert!(matches!(
        set_survey_status(db, owner.id, empty.id, SurveyStatus::Closed).await,
        Err(SurveyError::InvalidTransition {
            from: SurveyStatus::Draft,
            to: SurveyStatus::Closed
        })
    ));

    let survey = save_survey(db, owner.id, None, draft("Full", vec![mcq("Pick", &["a", "b"])]))
        .await
        .unwrap();
    let published = set_survey_status(db, owner.id, survey.id, SurveyStatus::Published).await.unwrap();
    assert_eq!(published.status_label, "Open");
    let closed = set_survey_status(db, owner.id, survey.id, SurveyStatus::Closed).await.unwrap();
    assert_eq!(closed.status_label, "Closed");
    set_survey_status(db, owner.id, survey.id, SurveyStatus::Published).await.unwrap();
    let archived = set_survey_status(db, owner.id, survey.id, SurveyStatus::Archived).await.unwrap();
    assert_eq!(archived.status, SurveyStatus::Archived);
    assert!(matches!(
        set_survey_status(db, owner.id, survey.id, SurveyStatus::Published).await,
        Err(SurveyError::InvalidTransition { .. })
    ));
}

#[test(tokio::test)]
async fn test_assignments() {
    let db = &setup().await;
    let owner = teacher(db, "teacher@school.test").await;
    let first = student(db, "a@school.test", "1st Year", "A").await;
    let second = student(db, "b@school.test", "1st Year", "B").await;
    let survey = published_survey(db, &owner, vec![mcq("Pick", &["a", "b"])]).await;

    let Err(SurveyError::Validation(errors)) = assign_survey(
        db,
        owner.id,
        survey.id,
        AssignSurvey {
            section_ids: vec![first.section_id, Uuid::new_v4()],
            status: AssignmentStatus::Open,
            due_at: None,
        },
    )
    .await
    else {
        panic!("unknown section accepted");
    };
    assert_eq!(errors.get("section_ids").map(<[String]>::len), Some(1));

    let assigned = assign_survey(
        db,
        owner.id,
        survey.id,
        AssignSurvey {
            section_ids: vec![first.section_id, second.section_id, first.section_id],
            status: AssignmentStatus::Draft,
            due_at: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(assigned.len(), 2);
    assert_eq!(assigned[0].section_name, "1st Year - Section A");
    assert!(assigned[0].published_at.is_none());

    let opened = set_assignment_status(
        db,
        owner.id,
        survey.id,
        assigned[0].id,
        UpdateAssignment {
            status: AssignmentStatus::Open,
            due_at: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(opened.status_label, "Open");
    assert!(opened.published_at.is_some());

    submit(
        db,
        &first,
        opened.id,
        SaveAnswers {
            answers: vec![AnswerRequest {
                question_id: survey.questions[0].id,
                value: AnswerValue::Choice {
                    choice_id: survey.questions[0].detail.choices()[0].id,
                },
            }],
        },
    )
    .await
    .unwrap();

    let listed = list_assignments(db, owner.id, survey.id).await.unwrap();
    let counts: Vec<_> = listed.iter().map(|assignment| (assignment.id, assignment.submitted_count)).collect();
    assert!(counts.contains(&(opened.id, 1)));
    assert!(counts.contains(&(assigned[1].id, 0)));

    assert!(matches!(
        remove_assignment(db, owner.id, survey.id, opened.id).await,
        Err(SurveyError::AssignmentInUse(_))
    ));
    remove_assignment(db, owner.id, survey.id, assigned[1].id).await.unwrap();
    assert!(matches!(
        remove_assignment(db, owner.id, survey.id, assigned[1].id).await,
        Err(SurveyError::NotFound(_))
    ));

    assert!(matches!(
        save_survey(db, owner.id, Some(survey.id), draft("Locked", vec![mcq("New", &["x", "y"])])).await,
        Err(SurveyError::Locked(_))
    ));

    let summaries = list_surveys(db, owner.id).await.unwrap();
    assert_eq!(summaries[0].question_count, 1);
    assert_eq!(summaries[0].assignment_count, 1);
    assert_eq!(summaries[0].submitted_count, 1);

    delete_survey(db, owner.id, survey.id).await.unwrap();
    assert!(list_surveys(db, owner.id).await.unwrap().is_empty());
}

#[test(tokio::test)]
async fn test_reassign_updates() {
    let db = &setup().await;
    let owner = teacher(db, "teacher@school.test").await;
    let profile = student(db, "a@school.test", "3rd Year", "C").await;
    let survey = published_survey(db, &owner, vec![short_answer("Why?", false)]).await;

    let first = assign(db, &owner, survey.id, profile.section_id, AssignmentStatus::Open).await;
    let again = assign(db, &owner, survey.id, profile.section_id, AssignmentStatus::Closed).await;
    assert_eq!(first.id, again.id);
    assert_eq!(again.status, AssignmentStatus::Closed);
    assert_eq!(again.published_at, first.published_at);
    assert_eq!(list_assignments(db, owner.id, survey.id).await.unwrap().len(), 1);
}
