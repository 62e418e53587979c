mod common;

use crate::common::fixtures::{create_student, create_survey, create_user, mcq, short_answer};
use crate::common::setup_schema;
use homeroom_db::error::Error;
use homeroom_db::submission::answer::NewAnswer;
use homeroom_db::submission::submission;
use homeroom_db::survey::{assignment, question};
use homeroom_db::survey::survey::{Mutation, Query, SurveyUpdate};
use homeroom_entity::survey::assignment::AssignmentStatus;
use homeroom_entity::survey::question::QuestionKind;
use homeroom_entity::survey::survey::SurveyStatus;
use homeroom_entity::user::Role;
use homeroom_entity::{submission as submission_entity, survey as survey_entity};
use sea_orm::{Database, EntityTrait, PaginatorTrait};
use test_log::test;
use uuid::Uuid;

#[test(tokio::test)]
async fn test_create_and_load_survey() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let teacher = create_user(db, "teacher@school.test", Role::Teacher).await;

    let survey = create_survey(
        db,
        &teacher,
        vec![mcq("Favourite subject?", &["Math", "Science", "History"]), short_answer("Why?", false)],
    )
    .await;
    assert_eq!(survey.version, 1);
    assert_eq!(survey.status, SurveyStatus::Draft);

    let loaded = Query::find_by_id(db, survey.id).await.unwrap().unwrap();
    assert_eq!(loaded, survey);
    let questions = question::Query::load_for_survey(db, survey.id).await.unwrap();
    assert_eq!(questions.len(), 2);

    let first = &questions[0];
    assert_eq!(first.question.position, 0);
    assert_eq!(first.question.kind, QuestionKind::MultipleChoice);
    assert!(first.mcq.is_some());
    let labels: Vec<_> = first.choices.iter().map(|choice| choice.label.as_str()).collect();
    assert_eq!(labels, ["Math", "Science", "History"]);

    let second = &questions[1];
    assert_eq!(second.question.position, 1);
    assert!(!second.question.required);
    assert_eq!(second.short_answer.as_ref().map(|s| s.max_length), Some(1000));
    assert!(second.choices.is_empty());
}

#[test(tokio::test)]
async fn test_find_owned() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let teacher = create_user(db, "teacher@school.test", Role::Teacher).await;
    let other = create_user(db, "other@school.test", Role::Teacher).await;
    let survey = create_survey(db, &teacher, vec![]).await;

    assert!(Query::find_owned(db, teacher.id, survey.id).await.is_ok());
    assert!(matches!(
        Query::find_owned(db, other.id, survey.id).await,
        Err(sea_orm::DbErr::RecordNotFound(_))
    ));
}

#[test(tokio::test)]
async fn test_replace_questions_bumps_version() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let teacher = create_user(db, "teacher@school.test", Role::Teacher).await;
    let survey = create_survey(db, &teacher, vec![mcq("Q1", &["a", "b"]), mcq("Q2", &["c", "d"])]).await;

    let updated = Mutation::update_survey(
        db,
        teacher.id,
        survey.id,
        SurveyUpdate {
            title: "Renamed".to_owned(),
            description: "Now with one question".to_owned(),
            questions: Some(vec![short_answer("Anything else?", true)]),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.version, 2);
    assert_eq!(updated.title, "Renamed");

    let questions = question::Query::load_for_survey(db, survey.id).await.unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].question.survey_version, 2);
    assert_eq!(questions[0].question.prompt, "Anything else?");

    // old choices and satellites are gone
    assert_eq!(survey_entity::choice::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(survey_entity::mcq_question::Entity::find().count(db).await.unwrap(), 0);

    let unchanged = Mutation::update_survey(
        db,
        teacher.id,
        survey.id,
        SurveyUpdate {
            title: "Renamed again".to_owned(),
            description: String::new(),
            questions: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(unchanged.version, 2);
    assert_eq!(Query::count_questions(db, survey.id).await.unwrap(), 1);
}

#[test(tokio::test)]
async fn test_survey_locked_after_first_submission() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let teacher = create_user(db, "teacher@school.test", Role::Teacher).await;
    let (student, section) = create_student(db, "student@school.test", "1st Year", "A").await;
    let survey = create_survey(db, &teacher, vec![short_answer("How are you?", true)]).await;
    let assignment = assignment::Mutation::upsert(db, survey.id, section.id, AssignmentStatus::Open, None)
        .await
        .unwrap();
    submission::Mutation::save_answers(db, survey.id, assignment.id, student.id, vec![], false)
        .await
        .unwrap();

    let res = Mutation::update_survey(
        db,
        teacher.id,
        survey.id,
        SurveyUpdate {
            title: "Changed".to_owned(),
            description: String::new(),
            questions: Some(vec![]),
        },
    )
    .await;
    assert!(matches!(res, Err(Error::SurveyLocked(id)) if id == survey.id));

    let renamed = Mutation::update_survey(
        db,
        teacher.id,
        survey.id,
        SurveyUpdate {
            title: "Changed".to_owned(),
            description: String::new(),
            questions: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.title, "Changed");
    assert_eq!(renamed.version, 1);
}

#[test(tokio::test)]
async fn test_list_and_counts() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let teacher = create_user(db, "teacher@school.test", Role::Teacher).await;
    let (student, section) = create_student(db, "student@school.test", "2nd Year", "B").await;
    let first = create_survey(db, &teacher, vec![short_answer("One", true)]).await;
    let second = create_survey(db, &teacher, vec![short_answer("One", true), short_answer("Two", false)]).await;

    let assignment = assignment::Mutation::upsert(db, second.id, section.id, AssignmentStatus::Open, None)
        .await
        .unwrap();
    submission::Mutation::save_answers(
        db,
        second.id,
        assignment.id,
        student.id,
        vec![NewAnswer {
            question_id: question::Query::load_for_survey(db, second.id).await.unwrap()[0].question.id,
            choice_id: None,
            text: Some("fine".to_owned()),
        }],
        true,
    )
    .await
    .unwrap();

    let surveys = Query::list_by_owner(db, teacher.id).await.unwrap();
    assert_eq!(surveys.len(), 2);

    let counts = Query::counts(db, &[first.id, second.id, Uuid::new_v4()]).await.unwrap();
    assert_eq!(counts[&first.id].questions, 1);
    assert_eq!(counts[&first.id].assignments, 0);
    assert_eq!(counts[&second.id].questions, 2);
    assert_eq!(counts[&second.id].assignments, 1);
    assert_eq!(counts[&second.id].submitted, 1);
    assert_eq!(counts.len(), 3);
}

#[test(tokio::test)]
async fn test_set_status_and_delete() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let teacher = create_user(db, "teacher@school.test", Role::Teacher).await;
    let (student, section) = create_student(db, "student@school.test", "1st Year", "C").await;
    let survey = create_survey(db, &teacher, vec![mcq("Pick one", &["x", "y"])]).await;

    let published = Mutation::set_status(db, survey.id, SurveyStatus::Published).await.unwrap();
    assert_eq!(published.status, SurveyStatus::Published);

    let assignment = assignment::Mutation::upsert(db, survey.id, section.id, AssignmentStatus::Open, None)
        .await
        .unwrap();
    let questions = question::Query::load_for_survey(db, survey.id).await.unwrap();
    submission::Mutation::save_answers(
        db,
        survey.id,
        assignment.id,
        student.id,
        vec![NewAnswer {
            question_id: questions[0].question.id,
            choice_id: Some(questions[0].choices[1].id),
            text: None,
        }],
        true,
    )
    .await
    .unwrap();

    Mutation::delete_survey(db, teacher.id, survey.id).await.unwrap();
    assert!(Query::find_by_id(db, survey.id).await.unwrap().is_none());
    assert_eq!(survey_entity::question::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(survey_entity::assignment::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(submission_entity::submission::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(submission_entity::answer::Entity::find().count(db).await.unwrap(), 0);

    assert!(matches!(
        Mutation::delete_survey(db, teacher.id, survey.id).await,
        Err(sea_orm::DbErr::RecordNotFound(_))
    ));
}
