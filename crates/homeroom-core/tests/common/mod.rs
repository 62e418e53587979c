#![allow(dead_code)]

use homeroom_core::survey::{assignment, save_survey, set_survey_status};
use homeroom_db::user::{self, NewUser};
use homeroom_db::{class_section, student_profile};
use homeroom_entity::student_profile::Model as StudentProfile;
use homeroom_entity::user::{Model as User, Role};
use homeroom_model::assignment::{AssignSurvey, Assignment, AssignmentStatus};
use homeroom_model::survey::{QuestionDraft, QuestionDraftDetail, SurveyDetail, SurveyDraft, SurveyStatus};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use uuid::Uuid;

const ACCOUNTS: &str =
    include_str!("../../../homeroom-server/migrations/sqlite/2025-09-01-000000_create_accounts/up.sql");
const SURVEYS: &str = include_str!("../../../homeroom-server/migrations/sqlite/2025-09-01-000100_create_surveys/up.sql");

pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db.execute_unprepared(ACCOUNTS).await.unwrap();
    db.execute_unprepared(SURVEYS).await.unwrap();
    db
}

pub async fn teacher(db: &DatabaseConnection, email: &str) -> User {
    user::Mutation::create_user(
        db,
        NewUser {
            email: email.to_owned(),
            first_name: "Ana".to_owned(),
            last_name: "Cruz".to_owned(),
            password_hash: "not-a-hash".to_owned(),
            role: Role::Teacher,
        },
    )
    .await
    .unwrap()
}

pub async fn student(db: &DatabaseConnection, email: &str, year: &str, letter: &str) -> StudentProfile {
    let user = user::Mutation::create_user(
        db,
        NewUser {
            email: email.to_owned(),
            first_name: "Sam".to_owned(),
            last_name: "Lim".to_owned(),
            password_hash: "not-a-hash".to_owned(),
            role: Role::Student,
        },
    )
    .await
    .unwrap();
    let section = class_section::Mutation::get_or_create(db, year, letter).await.unwrap();
    student_profile::Mutation::create_profile(
        db,
        user.id,
        section.id,
        "1".to_owned(),
        format!("{year} - Section {letter} - Group 1"),
    )
    .await
    .unwrap()
}

pub fn mcq(prompt: &str, choices: &[&str]) -> QuestionDraft {
    QuestionDraft {
        prompt: prompt.to_owned(),
        required: true,
        detail: QuestionDraftDetail::MultipleChoice {
            shuffle_choices: false,
            choices: choices.iter().map(|choice| (*choice).to_owned()).collect(),
        },
    }
}

pub fn likert(prompt: &str, scale_min: i32, scale_max: i32) -> QuestionDraft {
    QuestionDraft {
        prompt: prompt.to_owned(),
        required: true,
        detail: QuestionDraftDetail::Likert {
            scale_min,
            scale_max,
            min_label: "Disagree".to_owned(),
            max_label: "Agree".to_owned(),
            labels: vec![],
        },
    }
}

pub fn short_answer(prompt: &str, required: bool) -> QuestionDraft {
    QuestionDraft {
        prompt: prompt.to_owned(),
        required,
        detail: QuestionDraftDetail::ShortAnswer {
            max_length: Some(200),
            placeholder: String::new(),
        },
    }
}

pub fn draft(title: &str, questions: Vec<QuestionDraft>) -> SurveyDraft {
    SurveyDraft {
        title: title.to_owned(),
        description: "Takes two minutes".to_owned(),
        questions: Some(questions),
    }
}

pub async fn published_survey(db: &DatabaseConnection, owner: &User, questions: Vec<QuestionDraft>) -> SurveyDetail {
    let survey = save_survey(db, owner.id, None, draft("Weekly check-in", questions)).await.unwrap();
    set_survey_status(db, owner.id, survey.id, SurveyStatus::Published).await.unwrap();
    survey
}

pub async fn assign(
    db: &DatabaseConnection,
    owner: &User,
    survey_id: Uuid,
    section_id: Uuid,
    status: AssignmentStatus,
) -> Assignment {
    assignment::assign_survey(
        db,
        owner.id,
        survey_id,
        AssignSurvey {
            section_ids: vec![section_id],
            status,
            due_at: None,
        },
    )
    .await
    .unwrap()
    .remove(0)
}
