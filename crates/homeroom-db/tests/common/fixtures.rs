#![allow(dead_code)]

use homeroom_db::class_section;
use homeroom_db::student_profile;
use homeroom_db::survey::question::{NewChoice, NewQuestion, NewQuestionDetail};
use homeroom_db::survey::survey::{self, SurveyContent};
use homeroom_db::user::{self, NewUser};
use homeroom_entity::class_section::Model as Section;
use homeroom_entity::survey::survey::Model as Survey;
use homeroom_entity::user::{Model as User, Role};
use sea_orm::DatabaseConnection;

pub async fn create_user(db: &DatabaseConnection, email: &str, role: Role) -> User {
    user::Mutation::create_user(
        db,
        NewUser {
            email: email.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            password_hash: "not-a-hash".to_owned(),
            role,
        },
    )
    .await
    .unwrap()
}

pub async fn create_student(db: &DatabaseConnection, email: &str, year: &str, letter: &str) -> (User, Section) {
    let user = create_user(db, email, Role::Student).await;
    let section = class_section::Mutation::get_or_create(db, year, letter).await.unwrap();
    student_profile::Mutation::create_profile(
        db,
        user.id,
        section.id,
        "1".to_owned(),
        format!("{year} - Section {letter} - Group 1"),
    )
    .await
    .unwrap();
    (user, section)
}

pub fn mcq(prompt: &str, labels: &[&str]) -> NewQuestion {
    NewQuestion {
        prompt: prompt.to_owned(),
        required: true,
        detail: NewQuestionDetail::MultipleChoice {
            shuffle_choices: false,
            choices: (1..)
                .zip(labels)
                .map(|(value, label)| NewChoice {
                    label: (*label).to_owned(),
                    value,
                })
                .collect(),
        },
    }
}

pub fn short_answer(prompt: &str, required: bool) -> NewQuestion {
    NewQuestion {
        prompt: prompt.to_owned(),
        required,
        detail: NewQuestionDetail::ShortAnswer {
            max_length: 1000,
            placeholder: String::new(),
        },
    }
}

pub async fn create_survey(db: &DatabaseConnection, owner: &User, questions: Vec<NewQuestion>) -> Survey {
    survey::Mutation::create_survey(
        db,
        owner.id,
        SurveyContent {
            title: "Weekly check-in".to_owned(),
            description: String::new(),
            questions,
        },
    )
    .await
    .unwrap()
}
