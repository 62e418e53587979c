use crate::account::error::AccountError;
use crate::account::password::{hash_password, verify_password};
use homeroom_db::user::{NewStudentProfile, NewUser};
use homeroom_db::{access_tokens, user};
use homeroom_entity::user::{Model as User, Role as RoleModel};
use homeroom_model::login::{SigninRequest, SigninResponse, SignupRequest};
use homeroom_model::validation::FieldErrors;
use homeroom_model_tools::convert::IntoModel;
use sea_orm::DatabaseConnection;
use typed_builder::TypedBuilder;
use uuid::Uuid;
use validator::Validate;

pub mod error;
pub mod password;

pub const YEARS: [&str; 4] = ["1st Year", "2nd Year", "3rd Year", "4th Year"];
pub const SECTIONS: [&str; 9] = ["A", "B", "C", "D", "E", "F", "G", "H", "I"];
pub const GROUPS: [&str; 2] = ["1", "2"];

pub(crate) const EMAIL_TAKEN: &str = "An account with this email already exists.";

/// The single teacher account maintained from configuration.
#[derive(Debug, Clone, TypedBuilder)]
pub struct TeacherAccount {
    #[builder(setter(into))]
    pub email: String,
    #[builder(setter(into))]
    pub password: String,
    #[builder(setter(into))]
    pub first_name: String,
    #[builder(setter(into))]
    pub last_name: String,
}

fn check_choice(errors: &mut FieldErrors, field: &str, value: &str, choices: &[&str]) {
    if !value.is_empty() && !choices.contains(&value) {
        errors.add(
            field,
            format!("Select a valid choice. {value} is not one of the available choices."),
        );
    }
}

/// Expects a normalized request.
#[must_use]
pub fn validate_signup(request: &SignupRequest) -> FieldErrors {
    let mut errors = request.validate().map_or_else(FieldErrors::from, |()| FieldErrors::new());
    check_choice(&mut errors, "year", &request.year, &YEARS);
    check_choice(&mut errors, "section", &request.section, &SECTIONS);
    check_choice(&mut errors, "group", &request.group, &GROUPS);
    errors
}

async fn issue_token(conn: &DatabaseConnection, user: &User) -> Result<SigninResponse, AccountError> {
    let token = access_tokens::Mutation::create_access_token(conn, user.id).await?;
    Ok(SigninResponse {
        access_token: token.access_token,
        role: user.role.into_model(),
    })
}

/// Registers a student, places them in their section and signs them in.
pub async fn signup_student(conn: &DatabaseConnection, request: SignupRequest) -> Result<SigninResponse, AccountError> {
    let request = request.normalized();
    let mut errors = validate_signup(&request);
    if errors.get("email").is_none() && user::Query::find_by_email(conn, &request.email).await?.is_some() {
        errors.add("email", EMAIL_TAKEN);
    }
    errors.into_result().map_err(AccountError::Validation)?;

    let year_section = request.year_section();
    let password_hash = hash_password(request.password).await?;
    let (student, _) = user::Mutation::create_student(
        conn,
        NewUser {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password_hash,
            role: RoleModel::Student,
        },
        NewStudentProfile {
            year: request.year,
            section: request.section,
            group: request.group,
            year_section,
        },
    )
    .await?;

    issue_token(conn, &student).await
}

/// Password sign-in shared by students and the teacher.
pub async fn signin(conn: &DatabaseConnection, request: SigninRequest) -> Result<SigninResponse, AccountError> {
    let email = request.email.trim().to_lowercase();
    let Some(found) = user::Query::find_by_email(conn, &email).await? else {
        return Err(AccountError::InvalidCredentials);
    };
    if !verify_password(request.password, found.password_hash.clone()).await? {
        tracing::debug!(user_id = %found.id, "rejected sign-in with wrong password");
        return Err(AccountError::InvalidCredentials);
    }
    let (user, profile) = user::Query::find_with_profile(conn, found.id)
        .await?
        .ok_or(AccountError::InvalidCredentials)?;
    if user.role == RoleModel::Student && profile.is_none() {
        return Err(AccountError::NoStudentAccess);
    }

    issue_token(conn, &user).await
}

pub async fn logout(conn: &DatabaseConnection, user_id: Uuid) -> Result<(), AccountError> {
    access_tokens::Mutation::delete_access_token(conn, user_id).await?;
    Ok(())
}

/// Creates the configured teacher or brings the stored account in line with the configuration.
pub async fn ensure_teacher_account(
    conn: &DatabaseConnection,
    account: &TeacherAccount,
) -> Result<User, AccountError> {
    let email = account.email.trim();
    let Some(mut teacher) = user::Query::find_by_email(conn, email).await? else {
        let teacher = user::Mutation::create_user(
            conn,
            NewUser {
                email: email.to_owned(),
                first_name: account.first_name.clone(),
                last_name: account.last_name.clone(),
                password_hash: hash_password(account.password.clone()).await?,
                role: RoleModel::Teacher,
            },
        )
        .await?;
        tracing::info!(user_id = %teacher.id, "created teacher account");
        return Ok(teacher);
    };

    let mut updated = vec![];
    if teacher.email != email {
        teacher = user::Mutation::update_user_email(conn, teacher.id, email.to_owned()).await?;
        updated.push("email");
    }
    if teacher.first_name != account.first_name {
        teacher = user::Mutation::update_user_first_name(conn, teacher.id, account.first_name.clone()).await?;
        updated.push("first_name");
    }
    if teacher.last_name != account.last_name {
        teacher = user::Mutation::update_user_last_name(conn, teacher.id, account.last_name.clone()).await?;
        updated.push("last_name");
    }
    if teacher.role != RoleModel::Teacher {
        teacher = user::Mutation::update_user_role(conn, teacher.id, RoleModel::Teacher).await?;
        updated.push("role");
    }
    if !verify_password(account.password.clone(), teacher.password_hash.clone()).await? {
        let password_hash = hash_password(account.password.clone()).await?;
        teacher = user::Mutation::update_user_password_hash(conn, teacher.id, password_hash).await?;
        updated.push("password");
    }
    if !updated.is_empty() {
        tracing::info!(user_id = %teacher.id, ?updated, "updated teacher account from configuration");
    }
    Ok(teacher)
}
