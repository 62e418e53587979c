use homeroom_model::validation::FieldErrors;
use sea_orm::DbErr;
use thiserror::Error;

use crate::account::password::PasswordError;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("invalid account data")]
    Validation(FieldErrors),

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("This account does not have student access.")]
    NoStudentAccess,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl From<homeroom_db::error::Error> for AccountError {
    fn from(error: homeroom_db::error::Error) -> Self {
        match error {
            homeroom_db::error::Error::Db(error) => Self::Db(error),
            homeroom_db::error::Error::EmailTaken(_) => {
                let mut errors = FieldErrors::new();
                errors.add("email", super::EMAIL_TAKEN);
                Self::Validation(errors)
            }
            other => Self::Db(DbErr::Custom(other.to_string())),
        }
    }
}
