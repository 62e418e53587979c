use homeroom_model::validation::FieldErrors;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{0}")]
    NotFound(String),

    #[error("this survey is no longer accepting responses")]
    NotAccepting,

    #[error("submission {0} was already submitted")]
    AlreadySubmitted(Uuid),

    #[error("invalid answers")]
    Validation(FieldErrors),

    #[error(transparent)]
    Conversion(#[from] homeroom_model_tools::error::Error),

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for SubmissionError {
    fn from(error: DbErr) -> Self {
        match error {
            DbErr::RecordNotFound(message) => Self::NotFound(message),
            other => Self::Database(other),
        }
    }
}

impl From<homeroom_db::error::Error> for SubmissionError {
    fn from(error: homeroom_db::error::Error) -> Self {
        match error {
            homeroom_db::error::Error::Db(error) => error.into(),
            homeroom_db::error::Error::AlreadySubmitted(id) => Self::AlreadySubmitted(id),
            other => Self::Database(DbErr::Custom(other.to_string())),
        }
    }
}
