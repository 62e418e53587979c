use homeroom_model::survey::SurveyStatus;
use homeroom_model::validation::FieldErrors;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("invalid survey data")]
    Validation(FieldErrors),

    #[error("a survey can't go from {from} to {to}")]
    InvalidTransition { from: SurveyStatus, to: SurveyStatus },

    #[error("a survey needs at least one question to be published")]
    NoQuestions,

    #[error("survey {0} already has responses, questions can't be changed")]
    Locked(Uuid),

    #[error("assignment {0} already has responses")]
    AssignmentInUse(Uuid),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Conversion(#[from] homeroom_model_tools::error::Error),

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for SurveyError {
    fn from(error: DbErr) -> Self {
        match error {
            DbErr::RecordNotFound(message) => Self::NotFound(message),
            other => Self::Database(other),
        }
    }
}

impl From<homeroom_db::error::Error> for SurveyError {
    fn from(error: homeroom_db::error::Error) -> Self {
        match error {
            homeroom_db::error::Error::Db(error) => error.into(),
            homeroom_db::error::Error::SurveyLocked(id) => Self::Locked(id),
            homeroom_db::error::Error::AssignmentInUse(id) => Self::AssignmentInUse(id),
            other => Self::Database(DbErr::Custom(other.to_string())),
        }
    }
}
