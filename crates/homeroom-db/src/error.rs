use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] DbErr),

    #[error("survey {0} already has responses, questions can't be changed")]
    SurveyLocked(Uuid),

    #[error("submission {0} was already submitted")]
    AlreadySubmitted(Uuid),

    #[error("assignment {0} still has submissions")]
    AssignmentInUse(Uuid),

    #[error("email {0} is already in use")]
    EmailTaken(String),
}

impl Error {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Db(DbErr::RecordNotFound(_)))
    }
}
