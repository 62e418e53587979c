use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("{0}")]
    NotFound(String),

    #[error("question {0} is not a short answer question")]
    NotShortAnswer(Uuid),

    #[error(transparent)]
    Conversion(#[from] homeroom_model_tools::error::Error),

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for AggregationError {
    fn from(error: DbErr) -> Self {
        match error {
            DbErr::RecordNotFound(message) => Self::NotFound(message),
            other => Self::Database(other),
        }
    }
}
