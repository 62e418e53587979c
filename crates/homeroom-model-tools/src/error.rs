use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("question {0} is missing its {1} details")]
    MissingQuestionDetail(Uuid, &'static str),
}
