use crate::routes::error::{ApiErrorType, ErrorData, ErrorDataProvider, GetStatusCode, error_to_axum_response};
use axum::response::{IntoResponse, Response};
use homeroom_core::submission::error::SubmissionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum StudentError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl ErrorDataProvider<ApiErrorType> for StudentError {
    fn error_data(self) -> Option<ErrorData<ApiErrorType>> {
        let Self::Submission(error) = self;
        let res = match error {
            SubmissionError::Validation(errors) => ErrorData::validation(errors),
            SubmissionError::NotFound(message) => ErrorData::new(ApiErrorType::NotFound, message),
            error @ SubmissionError::NotAccepting => ErrorData::new(ApiErrorType::NotAccepting, error.to_string()),
            error @ SubmissionError::AlreadySubmitted(_) => {
                ErrorData::new(ApiErrorType::AlreadySubmitted, error.to_string())
            }
            SubmissionError::Conversion(_) | SubmissionError::Database(_) => return None,
        };
        Some(res)
    }
}

impl GetStatusCode for StudentError {
    fn status_code(&self) -> http::StatusCode {
        match self {
            Self::Submission(SubmissionError::Database(_)) => http::StatusCode::SERVICE_UNAVAILABLE,
            Self::Submission(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for StudentError {
    fn into_response(self) -> Response {
        error_to_axum_response(self)
    }
}
