use crate::routes::error::{ApiErrorType, ErrorData, ErrorDataProvider, GetStatusCode, error_to_axum_response};
use axum::response::{IntoResponse, Response};
use homeroom_core::aggregation::error::AggregationError;
use homeroom_core::survey::error::SurveyError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum SurveysError {
    #[error(transparent)]
    Survey(#[from] SurveyError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error("Database error.")]
    SeaOrmError(#[from] DbErr),
}

impl ErrorDataProvider<ApiErrorType> for SurveysError {
    fn error_data(self) -> Option<ErrorData<ApiErrorType>> {
        let res = match self {
            Self::Survey(error) => match error {
                SurveyError::Validation(errors) => ErrorData::validation(errors),
                error @ SurveyError::InvalidTransition { .. } => {
                    ErrorData::new(ApiErrorType::InvalidTransition, error.to_string())
                }
                error @ SurveyError::NoQuestions => ErrorData::new(ApiErrorType::NoQuestions, error.to_string()),
                error @ SurveyError::Locked(_) => ErrorData::new(ApiErrorType::SurveyLocked, error.to_string()),
                error @ SurveyError::AssignmentInUse(_) => {
                    ErrorData::new(ApiErrorType::AssignmentInUse, error.to_string())
                }
                SurveyError::NotFound(message) => ErrorData::new(ApiErrorType::NotFound, message),
                SurveyError::Conversion(_) | SurveyError::Database(_) => return None,
            },
            Self::Aggregation(error) => match error {
                AggregationError::NotFound(message) => ErrorData::new(ApiErrorType::NotFound, message),
                error @ AggregationError::NotShortAnswer(_) => {
                    ErrorData::new(ApiErrorType::NotShortAnswer, error.to_string())
                }
                AggregationError::Conversion(_) | AggregationError::Database(_) => return None,
            },
            Self::SeaOrmError(_) => return None,
        };
        Some(res)
    }
}

impl GetStatusCode for SurveysError {
    fn status_code(&self) -> http::StatusCode {
        match self {
            Self::SeaOrmError(_)
            | Self::Survey(SurveyError::Database(_))
            | Self::Aggregation(AggregationError::Database(_)) => http::StatusCode::SERVICE_UNAVAILABLE,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SurveysError {
    fn into_response(self) -> Response {
        error_to_axum_response(self)
    }
}
