use axum::Json;
use axum::response::{IntoResponse, Response};
use homeroom_core::account::error::AccountError;
use homeroom_model::validation::FieldErrors;
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::error::Error as StdError;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ApiErrorType {
    /// `data` maps each rejected field to its messages.
    Validation,
    InvalidCredentials,
    NoStudentAccess,
    NotFound,
    InvalidTransition,
    NoQuestions,
    SurveyLocked,
    AssignmentInUse,
    NotAccepting,
    AlreadySubmitted,
    NotShortAnswer,
}

pub(crate) trait GetStatusCode {
    fn status_code(&self) -> http::StatusCode;
}

impl GetStatusCode for ApiErrorType {
    fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Self::Validation | Self::NotShortAnswer => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NoStudentAccess | Self::NotAccepting => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidTransition
            | Self::NoQuestions
            | Self::SurveyLocked
            | Self::AssignmentInUse
            | Self::AlreadySubmitted => StatusCode::CONFLICT,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorData<T> {
    pub(crate) error: T,
    pub(crate) error_description: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) data: Option<Map<String, Value>>,
}

impl<T> ErrorData<T> {
    pub fn new<A: Into<Cow<'static, str>>>(error: T, error_description: A) -> Self {
        Self {
            error,
            error_description: error_description.into(),
            data: None,
        }
    }

    #[must_use]
    pub fn with_field_errors(mut self, errors: FieldErrors) -> Self {
        if let Ok(Value::Object(data)) = serde_json::to_value(errors) {
            self.data = Some(data);
        }
        self
    }
}

impl ErrorData<ApiErrorType> {
    pub fn validation(errors: FieldErrors) -> Self {
        Self::new(ApiErrorType::Validation, "Please correct the errors below.").with_field_errors(errors)
    }
}

pub(crate) trait ErrorDataProvider<T: GetStatusCode> {
    fn error_data(self) -> Option<ErrorData<T>>;
}

/// Known failures become an [`ErrorData`] body, everything else is logged and answered with the bare status.
pub(crate) fn error_to_axum_response<E, T>(error: T) -> Response
where
    E: GetStatusCode + serde::Serialize,
    T: GetStatusCode + ErrorDataProvider<E> + StdError,
{
    let status_code = GetStatusCode::status_code(&error);
    let message = error.to_string();
    match error.error_data() {
        Some(data) => {
            tracing::debug!(error = %message, "rejected request");
            let status_code = GetStatusCode::status_code(&data.error);
            (status_code, Json(data)).into_response()
        }
        None => {
            tracing::error!(error = %message, "request failed");
            status_code.into_response()
        }
    }
}

#[derive(Error, Debug)]
pub(crate) enum LoginError {
    #[error(transparent)]
    Account(#[from] AccountError),
}

impl ErrorDataProvider<ApiErrorType> for LoginError {
    fn error_data(self) -> Option<ErrorData<ApiErrorType>> {
        let Self::Account(error) = self;
        let res = match error {
            AccountError::Validation(errors) => ErrorData::validation(errors),
            error @ AccountError::InvalidCredentials => {
                ErrorData::new(ApiErrorType::InvalidCredentials, error.to_string())
            }
            error @ AccountError::NoStudentAccess => ErrorData::new(ApiErrorType::NoStudentAccess, error.to_string()),
            AccountError::Password(_) | AccountError::Db(_) => return None,
        };
        Some(res)
    }
}

impl GetStatusCode for LoginError {
    fn status_code(&self) -> http::StatusCode {
        match self {
            Self::Account(AccountError::Db(_)) => http::StatusCode::SERVICE_UNAVAILABLE,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        error_to_axum_response(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_body() {
        let mut errors = FieldErrors::new();
        errors.add("email", "Enter a valid email address.");
        let data = ErrorData::validation(errors);
        assert_eq!(data.error.status_code(), http::StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "error": "validation",
                "error_description": "Please correct the errors below.",
                "data": { "email": ["Enter a valid email address."] }
            })
        );
    }

    #[test]
    fn test_login_error_status() {
        let response = LoginError::from(AccountError::InvalidCredentials).into_response();
        assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);

        let response = LoginError::from(AccountError::Db(sea_orm::DbErr::Custom("down".to_owned()))).into_response();
        assert_eq!(response.status(), http::StatusCode::SERVICE_UNAVAILABLE);
    }
}
