//! API error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use core_kernel::CodeError;
use domain_bank::RegistryError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>, details: Vec<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message, details) = match self {
            ApiError::NotFound(msg) => ("not_found", msg, None),
            ApiError::BadRequest(msg) => ("bad_request", msg, None),
            ApiError::Conflict(msg) => ("conflict", msg, None),
            ApiError::Validation { message, details } => {
                ("validation_error", message, Some(details))
            }
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg, None),
            ApiError::Internal(msg) => ("internal_error", msg, None),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        let message = err.to_string();
        match err {
            RegistryError::InvalidCodeShape(_)
            | RegistryError::InvalidCountryCode(_)
            | RegistryError::CountryNameMismatch { .. } => ApiError::BadRequest(message),
            RegistryError::NotFound(_) | RegistryError::HeadquartersNotFound(_) => {
                ApiError::NotFound(message)
            }
            RegistryError::HeadquartersMismatch(_)
            | RegistryError::DuplicateCode(_)
            | RegistryError::HasDependentBranches(_) => ApiError::Conflict(message),
            RegistryError::Storage(port) if port.is_transient() => {
                error!(error = %port, "Storage unavailable");
                ApiError::ServiceUnavailable("Storage is temporarily unavailable".to_string())
            }
            RegistryError::Storage(port) => {
                error!(error = %port, "Storage failure");
                ApiError::Internal("Internal storage error".to_string())
            }
        }
    }
}

impl From<CodeError> for ApiError {
    fn from(err: CodeError) -> Self {
        RegistryError::from(err).into()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        details.sort();
        ApiError::validation("Validation failed", details)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::PortError;
    use domain_bank::MismatchDirection;

    #[test]
    fn test_registry_status_mapping() {
        let cases = [
            (RegistryError::InvalidCodeShape("X".into()), StatusCode::BAD_REQUEST),
            (RegistryError::InvalidCountryCode("ZZ".into()), StatusCode::BAD_REQUEST),
            (
                RegistryError::CountryNameMismatch {
                    submitted: "Czechia".into(),
                    expected: "Poland".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (RegistryError::NotFound("X".into()), StatusCode::NOT_FOUND),
            (RegistryError::HeadquartersNotFound("X".into()), StatusCode::NOT_FOUND),
            (
                RegistryError::HeadquartersMismatch(
                    MismatchDirection::DeclaredBranchButHeadquartersCode,
                ),
                StatusCode::CONFLICT,
            ),
            (RegistryError::DuplicateCode("X".into()), StatusCode::CONFLICT),
            (RegistryError::HasDependentBranches("X".into()), StatusCode::CONFLICT),
            (
                RegistryError::Storage(PortError::ServiceUnavailable {
                    service: "postgres".into(),
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                RegistryError::Storage(PortError::internal("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_storage_details_are_not_leaked() {
        let err = ApiError::from(RegistryError::Storage(PortError::internal("password=secret")));
        assert!(!err.to_string().contains("secret"));
    }
}
