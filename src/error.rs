use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use validator::ValidationErrors;

use crate::repository::RepositoryError;
use crate::services::{RenderError, UpstreamError};
use crate::storage::StoreError;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every failure a handler can return. The variant decides the status code
/// and the stable `kind` reported to clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed")]
    ValidationFailed(Vec<FieldViolation>),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    UpstreamFailure(#[from] UpstreamError),
    #[error(transparent)]
    StorageFailure(#[from] StoreError),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid(field: &str, message: &str) -> Self {
        ApiError::ValidationFailed(vec![FieldViolation::new(field, message)])
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::ValidationFailed(_) => "validation_failed",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::UpstreamFailure(_) => "upstream_failure",
            ApiError::StorageFailure(_) => "storage_failure",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(message) => ApiError::NotFound(message),
            RepositoryError::Conflict(message) => ApiError::Conflict(message),
            RepositoryError::Storage(err) => ApiError::StorageFailure(err),
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                let field = field.to_string();
                errors.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldViolation::new(field.clone(), message)
                })
            })
            .collect();
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::ValidationFailed(violations)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            ApiError::StorageFailure(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::StorageFailure(err) => {
                tracing::error!("Storage error {:?}", err);
                "Something went wrong".to_string()
            }
            ApiError::Internal(err) => {
                tracing::error!("Internal error {}", err);
                "Something went wrong".to_string()
            }
            ApiError::UpstreamFailure(err) => {
                tracing::error!("Upstream error {}", err);
                err.to_string()
            }
            other => other.to_string(),
        };
        let body = match self {
            ApiError::ValidationFailed(fields) => json!({
                "error": { "kind": self.kind(), "message": message, "fields": fields }
            }),
            _ => json!({
                "error": { "kind": self.kind(), "message": message }
            }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Malformed JSON bodies are reported like any other validation failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Rejected request body: {}", err);
    ApiError::invalid("body", &err.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Movie {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
        #[validate(length(min = 1, message = "Year is required"))]
        year: String,
    }

    #[test]
    fn every_violated_field_is_reported() {
        let movie = Movie {
            title: String::new(),
            year: String::new(),
        };
        let err = ApiError::from(movie.validate().unwrap_err());

        match err {
            ApiError::ValidationFailed(fields) => assert_eq!(
                fields,
                vec![
                    FieldViolation::new("title", "Title is required"),
                    FieldViolation::new("year", "Year is required"),
                ]
            ),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn kinds_map_to_status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(UpstreamError::new("email", "down")).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::from(RepositoryError::Storage(StoreError::Missing {
                name: "media".into()
            }))
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
