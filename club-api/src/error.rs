use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use club_core::{view::FieldErrors, CoreError};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Per-field messages produced by the form validation engine.
    #[error("Invalid fields: {0:?}")]
    FieldErrors(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("JWT error: {0}")]
    Jwt(String),
}

impl ApiError {
    /// Single-field failure, reported the same way as a form error.
    pub fn field(name: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(name.to_string(), message.into());
        ApiError::FieldErrors(errors)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => ApiError::Validation(msg),
            CoreError::NotFound(msg) => ApiError::NotFound(msg),
            CoreError::AlreadyExists(msg) => ApiError::Conflict(msg),
            CoreError::InvalidState(msg) => ApiError::Conflict(msg),
            CoreError::Unauthorized(_) => ApiError::Unauthorized,
            CoreError::Internal(msg) | CoreError::Serialization(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    (field.to_string(), message)
                })
            })
            .collect();
        ApiError::FieldErrors(fields)
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ApiError::Jwt(err.to_string())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "Validation error", Some(json!(msg))),
            ApiError::FieldErrors(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed",
                Some(json!(fields)),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "Resource not found", Some(json!(msg))),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden", None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad request", Some(json!(msg))),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", Some(json!(msg))),
            ApiError::Jwt(msg) => (StatusCode::UNAUTHORIZED, "JWT error", Some(json!(msg))),
        };

        let mut response_json = json!({
            "error": message,
        });

        if let Some(details) = details {
            response_json["details"] = details;
        }

        (status, Json(response_json)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_status() {
        let cases = [
            (CoreError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (CoreError::AlreadyExists("x".into()), StatusCode::CONFLICT),
            (CoreError::InvalidState("x".into()), StatusCode::CONFLICT),
            (CoreError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (CoreError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (CoreError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_field_errors_are_unprocessable() {
        let response = ApiError::field("name", "This field is required").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
