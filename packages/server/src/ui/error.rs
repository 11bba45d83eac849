//! HTTP error responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    domain::{RepositoryError, ValueObjectError},
    infrastructure::dto::{FieldError, http::ErrorResponseDto},
    usecase::{CreateNotificationError, InboxError},
};

/// Error returned by HTTP handlers, rendered as `{"error": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Details are logged, never sent to the client
    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(detail) => {
                tracing::error!("Request failed: {}", detail);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorResponseDto {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(err: ValueObjectError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<CreateNotificationError> for ApiError {
    fn from(err: CreateNotificationError) -> Self {
        match err {
            CreateNotificationError::Persistence(e) => e.into(),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<InboxError> for ApiError {
    fn from(err: InboxError) -> Self {
        match err {
            InboxError::NotFound(_) => ApiError::NotFound(err.to_string()),
            InboxError::Persistence(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        // テスト項目: エラー種別ごとに適切な HTTP ステータスになる
        let cases = [
            (
                ApiError::from(FieldError::Missing("senderId")),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::from(InboxError::NotFound(3)), StatusCode::NOT_FOUND),
            (
                ApiError::from(RepositoryError::Storage("io".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(CreateNotificationError::MissingText),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_internal_error_hides_details() {
        // テスト項目: 500 エラーの本文には内部の詳細を含めない
        let error = ApiError::from(RepositoryError::Storage("secret path".to_string()));

        assert_eq!(error.to_string(), "Internal server error");
    }
}
