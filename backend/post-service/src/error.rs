/// Error types for post-service
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;
use uuid::Uuid;

use crate::models::ReactionKind;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("post not found: {0}")]
    NotFound(Uuid),

    #[error("the post has expired")]
    PostExpired,

    #[error("users cannot {0} their own post")]
    SelfInteraction(ReactionKind),

    #[error("user has already {0}d this post")]
    DuplicateInteraction(ReactionKind),

    #[error("invalid comment message: {0}")]
    InvalidMessage(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("storage error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PostExpired => StatusCode::GONE,
            AppError::SelfInteraction(_) => StatusCode::FORBIDDEN,
            AppError::DuplicateInteraction(_) => StatusCode::CONFLICT,
            AppError::InvalidMessage(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_distinct_status_codes() {
        assert_eq!(
            AppError::NotFound(Uuid::nil()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::PostExpired.status_code(), StatusCode::GONE);
        assert_eq!(
            AppError::SelfInteraction(ReactionKind::Dislike).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::DuplicateInteraction(ReactionKind::Like).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InvalidMessage("empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthenticated("missing header".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn duplicate_message_names_the_kind() {
        let err = AppError::DuplicateInteraction(ReactionKind::Like);
        assert_eq!(err.to_string(), "user has already liked this post");
    }
}
