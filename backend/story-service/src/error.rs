/// Error types for story-service
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Target user, story or comment is absent
    #[error("not found: {0}")]
    NotFound(String),

    /// Request is well-formed but violates an operation rule
    /// (self-follow, non-owner edit, empty or oversized fields)
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Transient store failure; the caller may retry
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),

    /// A duplicate edge or membership reached the store. The unique keys
    /// make this unreachable through the service API; seeing it means an
    /// invariant broke upstream.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// True when the underlying store error is a foreign-key violation.
    /// Toggles use this to report a target that vanished mid-request as
    /// NotFound instead of a store failure.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            ServiceError::StoreUnavailable(sqlx::Error::Database(db)) => {
                db.code().as_deref() == Some("23503")
            }
            _ => false,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.code().as_deref() == Some("23505") {
                return ServiceError::ConstraintViolation(db.message().to_string());
            }
        }
        ServiceError::StoreUnavailable(err)
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidOperation(_) => StatusCode::BAD_REQUEST,
            ServiceError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::ConstraintViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
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
