//! API error shapes shared by all endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::schedule::ScheduleError;

/// A structured error response: user-visible message plus optional detail.
pub struct ApiErrorType {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl From<(StatusCode, &str, Option<String>)> for ApiErrorType {
    fn from((status, message, detail): (StatusCode, &str, Option<String>)) -> Self {
        Self {
            status,
            message: message.to_string(),
            detail,
        }
    }
}

impl IntoResponse for ApiErrorType {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.message,
            "detail": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}

/// Everything a request handler can fail with.
///
/// Authorization reasons stay distinct (sign-in vs admin); store failures
/// surface as a generic message with the cause in `detail`.
#[derive(Debug, Error)]
pub enum ApiFailure {
    #[error("Please sign in to modify the schedule.")]
    Unauthenticated,

    #[error("Admin access required to modify the schedule.")]
    Forbidden,

    #[error("No schedule entry with id {0}.")]
    NotFound(i64),

    #[error("Invalid schedule entry.")]
    InvalidEntry(#[from] ScheduleError),

    #[error("Failed to access the schedule store.")]
    Store(#[from] rusqlite::Error),
}

impl From<AuthError> for ApiFailure {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => ApiFailure::Unauthenticated,
            AuthError::Forbidden => ApiFailure::Forbidden,
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiFailure::Unauthenticated => (StatusCode::UNAUTHORIZED, None),
            ApiFailure::Forbidden => (StatusCode::FORBIDDEN, None),
            ApiFailure::NotFound(_) => (StatusCode::NOT_FOUND, None),
            ApiFailure::InvalidEntry(e) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Some(e.to_string()))
            }
            ApiFailure::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, Some(e.to_string())),
        };

        ApiErrorType::from((status, self.to_string().as_str(), detail)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_stay_distinct() {
        let unauthenticated = ApiFailure::from(AuthError::Unauthenticated);
        let forbidden = ApiFailure::from(AuthError::Forbidden);

        assert_eq!(
            unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(forbidden.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiFailure::NotFound(7).into_response().status(),
            StatusCode::NOT_FOUND
        );
        let invalid = ApiFailure::InvalidEntry(ScheduleError::InvalidTimeFormat {
            input: "9:00".into(),
        });
        assert_eq!(
            invalid.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
