use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::RepoError;

/// Body sent for every rejected authentication attempt.
pub const ACCESS_DENIED: &str = "Access Denied";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("access denied")]
    Unauthorized,
    #[error("validation failed")]
    Validation(Vec<String>),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Validation(messages) | RepoError::UniqueConstraint(messages) => {
                AppError::Validation(messages)
            }
            RepoError::Database(e) => AppError::Internal(e.into()),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => {
                let mut res =
                    (StatusCode::UNAUTHORIZED, Json(json!({ "message": ACCESS_DENIED })))
                        .into_response();
                res.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("Basic realm=\"courses\""),
                );
                res
            }
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::NotFound(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            AppError::Internal(e) => {
                error!(error = ?e, "unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_and_validation_failures_map_to_bad_request() {
        let res = AppError::from(RepoError::UniqueConstraint(vec!["dup".into()])).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = AppError::from(RepoError::Validation(vec!["bad".into()])).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_failures_reach_the_fallback() {
        let err = AppError::from(RepoError::Database(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_asks_for_basic_auth() {
        let res = AppError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Basic realm=\"courses\""
        );
    }

    #[test]
    fn not_found_is_reported_as_bad_request() {
        let res = AppError::NotFound("Course not found".into()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
