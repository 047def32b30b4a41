use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use voyra_core::CoreError;
use voyra_shared::Envelope;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    RateLimitError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::RateLimitError(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        (status, Json(Envelope::failure(message))).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => AppError::ValidationError(msg),
            CoreError::Layout(err) => AppError::ValidationError(err.to_string()),
            CoreError::NotFound(msg) => AppError::NotFoundError(msg),
            err @ CoreError::SeatMapNotFound { .. } => AppError::NotFoundError(err.to_string()),
            CoreError::Conflict(msg) => AppError::ConflictError(msg),
            CoreError::Forbidden(msg) => AppError::AuthorizationError(msg),
            CoreError::Repository(msg) | CoreError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Anyhow(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;
    use voyra_catalog::TransportMode;

    fn status_of(err: CoreError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn test_core_errors_map_to_status_codes() {
        assert_eq!(status_of(CoreError::Validation("bad".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(CoreError::NotFound("gone".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(CoreError::Conflict("taken".into())), StatusCode::CONFLICT);
        assert_eq!(status_of(CoreError::Forbidden("no".into())), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(CoreError::SeatMapNotFound {
                mode: TransportMode::Bus,
                vehicle_id: Uuid::new_v4(),
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CoreError::Repository("connection reset".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unknown_class_is_a_bad_request() {
        let err = voyra_catalog::lookup(TransportMode::Flight, "Royal Suite").unwrap_err();
        assert!(err.is_unknown_class());
        assert_eq!(status_of(CoreError::Layout(err)), StatusCode::BAD_REQUEST);
    }
}
