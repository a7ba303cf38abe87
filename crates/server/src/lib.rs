use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use api_types::error::ErrorResponse;
pub use server::{ServerState, app, run_with_listener, spawn_with_listener};

mod currency;
mod server;

/// The operation a request was performing when it failed.
///
/// Clients only ever see one generic message per operation: validation and
/// storage failures are not told apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    Fetch,
    Update,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "currency creation failed",
            Self::Fetch => "currency fetch failed",
            Self::Update => "currency update failed",
        }
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(Operation, EngineError),
    Body(Operation, JsonRejection),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            ServerError::Engine(_, EngineError::KeyNotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::Engine(..) | ServerError::Body(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error = match self {
            ServerError::Engine(op, EngineError::KeyNotFound(id)) => {
                tracing::warn!(?op, "currency {id} not found");
                "currency not found".to_string()
            }
            ServerError::Engine(op, err) if err.is_validation() => {
                tracing::warn!(?op, "{}: {err}", op.failure_message());
                op.failure_message().to_string()
            }
            ServerError::Engine(op, err) => {
                tracing::error!(?op, "{}: {err}", op.failure_message());
                op.failure_message().to_string()
            }
            ServerError::Body(op, rejection) => {
                tracing::error!(?op, "{}: invalid body: {rejection}", op.failure_message());
                op.failure_message().to_string()
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let res = ServerError::Engine(
            Operation::Update,
            EngineError::KeyNotFound("x".to_string()),
        )
        .into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_500() {
        let res = ServerError::Engine(
            Operation::Create,
            EngineError::InvalidRate("x".to_string()),
        )
        .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn database_maps_to_500() {
        let res = ServerError::Engine(
            Operation::Fetch,
            EngineError::Database(sea_orm_err()),
        )
        .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_are_per_operation() {
        assert_eq!(Operation::Create.failure_message(), "currency creation failed");
        assert_eq!(Operation::Fetch.failure_message(), "currency fetch failed");
        assert_eq!(Operation::Update.failure_message(), "currency update failed");
    }

    fn sea_orm_err() -> sea_orm::DbErr {
        sea_orm::DbErr::Custom("disk full".to_string())
    }
}
