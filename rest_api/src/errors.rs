// rest_api/src/errors.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde_json::json;
use thiserror::Error;

use lib::errors::StoreError;
use security::AuthError;

// Define the REST API error enum
#[derive(Debug, Error)]
pub enum RestApiError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Storage error: {0}")]
    Storage(StoreError),
    #[error("General error: {0}")]
    GeneralError(String),
}

impl RestApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestApiError::NotAuthenticated | RestApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            RestApiError::NotFound(_) => StatusCode::NOT_FOUND,
            RestApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RestApiError::Conflict(_) => StatusCode::CONFLICT,
            RestApiError::Storage(_) | RestApiError::GeneralError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show a client. Internal failures are logged, not echoed.
    pub fn public_message(&self) -> String {
        match self {
            RestApiError::Storage(e) => {
                error!("Storage failure while handling request: {}", e);
                "Internal server error".to_string()
            }
            RestApiError::GeneralError(msg) => {
                error!("Request failed: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for RestApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => RestApiError::NotFound(what),
            StoreError::MissingReference { table, id } => RestApiError::NotFound(format!("{} {}", table, id)),
            StoreError::UsernameTaken(_) => RestApiError::Conflict("Username already exists".to_string()),
            StoreError::EmailTaken(_) => RestApiError::Conflict("Email already registered".to_string()),
            StoreError::Validation(e) => RestApiError::InvalidInput(e.to_string()),
            StoreError::InvalidData(msg) => RestApiError::InvalidInput(msg),
            other => RestApiError::Storage(other),
        }
    }
}

impl From<AuthError> for RestApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserExists(_) => RestApiError::Conflict("Username already exists".to_string()),
            AuthError::EmailExists(_) => RestApiError::Conflict("Email already registered".to_string()),
            AuthError::InvalidCredentials => RestApiError::InvalidCredentials,
            AuthError::Validation(e) => RestApiError::InvalidInput(e.to_string()),
            other => RestApiError::GeneralError(other.to_string()),
        }
    }
}

// Implement IntoResponse for RestApiError to convert it into an HTTP response
impl IntoResponse for RestApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            RestApiError::NotAuthenticated => json!({ "error": "Not authenticated" }),
            other => json!({
                "status": "error",
                "message": other.public_message(),
            }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::ValidationError;

    #[test]
    fn store_errors_map_to_client_statuses() {
        let cases = [
            (StoreError::NotFound("doctor 9".into()), StatusCode::NOT_FOUND),
            (StoreError::MissingReference { table: "user", id: 3 }, StatusCode::NOT_FOUND),
            (StoreError::UsernameTaken("a".into()), StatusCode::CONFLICT),
            (StoreError::EmailTaken("a@b".into()), StatusCode::CONFLICT),
            (
                StoreError::Validation(ValidationError::EmptyField("child_name")),
                StatusCode::BAD_REQUEST,
            ),
            (StoreError::DatabaseError("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(RestApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err = RestApiError::from(StoreError::DatabaseError("sled io at /var/data".into()));
        assert_eq!(err.public_message(), "Internal server error");
    }
}
