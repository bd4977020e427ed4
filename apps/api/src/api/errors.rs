use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::api::response::ApiResponse;
use crate::domain::agent::AgentError;

/// Message returned for every agent lookup miss
pub const AGENT_NOT_FOUND: &str = "Agent not found";
/// Message returned for faults whose detail must stay server-side
pub const INTERNAL_ERROR: &str = "Internal server error";

/// API error type with HTTP status code, message and optional details
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub data: Option<Value>,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }

    /// Attaches structured details to the error body
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 409 Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::failure(self.message, self.data));

        (self.status, body).into_response()
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::NotFound(id) => {
                tracing::debug!(%id, "agent lookup missed");
                Self::not_found(AGENT_NOT_FOUND)
            }
            AgentError::DuplicateCode(_) => Self::conflict(err.to_string()),
            AgentError::InvalidStatus(_) | AgentError::Validation(_) => {
                Self::bad_request(err.to_string())
            }
            AgentError::IllegalTransition {
                from,
                to,
                ref allowed,
            } => {
                let data = json!({
                    "currentStatus": from,
                    "requestedStatus": to,
                    "validTransitions": allowed,
                });
                Self::bad_request(err.to_string()).with_data(data)
            }
            AgentError::Unexpected(detail) => {
                tracing::error!(%detail, "unexpected fault");
                Self::internal_server_error(INTERNAL_ERROR)
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(status = %rejection.status(), "request body rejected");
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!(status = %rejection.status(), "query string rejected");
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent::AgentStatus;

    #[test]
    fn not_found_hides_the_raw_id() {
        let err = ApiError::from(AgentError::NotFound("abc".to_string()));

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, AGENT_NOT_FOUND);
    }

    #[test]
    fn duplicate_code_is_a_conflict() {
        let err = ApiError::from(AgentError::DuplicateCode("AG-1".to_string()));

        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.message, "Agent code AG-1 already exists");
    }

    #[test]
    fn illegal_transition_carries_valid_transitions() {
        let err = ApiError::from(AgentError::IllegalTransition {
            from: AgentStatus::Available,
            to: AgentStatus::InMeeting,
            allowed: AgentStatus::Available.allowed_transitions().to_vec(),
        });

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        let data = err.data.expect("details");
        assert_eq!(data["currentStatus"], "available");
        assert_eq!(data["requestedStatus"], "in_meeting");
        assert_eq!(data["validTransitions"], json!(["busy", "offline", "away"]));
    }

    #[test]
    fn unexpected_fault_hides_detail() {
        let err = ApiError::from(AgentError::Unexpected("lock poisoned".to_string()));

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, INTERNAL_ERROR);
    }
}
