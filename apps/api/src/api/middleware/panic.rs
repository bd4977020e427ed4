use axum::response::{IntoResponse, Response};
use std::any::Any;

use crate::api::errors::{ApiError, INTERNAL_ERROR};

/// Converts a handler panic into a generic 500 envelope
///
/// Used with `tower_http::catch_panic::CatchPanicLayer::custom`. The panic
/// payload is logged and never sent to the client.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(%detail, "request handler panicked");

    ApiError::internal_server_error(INTERNAL_ERROR).into_response()
}
