//! HTTP rejections for guarded routes

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dealergate_core::access::DenialReason;
use serde_json::json;
use thiserror::Error;

/// Why a guarded request was turned away
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServerError {
    /// The session layer attached no principal
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(DenialReason),

    /// Route has no `dealer_id` path segment to scope against
    #[error("Missing dealer id in request path")]
    MissingDealer,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::MissingDealer => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = match &self {
            ServerError::Unauthenticated => json!({ "error": "unauthenticated" }),
            ServerError::Forbidden(reason) => json!({
                "error": "forbidden",
                "reason": reason,
            }),
            ServerError::MissingDealer => json!({ "error": "missing_dealer" }),
        };
        (self.status(), Json(body)).into_response()
    }
}
