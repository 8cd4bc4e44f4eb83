//! Failure mapping at the engine boundary.
//!
//! Every engine error is recovered into a structured `{kind, message}`
//! JSON body: client mistakes (unrecognised labels) map to 400, domain
//! errors on the loaded graph (disconnected, division by zero, missed
//! convergence, invariant violations) map to 422, anything else to
//! 500. No error terminates the process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use meshwork_core::CoreError;
use meshwork_graph::EngineError;
use serde::Serialize;

/// Structured failure body returned for every recovered error.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    /// Stable machine-readable failure kind.
    pub kind: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Error type returned by every handler.
#[derive(Debug)]
pub struct ServerError(pub EngineError);

impl From<EngineError> for ServerError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl From<CoreError> for ServerError {
    fn from(err: CoreError) -> Self {
        Self(EngineError::from(err))
    }
}

impl ServerError {
    /// The stable failure kind reported to clients.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self.0 {
            EngineError::DisconnectedGraph => "disconnected_graph",
            EngineError::DivisionByZero(_) => "division_by_zero",
            EngineError::Convergence { .. } => "convergence",
            EngineError::InvariantViolation { .. } => "invariant_violation",
            EngineError::UnknownLabel(_) => "unknown_label",
            EngineError::UnknownNode(_) => "unknown_node",
            EngineError::NodeAlreadyExists(_) => "node_already_exists",
            EngineError::Internal(_) => "internal",
        }
    }

    /// The HTTP status the failure maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0 {
            EngineError::UnknownLabel(_) => StatusCode::BAD_REQUEST,
            EngineError::DisconnectedGraph
            | EngineError::DivisionByZero(_)
            | EngineError::Convergence { .. }
            | EngineError::InvariantViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            EngineError::UnknownNode(_)
            | EngineError::NodeAlreadyExists(_)
            | EngineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = FailureBody { kind: self.kind(), message: self.0.to_string() };
        (self.status(), Json(body)).into_response()
    }
}
