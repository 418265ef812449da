//! Error bodies and the status/severity mapping every handler error goes through.
use serde::{Deserialize, Serialize};
use std::fmt;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

/// JSON body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "table_idle")
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        reply::with_status(reply::json(&self), status).into_response()
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

/// Error classification for logging levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Rejected request (4xx), part of normal play.
    Client,
    /// Unexpected failure (5xx).
    Server,
    /// Broken table invariant.
    Critical,
}

pub trait IntoErrorResponse {
    fn status_code(&self) -> StatusCode;

    /// Machine-readable code placed in the `error` field.
    fn error_code(&self) -> &'static str;

    fn error_message(&self) -> String;

    fn error_details(&self) -> Option<serde_json::Value> {
        None
    }

    fn severity(&self) -> ErrorSeverity {
        if self.status_code().is_server_error() {
            ErrorSeverity::Server
        } else {
            ErrorSeverity::Client
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        if let Some(details) = self.error_details() {
            ErrorResponse::with_details(self.error_code(), self.error_message(), details)
        } else {
            ErrorResponse::new(self.error_code(), self.error_message())
        }
    }

    /// Logs the error at its severity and renders the HTTP response.
    fn into_http_response(self) -> Response
    where
        Self: Sized,
    {
        let status = self.status_code();
        let severity = self.severity();
        let error_response = self.to_error_response();
        log_error(severity, status, &error_response);
        error_response.into_response(status)
    }
}

fn log_error(severity: ErrorSeverity, status: StatusCode, error: &ErrorResponse) {
    match severity {
        ErrorSeverity::Client => tracing::info!(
            status = status.as_u16(),
            error = %error.error,
            "client error: {}",
            error.message
        ),
        ErrorSeverity::Server => tracing::error!(
            status = status.as_u16(),
            error = %error.error,
            "server error: {}",
            error.message
        ),
        ErrorSeverity::Critical => tracing::error!(
            status = status.as_u16(),
            error = %error.error,
            critical = true,
            "critical error: {}",
            error.message
        ),
    }
}
