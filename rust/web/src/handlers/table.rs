use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use warp::http::StatusCode;
use warp::reply::Response;

use super::{lenient_body, success_response};
use crate::errors::IntoErrorResponse;
use crate::session::{SessionError, TableSession};

#[derive(Debug, Default, Deserialize)]
pub struct ActionRequest {
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ActionRequestError {
    #[error("Action is required.")]
    ActionRequired,
}

impl IntoErrorResponse for ActionRequestError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_code(&self) -> &'static str {
        "action_required"
    }

    fn error_message(&self) -> String {
        self.to_string()
    }
}

/// `GET /table`: the masked table view.
pub async fn get_table(session: Arc<TableSession>) -> Response {
    match session.sanitized_state() {
        Ok(view) => success_response(StatusCode::OK, view),
        Err(err) => session_error(err),
    }
}

/// `POST /table/new-hand`: deals a new hand and returns the masked view.
pub async fn new_hand(session: Arc<TableSession>) -> Response {
    match session.start_new_hand() {
        Ok(view) => success_response(StatusCode::OK, view),
        Err(err) => session_error(err),
    }
}

/// `POST /table/action` with body `{"action": "fold|call|raise|check|bet"}`.
///
/// Responds with the masked view after the hero's move and every bot response
/// it triggered. Engine rejections are 400s, except `deck_exhausted` (500).
pub async fn apply_action(session: Arc<TableSession>, body: &[u8]) -> Response {
    let request: ActionRequest = lenient_body(body);
    let Some(action) = request.action.filter(|a| !a.trim().is_empty()) else {
        return ActionRequestError::ActionRequired.into_http_response();
    };

    match session.apply_hero_action(&action) {
        Ok((_, view)) => success_response(StatusCode::OK, view),
        Err(err) => session_error(err),
    }
}

fn session_error(err: SessionError) -> Response {
    err.into_http_response()
}
