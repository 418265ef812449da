pub mod auth;
pub mod table;

pub use auth::{login, LoginRequest};
pub use table::{apply_action, get_table, new_hand, ActionRequest};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

/// Liveness probe body: `{"status":"ok"}`.
pub fn health() -> Response {
    success_response(StatusCode::OK, json!({ "status": "ok" }))
}

fn success_response<T>(status: StatusCode, body: T) -> Response
where
    T: Serialize,
{
    reply::with_status(reply::json(&body), status).into_response()
}

/// Reads an optional JSON object body. A missing or malformed body reads as `{}`
/// so that handlers can answer with their own "field required" errors.
fn lenient_body<T>(body: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    serde_json::from_slice(body).unwrap_or_default()
}
