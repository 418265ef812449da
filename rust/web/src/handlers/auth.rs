use std::sync::Arc;

use serde::Deserialize;
use warp::http::StatusCode;
use warp::reply::Response;

use super::{lenient_body, success_response};
use crate::auth::AuthError;
use crate::errors::IntoErrorResponse;
use crate::session::TableSession;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// `POST /login`: checks the credentials against the user directory and returns
/// the profile without its password.
pub async fn login(session: Arc<TableSession>, body: &[u8]) -> Response {
    let request: LoginRequest = lenient_body(body);
    let present = |field: Option<String>| field.filter(|v| !v.is_empty());
    let (Some(email), Some(password)) = (present(request.email), present(request.password)) else {
        return AuthError::CredentialsRequired.into_http_response();
    };

    match session.resolve_login(&email, &password) {
        Some(profile) => {
            tracing::info!(user = %profile.id, "login accepted");
            success_response(StatusCode::OK, profile)
        }
        None => AuthError::InvalidCredentials.into_http_response(),
    }
}
