use nebula_engine::player::SeatProfile;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use warp::http::StatusCode;

use crate::errors::IntoErrorResponse;

/// Id of the user who plays the hero seat.
pub const HERO_ID: &str = "nebula-pilot";

/// Public part of a user record, as returned by `/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub stack: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl UserProfile {
    pub fn seat_profile(&self) -> SeatProfile {
        let profile = SeatProfile::new(&self.id, &self.name, &self.avatar, self.stack);
        match &self.title {
            Some(title) => profile.with_title(title),
            None => profile,
        }
    }
}

/// Entry of the user directory (`users.json`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub password: String,
}

pub fn default_hero_profile() -> UserProfile {
    UserProfile {
        id: HERO_ID.into(),
        name: "Nebula Pilot".into(),
        email: "pilot@nebula.gg".into(),
        avatar: "🂡".into(),
        stack: 150_000,
        title: Some("Masters Feature Seat".into()),
    }
}

/// The hero's profile from the directory, or the built-in one.
pub fn hero_profile(users: &[UserRecord]) -> UserProfile {
    users
        .iter()
        .find(|user| user.profile.id == HERO_ID)
        .map(|user| user.profile.clone())
        .unwrap_or_else(default_hero_profile)
}

/// Email matches case-insensitively, password exactly.
pub fn resolve_login(users: &[UserRecord], email: &str, password: &str) -> Option<UserProfile> {
    users
        .iter()
        .find(|user| user.profile.email.eq_ignore_ascii_case(email) && user.password == password)
        .map(|user| user.profile.clone())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email and password are required.")]
    CredentialsRequired,
    #[error("Invalid credentials.")]
    InvalidCredentials,
}

impl IntoErrorResponse for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::CredentialsRequired => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AuthError::CredentialsRequired => "credentials_required",
            AuthError::InvalidCredentials => "invalid_credentials",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }
}
