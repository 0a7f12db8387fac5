//! Defines the endpoint for creating a new user account.

use std::str::FromStr;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use email_address::EmailAddress;
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::{AuthData, PasswordHash, UserSummary, issue_token},
    response::ApiResponse,
    user::create_user,
};

/// The request body for creating an account.
///
/// All fields are declared optional so that missing fields produce the
/// contract's validation message instead of a deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterPayload {
    /// The email address to register with.
    #[serde(default)]
    pub email: Option<String>,
    /// The account password, at least eight characters.
    #[serde(default)]
    pub password: Option<String>,
    /// The user's display name.
    #[serde(default)]
    pub full_name: Option<String>,
}

/// A route handler for creating a new user account.
///
/// On success, responds with 201 and the new user plus a signed session
/// token, so the client is logged in immediately.
pub async fn register_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<RegisterPayload>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(payload) = payload?;

    let (Some(email), Some(password), Some(full_name)) =
        (payload.email, payload.password, payload.full_name)
    else {
        return Err(Error::Validation(
            "Email, password, and full name are required".to_owned(),
        ));
    };

    let full_name = full_name.trim();
    if email.trim().is_empty() || password.is_empty() || full_name.is_empty() {
        return Err(Error::Validation(
            "Email, password, and full name are required".to_owned(),
        ));
    }

    let email = EmailAddress::from_str(email.trim())
        .map_err(|_| Error::Validation("Invalid email format".to_owned()))?;

    if password.chars().count() < 8 {
        return Err(Error::PasswordTooShort);
    }

    let password_hash = PasswordHash::from_raw_password(&password, PasswordHash::DEFAULT_COST)?;

    let user = {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
        create_user(&email, full_name, &password_hash, &connection)?
    };

    let token = issue_token(
        user.id,
        email.as_str(),
        state.token_duration,
        &state.jwt_keys.encoding,
    )?;

    tracing::info!("registered user {}", user.id.as_i64());

    Ok((
        StatusCode::CREATED,
        ApiResponse::data_with_message(
            AuthData {
                user: UserSummary::from(&user),
                token,
            },
            "Registration successful",
        ),
    )
        .into_response())
}
