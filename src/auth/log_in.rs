//! Defines the endpoint for logging in with an email and password.

use std::str::FromStr;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use email_address::EmailAddress;
use serde::Deserialize;

use crate::{
    AppState, Error,
    auth::{AuthData, UserSummary, issue_token},
    response::ApiResponse,
    user::get_user_by_email,
};

/// The request body for logging in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LogInPayload {
    /// The email address of the account.
    #[serde(default)]
    pub email: Option<String>,
    /// The account password.
    #[serde(default)]
    pub password: Option<String>,
}

/// A route handler for logging in.
///
/// Every failure after basic field validation maps to the same
/// [Error::InvalidCredentials] so the response does not reveal whether the
/// email is registered.
pub async fn log_in_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<LogInPayload>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(payload) = payload?;

    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(Error::Validation(
            "Email and password are required".to_owned(),
        ));
    };

    if email.trim().is_empty() || password.is_empty() {
        return Err(Error::Validation(
            "Email and password are required".to_owned(),
        ));
    }

    let email =
        EmailAddress::from_str(email.trim()).map_err(|_| Error::InvalidCredentials)?;

    let user = {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
        get_user_by_email(&email, &connection).map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?
    };

    if !user.password_hash.verify(&password)? {
        return Err(Error::InvalidCredentials);
    }

    let token = issue_token(
        user.id,
        email.as_str(),
        state.token_duration,
        &state.jwt_keys.encoding,
    )?;

    tracing::info!("user {} logged in", user.id.as_i64());

    Ok(ApiResponse::data_with_message(
        AuthData {
            user: UserSummary::from(&user),
            token,
        },
        "Login successful",
    )
    .into_response())
}
