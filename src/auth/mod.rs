//! Registration, login, and bearer-token verification.

mod log_in;
mod middleware;
mod password;
mod register;
mod token;

pub use log_in::log_in_endpoint;
pub use middleware::{AuthState, auth_guard};
pub use password::PasswordHash;
pub use register::register_endpoint;
pub use token::{Claims, issue_token, verify_token};

use serde::Serialize;

use crate::user::User;

/// The user fields safe to return to the client (no password hash).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// The ID of the user.
    pub id: i64,
    /// The user's email address.
    pub email: String,
    /// The user's display name.
    pub full_name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_i64(),
            email: user.email.to_string(),
            full_name: user.full_name.clone(),
        }
    }
}

/// The payload returned by both register and login: the user plus a signed
/// session token.
#[derive(Debug, Serialize)]
pub struct AuthData {
    /// The authenticated user.
    pub user: UserSummary,
    /// A signed session token for the `Authorization: Bearer` header.
    pub token: String,
}
