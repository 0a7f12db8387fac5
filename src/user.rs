//! The user account model and its database queries.

use email_address::EmailAddress;
use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{Error, auth::PasswordHash, database_id::DatabaseId};

/// Uniquely identifies a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserID(DatabaseId);

impl UserID {
    /// Create a user ID from a raw row ID.
    pub const fn new(id: DatabaseId) -> Self {
        Self(id)
    }

    /// The underlying row ID.
    pub fn as_i64(&self) -> DatabaseId {
        self.0
    }
}

/// A registered user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The ID of the user.
    pub id: UserID,
    /// The email address the user registered with. Unique per user.
    pub email: EmailAddress,
    /// The user's display name.
    pub full_name: String,
    /// The bcrypt hash of the user's password.
    pub password_hash: PasswordHash,
}

/// Create a new user account in the database.
///
/// # Errors
/// Returns [Error::DuplicateEmail] if the email address is already registered,
/// or [Error::SqlError] if there is some other SQL error.
pub fn create_user(
    email: &EmailAddress,
    full_name: &str,
    password_hash: &PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user_account (email, password, full_name, created_at) VALUES (?1, ?2, ?3, ?4)",
        (
            email.as_str(),
            password_hash.to_string(),
            full_name,
            OffsetDateTime::now_utc(),
        ),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        email: email.clone(),
        full_name: full_name.to_owned(),
        password_hash: password_hash.clone(),
    })
}

/// Get the user with the specified `email` address.
///
/// # Errors
/// Returns [Error::NotFound] if no user registered with that email address,
/// or [Error::SqlError] if there is some other SQL error.
pub fn get_user_by_email(email: &EmailAddress, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, email, password, full_name FROM user_account WHERE email = :email")?
        .query_row(&[(":email", email.as_str())], map_row)
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_email: String = row.get(1)?;
    let raw_password_hash: String = row.get(2)?;

    Ok(User {
        id: UserID::new(row.get(0)?),
        email: EmailAddress::new_unchecked(raw_email),
        full_name: row.get(3)?,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
    })
}
