//! Defines the app level error type and its conversion into the JSON envelope.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{response::ApiResponse, transaction::TransactionKind};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body failed a per-field validation rule.
    #[error("{0}")]
    Validation(String),

    /// The password supplied at registration is shorter than eight characters.
    #[error("password must be at least 8 characters long")]
    PasswordTooShort,

    /// The email is unknown or the password does not match. Deliberately
    /// carries no hint about which of the two it was.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The `Authorization` header is missing or is not a bearer token.
    #[error("missing or malformed bearer token")]
    TokenMissing,

    /// The bearer token failed signature or claim validation.
    #[error("invalid bearer token")]
    TokenInvalid,

    /// The bearer token has expired.
    #[error("expired bearer token")]
    TokenExpired,

    /// A signing operation with the token library failed.
    ///
    /// The error string should only be logged on the server, never sent to
    /// the client.
    #[error("could not sign token: {0}")]
    TokenCreation(String),

    /// An unexpected error occurred with the underlying hashing library.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// A query returned no rows. Mapped to a resource specific not-found
    /// variant by the query layer before it reaches a handler.
    #[error("the requested row could not be found")]
    NotFound,

    /// The category ID does not refer to an existing category.
    #[error("the category could not be found")]
    CategoryNotFound,

    /// The transaction does not exist or is not owned by the caller.
    ///
    /// The same variant covers both cases so that the existence of other
    /// users' records never leaks.
    #[error("the transaction could not be found")]
    TransactionNotFound(TransactionKind),

    /// The email address is already registered.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// A category with the same (name, type) pair already exists.
    #[error("a category with the same name and type already exists")]
    DuplicateCategory,

    /// The category is referenced by the given number of transactions and
    /// cannot be deleted.
    #[error("the category is still referenced by {0} transactions")]
    CategoryInUse(i64),

    /// The category's type cannot change while the given number of
    /// transactions reference it.
    #[error("the category type cannot change while {0} transactions reference it")]
    CategoryTypeInUse(i64),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user_account.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("category.name") =>
            {
                Error::DuplicateCategory
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, error, message) = match self {
            Error::Validation(message) => {
                (StatusCode::BAD_REQUEST, "Validation error", message)
            }
            Error::PasswordTooShort => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation error",
                "Password must be at least 8 characters long".to_owned(),
            ),
            Error::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Authentication failed",
                "Invalid email or password".to_owned(),
            ),
            Error::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                "Token tidak ditemukan atau format token salah".to_owned(),
            ),
            Error::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                "Invalid token",
                "Token tidak valid".to_owned(),
            ),
            Error::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "Token expired",
                "Token sudah kadaluarsa, silakan login kembali".to_owned(),
            ),
            Error::CategoryNotFound | Error::NotFound => (
                StatusCode::NOT_FOUND,
                "Not found",
                "Kategori tidak ditemukan".to_owned(),
            ),
            Error::TransactionNotFound(kind) => (
                StatusCode::NOT_FOUND,
                "Not found",
                format!("{} tidak ditemukan", kind.label()),
            ),
            Error::DuplicateEmail => (
                StatusCode::CONFLICT,
                "Conflict",
                "Email already registered".to_owned(),
            ),
            Error::DuplicateCategory => (
                StatusCode::CONFLICT,
                "Duplicate category",
                "Kategori dengan nama dan tipe yang sama sudah ada".to_owned(),
            ),
            Error::CategoryInUse(count) => (
                StatusCode::CONFLICT,
                "Category in use",
                format!(
                    "Kategori tidak dapat dihapus karena masih digunakan oleh {count} transaksi"
                ),
            ),
            Error::CategoryTypeInUse(count) => (
                StatusCode::CONFLICT,
                "Category in use",
                format!(
                    "Tipe kategori tidak dapat diubah karena masih digunakan oleh {count} transaksi"
                ),
            ),
            // Errors below are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    "Terjadi kesalahan pada server".to_owned(),
                )
            }
        };

        (status_code, ApiResponse::failure(error, &message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::transaction::TransactionKind;

    use super::Error;

    #[test]
    fn query_returned_no_rows_maps_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }

    #[test]
    fn validation_error_renders_bad_request() {
        let response = Error::Validation("Nama transaksi harus diisi".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn short_password_renders_unprocessable_entity() {
        let response = Error::PasswordTooShort.into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn conflict_errors_render_conflict_status() {
        for error in [
            Error::DuplicateEmail,
            Error::DuplicateCategory,
            Error::CategoryInUse(3),
        ] {
            let response = error.into_response();

            assert_eq!(response.status(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn transaction_not_found_renders_not_found() {
        let response = Error::TransactionNotFound(TransactionKind::Income).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
