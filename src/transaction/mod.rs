//! The income and expense ledgers and their endpoints.

pub mod db;
pub mod models;

mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod get_endpoint;
mod list_endpoint;
mod total_endpoint;

pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use models::{Transaction, TransactionKind};
pub use total_endpoint::total_transactions_endpoint;

use rusqlite::Connection;

use crate::{Error, category::db::get_category, database_id::CategoryId};

use models::MAX_CATATAN_LENGTH;

/// Check that `category_id` exists and has the type matching `kind`.
///
/// An unknown category is a validation failure here, not a missing resource:
/// the resource being addressed is the transaction, the category ID is just a
/// field of its payload.
fn resolve_category(
    kind: TransactionKind,
    category_id: CategoryId,
    connection: &Connection,
) -> Result<(), Error> {
    let category = get_category(category_id, connection).map_err(|error| match error {
        Error::CategoryNotFound => Error::Validation("Kategori tidak ditemukan".to_owned()),
        error => error,
    })?;

    if category.category_type != kind.category_type() {
        return Err(Error::Validation(format!(
            "Kategori harus bertipe {}",
            kind.category_type().as_str()
        )));
    }

    Ok(())
}

/// Trim a client-supplied note, mapping a blank note to no note.
fn normalize_catatan(raw: String) -> Result<Option<String>, Error> {
    let trimmed = raw.trim();

    if trimmed.chars().count() > MAX_CATATAN_LENGTH {
        return Err(Error::Validation("Catatan maksimal 500 karakter".to_owned()));
    }

    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_owned()))
    }
}
