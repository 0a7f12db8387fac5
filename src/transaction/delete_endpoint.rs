//! Defines the endpoint for deleting a transaction.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, database_id::TransactionId, response::ApiResponse, user::UserID,
};

use super::{db::delete_transaction, models::TransactionKind};

/// A route handler for deleting one of the caller's transactions.
pub async fn delete_transaction_endpoint(
    Extension(kind): Extension<TransactionKind>,
    Extension(user_id): Extension<UserID>,
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
        delete_transaction(kind, transaction_id, user_id, &connection)?;
    }

    Ok(ApiResponse::message(&format!("{} berhasil dihapus", kind.label())).into_response())
}
