//! Defines the endpoint for fetching a single transaction.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error, database_id::TransactionId, response::ApiResponse, user::UserID,
};

use super::{db::get_transaction, models::TransactionKind};

/// A route handler for fetching one of the caller's transactions.
pub async fn get_transaction_endpoint(
    Extension(kind): Extension<TransactionKind>,
    Extension(user_id): Extension<UserID>,
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Response, Error> {
    let transaction = {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
        get_transaction(kind, transaction_id, user_id, &connection)?
    };

    Ok(ApiResponse::data(transaction).into_response())
}
