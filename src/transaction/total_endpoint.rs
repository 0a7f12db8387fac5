//! Defines the endpoint for the filtered total of a ledger.

use axum::{
    Extension,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, database_id::CategoryId, response::ApiResponse, user::UserID};

use super::{db::sum_transactions, list_endpoint::parse_filter, models::TransactionKind};

/// The query parameters accepted by the total endpoint: the same filters as
/// the list endpoint, without paging.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTotalQuery {
    /// Only include transactions on or after this date.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Only include transactions on or before this date.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Only include transactions under this category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// The exact total over the matching transactions.
#[derive(Debug, Serialize)]
pub struct TotalSummary {
    /// The summed amount, serialized as an exact JSON number.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total: Decimal,
    /// The number of transactions summed.
    pub count: u64,
}

/// A route handler for summing the caller's transactions.
pub async fn total_transactions_endpoint(
    Extension(kind): Extension<TransactionKind>,
    Extension(user_id): Extension<UserID>,
    State(state): State<AppState>,
    query: Result<Query<TransactionTotalQuery>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(query) = query?;

    let filter = parse_filter(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        query.category_id,
    )?;

    let (total, count) = {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
        sum_transactions(kind, user_id, &filter, &connection)?
    };

    Ok(ApiResponse::data(TotalSummary { total, count }).into_response())
}
