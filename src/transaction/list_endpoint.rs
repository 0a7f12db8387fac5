//! Defines the endpoint for listing transactions with paging and filters.

use axum::{
    Extension,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState, Error,
    database_id::CategoryId,
    response::{ApiResponse, PageMeta},
    user::UserID,
};

use super::{
    db::{count_transactions, query_transactions},
    models::{TransactionFilter, TransactionKind, parse_tanggal},
};

/// The query parameters accepted by the transaction list endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    /// The one-based page number, defaults to 1.
    #[serde(default)]
    pub page: Option<u64>,
    /// The page size, defaults to 10 and is capped at 100.
    #[serde(default)]
    pub limit: Option<u64>,
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

/// Parse the date bounds and category of a list or total query.
pub(super) fn parse_filter(
    start_date: Option<&str>,
    end_date: Option<&str>,
    category_id: Option<CategoryId>,
) -> Result<TransactionFilter, Error> {
    let start_date = start_date.map(parse_tanggal).transpose()?;
    let end_date = end_date.map(parse_tanggal).transpose()?;

    Ok(TransactionFilter {
        start_date,
        end_date,
        category_id,
    })
}

/// A route handler for listing the caller's transactions, newest date first.
pub async fn list_transactions_endpoint(
    Extension(kind): Extension<TransactionKind>,
    Extension(user_id): Extension<UserID>,
    State(state): State<AppState>,
    query: Result<Query<TransactionListQuery>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(query) = query?;

    let filter = parse_filter(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        query.category_id,
    )?;
    let page_request = state.pagination_config.resolve(query.page, query.limit);

    let (transactions, total) = {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
        let transactions =
            query_transactions(kind, user_id, &filter, &page_request, &connection)?;
        let total = count_transactions(kind, user_id, &filter, &connection)?;

        (transactions, total)
    };

    Ok(ApiResponse::page(transactions, PageMeta::new(&page_request, total)).into_response())
}
