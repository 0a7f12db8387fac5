//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Extension, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};

use crate::{
    AppState,
    auth::{auth_guard, log_in_endpoint, register_endpoint},
    category::{
        create_category_endpoint, delete_category_endpoint, edit_category_endpoint,
        list_categories_endpoint,
    },
    endpoints,
    response::ApiResponse,
    transaction::{
        TransactionKind, create_transaction_endpoint, delete_transaction_endpoint,
        edit_transaction_endpoint, get_transaction_endpoint, list_transactions_endpoint,
        total_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::REGISTER, post(register_endpoint))
        .route(endpoints::LOG_IN, post(log_in_endpoint));

    let protected_routes = Router::new()
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            put(edit_category_endpoint).delete(delete_category_endpoint),
        )
        .merge(transaction_routes(
            TransactionKind::Income,
            endpoints::INCOME,
            endpoints::INCOME_TOTAL,
            endpoints::INCOME_ENTRY,
        ))
        .merge(transaction_routes(
            TransactionKind::Expense,
            endpoints::EXPENSE,
            endpoints::EXPENSE_TOTAL,
            endpoints::EXPENSE_ENTRY,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    unprotected_routes
        .merge(protected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The routes for one transaction ledger.
///
/// The same handlers serve both ledgers; the [Extension] layer tells them
/// which one this sub-router belongs to.
fn transaction_routes(
    kind: TransactionKind,
    list_path: &str,
    total_path: &str,
    entry_path: &str,
) -> Router<AppState> {
    Router::new()
        .route(
            list_path,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(total_path, get(total_transactions_endpoint))
        .route(
            entry_path,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .layer(Extension(kind))
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        ApiResponse::failure("Not found", "Endpoint tidak ditemukan"),
    )
        .into_response()
}
