//! Defines the endpoint for listing categories.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{AppState, Error, response::ApiResponse};

use super::{db::list_categories, models::CategoryType};

/// The query parameters accepted by the category list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListQuery {
    /// Restrict the listing to one type, either `INCOME` or `EXPENSE`.
    #[serde(default, rename = "type")]
    pub category_type: Option<String>,
}

/// A route handler for listing categories, ordered by name.
pub async fn list_categories_endpoint(
    State(state): State<AppState>,
    query: Result<Query<CategoryListQuery>, QueryRejection>,
) -> Result<Response, Error> {
    let Query(query) = query?;

    let category_type = match query.category_type.as_deref() {
        Some(raw) => Some(CategoryType::parse(raw).ok_or_else(|| {
            Error::Validation("Tipe kategori harus INCOME atau EXPENSE".to_owned())
        })?),
        None => None,
    };

    let categories = {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
        list_categories(category_type, &connection)?
    };

    Ok(ApiResponse::data(categories).into_response())
}
