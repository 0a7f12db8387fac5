//! Defines the endpoint for creating a category.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{AppState, Error, response::ApiResponse};

use super::{db::create_category, models::CategoryType};

/// The request body for creating a category.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryPayload {
    /// The display name of the category.
    #[serde(default)]
    pub name: Option<String>,
    /// Either `INCOME` or `EXPENSE`, case-insensitive.
    #[serde(default, rename = "type")]
    pub category_type: Option<String>,
    /// The icon name, defaults to `wallet` if omitted.
    #[serde(default)]
    pub icon: Option<String>,
}

/// A route handler for creating a category.
pub async fn create_category_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(payload) = payload?;

    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::Validation("Nama kategori harus diisi".to_owned()))?;

    let category_type = payload
        .category_type
        .as_deref()
        .and_then(CategoryType::parse)
        .ok_or_else(|| {
            Error::Validation("Tipe kategori harus INCOME atau EXPENSE".to_owned())
        })?;

    let icon = payload
        .icon
        .as_deref()
        .map(str::trim)
        .filter(|icon| !icon.is_empty());

    let category = {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
        create_category(name, category_type, icon, &connection)?
    };

    Ok((
        StatusCode::CREATED,
        ApiResponse::data_with_message(category, "Kategori berhasil ditambahkan"),
    )
        .into_response())
}
