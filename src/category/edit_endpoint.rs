//! Defines the endpoint for editing a category.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{AppState, Error, database_id::CategoryId, response::ApiResponse};

use super::{
    db::{CategoryUpdate, update_category},
    models::CategoryType,
};

/// The request body for editing a category. Every field is optional, omitted
/// fields keep their current value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EditCategoryPayload {
    /// The new display name.
    #[serde(default)]
    pub name: Option<String>,
    /// The new type, either `INCOME` or `EXPENSE`.
    #[serde(default, rename = "type")]
    pub category_type: Option<String>,
    /// The new icon name.
    #[serde(default)]
    pub icon: Option<String>,
}

/// A route handler for partially updating a category.
pub async fn edit_category_endpoint(
    State(state): State<AppState>,
    Path(category_id): Path<CategoryId>,
    payload: Result<Json<EditCategoryPayload>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(payload) = payload?;

    let name = match payload.name {
        Some(name) => {
            let name = name.trim().to_owned();
            if name.is_empty() {
                return Err(Error::Validation("Nama kategori harus diisi".to_owned()));
            }
            Some(name)
        }
        None => None,
    };

    let category_type = match payload.category_type.as_deref() {
        Some(raw) => Some(CategoryType::parse(raw).ok_or_else(|| {
            Error::Validation("Tipe kategori harus INCOME atau EXPENSE".to_owned())
        })?),
        None => None,
    };

    let icon = payload
        .icon
        .map(|icon| icon.trim().to_owned())
        .filter(|icon| !icon.is_empty());

    let update = CategoryUpdate {
        name,
        category_type,
        icon,
    };

    let category = {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
        update_category(category_id, update, &connection)?
    };

    Ok(ApiResponse::data_with_message(category, "Kategori berhasil diupdate").into_response())
}

#[cfg(test)]
mod edit_category_tests {
    use axum::{
        Json,
        extract::{Path, State},
        http::StatusCode,
    };

    use crate::{
        Error,
        app_state::test_utils::test_state,
        category::db::create_category,
        category::models::CategoryType,
    };

    use super::{EditCategoryPayload, edit_category_endpoint};

    #[tokio::test]
    async fn edit_category_renames_without_touching_other_fields() {
        let state = test_state();
        let category = {
            let connection = state.db_connection.lock().unwrap();
            create_category("Gaji", CategoryType::Income, Some("coins"), &connection).unwrap()
        };

        let response = edit_category_endpoint(
            State(state),
            Path(category.id),
            Ok(Json(EditCategoryPayload {
                name: Some("Gaji Bulanan".to_owned()),
                category_type: None,
                icon: None,
            })),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn edit_unknown_category_fails() {
        let state = test_state();

        let result = edit_category_endpoint(
            State(state),
            Path(999),
            Ok(Json(EditCategoryPayload {
                name: Some("Gaji".to_owned()),
                category_type: None,
                icon: None,
            })),
        )
        .await;

        assert_eq!(result.err(), Some(Error::CategoryNotFound));
    }

    #[tokio::test]
    async fn edit_category_rejects_blank_name() {
        let state = test_state();
        let category = {
            let connection = state.db_connection.lock().unwrap();
            create_category("Gaji", CategoryType::Income, None, &connection).unwrap()
        };

        let result = edit_category_endpoint(
            State(state),
            Path(category.id),
            Ok(Json(EditCategoryPayload {
                name: Some("  ".to_owned()),
                category_type: None,
                icon: None,
            })),
        )
        .await;

        assert_eq!(
            result.err(),
            Some(Error::Validation("Nama kategori harus diisi".to_owned()))
        );
    }
}
