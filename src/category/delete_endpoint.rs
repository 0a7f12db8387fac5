//! Defines the endpoint for deleting a category.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{AppState, Error, database_id::CategoryId, response::ApiResponse};

use super::db::delete_category;

/// A route handler for deleting a category.
///
/// Deletion is refused while any transaction still references the category.
pub async fn delete_category_endpoint(
    State(state): State<AppState>,
    Path(category_id): Path<CategoryId>,
) -> Result<Response, Error> {
    {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
        delete_category(category_id, &connection)?;
    }

    Ok(ApiResponse::message("Kategori berhasil dihapus").into_response())
}
