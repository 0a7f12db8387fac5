//! Defines the endpoint for recording a new transaction.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;

use crate::{AppState, Error, response::ApiResponse, user::UserID};

use super::{
    db::{NewTransaction, insert_transaction},
    models::{TransactionKind, TransactionPayload, parse_tanggal},
    normalize_catatan, resolve_category,
};

/// A route handler for recording a new income or expense transaction.
pub async fn create_transaction_endpoint(
    Extension(kind): Extension<TransactionKind>,
    Extension(user_id): Extension<UserID>,
    State(state): State<AppState>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(payload) = payload?;

    let nama = payload
        .nama
        .as_deref()
        .map(str::trim)
        .filter(|nama| !nama.is_empty())
        .ok_or_else(|| Error::Validation("Nama transaksi harus diisi".to_owned()))?
        .to_owned();

    let nominal = payload
        .nominal
        .filter(|nominal| *nominal > Decimal::ZERO)
        .ok_or_else(|| {
            Error::Validation("Nominal harus diisi dan lebih besar dari 0".to_owned())
        })?;

    let category_id = payload
        .category_id
        .ok_or_else(|| Error::Validation("Kategori harus dipilih".to_owned()))?;

    let raw_tanggal = payload
        .tanggal
        .as_deref()
        .map(str::trim)
        .filter(|tanggal| !tanggal.is_empty())
        .ok_or_else(|| Error::Validation("Tanggal harus diisi".to_owned()))?;
    let tanggal = parse_tanggal(raw_tanggal)?;

    let catatan = match payload.catatan.flatten() {
        Some(raw) => normalize_catatan(raw)?,
        None => None,
    };

    let transaction = {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;
        resolve_category(kind, category_id, &connection)?;

        insert_transaction(
            kind,
            user_id,
            NewTransaction {
                nama,
                nominal,
                category_id,
                tanggal,
                catatan,
            },
            &connection,
        )?
    };

    Ok((
        StatusCode::CREATED,
        ApiResponse::data_with_message(
            transaction,
            &format!("{} berhasil ditambahkan", kind.label()),
        ),
    )
        .into_response())
}

#[cfg(test)]
mod create_transaction_tests {
    use axum::{Extension, Json, extract::State, http::StatusCode};
    use serde_json::json;

    use crate::{
        AppState, Error,
        app_state::test_utils::test_state,
        category::{CategoryType, db::create_category},
        database_id::CategoryId,
        transaction::models::{TransactionKind, TransactionPayload},
        user::UserID,
    };

    use super::create_transaction_endpoint;

    fn state_with_category(category_type: CategoryType) -> (AppState, CategoryId) {
        let state = test_state();
        let category = {
            let connection = state.db_connection.lock().unwrap();
            create_category("Test", category_type, None, &connection).unwrap()
        };

        (state, category.id)
    }

    fn payload(value: serde_json::Value) -> TransactionPayload {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn create_transaction_succeeds() {
        let (state, category_id) = state_with_category(CategoryType::Income);

        let response = create_transaction_endpoint(
            Extension(TransactionKind::Income),
            Extension(UserID::new(1)),
            State(state),
            Ok(Json(payload(json!({
                "nama": "Gaji Juli",
                "nominal": 5000000,
                "categoryId": category_id,
                "tanggal": "2024-07-25",
            })))),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn create_transaction_validates_required_fields_in_order() {
        let (state, category_id) = state_with_category(CategoryType::Income);
        let kind = TransactionKind::Income;

        let cases = [
            (json!({}), "Nama transaksi harus diisi"),
            (
                json!({"nama": "Gaji", "nominal": 0}),
                "Nominal harus diisi dan lebih besar dari 0",
            ),
            (
                json!({"nama": "Gaji", "nominal": 100}),
                "Kategori harus dipilih",
            ),
            (
                json!({"nama": "Gaji", "nominal": 100, "categoryId": category_id}),
                "Tanggal harus diisi",
            ),
            (
                json!({
                    "nama": "Gaji",
                    "nominal": 100,
                    "categoryId": category_id,
                    "tanggal": "not a date",
                }),
                "Format tanggal tidak valid",
            ),
        ];

        for (body, expected_message) in cases {
            let result = create_transaction_endpoint(
                Extension(kind),
                Extension(UserID::new(1)),
                State(state.clone()),
                Ok(Json(payload(body))),
            )
            .await;

            assert_eq!(
                result.err(),
                Some(Error::Validation(expected_message.to_owned()))
            );
        }
    }

    #[tokio::test]
    async fn create_transaction_rejects_unknown_category() {
        let (state, _category_id) = state_with_category(CategoryType::Income);

        let result = create_transaction_endpoint(
            Extension(TransactionKind::Income),
            Extension(UserID::new(1)),
            State(state),
            Ok(Json(payload(json!({
                "nama": "Gaji",
                "nominal": 100,
                "categoryId": 999,
                "tanggal": "2024-07-25",
            })))),
        )
        .await;

        assert_eq!(
            result.err(),
            Some(Error::Validation("Kategori tidak ditemukan".to_owned()))
        );
    }

    #[tokio::test]
    async fn create_transaction_rejects_category_of_the_wrong_type() {
        let (state, category_id) = state_with_category(CategoryType::Expense);

        let result = create_transaction_endpoint(
            Extension(TransactionKind::Income),
            Extension(UserID::new(1)),
            State(state),
            Ok(Json(payload(json!({
                "nama": "Gaji",
                "nominal": 100,
                "categoryId": category_id,
                "tanggal": "2024-07-25",
            })))),
        )
        .await;

        assert_eq!(
            result.err(),
            Some(Error::Validation("Kategori harus bertipe INCOME".to_owned()))
        );
    }

    #[tokio::test]
    async fn create_transaction_rejects_overlong_catatan() {
        let (state, category_id) = state_with_category(CategoryType::Income);

        let result = create_transaction_endpoint(
            Extension(TransactionKind::Income),
            Extension(UserID::new(1)),
            State(state),
            Ok(Json(payload(json!({
                "nama": "Gaji",
                "nominal": 100,
                "categoryId": category_id,
                "tanggal": "2024-07-25",
                "catatan": "x".repeat(501),
            })))),
        )
        .await;

        assert_eq!(
            result.err(),
            Some(Error::Validation("Catatan maksimal 500 karakter".to_owned()))
        );
    }
}
