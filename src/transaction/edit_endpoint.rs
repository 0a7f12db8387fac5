//! Defines the endpoint for editing a transaction.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;

use crate::{
    AppState, Error, database_id::TransactionId, response::ApiResponse, user::UserID,
};

use super::{
    db::{TransactionUpdate, update_transaction},
    models::{TransactionKind, TransactionPayload, parse_tanggal},
    normalize_catatan, resolve_category,
};

/// A route handler for partially updating one of the caller's transactions.
///
/// Only the supplied fields are validated and changed, omitted fields keep
/// their current values.
pub async fn edit_transaction_endpoint(
    Extension(kind): Extension<TransactionKind>,
    Extension(user_id): Extension<UserID>,
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(payload) = payload?;

    let nama = match payload.nama {
        Some(nama) => {
            let nama = nama.trim().to_owned();
            if nama.is_empty() {
                return Err(Error::Validation("Nama transaksi harus diisi".to_owned()));
            }
            Some(nama)
        }
        None => None,
    };

    if let Some(nominal) = payload.nominal
        && nominal <= Decimal::ZERO
    {
        return Err(Error::Validation(
            "Nominal harus lebih besar dari 0".to_owned(),
        ));
    }

    let tanggal = payload
        .tanggal
        .as_deref()
        .map(parse_tanggal)
        .transpose()?;

    let catatan = match payload.catatan {
        Some(Some(raw)) => Some(normalize_catatan(raw)?),
        Some(None) => Some(None),
        None => None,
    };

    let transaction = {
        let connection = state.db_connection.lock().map_err(|_| Error::DatabaseLock)?;

        if let Some(category_id) = payload.category_id {
            resolve_category(kind, category_id, &connection)?;
        }

        update_transaction(
            kind,
            transaction_id,
            user_id,
            TransactionUpdate {
                nama,
                nominal: payload.nominal,
                category_id: payload.category_id,
                tanggal,
                catatan,
            },
            &connection,
        )?
    };

    Ok(ApiResponse::data_with_message(
        transaction,
        &format!("{} berhasil diperbarui", kind.label()),
    )
    .into_response())
}

#[cfg(test)]
mod edit_transaction_tests {
    use axum::{
        Extension, Json,
        extract::{Path, State},
        http::StatusCode,
    };
    use rust_decimal::Decimal;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        AppState, Error,
        app_state::test_utils::test_state,
        database_id::TransactionId,
        category::{CategoryType, db::create_category},
        transaction::db::{NewTransaction, insert_transaction},
        transaction::models::{TransactionKind, TransactionPayload},
        user::UserID,
    };

    use super::edit_transaction_endpoint;

    fn state_with_transaction() -> (AppState, TransactionId) {
        let state = test_state();
        let transaction = {
            let connection = state.db_connection.lock().unwrap();
            let category =
                create_category("Gaji", CategoryType::Income, None, &connection).unwrap();
            insert_transaction(
                TransactionKind::Income,
                UserID::new(1),
                NewTransaction {
                    nama: "Gaji".to_owned(),
                    nominal: Decimal::from(100),
                    category_id: category.id,
                    tanggal: date!(2024 - 07 - 25),
                    catatan: None,
                },
                &connection,
            )
            .unwrap()
        };

        (state, transaction.id)
    }

    fn payload(value: serde_json::Value) -> TransactionPayload {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn edit_transaction_updates_supplied_fields() {
        let (state, transaction_id) = state_with_transaction();

        let response = edit_transaction_endpoint(
            Extension(TransactionKind::Income),
            Extension(UserID::new(1)),
            State(state),
            Path(transaction_id),
            Ok(Json(payload(json!({"nominal": 250})))),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn edit_transaction_rejects_non_positive_nominal() {
        let (state, transaction_id) = state_with_transaction();

        let result = edit_transaction_endpoint(
            Extension(TransactionKind::Income),
            Extension(UserID::new(1)),
            State(state),
            Path(transaction_id),
            Ok(Json(payload(json!({"nominal": -5})))),
        )
        .await;

        assert_eq!(
            result.err(),
            Some(Error::Validation(
                "Nominal harus lebih besar dari 0".to_owned()
            ))
        );
    }

    #[tokio::test]
    async fn edit_transaction_of_another_user_is_not_found() {
        let (state, transaction_id) = state_with_transaction();

        let result = edit_transaction_endpoint(
            Extension(TransactionKind::Income),
            Extension(UserID::new(2)),
            State(state),
            Path(transaction_id),
            Ok(Json(payload(json!({"nominal": 250})))),
        )
        .await;

        assert_eq!(
            result.err(),
            Some(Error::TransactionNotFound(TransactionKind::Income))
        );
    }

    #[tokio::test]
    async fn edit_transaction_rejects_category_of_the_wrong_type() {
        let (state, transaction_id) = state_with_transaction();
        let expense_category = {
            let connection = state.db_connection.lock().unwrap();
            create_category("Belanja", CategoryType::Expense, None, &connection).unwrap()
        };

        let result = edit_transaction_endpoint(
            Extension(TransactionKind::Income),
            Extension(UserID::new(1)),
            State(state),
            Path(transaction_id),
            Ok(Json(payload(json!({"categoryId": expense_category.id})))),
        )
        .await;

        assert_eq!(
            result.err(),
            Some(Error::Validation("Kategori harus bertipe INCOME".to_owned()))
        );
    }
}
