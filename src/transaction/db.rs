//! Database queries for income and expense transactions.
//!
//! Every query takes a [TransactionKind] to select the table, and folds the
//! caller's user ID into the WHERE clause so that one user can never read or
//! modify another user's records. A record that exists but belongs to someone
//! else is indistinguishable from one that does not exist.

use std::str::FromStr;

use rust_decimal::Decimal;
use rusqlite::{Connection, Row, ToSql, params_from_iter, types::Type};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    database_id::{CategoryId, TransactionId},
    pagination::PageRequest,
    user::UserID,
};

use super::models::{CategorySummary, Transaction, TransactionFilter, TransactionKind};

/// The fields required to insert a transaction.
#[derive(Debug)]
pub struct NewTransaction {
    /// What the transaction was for.
    pub nama: String,
    /// The amount of money.
    pub nominal: Decimal,
    /// The ID of the category to classify the transaction under.
    pub category_id: CategoryId,
    /// The date the transaction happened on.
    pub tanggal: Date,
    /// An optional free-form note.
    pub catatan: Option<String>,
}

/// The fields of a transaction that the edit endpoint can change.
///
/// `catatan` is doubly optional: the outer `None` keeps the current note, an
/// inner `None` clears it.
#[derive(Debug, Default)]
pub struct TransactionUpdate {
    /// The new description, if given.
    pub nama: Option<String>,
    /// The new amount, if given.
    pub nominal: Option<Decimal>,
    /// The new category, if given.
    pub category_id: Option<CategoryId>,
    /// The new date, if given.
    pub tanggal: Option<Date>,
    /// The new note, if given.
    pub catatan: Option<Option<String>>,
}

const SELECT_COLUMNS: &str = "t.id, t.user_id, t.nama, t.nominal, t.category_id, t.tanggal,
    t.catatan, t.created_at, c.name, c.type, c.icon";

/// Insert a new transaction owned by `user_id`.
pub fn insert_transaction(
    kind: TransactionKind,
    user_id: UserID,
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection.execute(
        &format!(
            "INSERT INTO {} (user_id, nama, nominal, category_id, tanggal, catatan, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            kind.table()
        ),
        (
            user_id.as_i64(),
            &new_transaction.nama,
            new_transaction.nominal.to_string(),
            new_transaction.category_id,
            new_transaction.tanggal,
            &new_transaction.catatan,
            OffsetDateTime::now_utc(),
        ),
    )?;

    get_transaction(kind, connection.last_insert_rowid(), user_id, connection)
}

/// Get a single transaction owned by `user_id`.
///
/// # Errors
/// Returns [Error::TransactionNotFound] if the transaction does not exist or
/// belongs to another user.
pub fn get_transaction(
    kind: TransactionKind,
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "SELECT {SELECT_COLUMNS}
            FROM {} t JOIN category c ON c.id = t.category_id
            WHERE t.id = :id AND t.user_id = :user_id",
            kind.table()
        ))?
        .query_row(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound(kind),
            error => error.into(),
        })
}

/// Count the transactions owned by `user_id` that match `filter`.
pub fn count_transactions(
    kind: TransactionKind,
    user_id: UserID,
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<u64, Error> {
    let (where_clause, params) = build_filter(user_id, filter);

    let count: i64 = connection.query_row(
        &format!(
            "SELECT COUNT(*) FROM {} t WHERE {where_clause}",
            kind.table()
        ),
        params_from_iter(params.iter().map(|param| param.as_ref())),
        |row| row.get(0),
    )?;

    Ok(count as u64)
}

/// Get one page of the transactions owned by `user_id` that match `filter`,
/// newest date first.
pub fn query_transactions(
    kind: TransactionKind,
    user_id: UserID,
    filter: &TransactionFilter,
    page_request: &PageRequest,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let (where_clause, mut params) = build_filter(user_id, filter);
    params.push(Box::new(page_request.limit as i64));
    // A saturated offset must stay positive through the i64 conversion.
    params.push(Box::new(i64::try_from(page_request.offset()).unwrap_or(i64::MAX)));

    let transactions = connection
        .prepare(&format!(
            "SELECT {SELECT_COLUMNS}
            FROM {} t JOIN category c ON c.id = t.category_id
            WHERE {where_clause}
            ORDER BY t.tanggal DESC, t.id DESC
            LIMIT ? OFFSET ?",
            kind.table()
        ))?
        .query_map(
            params_from_iter(params.iter().map(|param| param.as_ref())),
            map_row,
        )?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(transactions)
}

/// Sum the `nominal` of the transactions owned by `user_id` that match
/// `filter`, returning the exact total and the number of records summed.
///
/// The amounts are summed in Rust as decimals rather than with SQL SUM so
/// that no floating-point rounding creeps into the total.
pub fn sum_transactions(
    kind: TransactionKind,
    user_id: UserID,
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<(Decimal, u64), Error> {
    let (where_clause, params) = build_filter(user_id, filter);

    let amounts = connection
        .prepare(&format!(
            "SELECT t.nominal FROM {} t WHERE {where_clause}",
            kind.table()
        ))?
        .query_map(
            params_from_iter(params.iter().map(|param| param.as_ref())),
            |row| {
                let raw: String = row.get(0)?;
                parse_nominal(&raw, 0)
            },
        )?
        .collect::<Result<Vec<Decimal>, _>>()?;

    let total = amounts.iter().sum();
    Ok((total, amounts.len() as u64))
}

/// Apply a partial update to a transaction owned by `user_id`.
///
/// # Errors
/// Returns [Error::TransactionNotFound] if the transaction does not exist or
/// belongs to another user.
pub fn update_transaction(
    kind: TransactionKind,
    id: TransactionId,
    user_id: UserID,
    update: TransactionUpdate,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let existing = get_transaction(kind, id, user_id, connection)?;

    let nama = update.nama.unwrap_or(existing.nama);
    let nominal = update.nominal.unwrap_or(existing.nominal);
    let category_id = update.category_id.unwrap_or(existing.category_id);
    let tanggal = update.tanggal.unwrap_or(existing.tanggal);
    let catatan = update.catatan.unwrap_or(existing.catatan);

    connection.execute(
        &format!(
            "UPDATE {} SET nama = ?1, nominal = ?2, category_id = ?3, tanggal = ?4, catatan = ?5
            WHERE id = ?6 AND user_id = ?7",
            kind.table()
        ),
        (
            &nama,
            nominal.to_string(),
            category_id,
            tanggal,
            &catatan,
            id,
            user_id.as_i64(),
        ),
    )?;

    get_transaction(kind, id, user_id, connection)
}

/// Delete a transaction owned by `user_id`.
///
/// # Errors
/// Returns [Error::TransactionNotFound] if the transaction does not exist or
/// belongs to another user.
pub fn delete_transaction(
    kind: TransactionKind,
    id: TransactionId,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_deleted = connection.execute(
        &format!(
            "DELETE FROM {} WHERE id = ?1 AND user_id = ?2",
            kind.table()
        ),
        (id, user_id.as_i64()),
    )?;

    if rows_deleted == 0 {
        return Err(Error::TransactionNotFound(kind));
    }

    Ok(())
}

/// Build the WHERE clause and its parameters for `user_id` and `filter`.
fn build_filter(
    user_id: UserID,
    filter: &TransactionFilter,
) -> (String, Vec<Box<dyn ToSql>>) {
    let mut clauses = vec!["t.user_id = ?".to_owned()];
    let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(user_id.as_i64())];

    if let Some(start_date) = filter.start_date {
        clauses.push("t.tanggal >= ?".to_owned());
        params.push(Box::new(start_date));
    }

    if let Some(end_date) = filter.end_date {
        clauses.push("t.tanggal <= ?".to_owned());
        params.push(Box::new(end_date));
    }

    if let Some(category_id) = filter.category_id {
        clauses.push("t.category_id = ?".to_owned());
        params.push(Box::new(category_id));
    }

    (clauses.join(" AND "), params)
}

fn parse_nominal(raw: &str, column_index: usize) -> Result<Decimal, rusqlite::Error> {
    Decimal::from_str(raw).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(column_index, Type::Text, Box::new(error))
    })
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let raw_nominal: String = row.get(3)?;
    let category_id: CategoryId = row.get(4)?;

    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        nama: row.get(2)?,
        nominal: parse_nominal(&raw_nominal, 3)?,
        category_id,
        tanggal: row.get(5)?,
        catatan: row.get(6)?,
        created_at: row.get(7)?,
        category: CategorySummary {
            id: category_id,
            name: row.get(8)?,
            category_type: row.get(9)?,
            icon: row.get(10)?,
        },
    })
}
