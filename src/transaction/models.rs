//! The income and expense transaction models.
//!
//! Income and expense records have identical shapes but live in separate
//! tables and are served under separate routes. [TransactionKind] carries
//! which of the two a handler is operating on.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use time::{Date, OffsetDateTime, macros::format_description};

use crate::{
    Error,
    category::CategoryType,
    database_id::{CategoryId, TransactionId},
};

/// Which of the two transaction ledgers a request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl TransactionKind {
    /// The database table holding this kind of transaction.
    pub fn table(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income_transaction",
            TransactionKind::Expense => "expense_transaction",
        }
    }

    /// The category type that transactions of this kind must reference.
    pub fn category_type(&self) -> CategoryType {
        match self {
            TransactionKind::Income => CategoryType::Income,
            TransactionKind::Expense => CategoryType::Expense,
        }
    }

    /// The Indonesian noun used in client-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Pemasukan",
            TransactionKind::Expense => "Pengeluaran",
        }
    }
}

/// The category fields embedded in transaction responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name of the category.
    pub name: String,
    /// The icon shown next to the category.
    pub icon: String,
    /// Whether this is an income or an expense category.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

/// A single income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction within its ledger.
    pub id: TransactionId,
    /// The ID of the owning user.
    pub user_id: i64,
    /// What the transaction was for.
    pub nama: String,
    /// The amount of money, serialized as an exact JSON number.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub nominal: Decimal,
    /// The ID of the category the transaction is classified under.
    pub category_id: CategoryId,
    /// The calendar date the transaction happened on.
    pub tanggal: Date,
    /// An optional free-form note.
    pub catatan: Option<String>,
    /// When the record was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// The category the transaction is classified under.
    pub category: CategorySummary,
}

/// The maximum length of the `catatan` note, in characters.
pub const MAX_CATATAN_LENGTH: usize = 500;

/// The request body shared by the create and edit endpoints.
///
/// Every field is optional so the same payload type can express both a full
/// create (where the handler enforces required fields) and a partial edit.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransactionPayload {
    /// What the transaction was for.
    #[serde(default)]
    pub nama: Option<String>,
    /// The amount of money, accepted as an exact JSON number.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub nominal: Option<Decimal>,
    /// The ID of the category to classify the transaction under.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// The date the transaction happened on, e.g. "2024-07-25".
    #[serde(default)]
    pub tanggal: Option<String>,
    /// A free-form note. `Some(None)` means the client sent an explicit null
    /// to clear the note, `None` means the field was absent.
    #[serde(default, deserialize_with = "double_option")]
    pub catatan: Option<Option<String>>,
}

/// Deserialize an optional field so that an absent field and an explicit null
/// can be told apart when combined with `#[serde(default)]`.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// The filters shared by the list and total endpoints.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Only include transactions on or after this date.
    pub start_date: Option<Date>,
    /// Only include transactions on or before this date.
    pub end_date: Option<Date>,
    /// Only include transactions under this category.
    pub category_id: Option<CategoryId>,
}

/// Parse a client-supplied date string.
///
/// Accepts a plain "YYYY-MM-DD" date as well as a full timestamp, in which
/// case the date part is taken and the rest ignored.
///
/// # Errors
/// Returns [Error::Validation] with the Indonesian date format message if the
/// string does not start with a valid date.
pub fn parse_tanggal(raw: &str) -> Result<Date, Error> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);

    Date::parse(date_part, format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::Validation("Format tanggal tidak valid".to_owned()))
}

#[cfg(test)]
mod transaction_model_tests {
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::Error;

    use super::{TransactionPayload, parse_tanggal};

    #[test]
    fn parse_tanggal_accepts_plain_dates() {
        assert_eq!(parse_tanggal("2024-07-25"), Ok(date!(2024 - 07 - 25)));
    }

    #[test]
    fn parse_tanggal_takes_date_part_of_timestamps() {
        assert_eq!(
            parse_tanggal("2024-07-25T13:45:00Z"),
            Ok(date!(2024 - 07 - 25))
        );
    }

    #[test]
    fn parse_tanggal_rejects_garbage() {
        assert_eq!(
            parse_tanggal("25/07/2024"),
            Err(Error::Validation("Format tanggal tidak valid".to_owned()))
        );
    }

    #[test]
    fn nominal_deserializes_exactly() {
        let payload: TransactionPayload =
            serde_json::from_str(r#"{"nominal": 5000000.07}"#).unwrap();

        assert_eq!(payload.nominal, Some(Decimal::new(500_000_007, 2)));
    }

    #[test]
    fn absent_and_null_catatan_are_distinguished() {
        let absent: TransactionPayload = serde_json::from_str(r#"{}"#).unwrap();
        let null: TransactionPayload = serde_json::from_str(r#"{"catatan": null}"#).unwrap();
        let set: TransactionPayload = serde_json::from_str(r#"{"catatan": "ok"}"#).unwrap();

        assert_eq!(absent.catatan, None);
        assert_eq!(null.catatan, Some(None));
        assert_eq!(set.catatan, Some(Some("ok".to_owned())));
    }
}
