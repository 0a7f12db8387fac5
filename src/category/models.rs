//! The category model shared by income and expense bookkeeping.

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::database_id::CategoryId;

/// The icon assigned to categories created without an explicit one.
pub const DEFAULT_ICON: &str = "wallet";

/// Whether a category classifies income or expense transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryType {
    /// The category classifies income transactions.
    Income,
    /// The category classifies expense transactions.
    Expense,
}

impl CategoryType {
    /// The string stored in the database and used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Income => "INCOME",
            CategoryType::Expense => "EXPENSE",
        }
    }

    /// Parse a client-supplied type string, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "INCOME" => Some(CategoryType::Income),
            "EXPENSE" => Some(CategoryType::Expense),
            _ => None,
        }
    }
}

impl ToSql for CategoryType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for CategoryType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_str()?;

        CategoryType::parse(raw).ok_or_else(|| FromSqlError::Other(
            format!("invalid category type {raw:?}").into(),
        ))
    }
}

/// A named bucket that transactions are classified under.
///
/// Categories are global: they are shared by every user rather than scoped to
/// the user that created them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// The ID of the category.
    pub id: CategoryId,
    /// The display name, unique within its type.
    pub name: String,
    /// Whether this is an income or an expense category.
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    /// The name of the icon shown next to the category.
    pub icon: String,
}

#[cfg(test)]
mod category_type_tests {
    use super::CategoryType;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(CategoryType::parse("income"), Some(CategoryType::Income));
        assert_eq!(CategoryType::parse(" EXPENSE "), Some(CategoryType::Expense));
        assert_eq!(CategoryType::parse("Expense"), Some(CategoryType::Expense));
    }

    #[test]
    fn parse_rejects_unknown_types() {
        assert_eq!(CategoryType::parse("transfer"), None);
        assert_eq!(CategoryType::parse(""), None);
    }

    #[test]
    fn serializes_to_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&CategoryType::Income).unwrap(),
            "\"INCOME\""
        );
    }
}
