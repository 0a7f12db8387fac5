//! Type aliases for database row identifiers.

/// The integer type used for SQLite row IDs.
pub type DatabaseId = i64;

/// The ID of a category row.
pub type CategoryId = DatabaseId;

/// The ID of an income or expense transaction row.
pub type TransactionId = DatabaseId;
