//! Database queries for categories.

use rusqlite::{Connection, Row};

use crate::{Error, database_id::CategoryId};

use super::models::{Category, CategoryType, DEFAULT_ICON};

/// The categories created for a fresh database, mirroring the buckets most
/// households budget with.
const SEED_CATEGORIES: &[(&str, CategoryType)] = &[
    ("Gaji", CategoryType::Income),
    ("Bonus", CategoryType::Income),
    ("Freelance", CategoryType::Income),
    ("Investasi", CategoryType::Income),
    ("Hadiah", CategoryType::Income),
    ("Lainnya", CategoryType::Income),
    ("Makanan & Minuman", CategoryType::Expense),
    ("Transportasi", CategoryType::Expense),
    ("Belanja", CategoryType::Expense),
    ("Hiburan", CategoryType::Expense),
    ("Tagihan", CategoryType::Expense),
    ("Kesehatan", CategoryType::Expense),
    ("Pendidikan", CategoryType::Expense),
    ("Lainnya", CategoryType::Expense),
];

/// The fields of a category that a client can change.
#[derive(Debug, Default)]
pub struct CategoryUpdate {
    /// The new display name, if given.
    pub name: Option<String>,
    /// The new category type, if given.
    pub category_type: Option<CategoryType>,
    /// The new icon name, if given.
    pub icon: Option<String>,
}

/// Create a new category.
///
/// # Errors
/// Returns [Error::DuplicateCategory] if a category with the same name and
/// type already exists, or [Error::SqlError] for any other SQL error.
pub fn create_category(
    name: &str,
    category_type: CategoryType,
    icon: Option<&str>,
    connection: &Connection,
) -> Result<Category, Error> {
    let icon = icon.unwrap_or(DEFAULT_ICON);

    connection.execute(
        "INSERT INTO category (name, type, icon) VALUES (?1, ?2, ?3)",
        (name, category_type, icon),
    )?;

    Ok(Category {
        id: connection.last_insert_rowid(),
        name: name.to_owned(),
        category_type,
        icon: icon.to_owned(),
    })
}

/// Get the category with the given ID.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if no category has that ID.
pub fn get_category(id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, type, icon FROM category WHERE id = :id")?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::CategoryNotFound,
            error => error.into(),
        })
}

/// List all categories, optionally restricted to one type, ordered by name.
pub fn list_categories(
    category_type: Option<CategoryType>,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    let rows = match category_type {
        Some(category_type) => connection
            .prepare("SELECT id, name, type, icon FROM category WHERE type = :type ORDER BY name ASC")?
            .query_map(&[(":type", &category_type)], map_row)?
            .collect::<Result<Vec<_>, _>>()?,
        None => connection
            .prepare("SELECT id, name, type, icon FROM category ORDER BY name ASC")?
            .query_map([], map_row)?
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(rows)
}

/// Apply a partial update to the category with the given ID.
///
/// Changing the type of a category is refused while transactions still
/// reference it, since those transactions would silently switch between
/// income and expense semantics.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if no category has that ID,
/// [Error::CategoryTypeInUse] if a type change was requested while the
/// category is referenced, or [Error::DuplicateCategory] if the update would
/// collide with an existing (name, type) pair.
pub fn update_category(
    id: CategoryId,
    update: CategoryUpdate,
    connection: &Connection,
) -> Result<Category, Error> {
    let existing = get_category(id, connection)?;

    if let Some(new_type) = update.category_type
        && new_type != existing.category_type
    {
        let references = count_category_references(id, connection)?;
        if references > 0 {
            return Err(Error::CategoryTypeInUse(references));
        }
    }

    let updated = Category {
        id,
        name: update.name.unwrap_or(existing.name),
        category_type: update.category_type.unwrap_or(existing.category_type),
        icon: update.icon.unwrap_or(existing.icon),
    };

    connection.execute(
        "UPDATE category SET name = ?1, type = ?2, icon = ?3 WHERE id = ?4",
        (&updated.name, updated.category_type, &updated.icon, id),
    )?;

    Ok(updated)
}

/// Delete the category with the given ID.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if no category has that ID, or
/// [Error::CategoryInUse] if transactions still reference it.
pub fn delete_category(id: CategoryId, connection: &Connection) -> Result<(), Error> {
    get_category(id, connection)?;

    let references = count_category_references(id, connection)?;
    if references > 0 {
        return Err(Error::CategoryInUse(references));
    }

    connection.execute("DELETE FROM category WHERE id = ?1", [id])?;

    Ok(())
}

/// Count the transactions, income and expense combined, that reference the
/// category.
pub fn count_category_references(
    id: CategoryId,
    connection: &Connection,
) -> Result<i64, Error> {
    let count = connection.query_row(
        "SELECT
            (SELECT COUNT(*) FROM income_transaction WHERE category_id = ?1)
            + (SELECT COUNT(*) FROM expense_transaction WHERE category_id = ?1)",
        [id],
        |row| row.get(0),
    )?;

    Ok(count)
}

/// Insert the default categories, skipping any that already exist.
///
/// Returns the number of categories inserted.
pub fn seed_default_categories(connection: &Connection) -> Result<usize, Error> {
    let mut inserted = 0;

    for (name, category_type) in SEED_CATEGORIES {
        inserted += connection.execute(
            "INSERT OR IGNORE INTO category (name, type, icon) VALUES (?1, ?2, ?3)",
            (name, category_type, DEFAULT_ICON),
        )?;
    }

    Ok(inserted)
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        category_type: row.get(2)?,
        icon: row.get(3)?,
    })
}
