//! The shared income and expense categories and their CRUD endpoints.

pub mod db;
pub mod models;

mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;

pub use create_endpoint::create_category_endpoint;
pub use db::seed_default_categories;
pub use delete_endpoint::delete_category_endpoint;
pub use edit_endpoint::edit_category_endpoint;
pub use list_endpoint::list_categories_endpoint;
pub use models::{Category, CategoryType, DEFAULT_ICON};
