//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g. '/api/income/{transaction_id}',
//! use [format_endpoint].

/// The route for creating an account.
pub const REGISTER: &str = "/api/auth/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/auth/login";

/// The route to list and create categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to update or delete a single category.
pub const CATEGORY: &str = "/api/categories/{category_id}";

/// The route to list and create income transactions.
pub const INCOME: &str = "/api/income";
/// The route for the income total of the current user.
pub const INCOME_TOTAL: &str = "/api/income/total";
/// The route to access a single income transaction.
pub const INCOME_ENTRY: &str = "/api/income/{transaction_id}";

/// The route to list and create expense transactions.
pub const EXPENSE: &str = "/api/expense";
/// The route for the expense total of the current user.
pub const EXPENSE_TOTAL: &str = "/api/expense/total";
/// The route to access a single expense transaction.
pub const EXPENSE_ENTRY: &str = "/api/expense/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string delimited by braces, e.g. '{transaction_id}' in
/// '/api/income/{transaction_id}'. If no parameter is found the original path
/// is returned unchanged. Paths are assumed to contain at most one parameter.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map(|offset| start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!("{}{}{}", &endpoint_path[..start], id, &endpoint_path[end..])
}
