//! The uniform JSON envelope that every endpoint responds with.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::pagination::PageRequest;

/// Pagination info attached to list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// The one-based page number that was served.
    pub page: u64,
    /// The page size that was applied after clamping.
    pub limit: u64,
    /// The total number of records matching the query.
    pub total: u64,
    /// `ceil(total / limit)`.
    pub total_pages: u64,
}

impl PageMeta {
    /// Build the metadata for a page of `total` matching records.
    pub fn new(page_request: &PageRequest, total: u64) -> Self {
        Self {
            page: page_request.page,
            limit: page_request.limit,
            total,
            total_pages: total.div_ceil(page_request.limit),
        }
    }
}

/// The response envelope shared by every endpoint:
/// `{success, data?, error?, message?, meta?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request succeeded.
    pub success: bool,
    /// The response payload, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// A short machine-oriented error label, only present on failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// A human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Pagination info, only present on list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A successful response carrying only `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            meta: None,
        }
    }

    /// A successful response carrying `data` and a human-readable `message`.
    pub fn data_with_message(data: T, message: &str) -> Self {
        Self {
            message: Some(message.to_owned()),
            ..Self::data(data)
        }
    }

    /// A successful list response carrying a page of `data` and its metadata.
    pub fn page(data: T, meta: PageMeta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::data(data)
        }
    }
}

impl ApiResponse<()> {
    /// A successful response carrying only a human-readable `message`.
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.to_owned()),
            meta: None,
        }
    }

    /// A failure envelope with a short `error` label and a human-readable
    /// `message`.
    pub fn failure(error: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_owned()),
            message: Some(message.to_owned()),
            meta: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
