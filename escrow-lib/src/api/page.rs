//! Page types for paginated list responses.

use serde::Deserialize;
use serde::Serialize;

use crate::model::Record;

/// Pagination metadata of a list response.
///
/// `number` is zero-based, as list endpoints report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Requested page size.
    pub size: usize,
    /// Zero-based page number.
    pub number: usize,
    /// Total number of rows across all pages.
    pub total_elements: usize,
    /// Total number of pages.
    pub total_pages: usize,
}

impl PageMeta {
    /// Creates metadata for page `number` of `total_elements` rows.
    pub fn new(number: usize, size: usize, total_elements: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            number,
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }
}

/// A page of rows returned by a list endpoint.
///
/// Deserializes from `{ "content": [...], "page": { "size", "number",
/// "totalElements", "totalPages" } }`.
///
/// # Example
///
/// ```
/// use escrow_lib::api::PageResponse;
///
/// let json = r#"{
///     "content": [{"name": "Acme"}],
///     "page": {"size": 20, "number": 0, "totalElements": 1, "totalPages": 1}
/// }"#;
/// let page: PageResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(page.len(), 1);
/// assert_eq!(page.page.total_elements, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageResponse {
    /// The rows of this page.
    pub content: Vec<Record>,
    /// Pagination metadata.
    pub page: PageMeta,
}

impl PageResponse {
    /// Creates a new page response.
    pub fn new(content: Vec<Record>, page: PageMeta) -> Self {
        Self { content, page }
    }

    /// Returns a reference to the rows in this page.
    pub fn records(&self) -> &[Record] {
        &self.content
    }

    /// Consumes the page and returns the rows.
    pub fn into_records(self) -> Vec<Record> {
        self.content
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if there are more pages after this one.
    pub fn has_more(&self) -> bool {
        self.page.number + 1 < self.page.total_pages
    }
}

/// A request for one page of a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page number.
    pub page: usize,
    /// Rows per page.
    pub size: usize,
}

impl PageRequest {
    /// Creates a request for a zero-based page.
    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// Creates a request for the first page.
    pub fn first(size: usize) -> Self {
        Self { page: 0, size }
    }
}
