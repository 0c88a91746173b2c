//! Page source trait

use async_trait::async_trait;

use super::PageRequest;
use super::PageResponse;
use crate::error::FetchError;

/// A paginated list endpoint.
///
/// Implementations fetch one page per call. Ordering of concurrent calls is
/// not guaranteed by the source; callers that issue overlapping requests are
/// responsible for discarding stale responses.
///
/// # Example
///
/// ```ignore
/// use escrow_lib::api::{MemorySource, PageRequest, PageSource};
///
/// let source = MemorySource::new(records);
/// let page = source.fetch_page(&PageRequest::first(20)).await?;
/// println!("{} of {}", page.len(), page.page.total_elements);
/// ```
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches one page.
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse, FetchError>;
}
