//! In-memory page source

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::PageMeta;
use super::PageRequest;
use super::PageResponse;
use super::PageSource;
use crate::error::FetchError;
use crate::model::Record;

/// A page source serving a fixed dataset held in memory.
///
/// Used by the console to serve JSON datasets and by tests standing in for a
/// remote list endpoint. Requests past the last page return an empty page
/// with the correct totals.
///
/// # Example
///
/// ```
/// use escrow_lib::api::MemorySource;
/// use escrow_lib::model::Record;
///
/// let source = MemorySource::new(vec![Record::new().set("name", "Acme")]);
/// assert_eq!(source.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Arc<Vec<Record>>,
}

impl MemorySource {
    /// Creates a source serving the given rows.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Parses a JSON array of row objects.
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// Reads a JSON array of row objects from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let source = Self::from_json(&json)?;
        debug!("Loaded {} rows from {}", source.len(), path.display());
        Ok(source)
    }

    /// Returns the number of rows in the dataset.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Builds the page for a request without going through the async trait.
    pub fn page(&self, request: &PageRequest) -> PageResponse {
        let meta = PageMeta::new(request.page, request.size, self.records.len());
        let start = request.page.saturating_mul(meta.size).min(self.records.len());
        let end = start.saturating_add(meta.size).min(self.records.len());
        PageResponse::new(self.records[start..end].to_vec(), meta)
    }
}

#[async_trait]
impl PageSource for MemorySource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse, FetchError> {
        Ok(self.page(request))
    }
}
