//! Header cells and sort indicators.

use escrow_lib::labels::LabelProvider;

use super::ColumnDescriptor;
use crate::sort::{SortDirection, SortState};

/// Sort icon shown in a sortable header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Sortable but not the sorted column.
    Neutral,
    Ascending,
    Descending,
}

impl SortIndicator {
    /// Glyph for text rendering.
    pub fn glyph(self) -> &'static str {
        match self {
            SortIndicator::Neutral => "↕",
            SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
        }
    }
}

/// A resolved header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub width: Option<u16>,
    /// `None` for columns that are not sortable.
    pub indicator: Option<SortIndicator>,
}

/// Resolves a column's header label and sort indicator.
pub fn resolve_header(
    column: &ColumnDescriptor,
    sort: Option<&SortState>,
    labels: &dyn LabelProvider,
    language: &str,
) -> HeaderCell {
    let label = match &column.label_id {
        Some(id) => labels.label(id, language, &column.label),
        None => column.label.clone(),
    };

    let indicator = column.sortable.then(|| match sort {
        Some(sort) if sort.key == column.key => match sort.direction {
            SortDirection::Asc => SortIndicator::Ascending,
            SortDirection::Desc => SortIndicator::Descending,
        },
        _ => SortIndicator::Neutral,
    });

    HeaderCell {
        key: column.key.clone(),
        label,
        width: column.width,
        indicator,
    }
}
