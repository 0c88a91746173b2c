//! TableEngine - search, sort, pagination and selection over a row collection.
//!
//! The engine owns the view state of one listing page. Derived rows are never
//! cached: [`TableEngine::view`] recomputes filter, sort and slice from the
//! current state each time it is called.

use std::collections::HashSet;

use escrow_lib::model::{Record, Value};
use log::{debug, warn};

use crate::pagination::PaginationState;
use crate::search::SearchState;
use crate::selection::{RowId, RowKey, Selection};
use crate::sort::{SortState, compare_values};

/// Default rows per page.
pub const DEFAULT_ROWS_PER_PAGE: usize = 20;

// =============================================================================
// Configuration
// =============================================================================

/// Construction parameters for a [`TableEngine`].
///
/// # Example
///
/// ```
/// use escrow_grid::{RowKey, TableConfig, TableEngine};
///
/// let config = TableConfig::new(["name", "status"])
///     .with_rows_per_page(10)
///     .with_row_key(RowKey::field("transactionId"));
/// let engine = TableEngine::new(config);
/// assert_eq!(engine.rows_per_page(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Fields enabled for substring search, in display order.
    pub search_fields: Vec<String>,
    /// Initial rows per page.
    pub rows_per_page: usize,
    /// Field holding each row's stable id.
    pub row_key: RowKey,
}

impl TableConfig {
    /// Creates a config searching the given fields.
    pub fn new<S: Into<String>>(search_fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            search_fields: search_fields.into_iter().map(Into::into).collect(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            row_key: RowKey::default(),
        }
    }

    /// Sets the initial rows per page.
    pub fn with_rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page;
        self
    }

    /// Sets the row id field.
    pub fn with_row_key(mut self, row_key: RowKey) -> Self {
        self.row_key = row_key;
        self
    }
}

// =============================================================================
// Derived views
// =============================================================================

/// An ordered subset of the engine's source rows.
#[derive(Debug, Clone)]
pub enum RowSet<'a> {
    /// The source collection itself, untouched.
    All(&'a [Record]),
    /// Source positions, in view order.
    Subset {
        data: &'a [Record],
        indices: Vec<usize>,
    },
}

impl<'a> RowSet<'a> {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            RowSet::All(data) => data.len(),
            RowSet::Subset { indices, .. } => indices.len(),
        }
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the `(source position, row)` at view position `i`.
    pub fn get(&self, i: usize) -> Option<(usize, &'a Record)> {
        match self {
            RowSet::All(data) => data.get(i).map(|record| (i, record)),
            RowSet::Subset { data, indices } => {
                indices.get(i).and_then(|&pos| data.get(pos).map(|record| (pos, record)))
            }
        }
    }

    /// Iterates rows in view order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        (0..self.len()).filter_map(|i| self.get(i).map(|(_, record)| record))
    }

    /// Source positions in view order.
    pub fn positions(&self) -> Vec<usize> {
        match self {
            RowSet::All(data) => (0..data.len()).collect(),
            RowSet::Subset { indices, .. } => indices.clone(),
        }
    }
}

/// A row on the current page.
#[derive(Debug, Clone)]
pub struct VisibleRow<'a> {
    /// Position within the current page.
    pub index: usize,
    /// Position within the source collection.
    pub source_index: usize,
    /// Stable row id.
    pub id: RowId,
    /// The row.
    pub record: &'a Record,
}

/// The result of one derivation pass.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    /// Rows matching every search query, in source order.
    pub filtered: RowSet<'a>,
    /// Filtered rows in sort order.
    pub sorted: RowSet<'a>,
    /// Rows of the current page.
    pub rows: Vec<VisibleRow<'a>>,
    /// Pagination over the filtered rows.
    pub pagination: PaginationState,
}

// =============================================================================
// Engine
// =============================================================================

/// View state for one listing page.
///
/// Every setter completes its whole update before returning, and no operation
/// fails: missing fields compare as empty, and a page past the end simply
/// yields no rows.
#[derive(Debug, Clone)]
pub struct TableEngine {
    data: Vec<Record>,
    generation: u64,
    search: SearchState,
    sort: Option<SortState>,
    page: usize,
    rows_per_page: usize,
    row_key: RowKey,
    selection: Selection<RowId>,
    expansion: Selection<RowId>,
}

impl TableEngine {
    /// Creates an engine with no rows.
    pub fn new(config: TableConfig) -> Self {
        Self {
            data: Vec::new(),
            generation: 0,
            search: SearchState::new(config.search_fields),
            sort: None,
            page: 1,
            rows_per_page: config.rows_per_page.max(1),
            row_key: config.row_key,
            selection: Selection::new(),
            expansion: Selection::new(),
        }
    }

    /// Sets the source rows (builder pattern).
    pub fn with_data(mut self, data: Vec<Record>) -> Self {
        self.set_data(data);
        self
    }

    // -------------------------------------------------------------------------
    // Source
    // -------------------------------------------------------------------------

    /// Replaces the source rows.
    ///
    /// Selected and expanded ids that no longer appear in the new rows are
    /// dropped.
    pub fn set_data(&mut self, data: Vec<Record>) {
        self.data = data;
        self.generation += 1;

        let present: HashSet<RowId> = self
            .data
            .iter()
            .enumerate()
            .map(|(pos, record)| self.row_key.id_for(record, self.generation, pos))
            .collect();
        self.selection.retain(|id| present.contains(id));
        self.expansion.retain(|id| present.contains(id));

        debug!(
            "Table source replaced: {} rows, generation {}",
            self.data.len(),
            self.generation
        );
    }

    /// The source rows.
    pub fn data(&self) -> &[Record] {
        &self.data
    }

    /// Counter bumped on every [`set_data`](Self::set_data).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The row id field.
    pub fn row_key(&self) -> &RowKey {
        &self.row_key
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Current search queries.
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Sets the query for a search field and returns to page 1.
    ///
    /// Fields not declared in the config are ignored and `false` is returned.
    pub fn update_search(&mut self, field: &str, value: impl Into<String>) -> bool {
        if !self.search.set(field, value) {
            warn!("Ignoring search on undeclared field '{}'", field);
            return false;
        }
        self.page = 1;
        true
    }

    /// Empties every query and returns to page 1.
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.page = 1;
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Current sort state.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Toggle sort for a key.
    ///
    /// A new key sorts ascending; the sorted key flips direction.
    pub fn set_sort(&mut self, key: &str) -> &SortState {
        self.sort.insert(SortState::toggled(self.sort.as_ref(), key))
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Sets the page verbatim. Callers clamp first.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Current rows per page.
    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Sets rows per page and returns to page 1. Zero counts as one.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) {
        self.rows_per_page = rows_per_page.max(1);
        self.page = 1;
    }

    /// Pagination over the filtered rows.
    pub fn local_pagination(&self) -> PaginationState {
        PaginationState::compute(self.page, self.rows_per_page, self.filtered().len())
    }

    // -------------------------------------------------------------------------
    // Selection and expansion
    // -------------------------------------------------------------------------

    /// Replaces the selection with the rows at the given page positions.
    ///
    /// Positions outside the current page are ignored.
    pub fn set_selection(&mut self, indices: &[usize]) {
        let ids = self.ids_at(indices);
        self.selection.replace(ids);
    }

    /// Replaces the expanded rows with those at the given page positions.
    pub fn set_expansion(&mut self, indices: &[usize]) {
        let ids = self.ids_at(indices);
        self.expansion.replace(ids);
    }

    /// Page positions of selected rows on the current page.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.indices_in(&self.selection)
    }

    /// Page positions of expanded rows on the current page.
    pub fn expanded_indices(&self) -> Vec<usize> {
        self.indices_in(&self.expansion)
    }

    /// The stable selection, including rows not on the current page.
    pub fn selection(&self) -> &Selection<RowId> {
        &self.selection
    }

    /// The stable expansion set.
    pub fn expansion(&self) -> &Selection<RowId> {
        &self.expansion
    }

    /// Selected rows in source order, across all pages.
    pub fn selected_records(&self) -> Vec<&Record> {
        self.data
            .iter()
            .enumerate()
            .filter(|(pos, record)| {
                self.selection
                    .is_selected(&self.row_key.id_for(record, self.generation, *pos))
            })
            .map(|(_, record)| record)
            .collect()
    }

    fn ids_at(&self, indices: &[usize]) -> Vec<RowId> {
        let view = self.view();
        indices
            .iter()
            .filter_map(|&i| view.rows.get(i).map(|row| row.id.clone()))
            .collect()
    }

    fn indices_in(&self, set: &Selection<RowId>) -> Vec<usize> {
        self.view()
            .rows
            .iter()
            .filter(|row| set.is_selected(&row.id))
            .map(|row| row.index)
            .collect()
    }

    // -------------------------------------------------------------------------
    // Row edits
    // -------------------------------------------------------------------------

    /// Writes a field of the row at a page position. Returns `false` if the
    /// position is not on the current page.
    pub fn update_cell(&mut self, index: usize, field: &str, value: impl Into<Value>) -> bool {
        let Some(pos) = self.view().rows.get(index).map(|row| row.source_index) else {
            return false;
        };
        self.data[pos].insert(field, value);
        true
    }

    // -------------------------------------------------------------------------
    // Derivation
    // -------------------------------------------------------------------------

    /// Rows matching every non-empty query.
    ///
    /// With no query set this is the source slice itself and nothing is
    /// allocated.
    pub fn filtered(&self) -> RowSet<'_> {
        if self.search.is_empty() {
            return RowSet::All(&self.data);
        }

        let matcher = self.search.matcher();
        let indices = self
            .data
            .iter()
            .enumerate()
            .filter(|(_, record)| matcher.matches(record))
            .map(|(pos, _)| pos)
            .collect();

        RowSet::Subset {
            data: &self.data,
            indices,
        }
    }

    fn sorted<'a>(&'a self, filtered: &RowSet<'a>) -> RowSet<'a> {
        let Some(sort) = &self.sort else {
            return filtered.clone();
        };

        let mut indices = filtered.positions();
        // Vec::sort_by is stable, so ties keep source order.
        indices.sort_by(|&a, &b| {
            compare_values(
                self.data[a].get(&sort.key),
                self.data[b].get(&sort.key),
                sort.direction,
            )
        });

        RowSet::Subset {
            data: &self.data,
            indices,
        }
    }

    /// Filters, sorts and slices the current page.
    pub fn view(&self) -> TableView<'_> {
        let filtered = self.filtered();
        let sorted = self.sorted(&filtered);
        let pagination = PaginationState::compute(self.page, self.rows_per_page, sorted.len());

        let rows = pagination
            .slice_range()
            .filter_map(|i| sorted.get(i))
            .enumerate()
            .map(|(index, (source_index, record))| VisibleRow {
                index,
                source_index,
                id: self.row_key.id_for(record, self.generation, source_index),
                record,
            })
            .collect();

        TableView {
            filtered,
            sorted,
            rows,
            pagination,
        }
    }
}
