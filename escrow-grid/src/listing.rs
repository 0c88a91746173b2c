//! ListingController - the host-page glue for one listing.
//!
//! Owns the engine, the reconciler and the columns, fetches server pages
//! through a [`PageSource`], and turns the current state into a
//! [`RenderedGrid`].

use std::sync::Arc;

use escrow_lib::api::{PageRequest, PageResponse, PageSource};
use escrow_lib::error::FetchError;
use log::{debug, warn};

use crate::column::{
    Cell, ColumnDescriptor, GridContext, GridEvent, HeaderCell, RowState, resolve_cell,
    resolve_header,
};
use crate::engine::{TableConfig, TableEngine};
use crate::reconciler::{EffectivePagination, PagerEvent, PaginationReconciler};
use crate::selection::{RowId, xor_index};

/// A server request tagged with its issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub sequence: u64,
    pub request: PageRequest,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub id: RowId,
    pub state: RowState,
    pub cells: Vec<Cell>,
}

/// Headers, visible rows and pager state for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedGrid {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RenderedRow>,
    pub pagination: EffectivePagination,
}

/// Drives one listing page.
///
/// # Example
///
/// ```ignore
/// let source = Arc::new(MemorySource::from_path("transactions.json")?);
/// let mut listing = ListingController::new(TableConfig::new(["name"]), columns, source);
/// listing.load().await?;
/// listing.handle(PagerEvent::search("name", "acme")).await?;
/// let grid = listing.render(&GridContext::new());
/// ```
pub struct ListingController {
    engine: TableEngine,
    reconciler: PaginationReconciler,
    columns: Vec<ColumnDescriptor>,
    source: Arc<dyn PageSource>,
    latest: u64,
}

impl ListingController {
    /// Creates a controller. Nothing is fetched until [`load`](Self::load).
    pub fn new(
        config: TableConfig,
        columns: Vec<ColumnDescriptor>,
        source: Arc<dyn PageSource>,
    ) -> Self {
        let reconciler = PaginationReconciler::new(config.rows_per_page);
        Self {
            engine: TableEngine::new(config),
            reconciler,
            columns,
            source,
            latest: 0,
        }
    }

    pub fn engine(&self) -> &TableEngine {
        &self.engine
    }

    pub fn reconciler(&self) -> &PaginationReconciler {
        &self.reconciler
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Pagination the pager should show.
    pub fn effective_pagination(&self) -> EffectivePagination {
        self.reconciler.effective(&self.engine)
    }

    // -------------------------------------------------------------------------
    // Fetching
    // -------------------------------------------------------------------------

    /// Fetches the server page the reconciler currently holds.
    pub async fn load(&mut self) -> Result<(), FetchError> {
        let request = self.reconciler.current_request();
        self.fetch(request).await
    }

    /// Applies a pager event, fetching when the reconciler asks for it.
    ///
    /// If the fetch fails, pagination is restored to what it was before the
    /// event and the error is returned.
    pub async fn handle(&mut self, event: PagerEvent) -> Result<(), FetchError> {
        let reconciler = self.reconciler.clone();
        let (page, rows_per_page) = (self.engine.page(), self.engine.rows_per_page());

        let Some(request) = self.reconciler.dispatch(event, &mut self.engine) else {
            return Ok(());
        };

        if let Err(err) = self.fetch(request).await {
            warn!("Fetch of page {} failed: {}", request.page, err);
            self.reconciler = reconciler;
            self.engine.set_rows_per_page(rows_per_page);
            self.engine.set_page(page);
            return Err(err);
        }
        Ok(())
    }

    async fn fetch(&mut self, request: PageRequest) -> Result<(), FetchError> {
        let ticket = self.issue(request);
        let source = Arc::clone(&self.source);
        let response = source.fetch_page(&ticket.request).await?;
        self.apply(ticket, response)
    }

    /// Issues a ticket for a request the host will fetch itself.
    ///
    /// Every ticket supersedes the ones issued before it.
    pub fn issue(&mut self, request: PageRequest) -> FetchTicket {
        self.latest += 1;
        FetchTicket {
            sequence: self.latest,
            request,
        }
    }

    /// Applies a fetched page.
    ///
    /// Responses to superseded tickets are discarded and reported as
    /// [`FetchError::Superseded`], leaving the current rows untouched.
    pub fn apply(&mut self, ticket: FetchTicket, response: PageResponse) -> Result<(), FetchError> {
        if ticket.sequence < self.latest {
            debug!(
                "Discarding response {} for page {}, latest is {}",
                ticket.sequence, ticket.request.page, self.latest
            );
            return Err(FetchError::Superseded {
                sequence: ticket.sequence,
                latest: self.latest,
            });
        }

        let meta = response.page;
        self.engine.set_data(response.content);
        self.reconciler
            .dispatch(PagerEvent::Loaded(meta), &mut self.engine);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Applies a grid interaction. Returns `false` if it was not applicable.
    pub fn interact(&mut self, event: GridEvent, cx: &GridContext) -> bool {
        match event {
            GridEvent::Sort(key) => {
                let sortable = self
                    .columns
                    .iter()
                    .any(|column| column.key == key && column.sortable);
                if sortable {
                    self.engine.set_sort(&key);
                }
                sortable
            }
            GridEvent::ToggleSelection(index) => {
                let next = xor_index(&self.engine.selected_indices(), index);
                self.engine.set_selection(&next);
                true
            }
            GridEvent::ToggleExpansion(index) => {
                let next = xor_index(&self.engine.expanded_indices(), index);
                self.engine.set_expansion(&next);
                true
            }
            GridEvent::Action(action, index) => {
                let view = self.engine.view();
                let Some(row) = view.rows.get(index) else {
                    return false;
                };
                if !cx.row_actions(row.record).contains(&action) {
                    return false;
                }
                cx.handlers.invoke(action, row.record, index)
            }
            GridEvent::DataChange {
                index,
                column_key,
                value,
            } => {
                if !self.engine.update_cell(index, &column_key, value.clone()) {
                    return false;
                }
                cx.handlers.data_changed(index, &column_key, &value);
                true
            }
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Resolves headers and the cells of every visible row.
    pub fn render(&self, cx: &GridContext) -> RenderedGrid {
        let view = self.engine.view();
        let headers = self
            .columns
            .iter()
            .map(|column| {
                resolve_header(column, self.engine.sort(), cx.labels.as_ref(), &cx.language)
            })
            .collect();

        let rows = view
            .rows
            .iter()
            .map(|row| {
                let state = RowState {
                    index: row.index,
                    selected: self.engine.selection().is_selected(&row.id),
                    expanded: self.engine.expansion().is_selected(&row.id),
                };
                RenderedRow {
                    id: row.id.clone(),
                    state,
                    cells: self
                        .columns
                        .iter()
                        .map(|column| resolve_cell(column, row.record, state, cx))
                        .collect(),
                }
            })
            .collect();

        RenderedGrid {
            headers,
            rows,
            pagination: self.effective_pagination(),
        }
    }
}
