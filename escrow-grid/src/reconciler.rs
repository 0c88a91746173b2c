//! PaginationReconciler - chooses between server and local pagination.
//!
//! A listing page fetches one server page at a time and refines it locally
//! with the engine's search. While no search is active the pager shows and
//! drives the server's pagination; while one is active it shows and drives
//! the engine's pagination over the fetched rows. The two page counters are
//! kept apart in [`PaginationMode`] and only swap on search start and clear.

use escrow_lib::api::{PageMeta, PageRequest};
use log::{debug, trace};

use crate::engine::TableEngine;
use crate::pagination::PaginationState;
use crate::search::SearchState;

/// Which source the pager currently follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// No active search; `page` is the 1-based server page.
    Server { page: usize },
    /// Search active; `server_page` is the server page to resume on clear.
    Local { server_page: usize },
}

impl PaginationMode {
    /// The server page this mode holds.
    pub fn server_page(&self) -> usize {
        match *self {
            PaginationMode::Server { page } => page,
            PaginationMode::Local { server_page } => server_page,
        }
    }

    /// The matching [`PaginationSource`].
    pub fn source(&self) -> PaginationSource {
        match self {
            PaginationMode::Server { .. } => PaginationSource::Server,
            PaginationMode::Local { .. } => PaginationSource::Local,
        }
    }
}

/// Origin of an [`EffectivePagination`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationSource {
    Server,
    Local,
}

/// The pagination tuple shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectivePagination {
    pub source: PaginationSource,
    pub state: PaginationState,
}

/// A pager navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    First,
    Previous,
    Next,
    Last,
    /// A 1-based page number.
    Goto(usize),
}

impl PageTarget {
    /// Resolves the target against the current page, clamped to
    /// `[1, max(1, total_pages)]`.
    pub fn resolve(self, current: usize, total_pages: usize) -> usize {
        let last = total_pages.max(1);
        let page = match self {
            PageTarget::First => 1,
            PageTarget::Previous => current.saturating_sub(1),
            PageTarget::Next => current.saturating_add(1),
            PageTarget::Last => last,
            PageTarget::Goto(page) => page,
        };
        page.clamp(1, last)
    }
}

/// Inputs to the reconciler.
#[derive(Debug, Clone, PartialEq)]
pub enum PagerEvent {
    /// A search field changed.
    Search { field: String, value: String },
    /// The pager asked for another page.
    PageChange(PageTarget),
    /// The pager changed rows per page.
    RowsPerPage(usize),
    /// A server page arrived.
    Loaded(PageMeta),
}

impl PagerEvent {
    /// Shorthand for [`PagerEvent::Search`].
    pub fn search(field: impl Into<String>, value: impl Into<String>) -> Self {
        PagerEvent::Search {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Picks server pagination when no search is active, local otherwise.
pub fn resolve_effective_pagination(
    has_active_search: bool,
    server: PaginationState,
    local: PaginationState,
) -> EffectivePagination {
    if has_active_search {
        EffectivePagination {
            source: PaginationSource::Local,
            state: local,
        }
    } else {
        EffectivePagination {
            source: PaginationSource::Server,
            state: server,
        }
    }
}

/// Returns `true` if any query has non-whitespace content.
pub fn has_active_search(search: &SearchState) -> bool {
    search.has_active_search()
}

/// Single reducer over [`PagerEvent`]s.
///
/// # Example
///
/// ```
/// use escrow_grid::{PageTarget, PagerEvent, PaginationReconciler, TableConfig, TableEngine};
///
/// let mut engine = TableEngine::new(TableConfig::new(["name"]));
/// let mut reconciler = PaginationReconciler::new(20);
///
/// // No search: page changes go to the server.
/// let fetch = reconciler.dispatch(PagerEvent::RowsPerPage(10), &mut engine);
/// assert_eq!(fetch.map(|r| (r.page, r.size)), Some((0, 10)));
///
/// // Search active: page changes stay local.
/// reconciler.dispatch(PagerEvent::search("name", "acme"), &mut engine);
/// assert!(reconciler.dispatch(PagerEvent::PageChange(PageTarget::Next), &mut engine).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationReconciler {
    mode: PaginationMode,
    server: PageMeta,
    rows_per_page: usize,
}

impl PaginationReconciler {
    /// Creates a reconciler in server mode on page 1.
    pub fn new(rows_per_page: usize) -> Self {
        let rows_per_page = rows_per_page.max(1);
        Self {
            mode: PaginationMode::Server { page: 1 },
            server: PageMeta::new(0, rows_per_page, 0),
            rows_per_page,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// The server's last reported pagination.
    pub fn server(&self) -> &PageMeta {
        &self.server
    }

    /// Rows per page shared by server requests and the engine.
    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// The request for the server page the reconciler currently holds.
    pub fn current_request(&self) -> PageRequest {
        PageRequest::new(self.mode.server_page().saturating_sub(1), self.rows_per_page)
    }

    /// Pagination to display.
    pub fn effective(&self, engine: &TableEngine) -> EffectivePagination {
        resolve_effective_pagination(
            matches!(self.mode, PaginationMode::Local { .. }),
            PaginationState::from_server(&self.server),
            engine.local_pagination(),
        )
    }

    /// Applies an event, updating `engine` as needed.
    ///
    /// Returns the server request to issue, if the event needs one.
    pub fn dispatch(&mut self, event: PagerEvent, engine: &mut TableEngine) -> Option<PageRequest> {
        match event {
            PagerEvent::Search { field, value } => {
                engine.update_search(&field, value);
                self.sync_mode(has_active_search(engine.search()));
                None
            }
            PagerEvent::PageChange(target) => self.change_page(target, engine),
            PagerEvent::RowsPerPage(rows_per_page) => {
                let rows_per_page = rows_per_page.max(1);
                self.rows_per_page = rows_per_page;
                engine.set_rows_per_page(rows_per_page);
                self.mode = match self.mode {
                    PaginationMode::Server { .. } => PaginationMode::Server { page: 1 },
                    PaginationMode::Local { .. } => PaginationMode::Local { server_page: 1 },
                };
                debug!("Rows per page set to {}", rows_per_page);
                Some(PageRequest::first(rows_per_page))
            }
            PagerEvent::Loaded(meta) => {
                self.server = meta;
                let page = meta.number + 1;
                self.mode = match self.mode {
                    PaginationMode::Server { .. } => PaginationMode::Server { page },
                    PaginationMode::Local { .. } => PaginationMode::Local { server_page: page },
                };
                trace!(
                    "Server page {} loaded ({} rows total)",
                    page, meta.total_elements
                );
                None
            }
        }
    }

    fn sync_mode(&mut self, active: bool) {
        match (self.mode, active) {
            (PaginationMode::Server { page }, true) => {
                debug!("Search active, paginating locally (server page {})", page);
                self.mode = PaginationMode::Local { server_page: page };
            }
            (PaginationMode::Local { server_page }, false) => {
                debug!("Search cleared, resuming server page {}", server_page);
                self.mode = PaginationMode::Server { page: server_page };
            }
            _ => {}
        }
    }

    fn change_page(&mut self, target: PageTarget, engine: &mut TableEngine) -> Option<PageRequest> {
        match self.mode {
            PaginationMode::Server { page } => {
                let next = target.resolve(page, self.server.total_pages);
                if next == page {
                    return None;
                }
                self.mode = PaginationMode::Server { page: next };
                trace!("Server page {} -> {}", page, next);
                Some(PageRequest::new(next - 1, self.rows_per_page))
            }
            PaginationMode::Local { .. } => {
                let local = engine.local_pagination();
                let next = target.resolve(engine.page(), local.total_pages);
                trace!("Local page {} -> {}", engine.page(), next);
                engine.set_page(next);
                None
            }
        }
    }
}
