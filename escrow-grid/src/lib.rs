//! Tabular data-view engine for back-office listing pages.
//!
//! - [`engine::TableEngine`] turns an in-memory collection into a searched,
//!   sorted, paginated view with row selection and expansion.
//! - [`reconciler::PaginationReconciler`] decides whether the pager shows the
//!   server's totals or the engine's local ones.
//! - [`column`] maps typed column descriptors to interactive cells.
//! - [`listing::ListingController`] wires the three to a
//!   [`PageSource`](escrow_lib::api::PageSource) the way a listing page does.

pub mod column;
pub mod engine;
pub mod listing;
pub mod pagination;
pub mod reconciler;
pub mod search;
pub mod selection;
pub mod sort;

pub use engine::{RowSet, TableConfig, TableEngine, TableView, VisibleRow};
pub use pagination::PaginationState;
pub use reconciler::{
    EffectivePagination, PageTarget, PagerEvent, PaginationMode, PaginationReconciler,
    PaginationSource,
};
pub use selection::{RowId, RowKey, Selection};
pub use sort::{SortDirection, SortState};
