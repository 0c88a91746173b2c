use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use escrow_grid::column::{
    Cell, ColumnDescriptor, ColumnKind, GridContext, GridEvent, RowAction, RowHandlers,
    SortIndicator,
};
use escrow_grid::listing::ListingController;
use escrow_grid::{PageTarget, PagerEvent, PaginationMode, PaginationSource, TableConfig};
use escrow_lib::api::{MemorySource, PageRequest, PageResponse, PageSource};
use escrow_lib::error::FetchError;
use escrow_lib::model::{Record, Value};

fn transactions(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new()
                .set("id", i as i64)
                .set("name", format!("Row {}", i))
                .set("status", if i % 2 == 0 { "Approved" } else { "Pending" })
        })
        .collect()
}

fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("select", "", ColumnKind::Checkbox),
        ColumnDescriptor::new("name", "Name", ColumnKind::Text).sortable(),
        ColumnDescriptor::new("status", "Status", ColumnKind::Status),
        ColumnDescriptor::new("actions", "", ColumnKind::Actions),
    ]
}

fn listing(count: usize, rows_per_page: usize) -> ListingController {
    let source = Arc::new(MemorySource::new(transactions(count)));
    ListingController::new(
        TableConfig::new(["name", "status"]).with_rows_per_page(rows_per_page),
        columns(),
        source,
    )
}

fn ids(listing: &ListingController) -> Vec<i64> {
    listing
        .engine()
        .view()
        .rows
        .iter()
        .filter_map(|row| row.record.get_long("id").ok().flatten())
        .collect()
}

/// Serves a memory dataset until told to fail.
struct FlakySource {
    inner: MemorySource,
    failing: AtomicBool,
}

impl FlakySource {
    fn new(count: usize) -> Self {
        Self {
            inner: MemorySource::new(transactions(count)),
            failing: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl PageSource for FlakySource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse, FetchError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::with_status(503, "service unavailable"));
        }
        self.inner.fetch_page(request).await
    }
}

#[tokio::test]
async fn test_load_fetches_first_page() {
    let mut listing = listing(45, 20);
    listing.load().await.unwrap();

    assert_eq!(listing.engine().data().len(), 20);
    let effective = listing.effective_pagination();
    assert_eq!(effective.source, PaginationSource::Server);
    assert_eq!(effective.state.page, 1);
    assert_eq!(effective.state.total_rows, 45);
    assert_eq!(effective.state.total_pages, 3);
    assert_eq!((effective.state.start_item, effective.state.end_item), (1, 20));
}

#[tokio::test]
async fn test_server_paging() {
    let mut listing = listing(45, 20);
    listing.load().await.unwrap();

    listing
        .handle(PagerEvent::PageChange(PageTarget::Last))
        .await
        .unwrap();
    assert_eq!(ids(&listing), (40..45).collect::<Vec<_>>());

    let effective = listing.effective_pagination();
    assert_eq!(effective.state.page, 3);
    assert_eq!((effective.state.start_item, effective.state.end_item), (41, 45));
    // Server rows are shown whole, one server page at a time.
    assert_eq!(listing.engine().page(), 1);
}

#[tokio::test]
async fn test_rows_per_page_refetches() {
    let mut listing = listing(45, 20);
    listing.load().await.unwrap();
    listing
        .handle(PagerEvent::PageChange(PageTarget::Next))
        .await
        .unwrap();

    listing.handle(PagerEvent::RowsPerPage(10)).await.unwrap();
    assert_eq!(ids(&listing), (0..10).collect::<Vec<_>>());
    assert_eq!(listing.effective_pagination().state.total_pages, 5);
    assert_eq!(listing.reconciler().mode(), PaginationMode::Server { page: 1 });
}

#[tokio::test]
async fn test_search_paginates_fetched_rows_locally() {
    let mut listing = listing(45, 20);
    listing.load().await.unwrap();

    listing
        .handle(PagerEvent::search("name", "row 1"))
        .await
        .unwrap();
    let effective = listing.effective_pagination();
    assert_eq!(effective.source, PaginationSource::Local);
    assert_eq!(effective.state.total_rows, 11);
    assert_eq!(ids(&listing)[..3], [1, 10, 11]);

    // Only the fetched page is searched.
    assert!(!ids(&listing).contains(&21));

    listing.handle(PagerEvent::search("name", "")).await.unwrap();
    let effective = listing.effective_pagination();
    assert_eq!(effective.source, PaginationSource::Server);
    assert_eq!(effective.state.total_rows, 45);
}

#[tokio::test]
async fn test_superseded_response_is_discarded() {
    let source = MemorySource::new(transactions(45));
    let mut listing = listing(45, 20);

    let stale = listing.issue(PageRequest::new(1, 20));
    let fresh = listing.issue(PageRequest::new(2, 20));

    let err = listing
        .apply(stale, source.page(&stale.request))
        .unwrap_err();
    assert!(err.is_superseded());
    assert!(listing.engine().data().is_empty());

    listing.apply(fresh, source.page(&fresh.request)).unwrap();
    assert_eq!(ids(&listing), (40..45).collect::<Vec<_>>());
    assert_eq!(listing.reconciler().mode(), PaginationMode::Server { page: 3 });
}

#[tokio::test]
async fn test_failed_fetch_restores_pagination() {
    let source = Arc::new(FlakySource::new(45));
    let mut listing = ListingController::new(
        TableConfig::new(["name"]).with_rows_per_page(20),
        columns(),
        source.clone(),
    );
    listing.load().await.unwrap();

    source.failing.store(true, Ordering::SeqCst);

    let err = listing
        .handle(PagerEvent::PageChange(PageTarget::Next))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert_eq!(listing.reconciler().mode(), PaginationMode::Server { page: 1 });
    assert_eq!(ids(&listing), (0..20).collect::<Vec<_>>());

    listing
        .handle(PagerEvent::RowsPerPage(5))
        .await
        .unwrap_err();
    assert_eq!(listing.reconciler().rows_per_page(), 20);
    assert_eq!(listing.engine().rows_per_page(), 20);

    source.failing.store(false, Ordering::SeqCst);
    listing
        .handle(PagerEvent::PageChange(PageTarget::Next))
        .await
        .unwrap();
    assert_eq!(listing.reconciler().mode(), PaginationMode::Server { page: 2 });
}

#[tokio::test]
async fn test_sort_only_sortable_columns() {
    let mut listing = listing(5, 20);
    listing.load().await.unwrap();
    let cx = GridContext::new();

    assert!(listing.interact(GridEvent::Sort("name".into()), &cx));
    assert!(listing.interact(GridEvent::Sort("name".into()), &cx));
    assert_eq!(ids(&listing), vec![4, 3, 2, 1, 0]);

    assert!(!listing.interact(GridEvent::Sort("status".into()), &cx));
    assert!(!listing.interact(GridEvent::Sort("unknown".into()), &cx));
    assert_eq!(listing.engine().sort().map(|s| s.key.as_str()), Some("name"));
}

#[tokio::test]
async fn test_toggle_selection_and_expansion() {
    let mut listing = listing(5, 20);
    listing.load().await.unwrap();
    let cx = GridContext::new();

    listing.interact(GridEvent::ToggleSelection(1), &cx);
    listing.interact(GridEvent::ToggleSelection(3), &cx);
    assert_eq!(listing.engine().selected_indices(), vec![1, 3]);

    listing.interact(GridEvent::ToggleSelection(1), &cx);
    assert_eq!(listing.engine().selected_indices(), vec![3]);

    listing.interact(GridEvent::ToggleExpansion(0), &cx);
    assert_eq!(listing.engine().expanded_indices(), vec![0]);

    let grid = listing.render(&cx);
    assert_eq!(grid.rows[3].cells[0], Cell::Selection { checked: true });
    assert!(grid.rows[0].state.expanded);
}

#[tokio::test]
async fn test_selection_without_row_ids_clears_on_page_change() {
    let rows: Vec<Record> = (0..10)
        .map(|i| Record::new().set("name", format!("Row {}", i)))
        .collect();
    let mut listing = ListingController::new(
        TableConfig::new(["name"]).with_rows_per_page(5),
        columns(),
        Arc::new(MemorySource::new(rows)),
    );
    listing.load().await.unwrap();
    let cx = GridContext::new();

    listing.interact(GridEvent::ToggleSelection(0), &cx);
    assert_eq!(listing.engine().selected_indices(), vec![0]);

    listing
        .handle(PagerEvent::PageChange(PageTarget::Next))
        .await
        .unwrap();
    assert!(listing.engine().selected_indices().is_empty());
    assert!(listing.engine().selection().is_empty());
    assert!(listing.engine().selected_records().is_empty());
}

#[tokio::test]
async fn test_actions_reach_handlers() {
    let mut listing = listing(5, 20);
    listing.load().await.unwrap();

    let viewed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&viewed);
    let cx = GridContext::new().with_handlers(RowHandlers::new().on(
        RowAction::View,
        move |row, index| {
            let id = row.get_long("id").ok().flatten();
            sink.lock().unwrap().push((id, index));
        },
    ));

    assert!(listing.interact(GridEvent::Action(RowAction::View, 2), &cx));
    assert!(!listing.interact(GridEvent::Action(RowAction::Delete, 2), &cx));
    assert!(!listing.interact(GridEvent::Action(RowAction::View, 9), &cx));
    assert_eq!(*viewed.lock().unwrap(), vec![(Some(2), 2)]);
}

#[tokio::test]
async fn test_data_change_updates_row_and_notifies() {
    let mut listing = listing(5, 20);
    listing.load().await.unwrap();

    let changes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&changes);
    let cx = GridContext::new().with_handlers(RowHandlers::new().on_data_change(
        move |index, key, value| {
            assert_eq!((index, key), (1, "status"));
            assert_eq!(value, &Value::from("Released"));
            counter.fetch_add(1, Ordering::SeqCst);
        },
    ));

    let changed = listing.interact(
        GridEvent::DataChange {
            index: 1,
            column_key: "status".into(),
            value: Value::from("Released"),
        },
        &cx,
    );
    assert!(changed);
    assert_eq!(changes.load(Ordering::SeqCst), 1);
    assert_eq!(
        listing.engine().data()[1].get_string("status").unwrap(),
        Some("Released")
    );

    let changed = listing.interact(
        GridEvent::DataChange {
            index: 99,
            column_key: "status".into(),
            value: Value::Null,
        },
        &cx,
    );
    assert!(!changed);
    assert_eq!(changes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_render_grid() {
    let mut listing = listing(3, 20);
    listing.load().await.unwrap();
    listing.interact(GridEvent::Sort("name".into()), &GridContext::new());

    let grid = listing.render(&GridContext::new());
    assert_eq!(grid.headers.len(), 4);
    assert_eq!(grid.headers[1].label, "Name");
    assert_eq!(grid.headers[1].indicator, Some(SortIndicator::Ascending));
    assert_eq!(grid.headers[2].indicator, None);

    assert_eq!(grid.rows.len(), 3);
    let row = &grid.rows[1];
    assert_eq!(row.id.as_str(), "1");
    assert_eq!(row.state.index, 1);
    assert_eq!(row.cells[1].to_plain_text(), "Row 1");
    assert_eq!(row.cells[2].to_plain_text(), "Pending");
    assert_eq!(row.cells[3], Cell::Actions(Vec::new()));
    assert_eq!(grid.pagination.source, PaginationSource::Server);
}
