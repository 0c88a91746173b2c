use escrow_grid::reconciler::resolve_effective_pagination;
use escrow_grid::{
    PageTarget, PagerEvent, PaginationMode, PaginationReconciler, PaginationSource,
    PaginationState, TableConfig, TableEngine,
};
use escrow_lib::api::PageMeta;
use escrow_lib::model::Record;

fn numbered(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| Record::new().set("id", i as i64).set("name", format!("Row {}", i)))
        .collect()
}

fn server_page(number: usize, size: usize, total: usize) -> PageMeta {
    PageMeta::new(number, size, total)
}

fn setup(rows_per_page: usize, fetched: usize) -> (PaginationReconciler, TableEngine) {
    let engine = TableEngine::new(TableConfig::new(["name"]).with_rows_per_page(rows_per_page))
        .with_data(numbered(fetched));
    (PaginationReconciler::new(rows_per_page), engine)
}

#[test]
fn test_starts_in_server_mode() {
    let (reconciler, _) = setup(20, 0);
    assert_eq!(reconciler.mode(), PaginationMode::Server { page: 1 });
    assert_eq!(reconciler.current_request().page, 0);
    assert_eq!(reconciler.current_request().size, 20);
}

#[test]
fn test_server_page_change_requests_fetch() {
    let (mut reconciler, mut engine) = setup(20, 20);
    reconciler.dispatch(PagerEvent::Loaded(server_page(0, 20, 55)), &mut engine);

    let request = reconciler
        .dispatch(PagerEvent::PageChange(PageTarget::Next), &mut engine)
        .unwrap();
    assert_eq!((request.page, request.size), (1, 20));
    assert_eq!(reconciler.mode(), PaginationMode::Server { page: 2 });
    assert_eq!(engine.page(), 1);
}

#[test]
fn test_server_page_change_is_clamped() {
    let (mut reconciler, mut engine) = setup(20, 15);
    reconciler.dispatch(PagerEvent::Loaded(server_page(2, 20, 55)), &mut engine);

    assert!(reconciler
        .dispatch(PagerEvent::PageChange(PageTarget::Next), &mut engine)
        .is_none());

    let request = reconciler
        .dispatch(PagerEvent::PageChange(PageTarget::Goto(9)), &mut engine);
    assert!(request.is_none());

    let request = reconciler
        .dispatch(PagerEvent::PageChange(PageTarget::First), &mut engine)
        .unwrap();
    assert_eq!(request.page, 0);
}

#[test]
fn test_active_search_paginates_locally() {
    let (mut reconciler, mut engine) = setup(5, 12);
    reconciler.dispatch(PagerEvent::Loaded(server_page(0, 5, 60)), &mut engine);

    reconciler.dispatch(PagerEvent::search("name", "row"), &mut engine);
    assert_eq!(reconciler.mode(), PaginationMode::Local { server_page: 1 });

    let request = reconciler.dispatch(PagerEvent::PageChange(PageTarget::Next), &mut engine);
    assert!(request.is_none());
    assert_eq!(engine.page(), 2);

    let effective = reconciler.effective(&engine);
    assert_eq!(effective.source, PaginationSource::Local);
    assert_eq!(effective.state.page, 2);
    assert_eq!(effective.state.total_rows, 12);
    assert_eq!(effective.state.total_pages, 3);
}

#[test]
fn test_clearing_search_resumes_server_page() {
    let (mut reconciler, mut engine) = setup(5, 12);
    reconciler.dispatch(PagerEvent::Loaded(server_page(0, 5, 60)), &mut engine);

    reconciler.dispatch(PagerEvent::search("name", "row"), &mut engine);
    reconciler.dispatch(PagerEvent::PageChange(PageTarget::Goto(2)), &mut engine);
    assert_eq!(engine.page(), 2);

    reconciler.dispatch(PagerEvent::search("name", ""), &mut engine);
    assert_eq!(reconciler.mode(), PaginationMode::Server { page: 1 });

    let effective = reconciler.effective(&engine);
    assert_eq!(effective.source, PaginationSource::Server);
    assert_eq!(effective.state.page, 1);
    assert_eq!(effective.state.total_rows, 60);

    // Next from server page 1, not from local page 2.
    let request = reconciler
        .dispatch(PagerEvent::PageChange(PageTarget::Next), &mut engine)
        .unwrap();
    assert_eq!(request.page, 1);
}

#[test]
fn test_server_page_kept_through_local_mode() {
    let (mut reconciler, mut engine) = setup(5, 5);
    reconciler.dispatch(PagerEvent::Loaded(server_page(2, 5, 60)), &mut engine);

    reconciler.dispatch(PagerEvent::search("name", "1"), &mut engine);
    reconciler.dispatch(PagerEvent::PageChange(PageTarget::Last), &mut engine);
    reconciler.dispatch(PagerEvent::search("name", ""), &mut engine);

    assert_eq!(reconciler.mode(), PaginationMode::Server { page: 3 });
    let request = reconciler
        .dispatch(PagerEvent::PageChange(PageTarget::Previous), &mut engine)
        .unwrap();
    assert_eq!(request.page, 1);
}

#[test]
fn test_whitespace_search_stays_in_server_mode() {
    let (mut reconciler, mut engine) = setup(5, 5);
    reconciler.dispatch(PagerEvent::search("name", "   "), &mut engine);
    assert_eq!(reconciler.mode(), PaginationMode::Server { page: 1 });
}

#[test]
fn test_rows_per_page_resets_both_modes() {
    let (mut reconciler, mut engine) = setup(5, 12);
    reconciler.dispatch(PagerEvent::Loaded(server_page(3, 5, 60)), &mut engine);

    let request = reconciler
        .dispatch(PagerEvent::RowsPerPage(10), &mut engine)
        .unwrap();
    assert_eq!((request.page, request.size), (0, 10));
    assert_eq!(reconciler.mode(), PaginationMode::Server { page: 1 });
    assert_eq!(engine.rows_per_page(), 10);
    assert_eq!(engine.page(), 1);

    reconciler.dispatch(PagerEvent::search("name", "row"), &mut engine);
    reconciler.dispatch(PagerEvent::PageChange(PageTarget::Next), &mut engine);
    assert_eq!(engine.page(), 2);

    let request = reconciler
        .dispatch(PagerEvent::RowsPerPage(4), &mut engine)
        .unwrap();
    assert_eq!((request.page, request.size), (0, 4));
    assert_eq!(reconciler.mode(), PaginationMode::Local { server_page: 1 });
    assert_eq!(engine.rows_per_page(), 4);
    assert_eq!(engine.page(), 1);
}

#[test]
fn test_loaded_in_local_mode_updates_resume_page() {
    let (mut reconciler, mut engine) = setup(5, 5);
    reconciler.dispatch(PagerEvent::search("name", "row"), &mut engine);
    reconciler.dispatch(PagerEvent::Loaded(server_page(4, 5, 60)), &mut engine);

    assert_eq!(reconciler.mode(), PaginationMode::Local { server_page: 5 });
    assert_eq!(reconciler.server().total_elements, 60);
}

#[test]
fn test_resolve_effective_pagination() {
    let server = PaginationState::compute(2, 20, 100);
    let local = PaginationState::compute(1, 20, 7);

    let effective = resolve_effective_pagination(false, server, local);
    assert_eq!(effective.source, PaginationSource::Server);
    assert_eq!(effective.state, server);

    let effective = resolve_effective_pagination(true, server, local);
    assert_eq!(effective.source, PaginationSource::Local);
    assert_eq!(effective.state.total_rows, 7);
}

#[test]
fn test_page_target_resolve() {
    assert_eq!(PageTarget::Previous.resolve(1, 3), 1);
    assert_eq!(PageTarget::Next.resolve(3, 3), 3);
    assert_eq!(PageTarget::Last.resolve(1, 0), 1);
    assert_eq!(PageTarget::Goto(0).resolve(2, 3), 1);
}
