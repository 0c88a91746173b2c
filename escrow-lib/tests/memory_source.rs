use escrow_lib::api::{MemorySource, PageRequest, PageSource};
use escrow_lib::model::Record;

fn rows(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| Record::new().set("id", i as i64).set("name", format!("Row {}", i)))
        .collect()
}

#[tokio::test]
async fn test_first_page() {
    let source = MemorySource::new(rows(55));
    let page = source.fetch_page(&PageRequest::first(20)).await.unwrap();

    assert_eq!(page.len(), 20);
    assert_eq!(page.page.number, 0);
    assert_eq!(page.page.total_elements, 55);
    assert_eq!(page.page.total_pages, 3);
    assert!(page.has_more());
}

#[tokio::test]
async fn test_last_page_is_partial() {
    let source = MemorySource::new(rows(55));
    let page = source.fetch_page(&PageRequest::new(2, 20)).await.unwrap();

    assert_eq!(page.len(), 15);
    assert_eq!(page.records()[0].get_long("id").unwrap(), Some(40));
    assert!(!page.has_more());
}

#[tokio::test]
async fn test_page_past_end_is_empty() {
    let source = MemorySource::new(rows(55));
    let page = source.fetch_page(&PageRequest::new(3, 20)).await.unwrap();

    assert!(page.is_empty());
    assert_eq!(page.page.total_elements, 55);
    assert_eq!(page.page.total_pages, 3);
}

#[tokio::test]
async fn test_from_json() {
    let source = MemorySource::from_json(r#"[{"name": "Acme"}, {"name": "Zeta"}]"#).unwrap();
    let page = source.fetch_page(&PageRequest::first(10)).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.records()[1].get_string("name").unwrap(), Some("Zeta"));
}

#[test]
fn test_from_json_rejects_non_array() {
    let err = MemorySource::from_json(r#"{"name": "Acme"}"#).unwrap_err();
    assert!(matches!(err, escrow_lib::error::FetchError::Parse(_)));
}
