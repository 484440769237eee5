//! Integration tests for `BrowseSession` driving a wiremock upstream.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use offcat_client::{BrowseSession, OffClient, UpstreamError};
use offcat_core::FilterState;

fn session_for(server: &MockServer) -> BrowseSession {
    let client = OffClient::with_base_url("offcat-test/0.1", 30, &server.uri())
        .expect("client construction should not fail");
    BrowseSession::new(client, 24)
}

fn search_page(n: usize, count: u64, page: u32) -> serde_json::Value {
    json!({
        "products": (0..n)
            .map(|i| json!({ "code": format!("p{page}-{i:02}") }))
            .collect::<Vec<_>>(),
        "count": count,
        "page": page,
        "page_size": 24
    })
}

#[tokio::test]
async fn name_search_load_more_appends_across_pages() {
    let server = MockServer::start().await;

    for (page, items) in [(1u32, 24usize), (2, 24), (3, 2)] {
        Mock::given(method("GET"))
            .and(path("/cgi/search.pl"))
            .and(query_param("search_terms", "chocolate"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(search_page(items, 50, page)),
            )
            .mount(&server)
            .await;
    }

    let mut s = session_for(&server);
    s.set_filter(FilterState::Name("chocolate".into()));
    s.refresh().await.expect("refresh");
    assert_eq!(s.products().len(), 24);
    assert_eq!(s.page_count(), 3);

    assert!(s.load_more().await.expect("page 2"));
    assert!(s.load_more().await.expect("page 3"));
    assert_eq!(s.products().len(), 50);

    // All codes unique: strictly appended, never duplicated or dropped.
    let mut codes: Vec<&str> = s.products().iter().map(|p| p.code.as_str()).collect();
    assert_eq!(codes[0], "p1-00");
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), 50);

    // Exhausted: load-more is a no-op now.
    assert!(!s.load_more().await.expect("no-op"));
    assert_eq!(s.products().len(), 50);
}

#[tokio::test]
async fn barcode_filter_short_circuits_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/product/3017620422003.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 1,
            "product": { "code": "3017620422003", "product_name": "Nutella" }
        })))
        .mount(&server)
        .await;

    let mut s = session_for(&server);
    s.set_filter_inputs("3017620422003", "also typed a name", "and a category");
    assert_eq!(
        *s.filter(),
        FilterState::Barcode("3017620422003".into()),
        "barcode outranks every other input"
    );

    s.refresh().await.expect("refresh");
    assert_eq!(s.products().len(), 1);
    assert!(!s.has_more());
    assert!(!s.load_more().await.expect("no-op for barcode"));
}

#[tokio::test]
async fn category_filter_uses_two_phase_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/category/beverages.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": (0..30).map(|i| json!({ "code": format!("{i:04}") })).collect::<Vec<_>>()
        })))
        .mount(&server)
        .await;

    let mut s = session_for(&server);
    s.set_filter(FilterState::Category("Beverages".into()));
    s.refresh().await.expect("refresh");
    assert_eq!(s.products().len(), 24);
    assert_eq!(s.total_count(), 30);
    assert_eq!(s.page_count(), 2);

    assert!(s.load_more().await.expect("page 2"));
    assert_eq!(s.products().len(), 30);
    assert!(!s.has_more());
}

#[tokio::test]
async fn no_filter_loads_popular_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi/search.pl"))
        .and(query_param("sort_by", "popularity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(24, 24, 1)))
        .mount(&server)
        .await;

    let mut s = session_for(&server);
    s.refresh().await.expect("refresh");
    assert_eq!(s.products().len(), 24);
    assert!(!s.has_more());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi/search.pl"))
        .and(query_param("search_terms", "tea"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(5, 5, 1)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cgi/search.pl"))
        .and(query_param("search_terms", "broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut s = session_for(&server);
    s.set_filter(FilterState::Name("tea".into()));
    s.refresh().await.expect("refresh");
    assert_eq!(s.products().len(), 5);

    s.set_filter(FilterState::Name("broken".into()));
    let result = s.refresh().await;
    assert!(matches!(result, Err(UpstreamError::Unavailable(_))));
    assert_eq!(s.products().len(), 5, "failure leaves prior results intact");
    assert!(!s.is_loading());
}
