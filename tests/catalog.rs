use folio::client::{CatalogClient, CatalogError};
use folio::model::Book;
use folio::store::{BookStore, Theme};
use mockito::{Matcher, Server};

const DUNE_BODY: &str = r#"{
  "kind": "books#volumes",
  "totalItems": 2,
  "items": [
    {
      "id": "A1",
      "volumeInfo": {
        "title": "Dune",
        "authors": ["Frank Herbert"],
        "description": "Spice.",
        "imageLinks": { "thumbnail": "http://img/a1" },
        "previewLink": "http://preview/a1",
        "infoLink": "http://info/a1"
      },
      "saleInfo": { "buyLink": "http://buy/a1" }
    },
    {
      "id": "A2",
      "volumeInfo": { "title": "Dune Messiah" }
    }
  ]
}"#;

fn client_for(server: &Server) -> CatalogClient {
    CatalogClient::new(&server.url(), false).expect("mock url is absolute")
}

#[tokio::test]
async fn test_search_fills_results_in_order() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/volumes")
        .match_query(Matcher::UrlEncoded("q".into(), "dune".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(DUNE_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut store = BookStore::default();
    store.search.viewing_favorites = true;

    assert!(store.search(&client, "dune").await);
    mock.assert_async().await;

    let ids: Vec<&str> = store.search.results.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["A1", "A2"]);
    assert!(!store.search.viewing_favorites);
    assert!(!store.search.is_loading);

    let a1 = &store.search.results[0];
    assert_eq!(a1.authors, vec!["Frank Herbert".to_string()]);
    assert_eq!(a1.thumbnail_url.as_deref(), Some("http://img/a1"));
    assert_eq!(a1.buy_link.as_deref(), Some("http://buy/a1"));
    assert_eq!(store.search.results[1].description, None);
}

#[tokio::test]
async fn test_blank_query_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut store = BookStore::default();
    store.search.results = vec![Book::new("keep", "Kept")];

    assert!(!store.search(&client, "").await);
    assert!(!store.search(&client, "   \t").await);
    mock.assert_async().await;

    assert_eq!(store.search.results.len(), 1);
    assert!(!store.search.is_loading);
}

#[tokio::test]
async fn test_query_is_escaped_like_uri_component() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/volumes")
        .match_query(Matcher::Exact("q=c%2B%2B%20%26%20rust%2F%C3%A9".into()))
        .with_status(200)
        .with_body(r#"{"items": []}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let books = client.search_volumes("c++ & rust/é").await.unwrap();
    mock.assert_async().await;
    assert!(books.is_empty());
}

#[tokio::test]
async fn test_missing_items_clears_results() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/volumes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"kind": "books#volumes", "totalItems": 0}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut store = BookStore::default();
    store.search.results = vec![Book::new("old", "Old")];

    store.search(&client, "zzzzqqq").await;
    assert!(store.search.results.is_empty());
    assert!(!store.search.is_loading);
}

#[tokio::test]
async fn test_server_error_keeps_previous_results() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/volumes")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = client_for(&server);
    match client.search_volumes("dune").await {
        Err(CatalogError::Status(code)) => assert_eq!(code.as_u16(), 500),
        other => panic!("expected status error, got {:?}", other),
    }

    let mut store = BookStore::default();
    store.search.results = vec![Book::new("keep", "Kept")];
    store.search(&client, "dune").await;

    assert_eq!(store.search.results, vec![Book::new("keep", "Kept")]);
    assert!(!store.search.is_loading);
}

#[tokio::test]
async fn test_malformed_json_is_swallowed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/volumes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.search_volumes("dune").await,
        Err(CatalogError::Decode(_))
    ));

    let mut store = BookStore::default();
    store.search(&client, "dune").await;
    assert!(store.search.results.is_empty());
    assert!(!store.search.is_loading);
}

#[tokio::test]
async fn test_default_load_uses_configured_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/volumes")
        .match_query(Matcher::UrlEncoded("q".into(), "science fiction".into()))
        .with_status(200)
        .with_body(DUNE_BODY)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut store = BookStore::new("science fiction", Theme::Dark);
    store.set_query("leftover".to_string());

    assert!(store.load_default(&client).await);
    mock.assert_async().await;
    assert_eq!(store.search.query, "");
    assert_eq!(store.search.results.len(), 2);
}

#[tokio::test]
async fn test_favorites_survive_a_new_search() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/volumes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(DUNE_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut store = BookStore::default();
    store.search(&client, "dune").await;

    let a1 = store.search.results[0].clone();
    store.toggle_favorite(&a1);
    store.search(&client, "dune").await;

    let rows = store.rows();
    assert!(rows[0].is_favorite);
    assert!(!rows[1].is_favorite);
    assert_eq!(store.favorites.len(), 1);
}

#[tokio::test]
async fn test_unreachable_host_does_not_escape() {
    // Nothing listens on the discard port.
    let client = CatalogClient::new("http://127.0.0.1:9", false).unwrap();
    let mut store = BookStore::default();
    store.search(&client, "dune").await;
    assert!(!store.search.is_loading);
    assert!(store.search.results.is_empty());
}
