//! HTTP-level tests for the transport and the network-backed adapters.

use std::sync::Arc;
use std::time::Duration;

use anshin_core::errors::{AnshinError, SourceError};
use anshin_core::geo::GeoPoint;
use anshin_core::models::{CollectionTarget, SourceType};
use anshin_core::traits::{PlaceQuery, PlaceSearch, SourceAdapter};
use anshin_sources::adapters::{GourmetAdapter, OfficialListAdapter, SnsAdapter};
use anshin_sources::{CustomSearchClient, GooglePlacesClient, HttpClient, HttpClientConfig};
use httpmock::prelude::*;
use serde_json::json;

fn fast_http(max_retries: u32) -> HttpClient {
    HttpClient::new(HttpClientConfig {
        timeout: Duration::from_secs(5),
        max_retries,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(5),
        user_agent: "anshin-test".to_string(),
    })
    .unwrap()
}

// ── Transport ───────────────────────────────────────────────────────

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/page");
            then.status(404);
        })
        .await;

    let err = fast_http(3).get_text(&server.url("/page"), &[]).await.unwrap_err();
    assert!(matches!(
        err,
        AnshinError::SourceError(SourceError::HttpStatus { status: 404, .. })
    ));
    mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn server_errors_exhaust_retries() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/flaky");
            then.status(503);
        })
        .await;

    let err = fast_http(2).get_text(&server.url("/flaky"), &[]).await.unwrap_err();
    assert!(matches!(
        err,
        AnshinError::SourceError(SourceError::HttpStatus { status: 503, .. })
    ));
    // 1 initial + 2 retries
    mock.assert_calls_async(3).await;
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/json");
            then.status(200).body("not json");
        })
        .await;

    let err = fast_http(0)
        .get_json::<serde_json::Value>(&server.url("/json"), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, AnshinError::SourceError(SourceError::Parse { .. })));
}

// ── Places ──────────────────────────────────────────────────────────

#[tokio::test]
async fn places_search_sends_key_and_field_mask() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/places:searchText")
                .header("x-goog-api-key", "test-key")
                .header_exists("x-goog-fieldmask");
            then.status(200).json_body(json!({
                "places": [{
                    "id": "p1",
                    "displayName": { "text": "こめこ食堂" },
                    "formattedAddress": "福岡市中央区天神1-1-1",
                    "location": { "latitude": 33.59, "longitude": 130.40 },
                    "editorialSummary": { "text": "米粉のパンケーキが人気" }
                }]
            }));
        })
        .await;

    let client = GooglePlacesClient::new(
        fast_http(0),
        server.url("/v1/places:searchText"),
        Some("test-key".to_string()),
    );
    let query = PlaceQuery::text("グルテンフリー", 20).near(GeoPoint::new(33.54, 130.33), 5_000);
    let hits = client.search(&query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "こめこ食堂");
    assert_eq!(hits[0].place_id.as_deref(), Some("p1"));
    assert_eq!(hits[0].summary.as_deref(), Some("米粉のパンケーキが人気"));
}

#[tokio::test]
async fn places_without_key_is_missing_credential() {
    let client = GooglePlacesClient::new(fast_http(0), "http://127.0.0.1:9/none", None);
    assert!(!client.is_available());
    let err = client.search(&PlaceQuery::text("x", 1)).await.unwrap_err();
    assert!(matches!(
        err,
        AnshinError::SourceError(SourceError::MissingCredential { .. })
    ));
}

// ── Custom search adapters ──────────────────────────────────────────

#[tokio::test]
async fn sns_adapter_reads_search_items() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/customsearch/v1")
                .query_param("key", "k")
                .query_param("cx", "cx1");
            then.status(200).json_body(json!({
                "items": [{
                    "title": "こめこ食堂 | Instagram",
                    "link": "https://www.instagram.com/p/abc/",
                    "snippet": "グルテンフリーのランチ"
                }]
            }));
        })
        .await;

    let search = CustomSearchClient::new(
        fast_http(0),
        server.url("/customsearch/v1"),
        Some("k".to_string()),
        Some("cx1".to_string()),
    );
    let adapter = SnsAdapter::new(Arc::new(search));
    let out = adapter.collect(&CollectionTarget::area("福岡市")).await.unwrap();

    // Three site-restricted queries, each answered with the same item.
    mock.assert_calls_async(3).await;
    assert_eq!(out.len(), 3);
    assert_eq!(out[0].shop_name, "こめこ食堂");
    assert_eq!(out[0].source.source_type, SourceType::Sns);
    assert_eq!(out[0].menus.len(), 1);
}

#[tokio::test]
async fn sns_adapter_skips_without_credentials() {
    let search = CustomSearchClient::new(fast_http(0), "http://127.0.0.1:9/none", None, None);
    let adapter = SnsAdapter::new(Arc::new(search));
    assert!(adapter
        .collect(&CollectionTarget::area("福岡市"))
        .await
        .unwrap()
        .is_empty());
}

// ── Scraping adapters ───────────────────────────────────────────────

#[tokio::test]
async fn gourmet_adapter_queries_area_keyword() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/rstLst/").query_param("sk", "天神 アレルギー");
            then.status(200).body(
                r#"<div class="list-rst">
                     <a class="list-rst__rst-name-target" href="https://g.example/1">こめこ食堂</a>
                     <p class="list-rst__pr-text">グルテンフリー対応</p>
                   </div>"#,
            );
        })
        .await;

    let adapter = GourmetAdapter::new(fast_http(0), server.url("/rstLst/"));
    let out = adapter.collect(&CollectionTarget::area("天神")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].source.source_type, SourceType::Review);
    assert_eq!(out[0].menus.len(), 1);
}

#[tokio::test]
async fn official_list_survives_one_bad_page() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/good.html");
            then.status(200)
                .body("<ul><li><h3>こめこ食堂</h3>米粉のパンがあります</li></ul>");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/gone.html");
            then.status(410);
        })
        .await;

    let adapter = OfficialListAdapter::new(
        fast_http(0),
        vec![server.url("/gone.html"), server.url("/good.html")],
    );
    let out = adapter.collect(&CollectionTarget::area("福岡市")).await.unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].shop_name, "こめこ食堂");
}

#[tokio::test]
async fn name_keyed_adapters_ignore_spatial_targets() {
    let adapter = OfficialListAdapter::new(fast_http(0), vec!["http://127.0.0.1:9/x".to_string()]);
    let target = CollectionTarget::spatial(GeoPoint::new(33.5, 130.3), 5_000);
    assert!(adapter.collect(&target).await.unwrap().is_empty());
}
