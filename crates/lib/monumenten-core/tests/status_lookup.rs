use httpmock::prelude::*;
use monumenten_core::sparql::SparqlClient;
use monumenten_core::status::{KadasterStatusSource, STATUS_ADVISORY, StatusAdapter, StatusError};
use serde_json::{Value, json};

const SPARQL_PATH: &str = "/service/sparql";

fn adapter_for(server: &MockServer) -> StatusAdapter<KadasterStatusSource> {
    StatusAdapter::new(KadasterStatusSource::new(SparqlClient::new(
        server.url(SPARQL_PATH),
    )))
}

#[tokio::test]
async fn rijksmonument_is_reported_with_source() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(SPARQL_PATH)
                .body_contains("0518100000123456");
            then.status(200).json_body(json!({
                "results": { "bindings": [{
                    "identificatie": { "type": "literal", "value": "0518100000123456" },
                    "monumentnummer": { "type": "literal", "value": "527488" }
                }] }
            }));
        })
        .await;

    let text = adapter_for(&server)
        .lookup("0518100000123456")
        .await
        .expect("lookup should succeed");

    mock.assert_async().await;
    let json = text.strip_suffix(STATUS_ADVISORY).expect("advisory appended");
    let statuses: Value = serde_json::from_str(json).expect("pretty JSON before advisory");
    assert_eq!(
        statuses,
        json!([{
            "bag_verblijfsobject_id": "0518100000123456",
            "rijksmonument": true,
            "rijksmonument_nummer": "527488",
            "rijksmonument_bron": "Rijksdienst voor het Cultureel Erfgoed"
        }])
    );
    assert!(json.contains("\n  {"));
}

#[tokio::test]
async fn non_monument_is_reported_as_such() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path(SPARQL_PATH);
            then.status(200).json_body(json!({ "results": { "bindings": [] } }));
        })
        .await;

    let text = adapter_for(&server)
        .lookup("0518100000654321")
        .await
        .expect("lookup should succeed");

    assert!(text.contains("\"rijksmonument\": false"));
    assert!(text.ends_with("(RCE = Rijksdienst voor het Cultureel Erfgoed.)"));
}

#[tokio::test]
async fn endpoint_failures_propagate() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path(SPARQL_PATH);
            then.status(502);
        })
        .await;

    let err = adapter_for(&server)
        .lookup("0518100000123456")
        .await
        .expect_err("502 should surface");

    assert!(matches!(err, StatusError::Sparql(_)));
    assert!(err.to_string().contains("HTTP 502"));
}

#[tokio::test]
async fn malformed_identifiers_propagate() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(SPARQL_PATH);
            then.status(200).json_body(json!({}));
        })
        .await;

    let err = adapter_for(&server)
        .lookup("12345")
        .await
        .expect_err("short id should be rejected");

    assert!(matches!(err, StatusError::InvalidIdentifier(_)));
    assert_eq!(mock.hits_async().await, 0);
}
