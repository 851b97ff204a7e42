use std::time::Duration;

use httpmock::prelude::*;
use monumenten_core::address::AddressResolver;
use monumenten_core::models::AddressQuery;
use monumenten_core::sparql::SparqlClient;
use serde_json::{Value, json};

const SPARQL_PATH: &str = "/service/sparql";

fn resolver_for(server: &MockServer) -> AddressResolver {
    AddressResolver::new(SparqlClient::new(server.url(SPARQL_PATH)))
}

fn binding(id: Option<&str>, straatnaam: &str, plaatsnaam: &str) -> Value {
    let mut row = json!({
        "postcode": { "type": "literal", "value": "3011AD" },
        "huisnummer": { "type": "literal", "datatype": "http://www.w3.org/2001/XMLSchema#integer", "value": "40" },
        "straatnaam": { "type": "literal", "value": straatnaam },
        "plaatsnaam": { "type": "literal", "value": plaatsnaam }
    });
    if let Some(id) = id {
        row["identificatie"] = json!({ "type": "literal", "value": id });
    }
    row
}

fn results(bindings: Vec<Value>) -> Value {
    json!({
        "head": { "vars": [
            "identificatie", "postcode", "huisnummer", "huisletter",
            "huisnummertoevoeging", "straatnaam", "plaatsnaam"
        ] },
        "results": { "bindings": bindings }
    })
}

async fn mock_results(server: &MockServer, body: Value) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(SPARQL_PATH)
                .header("accept", "application/sparql-results+json")
                .header("content-type", "application/x-www-form-urlencoded")
                .body_contains("query=PREFIX");
            then.status(200)
                .header("content-type", "application/sparql-results+json")
                .json_body(body);
        })
        .await
}

#[tokio::test]
async fn conflicting_parameters_skip_the_endpoint() {
    let server = MockServer::start_async().await;
    let mock = mock_results(&server, results(vec![])).await;

    let mut query = AddressQuery::by_postal_code("3011AD", "40");
    query.city = Some("Rotterdam".to_string());
    let text = resolver_for(&server).resolve(&query).await;

    assert_eq!(
        text,
        "Error: Provide either postal_code OR (street + city), not both."
    );
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn missing_parameters_skip_the_endpoint() {
    let server = MockServer::start_async().await;
    let mock = mock_results(&server, results(vec![])).await;

    let query = AddressQuery {
        house_number: "40".to_string(),
        street: Some("Coolsingel".to_string()),
        ..AddressQuery::default()
    };
    let text = resolver_for(&server).resolve(&query).await;

    assert_eq!(
        text,
        "Error: Provide either (postal_code + house_number) OR (street + house_number + city)."
    );
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn blank_postal_code_is_reported() {
    let server = MockServer::start_async().await;
    let text = resolver_for(&server)
        .resolve(&AddressQuery::by_postal_code(" \t", "40"))
        .await;
    assert_eq!(
        text,
        "Error: postal_code cannot be empty when using postal code search."
    );
}

#[tokio::test]
async fn empty_postal_code_result_names_the_input() {
    let server = MockServer::start_async().await;
    let mock = mock_results(&server, results(vec![])).await;

    let text = resolver_for(&server)
        .resolve(&AddressQuery::by_postal_code("3011AD", "40"))
        .await;

    mock.assert_async().await;
    assert_eq!(
        text,
        "No verblijfsobject found for postal code 3011AD, house number 40"
    );
}

#[tokio::test]
async fn empty_address_result_suggests_postal_code() {
    let server = MockServer::start_async().await;
    let _mock = mock_results(&server, results(vec![])).await;

    let text = resolver_for(&server)
        .resolve(&AddressQuery::by_street("Coolsingel", "40", "Rotterdam"))
        .await;

    assert!(text.contains("Coolsingel 40, Rotterdam"));
    assert!(text.contains("Postal code + house number usually works better."));
}

#[tokio::test]
async fn single_identified_row_is_returned_as_json() {
    let server = MockServer::start_async().await;
    let _mock = mock_results(
        &server,
        results(vec![binding(Some("0599010000360091"), "Coolsingel", "Rotterdam")]),
    )
    .await;

    let text = resolver_for(&server)
        .resolve(&AddressQuery::by_postal_code("3011AD", "40"))
        .await;

    assert!(!text.contains("Ambiguous"));
    let rows: Vec<Value> = serde_json::from_str(&text).expect("result is a JSON array");
    assert_eq!(rows.len(), 1);
    let row = rows[0].as_object().expect("row is an object");
    for key in [
        "bag_verblijfsobject_id",
        "postcode",
        "huisnummer",
        "huisletter",
        "huisnummertoevoeging",
        "straatnaam",
        "plaatsnaam",
    ] {
        assert!(row.contains_key(key), "missing {key}");
    }
    assert_eq!(row["bag_verblijfsobject_id"], "0599010000360091");
    assert_eq!(row["huisnummer"], "40");
    assert!(row["huisletter"].is_null());
}

#[tokio::test]
async fn multiple_identified_rows_are_ambiguous() {
    let server = MockServer::start_async().await;
    let _mock = mock_results(
        &server,
        results(vec![
            binding(Some("0599010000360091"), "Coolsingel", "Rotterdam"),
            binding(Some("0599010000360092"), "Coolsingel", "Rotterdam"),
        ]),
    )
    .await;

    let text = resolver_for(&server)
        .resolve(&AddressQuery::by_street("Coolsingel", "40", "Rotterdam"))
        .await;

    let json = text
        .strip_prefix("Ambiguous address: multiple results found: ")
        .expect("ambiguous marker");
    let rows: Vec<Value> = serde_json::from_str(json).expect("JSON array after marker");
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn rows_without_identifier_do_not_count() {
    let server = MockServer::start_async().await;
    let _mock = mock_results(
        &server,
        results(vec![
            binding(None, "Coolsingel", "Rotterdam"),
            binding(None, "Coolsingel", "Rotterdam"),
        ]),
    )
    .await;

    let text = resolver_for(&server)
        .resolve(&AddressQuery::by_postal_code("3011AD", "40"))
        .await;

    assert_eq!(
        text,
        "No verblijfsobject found for postal code 3011AD, house number 40"
    );
}

#[tokio::test]
async fn one_identified_row_among_unidentified_is_unique() {
    let server = MockServer::start_async().await;
    let _mock = mock_results(
        &server,
        results(vec![
            binding(None, "Coolsingel", "Rotterdam"),
            binding(Some("0599010000360091"), "Coolsingel", "Rotterdam"),
        ]),
    )
    .await;

    let text = resolver_for(&server)
        .resolve(&AddressQuery::by_postal_code("3011AD", "40"))
        .await;

    let rows: Vec<Value> = serde_json::from_str(&text).expect("result is a JSON array");
    assert_eq!(rows.len(), 2);
    assert!(rows[0]["bag_verblijfsobject_id"].is_null());
}

#[tokio::test]
async fn non_ascii_is_preserved() {
    let server = MockServer::start_async().await;
    let _mock = mock_results(
        &server,
        results(vec![binding(
            Some("1900010000012345"),
            "Jongemastraat",
            "Súdwest-Fryslân",
        )]),
    )
    .await;

    let text = resolver_for(&server)
        .resolve(&AddressQuery::by_street("Jongemastraat", "40", "Súdwest-Fryslân"))
        .await;

    assert!(text.contains("Súdwest-Fryslân"));
    assert!(!text.contains("\\u"));
}

#[tokio::test]
async fn caller_values_are_sent_as_literals() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(SPARQL_PATH)
                .body_contains("%22%27s-Gravenhage%22");
            then.status(200).json_body(results(vec![]));
        })
        .await;

    let _ = resolver_for(&server)
        .resolve(&AddressQuery::by_street("Spui", "70", "'s-Gravenhage"))
        .await;

    mock.assert_async().await;
}

#[tokio::test]
async fn server_errors_name_the_status() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path(SPARQL_PATH);
            then.status(500).body("internal error");
        })
        .await;

    let text = resolver_for(&server)
        .resolve(&AddressQuery::by_postal_code("3011AD", "40"))
        .await;

    assert_eq!(text, "Error querying Kadaster endpoint: HTTP 500");
}

#[tokio::test]
async fn undecodable_body_is_reported() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path(SPARQL_PATH);
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let text = resolver_for(&server)
        .resolve(&AddressQuery::by_postal_code("3011AD", "40"))
        .await;

    assert!(text.starts_with("Error executing SPARQL query: "), "{text}");
}

#[tokio::test]
async fn connection_failures_become_text() {
    let resolver = AddressResolver::new(SparqlClient::new("http://127.0.0.1:1/service/sparql"));

    let text = resolver
        .resolve(&AddressQuery::by_postal_code("3011AD", "40"))
        .await;

    assert!(text.starts_with("Error executing SPARQL query: "), "{text}");
    assert!(text.contains("error sending request"), "{text}");
}

#[tokio::test]
async fn slow_endpoints_time_out() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path(SPARQL_PATH);
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(results(vec![]));
        })
        .await;

    let resolver = AddressResolver::new(
        SparqlClient::new(server.url(SPARQL_PATH)).with_timeout(Duration::from_millis(50)),
    );
    let text = resolver
        .resolve(&AddressQuery::by_postal_code("3011AD", "40"))
        .await;

    assert_eq!(text, "Error executing SPARQL query: request timed out after 50ms");
}
