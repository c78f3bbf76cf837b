//! Wire-level tests for the SPARQL client against a mock repository server.

use std::time::Duration;

use serde_json::json;
use termgraph_core::{Error, GraphClientFactory, GraphQueryClient, VocabularyConfig};
use termgraph_sparql::{SparqlClientFactory, Timeouts};
use wiremock::matchers::{basic_auth, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn vocabulary(server: &MockServer, username: Option<&str>) -> VocabularyConfig {
    VocabularyConfig {
        name: "TectonicUnits".to_string(),
        url: server.uri(),
        repository_id: "tectonic".to_string(),
        username: username.map(String::from),
        password: username.map(|_| "secret".to_string()),
        release: None,
        repo_slug: None,
        queries: Default::default(),
    }
}

fn factory() -> SparqlClientFactory {
    SparqlClientFactory::new(Timeouts {
        query: Duration::from_millis(500),
        probe: Duration::from_millis(500),
    })
    .unwrap()
}

fn term_results() -> serde_json::Value {
    json!({
        "head": {"vars": ["predicate", "object"]},
        "results": {"bindings": [
            {
                "predicate": {"type": "uri", "value": "http://www.w3.org/2004/02/skos/core#prefLabel"},
                "object": {"type": "literal", "value": "Helvetic", "xml:lang": "en"}
            },
            {
                "predicate": {"type": "uri", "value": "http://www.w3.org/2004/02/skos/core#inScheme"},
                "object": {"type": "uri", "value": "http://x/scheme"}
            }
        ]}
    })
}

#[tokio::test]
async fn test_select_posts_raw_query() {
    let server = MockServer::start().await;
    let query = "SELECT ?predicate ?object WHERE { <http://x/Helvetic> ?predicate ?object }";

    Mock::given(method("POST"))
        .and(path("/repositories/tectonic"))
        .and(header("content-type", "application/sparql-query"))
        .and(header("accept", "application/sparql-results+json"))
        .and(body_string(query))
        .respond_with(ResponseTemplate::new(200).set_body_json(term_results()))
        .expect(1)
        .mount(&server)
        .await;

    let client = factory().client_for(&vocabulary(&server, None));
    let rows = client.select(query).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["object"].value, "Helvetic");
    assert_eq!(rows[0]["object"].language.as_deref(), Some("en"));
    assert_eq!(rows[1]["object"].value, "http://x/scheme");
}

#[tokio::test]
async fn test_select_sends_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repositories/tectonic"))
        .and(basic_auth("reader", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(term_results()))
        .expect(1)
        .mount(&server)
        .await;

    let client = factory().client_for(&vocabulary(&server, Some("reader")));
    assert_eq!(client.select("SELECT *").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_select_error_status_is_query_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repositories/tectonic"))
        .respond_with(ResponseTemplate::new(400).set_body_string("MALFORMED QUERY"))
        .mount(&server)
        .await;

    let client = factory().client_for(&vocabulary(&server, None));
    match client.select("SELEKT").await {
        Err(Error::Query(message)) => {
            assert!(message.contains("400"));
            assert!(message.contains("MALFORMED QUERY"));
        }
        other => panic!("expected query failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_select_timeout_is_query_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repositories/tectonic"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(term_results())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = factory().client_for(&vocabulary(&server, None));
    assert!(matches!(
        client.select("SELECT *").await,
        Err(Error::Query(_))
    ));
}

#[tokio::test]
async fn test_select_non_sparql_body_is_query_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repositories/tectonic"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let client = factory().client_for(&vocabulary(&server, None));
    assert!(matches!(
        client.select("SELECT *").await,
        Err(Error::Query(_))
    ));
}

#[tokio::test]
async fn test_probe_lists_repositories() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "head": {"vars": ["id"]},
            "results": {"bindings": [{"id": {"type": "literal", "value": "tectonic"}}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = factory().client_for(&vocabulary(&server, None));
    client.probe().await.unwrap();
}

#[tokio::test]
async fn test_probe_error_status_is_unreachable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repositories"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = factory().client_for(&vocabulary(&server, None));
    assert!(matches!(
        client.probe().await,
        Err(Error::StoreUnreachable(_))
    ));
}

#[tokio::test]
async fn test_probe_connection_refused_is_unreachable() {
    let mut config = VocabularyConfig {
        name: "Lithology".to_string(),
        url: "http://127.0.0.1:1".to_string(),
        repository_id: "lithology".to_string(),
        username: None,
        password: None,
        release: None,
        repo_slug: None,
        queries: Default::default(),
    };
    config.url.push('/');

    let client = factory().client_for(&config);
    assert_eq!(client.endpoint(), "http://127.0.0.1:1/repositories/lithology");
    assert!(matches!(
        client.probe().await,
        Err(Error::StoreUnreachable(_))
    ));
}
