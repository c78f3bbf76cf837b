//! End-to-end tests: the real router and SPARQL client against a mock
//! GraphDB server.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use termgraph_api::services::ReleaseResolver;
use termgraph_api::{router, AppState};
use termgraph_core::{Catalogue, FileCatalogueStore, StaticCatalogueStore};
use termgraph_sparql::{SparqlClientFactory, Timeouts};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SKOS: &str = "http://www.w3.org/2004/02/skos/core#";

fn catalogue_toml(graphdb: &str) -> String {
    format!(
        r#"
languages = ["de", "en", "fr", "it"]

[[vocabularies]]
name = "TectonicUnits"
url = "{graphdb}"
repository_id = "tectonic"
release = "Release: 14/08/2024 - Tectonic Units - v1.1"
repo_slug = "tectonic-units"

[vocabularies.queries]
term = "SELECT ?predicate ?object WHERE {{ <http://x/scheme/${{term}}> ?predicate ?object }}"
breadcrumbs = "SELECT ?narrowerConcept WHERE {{ <http://x/scheme/${{term}}> skos:broader+ ?narrowerConcept }}"
all_labels = "SELECT ?subject ?label WHERE {{ ?subject skos:prefLabel ?label }}"

[[vocabularies]]
name = "Lithology"
url = "{graphdb}"
repository_id = "lithology"

[vocabularies.queries]
term = "SELECT ?predicate ?object WHERE {{ <http://y/${{term}}> ?predicate ?object }}"
breadcrumbs = "SELECT ?narrowerConcept WHERE {{ <http://y/${{term}}> skos:broader+ ?narrowerConcept }}"
all_labels = "SELECT ?subject ?label WHERE {{ ?subject skos:prefLabel ?label }}"
"#
    )
}

fn catalogue(graphdb: &MockServer) -> Catalogue {
    Catalogue::from_toml_str(&catalogue_toml(&graphdb.uri())).unwrap()
}

fn bindings(rows: Vec<Value>) -> Value {
    json!({"head": {"vars": []}, "results": {"bindings": rows}})
}

fn uri(value: &str) -> Value {
    json!({"type": "uri", "value": value})
}

fn lang(value: &str, language: &str) -> Value {
    json!({"type": "literal", "value": value, "xml:lang": language})
}

fn statement(predicate: &str, object: Value) -> Value {
    json!({"predicate": uri(predicate), "object": object})
}

fn label(subject: &str, text: &str) -> Value {
    json!({"subject": uri(subject), "label": lang(text, "en")})
}

async fn mount_probe(graphdb: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bindings(vec![])))
        .mount(graphdb)
        .await;
}

async fn mount_select(graphdb: &MockServer, repository: &str, marker: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(format!("/repositories/{}", repository)))
        .and(body_string_contains(marker))
        .respond_with(response)
        .mount(graphdb)
        .await;
}

async fn mount_helvetic(graphdb: &MockServer) {
    mount_probe(graphdb).await;
    mount_select(
        graphdb,
        "tectonic",
        "?predicate ?object",
        ResponseTemplate::new(200).set_body_json(bindings(vec![
            statement(&format!("{}prefLabel", SKOS), lang("Helvétique", "fr")),
            statement(&format!("{}inScheme", SKOS), uri("http://x/scheme")),
            statement(&format!("{}prefLabel", SKOS), lang("Helvetic", "en")),
            statement("http://x/onto/relatedTo", uri("http://x/scheme/Penninic")),
            statement(&format!("{}prefLabel", SKOS), lang("Helvetikum", "de")),
            statement("http://x/onto/relatedTo", uri("http://x/scheme/Jura")),
        ])),
    )
    .await;
    mount_select(
        graphdb,
        "tectonic",
        "?narrowerConcept",
        ResponseTemplate::new(200).set_body_json(bindings(vec![
            json!({"narrowerConcept": uri("c3")}),
            json!({"narrowerConcept": uri("c2")}),
            json!({"narrowerConcept": uri("c1")}),
        ])),
    )
    .await;
}

async fn spawn_app(store: Arc<dyn termgraph_core::CatalogueStore>) -> String {
    let clients = SparqlClientFactory::new(Timeouts {
        query: Duration::from_secs(2),
        probe: Duration::from_secs(1),
    })
    .unwrap();
    let state = AppState::new(store, Arc::new(clients), ReleaseResolver::disabled());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    // Give server a moment to start
    tokio::time::sleep(Duration::from_millis(50)).await;
    format!("http://{}", addr)
}

async fn spawn_with(catalogue: Catalogue) -> String {
    spawn_app(Arc::new(StaticCatalogueStore::new(catalogue))).await
}

async fn get(url: String) -> (u16, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_term_lookup_end_to_end() {
    let graphdb = MockServer::start().await;
    mount_helvetic(&graphdb).await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let (status, body) = get(format!(
        "{}/api/v1/terms?vocabulary=TectonicUnits&term=Helvetic",
        base
    ))
    .await;

    assert_eq!(status, 200);
    let term_data = &body["termData"];
    assert_eq!(term_data["uri"], "http://x/scheme/Helvetic");
    assert_eq!(term_data["term"], "Helvetic");
    assert_eq!(term_data["vocabulary"], "TectonicUnits");
    assert_eq!(term_data["version"], "Release: 14/08/2024 - Tectonic Units - v1.1");
    assert_eq!(body["predicates"].as_array().unwrap().len(), 6);
    assert_eq!(body["breadCrumbsData"]["broader"], json!(["c3", "c2", "c1"]));
    assert_eq!(body["breadCrumbsData"]["startPage"], "Home");
}

#[tokio::test]
async fn test_languages_follow_configured_order() {
    let graphdb = MockServer::start().await;
    mount_helvetic(&graphdb).await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let response = reqwest::get(format!(
        "{}/api/v1/terms?vocabulary=TectonicUnits&term=Helvetic",
        base
    ))
    .await
    .unwrap();
    let text = response.text().await.unwrap();

    let de = text.find("\"de\":\"Helvetikum\"").unwrap();
    let en = text.find("\"en\":\"Helvetic\"").unwrap();
    let fr = text.find("\"fr\":\"Helvétique\"").unwrap();
    assert!(de < en && en < fr);
    assert!(!text.contains("\"it\":"));
}

#[tokio::test]
async fn test_other_relations_keep_arrival_order() {
    let graphdb = MockServer::start().await;
    mount_helvetic(&graphdb).await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let (_, body) = get(format!(
        "{}/api/v1/terms?vocabulary=TectonicUnits&term=Helvetic",
        base
    ))
    .await;

    let other = &body["termData"]["relatedTerms"]["otherRelation"];
    assert_eq!(
        other,
        &json!([{
            "predicate": "http://x/onto/relatedTo",
            "values": ["http://x/scheme/Penninic", "http://x/scheme/Jura"]
        }])
    );
}

#[tokio::test]
async fn test_failed_label_source_does_not_fail_request() {
    let graphdb = MockServer::start().await;
    mount_helvetic(&graphdb).await;
    let uri1 = "http://data.geo.admin.ch/TectonicUnits/uri1";
    mount_select(
        &graphdb,
        "tectonic",
        "?subject ?label",
        ResponseTemplate::new(200).set_body_json(bindings(vec![label(uri1, "L1"), label(uri1, "L2")])),
    )
    .await;
    mount_select(
        &graphdb,
        "lithology",
        "?subject ?label",
        ResponseTemplate::new(500).set_body_string("repository lithology is offline"),
    )
    .await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let (status, body) = get(format!(
        "{}/api/v1/terms?vocabulary=TectonicUnits&term=Helvetic",
        base
    ))
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["allConceptMap"], json!({ uri1: "L1" }));
}

#[tokio::test]
async fn test_legacy_route_alias() {
    let graphdb = MockServer::start().await;
    mount_helvetic(&graphdb).await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let (status, body) = get(format!(
        "{}/api/dbQueryTerms?vocabulary=TectonicUnits&term=Helvetic",
        base
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["termData"]["uri"], "http://x/scheme/Helvetic");
}

#[tokio::test]
async fn test_invalid_term_is_bad_request() {
    let graphdb = MockServer::start().await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let (status, body) = get(format!(
        "{}/api/v1/terms?vocabulary=TectonicUnits&term=Helvetic%3Bdrop",
        base
    ))
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["reason"], "invalid_identifier");

    let long_term = "a".repeat(101);
    let (status, body) = get(format!(
        "{}/api/v1/terms?vocabulary=TectonicUnits&term={}",
        base, long_term
    ))
    .await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("100"));

    // Nothing reached the graph store
    assert!(graphdb.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_parameter_is_bad_request() {
    let graphdb = MockServer::start().await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let (status, body) = get(format!("{}/api/v1/terms?vocabulary=TectonicUnits", base)).await;
    assert_eq!(status, 400);
    assert_eq!(body["reason"], "invalid_input");
}

#[tokio::test]
async fn test_unknown_vocabulary_is_not_found() {
    let graphdb = MockServer::start().await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let (status, body) = get(format!(
        "{}/api/v1/terms?vocabulary=Chronostratigraphy&term=Jurassic",
        base
    ))
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["reason"], "config_missing");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Chronostratigraphy"));
}

#[tokio::test]
async fn test_unreachable_store_is_server_error() {
    let graphdb = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&graphdb)
        .await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let (status, body) = get(format!(
        "{}/api/v1/terms?vocabulary=TectonicUnits&term=Helvetic",
        base
    ))
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["reason"], "store_unreachable");
}

#[tokio::test]
async fn test_store_failure_does_not_wait_for_label_sources() {
    let graphdb = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repositories"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&graphdb)
        .await;
    for repository in ["tectonic", "lithology"] {
        mount_select(
            &graphdb,
            repository,
            "?subject ?label",
            ResponseTemplate::new(200)
                .set_body_json(bindings(vec![]))
                .set_delay(Duration::from_millis(1500)),
        )
        .await;
    }
    let base = spawn_with(catalogue(&graphdb)).await;

    let start = Instant::now();
    let (status, body) = get(format!(
        "{}/api/v1/terms?vocabulary=TectonicUnits&term=Helvetic",
        base
    ))
    .await;
    let elapsed = start.elapsed();

    assert_eq!(status, 500);
    assert_eq!(body["reason"], "store_unreachable");
    assert!(elapsed < Duration::from_millis(1000), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_failed_term_query_reports_unreachable_store() {
    let graphdb = MockServer::start().await;
    mount_probe(&graphdb).await;
    mount_select(
        &graphdb,
        "tectonic",
        "?predicate ?object",
        ResponseTemplate::new(500).set_body_string("out of memory"),
    )
    .await;
    mount_select(
        &graphdb,
        "tectonic",
        "?narrowerConcept",
        ResponseTemplate::new(200).set_body_json(bindings(vec![])),
    )
    .await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let (status, body) = get(format!(
        "{}/api/v1/terms?vocabulary=TectonicUnits&term=Helvetic",
        base
    ))
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["reason"], "store_unreachable");
}

#[tokio::test]
async fn test_unreadable_catalogue_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCatalogueStore::new(dir.path().join("missing.toml"));
    let base = spawn_app(Arc::new(store)).await;

    let (status, body) = get(format!(
        "{}/api/v1/terms?vocabulary=TectonicUnits&term=Helvetic",
        base
    ))
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["reason"], "config_unreadable");
}

#[tokio::test]
async fn test_catalogue_file_reread_per_request() {
    let graphdb = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("catalogue.toml");
    std::fs::write(&file, "vocabularies = []\n").unwrap();
    let base = spawn_app(Arc::new(FileCatalogueStore::new(&file))).await;

    let (_, body) = get(format!("{}/api/v1/vocabularies", base)).await;
    assert_eq!(body["vocabularies"], json!([]));

    std::fs::write(&file, catalogue_toml(&graphdb.uri())).unwrap();
    let (_, body) = get(format!("{}/api/v1/vocabularies", base)).await;
    assert_eq!(body["vocabularies"], json!(["TectonicUnits", "Lithology"]));
    assert_eq!(body["languages"], json!(["de", "en", "fr", "it"]));
}

#[tokio::test]
async fn test_concept_labels_endpoint() {
    let graphdb = MockServer::start().await;
    mount_select(
        &graphdb,
        "tectonic",
        "?subject ?label",
        ResponseTemplate::new(200).set_body_json(bindings(vec![
            label("http://data.geo.admin.ch/TectonicUnits/Helvetic", "Helvetic"),
            label("http://data.geo.admin.ch/Unknown/Thing", "out of scope"),
        ])),
    )
    .await;
    mount_select(
        &graphdb,
        "lithology",
        "?subject ?label",
        ResponseTemplate::new(200).set_body_json(bindings(vec![label(
            "http://data.geo.admin.ch/Lithology/Granite",
            "Granite",
        )])),
    )
    .await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let (status, body) = get(format!("{}/api/v1/concepts/labels", base)).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"allConceptMap": {
            "http://data.geo.admin.ch/Lithology/Granite": "Granite",
            "http://data.geo.admin.ch/TectonicUnits/Helvetic": "Helvetic"
        }})
    );
}

#[tokio::test]
async fn test_label_sources_queried_concurrently() {
    let graphdb = MockServer::start().await;
    let granite = "http://data.geo.admin.ch/Lithology/Granite";
    mount_select(
        &graphdb,
        "tectonic",
        "?subject ?label",
        ResponseTemplate::new(200)
            .set_body_json(bindings(vec![label(granite, "Granite (tectonic)")]))
            .set_delay(Duration::from_millis(800)),
    )
    .await;
    mount_select(
        &graphdb,
        "lithology",
        "?subject ?label",
        ResponseTemplate::new(200)
            .set_body_json(bindings(vec![label(granite, "Granite")]))
            .set_delay(Duration::from_millis(800)),
    )
    .await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let start = Instant::now();
    let (status, body) = get(format!("{}/api/v1/concepts/labels", base)).await;
    let elapsed = start.elapsed();

    assert_eq!(status, 200);
    assert_eq!(body, json!({"allConceptMap": { granite: "Granite (tectonic)" }}));
    assert!(elapsed >= Duration::from_millis(800));
    assert!(elapsed < Duration::from_millis(1500), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_repository_info() {
    let graphdb = MockServer::start().await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let (status, body) = get(format!(
        "{}/api/v1/vocabularies/TectonicUnits/repository",
        base
    ))
    .await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "owner": "swisstopo",
            "repoSlug": "tectonic-units",
            "releasesHtmlUrl": "https://github.com/swisstopo/tectonic-units/releases"
        })
    );

    let (status, _) = get(format!("{}/api/v1/vocabularies/Lithology/repository", base)).await;
    assert_eq!(status, 500);

    let (status, _) = get(format!("{}/api/v1/vocabularies/Geocover/repository", base)).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_health_and_request_id() {
    let graphdb = MockServer::start().await;
    let base = spawn_with(catalogue(&graphdb)).await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers().contains_key("x-request-id"));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}
