use std::time::Duration;

use breeders_lib::programs::columns;
use breeders_lib::{load_program, load_programs, Client, DataTable, LoadState};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../brapi_api/tests/fixtures/{}", name)).unwrap()
}

fn page_url(query: &str) -> Url {
    Url::parse(&format!("https://breeders.example/sv/breeders{}", query)).unwrap()
}

#[tokio::test]
async fn load_returns_before_fetch_completes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/programs"))
        .and(query_param("pageSize", "1000000"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture("programs.json"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let mut page = load_programs(&client, &page_url("?pageSize=1000000"));
    assert!(matches!(page.promise.poll_state(), LoadState::Pending));

    match page.promise.settle().await {
        LoadState::Resolved(resp) => {
            assert_eq!(resp.data.len(), 3);
            assert_eq!(resp.pagination.page_size, 1_000_000);
            assert_eq!(resp.pagination.total_count, 3);
        }
        other => panic!("expected resolved page, got {:?}", other),
    }
}

#[tokio::test]
async fn loaded_page_feeds_the_table() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/programs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("programs.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let resp = load_programs(&client, &page_url(""))
        .promise
        .wait()
        .await
        .unwrap();

    let mut table = DataTable::new(columns(), resp.data).unwrap();
    assert_eq!(table.render().rows.len(), 3);

    table.toggle_all_page_rows_selected(true);
    assert_eq!(table.selected_rows().len(), 3);
}

#[tokio::test]
async fn transport_failure_surfaces_as_rejection() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/programs"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let mut page = load_programs(&client, &page_url("?page=2"));
    match page.promise.settle().await {
        LoadState::Rejected(e) => assert!(!e.is_not_found()),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_program_rejects_with_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/programs/999"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(load_fixture("program_not_found.json")),
        )
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = load_program(&client, &page_url(""), "999")
        .promise
        .wait()
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn dropped_load_still_completes_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/programs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture("programs.json"))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    drop(load_programs(&client, &page_url("")));

    tokio::time::sleep(Duration::from_millis(400)).await;
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}
