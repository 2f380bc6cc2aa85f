use brapi_api::types::{Pagination, Program, ProgramType};
use brapi_api::{Client, Error, PagedQuery, ProgramQuery, QueryParams};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

async fn serve(route: &str, status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn list_programs_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("programs.json");

    Mock::given(method("GET"))
        .and(path("/programs"))
        .and(query_param("pageSize", "1000000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let params = QueryParams::new().with("pageSize", "1000000");
    let resp = client.programs(&params).await.unwrap();

    assert_eq!(resp.data.len(), 3);
    assert_eq!(
        resp.pagination,
        Pagination {
            current_page: 0,
            page_size: 1_000_000,
            total_count: 3,
            total_pages: 1,
        }
    );
    assert_eq!(resp.status.len(), 1);
    assert_eq!(resp.status[0].message_type, "INFO");

    let alpha = &resp.data[0];
    assert_eq!(alpha.program_db_id, "1");
    assert_eq!(alpha.program_name, "Alpha");
    assert_eq!(alpha.abbreviation.as_deref(), Some("A"));
    assert_eq!(alpha.objective, None);
    assert_eq!(alpha.additional_info, None);

    assert_eq!(resp.data[1].description(), Some("Rainfed trials in the northern region"));
    assert_eq!(resp.data[2].program_type, Some(ProgramType::Project));
}

#[tokio::test]
async fn list_with_typed_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brapi/v2/programs"))
        .and(query_param("programType", "PROJECT"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("programs_empty.json")))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&format!("{}/brapi/v2", mock_server.uri()));
    let query = ProgramQuery::default()
        .with_program_type(ProgramType::Project)
        .with_page(1);
    let resp = client.programs(&query).await.unwrap();
    assert!(resp.data.is_empty());
}

#[tokio::test]
async fn list_without_params_sends_no_query_string() {
    let mock_server = serve("/programs", 200, &load_fixture("programs.json")).await;

    let client = Client::with_base_url(&mock_server.uri());
    client.programs(&QueryParams::new()).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn list_empty_page_is_not_an_error() {
    let mock_server = serve("/programs", 200, &load_fixture("programs_empty.json")).await;

    let client = Client::with_base_url(&mock_server.uri());
    let resp = client.programs(&QueryParams::new()).await.unwrap();

    assert!(resp.data.is_empty());
    assert_eq!(resp.pagination.current_page, 4);
    assert_eq!(resp.pagination.total_count, 30);
    assert_eq!(resp.pagination.total_pages, 3);
}

#[tokio::test]
async fn list_rejects_whole_page_on_one_invalid_record() {
    let mock_server = serve("/programs", 200, &load_fixture("programs_invalid.json")).await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.programs(&QueryParams::new()).await.unwrap_err();

    match err {
        Error::SchemaViolation(v) => {
            assert_eq!(v.schema, "Program");
            assert_eq!(v.path, "result.data[1]");
            assert!(v.message.contains("programName"), "{}", v.message);
        }
        other => panic!("expected schema violation, got {:?}", other),
    }
}

#[tokio::test]
async fn list_missing_result_data_is_schema_violation() {
    let body = r#"{"metadata": {"pagination": {}}, "result": {"items": []}}"#;
    let mock_server = serve("/programs", 200, body).await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.programs(&QueryParams::new()).await.unwrap_err();
    match err {
        Error::SchemaViolation(v) => assert_eq!(v.path, "result"),
        other => panic!("expected schema violation, got {:?}", other),
    }
}

#[tokio::test]
async fn list_defaults_missing_pagination() {
    let body = r#"{"result": {"data": []}}"#;
    let mock_server = serve("/programs", 200, body).await;

    let client = Client::with_base_url(&mock_server.uri());
    let resp = client.programs(&QueryParams::new()).await.unwrap();
    assert_eq!(resp.pagination, Pagination::default());
}

#[tokio::test]
async fn list_defaults_null_pagination() {
    let body = r#"{"metadata": {"pagination": null, "status": null}, "result": {"data": []}}"#;
    let mock_server = serve("/programs", 200, body).await;

    let client = Client::with_base_url(&mock_server.uri());
    let resp = client.programs(&QueryParams::new()).await.unwrap();
    assert_eq!(resp.pagination, Pagination::default());
    assert!(resp.status.is_empty());
}

#[tokio::test]
async fn list_rejects_zero_page_size() {
    let body = r#"{"metadata": {"pagination": {"pageSize": 0}}, "result": {"data": []}}"#;
    let mock_server = serve("/programs", 200, body).await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.programs(&QueryParams::new()).await.unwrap_err();
    match err {
        Error::SchemaViolation(v) => assert_eq!(v.path, "metadata.pagination"),
        other => panic!("expected schema violation, got {:?}", other),
    }
}

#[tokio::test]
async fn list_server_error_is_transport_failure() {
    let mock_server = serve("/programs", 500, "Internal Server Error").await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.programs(&QueryParams::new()).await.unwrap_err();
    assert!(err.is_transport());
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("expected HTTP status error, got {:?}", other),
    }
}

#[tokio::test]
async fn list_malformed_json_is_schema_violation() {
    let mock_server = serve("/programs", 200, "{not valid json}").await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.programs(&QueryParams::new()).await.unwrap_err();
    assert!(matches!(err, Error::SchemaViolation(_)));
}

#[tokio::test]
async fn unreachable_server_is_transport_failure() {
    let client = Client::with_base_url("http://127.0.0.1:1");
    let err = client.programs(&QueryParams::new()).await.unwrap_err();
    assert!(matches!(err, Error::RequestFailed(_)));
}

#[tokio::test]
async fn get_program_success() {
    let mock_server = serve("/programs/2", 200, &load_fixture("program.json")).await;

    let client = Client::with_base_url(&mock_server.uri());
    let program: Program = client.program("2", &QueryParams::new()).await.unwrap();
    assert_eq!(program.program_db_id, "2");
    assert_eq!(program.program_name, "Bravo");
    assert_eq!(program.objective.as_deref(), Some("Drought tolerance"));
    assert_eq!(program.common_crop_name.as_deref(), Some("Wheat"));
}

#[tokio::test]
async fn get_program_tolerates_null_metadata_sections() {
    let body = r#"{"metadata": {"status": null}, "result": {"programDbId": "5", "programName": "E", "objective": null}}"#;
    let mock_server = serve("/programs/5", 200, body).await;

    let client = Client::with_base_url(&mock_server.uri());
    let program = client.program("5", &QueryParams::new()).await.unwrap();
    assert_eq!(program.program_name, "E");

    let body = r#"{"metadata": {"pagination": null}, "result": {"programDbId": "6", "programName": "F", "objective": null}}"#;
    let mock_server = serve("/programs/6", 200, body).await;

    let client = Client::with_base_url(&mock_server.uri());
    let program = client.program("6", &QueryParams::new()).await.unwrap();
    assert_eq!(program.program_db_id, "6");
}

#[tokio::test]
async fn get_program_empty_result_is_not_found() {
    let mock_server = serve("/programs/999", 200, &load_fixture("program_not_found.json")).await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.program("999", &QueryParams::new()).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_transport());
    assert_eq!(err.to_string(), "Program '999' not found");
}

#[tokio::test]
async fn get_program_non_object_result_is_schema_violation() {
    let body = r#"{"metadata": {}, "result": null}"#;
    let mock_server = serve("/programs/5", 200, body).await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.program("5", &QueryParams::new()).await.unwrap_err();
    match err {
        Error::SchemaViolation(v) => {
            assert_eq!(v.schema, "Program");
            assert_eq!(v.message, "expected an object, got null");
        }
        other => panic!("expected schema violation, got {:?}", other),
    }
}

#[tokio::test]
async fn get_program_invalid_record_is_schema_violation() {
    let body = r#"{"metadata": {}, "result": {"programDbId": "5"}}"#;
    let mock_server = serve("/programs/5", 200, body).await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.program("5", &QueryParams::new()).await.unwrap_err();
    assert!(matches!(err, Error::SchemaViolation(_)));
}

#[tokio::test]
async fn get_program_http_404_stays_transport_failure() {
    let mock_server = serve("/programs/404", 404, "not here").await;

    let client = Client::with_base_url(&mock_server.uri());
    let err = client.program("404", &QueryParams::new()).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 404, .. }));
}
