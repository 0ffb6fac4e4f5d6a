//! HTTP tests for the Azure DevOps client against a local one-shot server.

mod common;

use ac_export::{AzureDevOpsClient, Config, ExportError, WorkItemId, WorkItemSource};

fn config(base_url: &str) -> Config {
    Config {
        organization: "contoso".to_string(),
        project: "web".to_string(),
        pat: "test-pat".to_string(),
        product_prefix: "eNr".to_string(),
        base_url: base_url.to_string(),
    }
}

#[test]
fn test_fetch_parses_work_item() {
    let body = common::work_item_json(
        118556,
        "eNcounter Refresh: Loading Screen",
        "User Story",
        common::LOGIN_CRITERIA_HTML,
    );
    let server = common::serve_once("200 OK", &body);
    let client = AzureDevOpsClient::new(&config(&server.base_url));

    let item = client.fetch(&WorkItemId::from(118556)).unwrap();
    assert_eq!(item.id.as_str(), "118556");
    assert_eq!(item.title, "eNcounter Refresh: Loading Screen");
    assert_eq!(item.work_item_type, "User Story");
    assert_eq!(item.criteria(), common::LOGIN_CRITERIA_TEXT);

    let request = server.request();
    assert!(
        request.starts_with("GET /contoso/web/_apis/wit/workitems/118556?api-version=7.0 "),
        "request was: {request}"
    );
    assert!(
        request
            .to_ascii_lowercase()
            .contains("authorization: basic onrlc3qtcgf0"),
        "request was: {request}"
    );
}

#[test]
fn test_fetch_unauthorized() {
    let server = common::serve_once("401 Unauthorized", "");
    let client = AzureDevOpsClient::new(&config(&server.base_url));
    let err = client.fetch(&WorkItemId::from(1)).unwrap_err();
    assert!(matches!(err, ExportError::AuthenticationFailed), "got {err}");
    server.request();
}

#[test]
fn test_fetch_not_found() {
    let server = common::serve_once(
        "404 Not Found",
        r#"{"message": "TF401232: Work item 99 does not exist"}"#,
    );
    let client = AzureDevOpsClient::new(&config(&server.base_url));
    let err = client.fetch(&WorkItemId::from(99)).unwrap_err();
    assert!(matches!(err, ExportError::NotFound { ref id } if id.as_str() == "99"), "got {err}");
    server.request();
}

#[test]
fn test_fetch_server_error_keeps_body() {
    let server = common::serve_once("500 Internal Server Error", "backend unavailable");
    let client = AzureDevOpsClient::new(&config(&server.base_url));
    let err = client.fetch(&WorkItemId::from(1)).unwrap_err();
    match err {
        ExportError::UnexpectedStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "backend unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
    server.request();
}

#[test]
fn test_fetch_non_json_body() {
    let server = common::serve_once("200 OK", "<html>Sign in</html>");
    let client = AzureDevOpsClient::new(&config(&server.base_url));
    let err = client.fetch(&WorkItemId::from(1)).unwrap_err();
    assert!(
        matches!(err, ExportError::MalformedResponse { .. }),
        "got {err}"
    );
    server.request();
}

#[test]
fn test_fetch_connection_refused() {
    let client = AzureDevOpsClient::new(&config(&common::closed_base_url()));
    let err = client.fetch(&WorkItemId::from(1)).unwrap_err();
    assert!(matches!(err, ExportError::Http { .. }), "got {err}");
}

#[test]
fn test_fetch_requests_id_as_typed() {
    let body = common::work_item_json(7, "Area: Leading Zeros", "Bug", "Given x");
    let server = common::serve_once("200 OK", &body);
    let client = AzureDevOpsClient::new(&config(&server.base_url));

    let id = WorkItemId::parse("007").unwrap();
    let item = client.fetch(&id).unwrap();
    assert_eq!(item.id.as_str(), "007");

    let request = server.request();
    assert!(
        request.starts_with("GET /contoso/web/_apis/wit/workitems/007?api-version=7.0 "),
        "request was: {request}"
    );
}
