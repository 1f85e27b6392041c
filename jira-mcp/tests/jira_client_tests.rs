//! HTTP-level tests for the Jira client against a mock Jira server

use httpmock::prelude::*;
use jira_mcp::jira::client::NewVersion;
use jira_mcp::{JiraClient, JiraConfig, JiraMcpError, JiraOperations};
use serde_json::{json, Map, Value};
use std::time::Duration;

const AUTH: &str = "Basic ZGV2QGV4YW1wbGUuY29tOnRva2Vu";

fn client(server: &MockServer) -> JiraClient {
    JiraClient::new(&config(server)).unwrap()
}

fn config(server: &MockServer) -> JiraConfig {
    JiraConfig::new(server.base_url(), "dev@example.com", "token")
}

#[tokio::test]
async fn test_get_issue_sends_auth_and_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/api/2/issue/PROJ-1")
                .query_param("fields", "summary,status")
                .query_param("expand", "changelog")
                .header("authorization", AUTH)
                .header("accept", "application/json");
            then.status(200)
                .json_body(json!({ "key": "PROJ-1", "fields": { "summary": "Hi" } }));
        })
        .await;

    let issue = client(&server)
        .get_issue("PROJ-1", Some("summary,status"), Some("changelog"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(issue["fields"]["summary"], json!("Hi"));
}

#[tokio::test]
async fn test_create_issue_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/rest/api/2/issue").json_body(json!({
                "fields": {
                    "project": { "key": "PROJ" },
                    "summary": "Title",
                    "description": "Body",
                    "issuetype": { "name": "Bug" },
                    "labels": ["x"],
                }
            }));
            then.status(201)
                .json_body(json!({ "id": "10001", "key": "PROJ-2" }));
        })
        .await;

    let mut extra = Map::new();
    extra.insert("labels".into(), json!(["x"]));
    let created = client(&server)
        .create_issue("PROJ", "Title", "Body", "Bug", Some(extra))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created["key"], json!("PROJ-2"));
}

#[tokio::test]
async fn test_update_issue_no_content_is_null() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/rest/api/2/issue/PROJ-1")
                .json_body(json!({ "fields": { "summary": "New" } }));
            then.status(204);
        })
        .await;

    let mut fields = Map::new();
    fields.insert("summary".into(), json!("New"));
    let result = client(&server).update_issue("PROJ-1", fields).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result, Value::Null);
}

#[tokio::test]
async fn test_transition_uses_v3_endpoint() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/api/3/issue/PROJ-1/transitions")
                .json_body(json!({
                    "transition": { "id": "31" },
                    "update": { "comment": [ { "add": { "body": "Done" } } ] }
                }));
            then.status(204);
        })
        .await;

    client(&server)
        .transition_issue("PROJ-1", "31", None, Some("Done"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_endpoints_unwrap_or_default_to_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/issue/PROJ-1/transitions");
            then.status(200)
                .json_body(json!({ "transitions": [ { "id": "11", "name": "Start" } ] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/issue/PROJ-1/comment");
            then.status(200).json_body(json!({ "startAt": 0, "total": 0 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/issue/PROJ-1/worklog");
            then.status(200).json_body(json!({ "worklogs": "unexpected" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/issueLinkType");
            then.status(200).json_body(json!({}));
        })
        .await;

    let client = client(&server);
    let transitions = client.get_transitions("PROJ-1").await.unwrap();
    assert_eq!(transitions, vec![json!({ "id": "11", "name": "Start" })]);
    assert!(client.get_comments("PROJ-1").await.unwrap().is_empty());
    assert!(client.get_worklogs("PROJ-1").await.unwrap().is_empty());
    assert!(client.get_issue_link_types().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_attachment_multipart() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/api/2/issue/PROJ-1/attachments")
                .header("x-atlassian-token", "no-check")
                .body_contains("name=\"file\"")
                .body_contains("filename=\"notes.txt\"")
                .body_contains("hello world");
            then.status(200)
                .json_body(json!([{ "filename": "notes.txt", "size": 11 }]));
        })
        .await;

    let result = client(&server)
        .add_attachment("PROJ-1", "notes.txt", b"hello world".to_vec())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result[0]["size"], json!(11));
}

#[tokio::test]
async fn test_projects_and_issue_types() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/api/2/project")
                .query_param("includeArchived", "false");
            then.status(200).json_body(json!([{ "key": "A" }, { "key": "B" }]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/project/A");
            then.status(200)
                .json_body(json!({ "key": "A", "issueTypes": [ { "name": "Bug" } ] }));
        })
        .await;
    let all_types = server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/issuetype");
            then.status(200)
                .json_body(json!([{ "name": "Bug" }, { "name": "Task" }]));
        })
        .await;

    let client = client(&server);
    assert_eq!(client.get_projects().await.unwrap().len(), 2);
    assert_eq!(
        client.get_issue_types(Some("A")).await.unwrap(),
        vec![json!({ "name": "Bug" })]
    );
    assert_eq!(client.get_issue_types(None).await.unwrap().len(), 2);
    all_types.assert_async().await;
}

#[tokio::test]
async fn test_search_users_query() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/api/2/user/search")
                .query_param("query", "jane")
                .query_param("startAt", "0")
                .query_param("maxResults", "10")
                .query_param("includeActive", "true")
                .query_param("includeInactive", "false");
            then.status(200)
                .json_body(json!([{ "accountId": "712020:abc" }]));
        })
        .await;

    let users = client(&server)
        .search_users("jane", 0, 10, false)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(users[0]["accountId"], json!("712020:abc"));
}

#[tokio::test]
async fn test_non_success_status_is_remote_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/issue/NOPE-1");
            then.status(404)
                .json_body(json!({ "errorMessages": ["Issue does not exist"] }));
        })
        .await;

    let err = client(&server)
        .get_issue("NOPE-1", None, None)
        .await
        .unwrap_err();

    match &err {
        JiraMcpError::RemoteStatus { status, body, .. } => {
            assert_eq!(*status, 404);
            assert!(body.contains("Issue does not exist"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.category(), jira_mcp::ErrorCategory::Remote);
}

#[tokio::test]
async fn test_malformed_json_is_remote_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/project/A");
            then.status(200).body("<html>login</html>");
        })
        .await;

    let err = client(&server).get_project("A").await.unwrap_err();
    assert!(matches!(err, JiraMcpError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_health_check_never_fails() {
    let server = MockServer::start_async().await;
    let ok = server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/serverInfo");
            then.status(200)
                .json_body(json!({ "version": "9.12.0", "deploymentType": "Cloud" }));
        })
        .await;

    let client = client(&server);
    let health = client.health_check().await;
    assert_eq!(health["status"], json!("ok"));
    assert_eq!(health["server_info"]["deploymentType"], json!("Cloud"));

    ok.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/serverInfo");
            then.status(500).body("boom");
        })
        .await;

    let health = client.health_check().await;
    assert_eq!(health["status"], json!("error"));
    assert!(health["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_request_timeout_is_enforced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/api/2/issue/SLOW-1");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(json!({}));
        })
        .await;

    let config = config(&server).with_request_timeout(Duration::from_millis(200));
    let err = JiraClient::new(&config)
        .unwrap()
        .get_issue("SLOW-1", None, None)
        .await
        .unwrap_err();

    match err {
        JiraMcpError::Http(e) => assert!(e.is_timeout()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_agile_and_filter_endpoints() {
    let server = MockServer::start_async().await;
    let boards = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/agile/1.0/board")
                .query_param("projectKeyOrId", "PROJ")
                .query_param("maxResults", "25");
            then.status(200).json_body(json!({ "values": [ { "id": 7 } ] }));
        })
        .await;
    let sprint_issues = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/rest/agile/1.0/sprint/3/issue")
                .json_body(json!({ "issues": ["PROJ-1", "PROJ-2"] }));
            then.status(204);
        })
        .await;
    let filter = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/api/2/search")
                .query_param("jql", "filter=10042");
            then.status(200).json_body(json!({ "issues": [] }));
        })
        .await;
    let version = server
        .mock_async(|when, then| {
            when.method(POST).path("/rest/api/2/version").json_body(json!({
                "project": "PROJ",
                "name": "2.0",
                "archived": false,
                "released": false,
            }));
            then.status(201).json_body(json!({ "id": "100" }));
        })
        .await;

    let client = client(&server);
    let page = client.get_boards(0, 25, Some("PROJ")).await.unwrap();
    assert_eq!(page["values"][0]["id"], json!(7));
    client
        .move_issues_to_sprint(3, &["PROJ-1".to_string(), "PROJ-2".to_string()])
        .await
        .unwrap();
    client.execute_filter(10042, 0, 50).await.unwrap();
    client
        .create_version(&NewVersion {
            project: "PROJ",
            name: "2.0",
            ..Default::default()
        })
        .await
        .unwrap();

    boards.assert_async().await;
    sprint_issues.assert_async().await;
    filter.assert_async().await;
    version.assert_async().await;
}
